//! Async client for the DocMason document templating and PDF generation
//! service.
//!
//! # Overview
//! Five resource modules (templates, template data, template requests, API
//! keys, users) sit behind the `DocMason` facade and share one transport
//! core that shapes requests, sends them with reqwest and classifies the
//! responses into JSON, text or binary payloads.
//!
//! # Design
//! - Request construction and response classification are pure functions
//!   over plain-data `HttpRequest` / `HttpResponse` values; only
//!   `Transport::send` does I/O. Every operation also has a `build_*`
//!   method, so another HTTP stack can drive the same requests.
//! - Every failure is an `ApiError` with the HTTP status, or status 0 when
//!   no response was received.
//! - Configuration is shared by reference and read at call time; see
//!   `DocMason::update_config`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.
//!
//! ```no_run
//! use docmason_core::{Config, DocMason};
//! use docmason_core::types::template::CreateTemplate;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DocMason::new(Config::new("api-key"))?;
//! let created = client
//!     .template()
//!     .create(&CreateTemplate {
//!         name: "Invoice".to_string(),
//!         content: Some("<h1>{{number}}</h1>".to_string()),
//!         ..CreateTemplate::default()
//!     })
//!     .await?;
//! let pdf = client
//!     .template()
//!     .generate_pdf(&created.template.template.guid, &serde_json::json!({"number": 7}))
//!     .await?;
//! std::fs::write("invoice.pdf", pdf)?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod transport;
pub mod types;

pub use client::DocMason;
pub use config::{Config, ConfigSummary, ConfigUpdate, SharedConfig, DEFAULT_BASE_URL};
pub use error::{ApiError, ConfigError, ErrorKind, FieldError};
pub use http::{Body, HttpMethod, HttpRequest, HttpResponse};
pub use query::QueryParams;
pub use transport::{build_http_request, classify_response, ApiRequest, Envelope, Payload, Transport};
