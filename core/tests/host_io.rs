//! Drive the pure request builders and response classifier with a blocking
//! HTTP stack instead of the built-in reqwest executor.
//!
//! # Design
//! The mock server runs on its own thread with a private runtime. Every
//! request goes through `build_*` -> `build_http_request` -> ureq ->
//! `classify_response`, so nothing here touches `Transport::send`.

use docmason_core::types::template::{CreateTemplate, CreatedTemplate, TemplateListQuery};
use docmason_core::types::user_api::Verification;
use docmason_core::{
    build_http_request, classify_response, ApiError, ApiRequest, Body, Config, DocMason, Envelope, ErrorKind,
    HttpMethod, HttpRequest, HttpResponse,
};
use serde_json::json;
use ureq::typestate::WithBody;
use ureq::RequestBuilder;

const API_KEY: &str = "host-io-key";

/// Execute an `HttpRequest` with ureq and return an `HttpResponse`.
///
/// Status codes are returned as data rather than `Err` so the classifier
/// sees 4xx/5xx responses.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let result = match req.method {
        HttpMethod::Get => with_headers(agent.get(&req.url), &req.headers).call(),
        HttpMethod::Delete => with_headers(agent.delete(&req.url), &req.headers).call(),
        HttpMethod::Post => send(with_headers(agent.post(&req.url), &req.headers), req.body),
        HttpMethod::Patch => send(with_headers(agent.patch(&req.url), &req.headers), req.body),
    };
    let mut response = result.expect("HTTP transport error");

    let status = response.status();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response.body_mut().read_to_vec().unwrap_or_default();

    HttpResponse {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or_default().to_string(),
        headers,
        body,
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(builder: RequestBuilder<WithBody>, body: Option<Body>) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => {
            let bytes = body.into_bytes();
            builder.send(&bytes[..])
        }
        None => builder.send_empty(),
    }
}

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run_with_key(listener, API_KEY).await
        })
        .unwrap();
    });

    format!("http://{addr}/api/v1")
}

fn round_trip(config: &Config, request: ApiRequest) -> Result<Envelope, ApiError> {
    classify_response(execute(build_http_request(config, request)))
}

#[test]
fn template_round_trip_over_ureq() {
    let config = Config::new(API_KEY).with_base_url(start_server());
    let client = DocMason::new(config.clone()).unwrap();

    let request = client
        .template()
        .build_create(&CreateTemplate {
            name: "Host".to_string(),
            content: Some("<b>{{who}}</b>".to_string()),
            ..CreateTemplate::default()
        })
        .unwrap();
    let created: CreatedTemplate = round_trip(&config, request).unwrap().into_json().unwrap();
    let guid = created.template.template.guid;

    let list = round_trip(
        &config,
        client.template().build_list(&TemplateListQuery {
            from: 0,
            to: 5,
            name: Some(String::new()),
        }),
    )
    .unwrap();
    let list: serde_json::Value = list.into_json().unwrap();
    assert_eq!(list["pagination"]["total"], 1);

    let html = round_trip(&config, client.template().build_preview(&guid, &json!({"who": "host"})).unwrap())
        .unwrap()
        .into_text()
        .unwrap();
    assert_eq!(html, "<b>host</b>");

    let pdf = round_trip(
        &config,
        client.template().build_generate_pdf(&guid, &json!({"who": "host"})).unwrap(),
    )
    .unwrap()
    .into_bytes()
    .unwrap();
    assert!(pdf.starts_with(b"%PDF-"));

    round_trip(&config, client.template().build_delete(&guid)).unwrap();
    let err = round_trip(&config, client.template().build_get(&guid)).unwrap_err();
    assert_eq!(err.kind, ErrorKind::Http);
    assert_eq!(err.status, 404);
}

#[test]
fn verify_without_credentials_over_ureq() {
    let config = Config::new(API_KEY).with_base_url(start_server());
    let client = DocMason::new(config.clone()).unwrap();

    let request = build_http_request(&config, client.user_api().build_verify(API_KEY).unwrap());
    assert!(request.header("authorization").is_none());

    let verification: Verification = classify_response(execute(request)).unwrap().into_json().unwrap();
    assert!(verification.valid);
}

#[test]
fn wrong_key_is_rejected_over_ureq() {
    let config = Config::new("not-the-key").with_base_url(start_server());
    let client = DocMason::new(config.clone()).unwrap();

    let err = round_trip(&config, client.user().build_full_profile()).unwrap_err();
    assert_eq!(err.status, 401);
    assert_eq!(err.message, "Invalid or missing API key");
}
