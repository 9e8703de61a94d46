//! Domain DTOs for the document service.
//!
//! # Design
//! Field names on the wire follow the service (`Template_guid`,
//! `TemplateData_Name`, ...); Rust fields are snake_case with explicit
//! renames. Response types ignore unknown fields so additive service changes
//! do not break decoding, and fields the service documents as nullable are
//! `Option`. Update payloads skip `None` fields so only the fields to change
//! are sent.

use serde::{Deserialize, Serialize};

pub mod template;
pub mod template_data;
pub mod template_request;
pub mod user;
pub mod user_api;

/// Bounds of a returned slice of a larger collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub from: u64,
    pub to: u64,
    pub total: u64,
    pub returned: u64,
}

/// Per-account quota attached to some responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    pub current: u64,
    pub limit: u64,
    #[serde(rename = "userType")]
    pub user_type: UserType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Free,
    Pro,
    Business,
    Enterprise,
    #[serde(other)]
    Unknown,
}

/// Plain confirmation returned by delete operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_user_type_is_tolerated() {
        let limits: Limits =
            serde_json::from_str(r#"{"current":1,"limit":5,"userType":"partner"}"#).unwrap();
        assert_eq!(limits.user_type, UserType::Unknown);

        let limits: Limits = serde_json::from_str(r#"{"current":1,"limit":5,"userType":"pro"}"#).unwrap();
        assert_eq!(limits.user_type, UserType::Pro);
    }
}
