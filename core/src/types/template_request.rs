use serde::{Deserialize, Serialize};

use super::Pagination;

/// One recorded rendering request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRequest {
    #[serde(rename = "TemplateRequest_guid")]
    pub guid: String,
    #[serde(rename = "TemplateRequest_CreatedAt")]
    pub created_at: String,
    #[serde(rename = "TemplateRequest_Name")]
    pub name: String,
    #[serde(rename = "User_id")]
    pub user_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTemplateRequest {
    #[serde(rename = "Template_guid")]
    pub template_guid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTemplateRequest {
    #[serde(rename = "TemplateRequest_CreatedAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(rename = "TemplateRequest_Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateRequestListQuery {
    pub from: u64,
    pub to: u64,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRequestList {
    #[serde(rename = "templateRequests")]
    pub template_requests: Vec<TemplateRequest>,
    pub pagination: Pagination,
}

/// Returned by create, update and delete. Delete carries the removed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRequestChange {
    pub message: String,
    #[serde(rename = "templateRequest")]
    pub template_request: TemplateRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct TemplateRequestEnvelope {
    #[serde(rename = "templateRequest")]
    pub template_request: TemplateRequest,
}

/// Date range for usage statistics, as ISO dates (`2026-01-31`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsRange {
    pub start_date: String,
    pub end_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRef {
    #[serde(rename = "Template_Name")]
    pub name: String,
    #[serde(rename = "Template_guid")]
    pub guid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateUsage {
    #[serde(rename = "Template")]
    pub template: TemplateRef,
    #[serde(rename = "totalRequests")]
    pub total_requests: u64,
    #[serde(rename = "totalFileSize")]
    pub total_file_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateRequestStats {
    #[serde(rename = "startDate")]
    pub start_date: String,
    #[serde(rename = "endDate")]
    pub end_date: String,
    #[serde(rename = "totalRequests")]
    pub total_requests: u64,
    #[serde(rename = "totalFileSize")]
    pub total_file_size: u64,
    #[serde(rename = "Templates", default)]
    pub templates: Vec<TemplateUsage>,
}
