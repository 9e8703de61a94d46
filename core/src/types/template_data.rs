use serde::{Deserialize, Serialize};

use super::Pagination;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateData {
    #[serde(rename = "TemplateData_guid")]
    pub guid: String,
    #[serde(rename = "TemplateData_Name")]
    pub name: Option<String>,
    #[serde(rename = "TemplateData_CreatedAt")]
    pub created_at: String,
    #[serde(rename = "TemplateData_UpdatedAt")]
    pub updated_at: String,
    #[serde(rename = "Template_id")]
    pub template_id: i64,
    #[serde(rename = "User_id")]
    pub user_id: i64,
}

/// Template data including the stored interface definition and payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDataDetail {
    #[serde(flatten)]
    pub record: TemplateData,
    #[serde(rename = "TemplateData_Data", default)]
    pub data: Option<String>,
    #[serde(rename = "TemplateData_Interface", default)]
    pub interface: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTemplateData {
    #[serde(rename = "TemplateData_Name")]
    pub name: String,
    /// Type declaration the data must satisfy.
    #[serde(rename = "TemplateData_Interface")]
    pub interface: String,
    /// JSON document, as a string.
    #[serde(rename = "TemplateData_Data")]
    pub data: String,
    #[serde(rename = "Template_guid")]
    pub template_guid: String,
    #[serde(rename = "User_guid")]
    pub user_guid: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTemplateData {
    #[serde(rename = "TemplateData_Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "TemplateData_Interface", skip_serializing_if = "Option::is_none")]
    pub interface: Option<String>,
    #[serde(rename = "TemplateData_Data", skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateDataListQuery {
    pub template_guid: String,
    pub from: u64,
    pub to: u64,
    pub name: Option<String>,
}

/// Parent template of a template-data listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSummary {
    #[serde(rename = "Template_guid")]
    pub guid: String,
    #[serde(rename = "Template_Name")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDataList {
    #[serde(rename = "templateData")]
    pub template_data: Vec<TemplateDataDetail>,
    pub pagination: Pagination,
    pub template: TemplateSummary,
}

/// Returned by create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDataChange {
    pub message: String,
    #[serde(rename = "templateData")]
    pub template_data: TemplateDataDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct TemplateDataEnvelope {
    #[serde(rename = "templateData")]
    pub template_data: TemplateDataDetail,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidateTemplateData {
    #[serde(rename = "TemplateData_Interface")]
    pub interface: String,
    #[serde(rename = "TemplateData_Data")]
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validation {
    pub interface: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub message: String,
    pub validation: Validation,
}

/// Which stored data to render into which template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyTemplateData {
    #[serde(rename = "Template_guid")]
    pub template_guid: String,
    #[serde(rename = "TemplateData_guid")]
    pub template_data_guid: String,
}
