//! Records held by the in-memory store and the payloads the handlers accept.
//!
//! Wire names follow the document service. Internal bookkeeping fields are
//! `#[serde(skip)]` so a record serializes exactly as the service would send
//! it.

use serde::{Deserialize, Serialize};

pub const USER_ID: i64 = 1;
pub const USER_GUID: &str = "6f1c8f56-4b6e-4f5a-9f61-3d2a7c1e0b11";
pub const USER_NAME: &str = "mock-user";
pub const USER_EMAIL: &str = "mock-user@example.com";
pub const USER_TYPE: &str = "free";
pub const TEMPLATE_LIMIT: u64 = 25;
pub const API_KEY_LIMIT: u64 = 5;

#[derive(Debug, Clone, Serialize)]
pub struct Template {
    #[serde(skip)]
    pub id: i64,
    #[serde(rename = "Template_guid")]
    pub guid: String,
    #[serde(rename = "Template_Name")]
    pub name: Option<String>,
    #[serde(rename = "Template_CreatedAt")]
    pub created_at: String,
    #[serde(rename = "User_id")]
    pub user_id: i64,
    #[serde(rename = "Template_MarginLeft")]
    pub margin_left: String,
    #[serde(rename = "Template_MarginRight")]
    pub margin_right: String,
    #[serde(rename = "Template_MarginTop")]
    pub margin_top: String,
    #[serde(rename = "Template_MarginBottom")]
    pub margin_bottom: String,
    #[serde(rename = "Template_Width")]
    pub width: String,
    #[serde(rename = "Template_Height")]
    pub height: String,
    #[serde(skip)]
    pub content: String,
    #[serde(skip)]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone)]
pub struct Asset {
    pub name: String,
    pub content_type: Option<String>,
    pub size: usize,
}

/// Single-item projection of a template: the record plus its HTML.
#[derive(Serialize)]
pub struct TemplateWithContent<'a> {
    #[serde(flatten)]
    pub template: &'a Template,
    pub content: &'a str,
}

impl Template {
    pub fn with_content(&self) -> TemplateWithContent<'_> {
        TemplateWithContent {
            template: self,
            content: &self.content,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
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
    #[serde(rename = "TemplateData_Data")]
    pub data: Option<String>,
    #[serde(rename = "TemplateData_Interface")]
    pub interface: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateRequest {
    #[serde(rename = "TemplateRequest_guid")]
    pub guid: String,
    #[serde(rename = "TemplateRequest_CreatedAt")]
    pub created_at: String,
    #[serde(rename = "TemplateRequest_Name")]
    pub name: String,
    #[serde(rename = "User_id")]
    pub user_id: i64,
    #[serde(skip)]
    pub template_guid: String,
    #[serde(skip)]
    pub file_size: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserApi {
    #[serde(rename = "UserApi_guid")]
    pub guid: String,
    #[serde(rename = "UserApi_Key")]
    pub key: String,
    #[serde(rename = "UserApi_Valid")]
    pub valid: bool,
    #[serde(rename = "UserApi_CreatedAt")]
    pub created_at: String,
    #[serde(rename = "UserApi_UpdatedAt")]
    pub updated_at: String,
    #[serde(rename = "User_id")]
    pub user_id: i64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Pagination {
    pub from: u64,
    pub to: u64,
    pub total: u64,
    pub returned: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Limits {
    pub current: u64,
    pub limit: u64,
    #[serde(rename = "userType")]
    pub user_type: &'static str,
}

impl Limits {
    pub fn new(current: usize, limit: u64) -> Self {
        Self {
            current: current as u64,
            limit,
            user_type: USER_TYPE,
        }
    }
}

/// Slice `items` by the half-open range `[from, to)`, clamped to the
/// collection.
pub fn paginate<T: Clone>(items: &[T], from: u64, to: u64) -> (Vec<T>, Pagination) {
    let len = items.len();
    let start = (from as usize).min(len);
    let end = (to as usize).min(len).max(start);
    let page = items[start..end].to_vec();
    let pagination = Pagination {
        from,
        to,
        total: len as u64,
        returned: page.len() as u64,
    };
    (page, pagination)
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct Layout {
    #[serde(rename = "Template_MarginLeft")]
    pub margin_left: Option<String>,
    #[serde(rename = "Template_MarginRight")]
    pub margin_right: Option<String>,
    #[serde(rename = "Template_MarginTop")]
    pub margin_top: Option<String>,
    #[serde(rename = "Template_MarginBottom")]
    pub margin_bottom: Option<String>,
    #[serde(rename = "Template_Width")]
    pub width: Option<String>,
    #[serde(rename = "Template_Height")]
    pub height: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTemplate {
    #[serde(rename = "Template_Name")]
    pub name: Option<String>,
    pub content: Option<String>,
    #[serde(flatten)]
    pub layout: Layout,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTemplate {
    #[serde(rename = "Template_Name")]
    pub name: Option<String>,
    pub content: Option<String>,
    #[serde(flatten)]
    pub layout: Layout,
}

#[derive(Debug, Deserialize)]
pub struct RenderTemplate {
    #[serde(rename = "Template_guid")]
    pub template_guid: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct CreateTemplateData {
    #[serde(rename = "TemplateData_Name")]
    pub name: Option<String>,
    #[serde(rename = "TemplateData_Interface")]
    pub interface: Option<String>,
    #[serde(rename = "TemplateData_Data")]
    pub data: Option<String>,
    #[serde(rename = "Template_guid")]
    pub template_guid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTemplateData {
    #[serde(rename = "TemplateData_Name")]
    pub name: Option<String>,
    #[serde(rename = "TemplateData_Interface")]
    pub interface: Option<String>,
    #[serde(rename = "TemplateData_Data")]
    pub data: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ValidateTemplateData {
    #[serde(rename = "TemplateData_Interface")]
    pub interface: Option<String>,
    #[serde(rename = "TemplateData_Data")]
    pub data: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ApplyTemplateData {
    #[serde(rename = "Template_guid")]
    pub template_guid: Option<String>,
    #[serde(rename = "TemplateData_guid")]
    pub template_data_guid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTemplateRequest {
    #[serde(rename = "Template_guid")]
    pub template_guid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTemplateRequest {
    #[serde(rename = "TemplateRequest_CreatedAt")]
    pub created_at: Option<String>,
    #[serde(rename = "TemplateRequest_Name")]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserApi {
    #[serde(rename = "User_guid")]
    pub user_guid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserApi {
    #[serde(rename = "UserApi_Valid")]
    pub valid: Option<bool>,
    #[serde(rename = "UserApi_Key")]
    pub key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VerifyUserApi {
    #[serde(rename = "UserApi_Key")]
    pub key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
    #[serde(rename = "User_Name")]
    pub name: Option<String>,
    #[serde(rename = "User_Email")]
    pub email: Option<String>,
    #[serde(rename = "User_Password")]
    pub password: Option<String>,
    #[serde(rename = "User_TermsOfService")]
    pub terms_of_service: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResendVerification {
    #[serde(rename = "User_Email")]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_clamps_to_collection() {
        let items: Vec<u32> = (0..5).collect();
        let (page, pagination) = paginate(&items, 3, 10);
        assert_eq!(page, vec![3, 4]);
        assert_eq!(pagination.total, 5);
        assert_eq!(pagination.returned, 2);
        assert_eq!(pagination.to, 10);

        let (page, pagination) = paginate(&items, 8, 2);
        assert!(page.is_empty());
        assert_eq!(pagination.returned, 0);
    }

    #[test]
    fn paginate_empty_collection() {
        let (page, pagination) = paginate::<u32>(&[], 0, 10);
        assert!(page.is_empty());
        assert_eq!((pagination.from, pagination.to, pagination.total, pagination.returned), (0, 10, 0, 0));
    }

    #[test]
    fn template_with_content_flattens() {
        let template = Template {
            id: 1,
            guid: "g".to_string(),
            name: Some("T".to_string()),
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
            user_id: USER_ID,
            margin_left: "0px".to_string(),
            margin_right: "0px".to_string(),
            margin_top: "0px".to_string(),
            margin_bottom: "0px".to_string(),
            width: "210mm".to_string(),
            height: "297mm".to_string(),
            content: "<p/>".to_string(),
            assets: Vec::new(),
        };
        let json = serde_json::to_value(template.with_content()).unwrap();
        assert_eq!(json["Template_guid"], "g");
        assert_eq!(json["content"], "<p/>");
        assert!(json.get("id").is_none());

        let json = serde_json::to_value(&template).unwrap();
        assert!(json.get("content").is_none());
    }

    #[test]
    fn create_template_fields_are_optional() {
        let input: CreateTemplate = serde_json::from_str(r#"{"Template_Width":"100mm"}"#).unwrap();
        assert!(input.name.is_none());
        assert_eq!(input.layout.width.as_deref(), Some("100mm"));
    }
}
