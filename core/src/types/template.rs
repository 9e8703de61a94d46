use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Limits, Pagination};

/// Page size and margins, as CSS lengths (`"20px"`, `"210mm"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLayout {
    #[serde(rename = "Template_MarginLeft", default, skip_serializing_if = "Option::is_none")]
    pub margin_left: Option<String>,
    #[serde(rename = "Template_MarginRight", default, skip_serializing_if = "Option::is_none")]
    pub margin_right: Option<String>,
    #[serde(rename = "Template_MarginTop", default, skip_serializing_if = "Option::is_none")]
    pub margin_top: Option<String>,
    #[serde(rename = "Template_MarginBottom", default, skip_serializing_if = "Option::is_none")]
    pub margin_bottom: Option<String>,
    #[serde(rename = "Template_Width", default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(rename = "Template_Height", default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

/// Template as returned by list operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    #[serde(rename = "Template_guid")]
    pub guid: String,
    #[serde(rename = "Template_Name")]
    pub name: Option<String>,
    #[serde(rename = "Template_CreatedAt")]
    pub created_at: String,
    #[serde(rename = "User_id")]
    pub user_id: i64,
    #[serde(flatten)]
    pub layout: PageLayout,
}

/// Template including its HTML body, as returned by single-item operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDetail {
    #[serde(flatten)]
    pub template: Template,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTemplate {
    #[serde(rename = "Template_Name")]
    pub name: String,
    /// Initial HTML content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(flatten)]
    pub layout: PageLayout,
}

/// Fields to change; omitted fields are left untouched on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTemplate {
    #[serde(rename = "Template_Name", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(flatten)]
    pub layout: PageLayout,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateListQuery {
    pub from: u64,
    pub to: u64,
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateList {
    pub templates: Vec<Template>,
    pub pagination: Pagination,
    pub limits: Limits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedTemplate {
    pub message: String,
    pub template: TemplateDetail,
    pub limits: Limits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatedTemplate {
    pub message: String,
    pub template: TemplateDetail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct TemplateEnvelope {
    pub template: TemplateDetail,
}

/// Body of the preview and PDF calls: which template, rendered with what.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderTemplate {
    #[serde(rename = "Template_guid")]
    pub template_guid: String,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetUpload {
    pub message: String,
    #[serde(rename = "assetName")]
    pub asset_name: String,
    #[serde(rename = "templateGuid")]
    pub template_guid: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_flattens_template_and_layout() {
        let detail: TemplateDetail = serde_json::from_str(
            r#"{
                "Template_guid": "g-1",
                "Template_Name": null,
                "Template_CreatedAt": "2026-01-02T03:04:05Z",
                "User_id": 7,
                "Template_MarginLeft": "20px",
                "Template_Width": "210mm",
                "content": "<p>{{name}}</p>",
                "Template_Unknown": 1
            }"#,
        )
        .unwrap();
        assert_eq!(detail.template.guid, "g-1");
        assert!(detail.template.name.is_none());
        assert_eq!(detail.template.layout.margin_left.as_deref(), Some("20px"));
        assert_eq!(detail.template.layout.width.as_deref(), Some("210mm"));
        assert!(detail.template.layout.height.is_none());
        assert_eq!(detail.content, "<p>{{name}}</p>");
    }

    #[test]
    fn update_sends_only_present_fields() {
        let update = UpdateTemplate {
            content: Some("<h1/>".to_string()),
            layout: PageLayout {
                margin_top: Some("1cm".to_string()),
                ..PageLayout::default()
            },
            ..UpdateTemplate::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({"content": "<h1/>", "Template_MarginTop": "1cm"}));
    }
}
