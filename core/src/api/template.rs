//! Template operations (`/template`).

use serde_json::Value;

use crate::error::ApiError;
use crate::http::Body;
use crate::query::QueryParams;
use crate::transport::{ApiRequest, Transport, CONTENT_TYPE};
use crate::types::template::{
    AssetUpload, CreateTemplate, CreatedTemplate, RenderTemplate, TemplateDetail, TemplateEnvelope,
    TemplateList, TemplateListQuery, UpdateTemplate, UpdatedTemplate,
};
use crate::types::Message;

#[derive(Debug, Clone)]
pub struct TemplateApi {
    transport: Transport,
}

impl TemplateApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn build_create(&self, input: &CreateTemplate) -> Result<ApiRequest, ApiError> {
        ApiRequest::post("/template").json(input)
    }

    pub fn build_get(&self, guid: &str) -> ApiRequest {
        ApiRequest::get("/template").query(by_guid(guid))
    }

    pub fn build_list(&self, query: &TemplateListQuery) -> ApiRequest {
        ApiRequest::get("/template/list").query(
            QueryParams::new()
                .push("from", query.from)
                .push("to", query.to)
                .push_opt("Template_Name", query.name.as_deref().filter(|n| !n.is_empty())),
        )
    }

    pub fn build_update(&self, guid: &str, input: &UpdateTemplate) -> Result<ApiRequest, ApiError> {
        ApiRequest::patch("/template").query(by_guid(guid)).json(input)
    }

    pub fn build_delete(&self, guid: &str) -> ApiRequest {
        ApiRequest::delete("/template").query(by_guid(guid))
    }

    pub fn build_preview(&self, guid: &str, data: &Value) -> Result<ApiRequest, ApiError> {
        ApiRequest::post("/template/preview").json(&render(guid, data))
    }

    pub fn build_generate_pdf(&self, guid: &str, data: &Value) -> Result<ApiRequest, ApiError> {
        ApiRequest::post("/template/pdf").json(&render(guid, data))
    }

    /// Raw upload. The JSON content type default is removed; `content_type`
    /// is sent instead when given.
    pub fn build_upload_asset(
        &self,
        guid: &str,
        asset_name: &str,
        asset: Vec<u8>,
        content_type: Option<&str>,
    ) -> ApiRequest {
        let request = ApiRequest::post("/template/upload-asset")
            .query(
                QueryParams::new()
                    .push("Template_guid", guid)
                    .push("assetName", asset_name),
            )
            .without_header(CONTENT_TYPE)
            .body(Body::Bytes(asset));
        match content_type {
            Some(content_type) => request.header(CONTENT_TYPE, content_type),
            None => request,
        }
    }

    pub async fn create(&self, input: &CreateTemplate) -> Result<CreatedTemplate, ApiError> {
        self.transport.json(self.build_create(input)?).await
    }

    /// Fetch one template including its content.
    pub async fn get(&self, guid: &str) -> Result<TemplateDetail, ApiError> {
        let envelope: TemplateEnvelope = self.transport.json(self.build_get(guid)).await?;
        Ok(envelope.template)
    }

    pub async fn list(&self, query: &TemplateListQuery) -> Result<TemplateList, ApiError> {
        self.transport.json(self.build_list(query)).await
    }

    pub async fn update(&self, guid: &str, input: &UpdateTemplate) -> Result<UpdatedTemplate, ApiError> {
        self.transport.json(self.build_update(guid, input)?).await
    }

    pub async fn delete(&self, guid: &str) -> Result<Message, ApiError> {
        self.transport.json(self.build_delete(guid)).await
    }

    /// Render the template with `data` and return the resulting HTML.
    pub async fn preview(&self, guid: &str, data: &Value) -> Result<String, ApiError> {
        self.transport.text(self.build_preview(guid, data)?).await
    }

    /// Render the template with `data` and return the PDF bytes.
    pub async fn generate_pdf(&self, guid: &str, data: &Value) -> Result<Vec<u8>, ApiError> {
        self.transport.binary(self.build_generate_pdf(guid, data)?).await
    }

    pub async fn upload_asset(
        &self,
        guid: &str,
        asset_name: &str,
        asset: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<AssetUpload, ApiError> {
        self.transport
            .json(self.build_upload_asset(guid, asset_name, asset, content_type))
            .await
    }
}

fn by_guid(guid: &str) -> QueryParams {
    QueryParams::new().push("Template_guid", guid)
}

fn render(guid: &str, data: &Value) -> RenderTemplate {
    RenderTemplate {
        template_guid: guid.to_string(),
        data: data.clone(),
    }
}
