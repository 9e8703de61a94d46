//! Template request operations (`/template-request`): the log of rendering
//! requests and its usage statistics.

use crate::error::ApiError;
use crate::query::QueryParams;
use crate::transport::{ApiRequest, Transport};
use crate::types::template_request::{
    CreateTemplateRequest, StatsRange, TemplateRequest, TemplateRequestChange, TemplateRequestEnvelope,
    TemplateRequestList, TemplateRequestListQuery, TemplateRequestStats, UpdateTemplateRequest,
};

#[derive(Debug, Clone)]
pub struct TemplateRequestApi {
    transport: Transport,
}

impl TemplateRequestApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn build_create(&self, input: &CreateTemplateRequest) -> Result<ApiRequest, ApiError> {
        ApiRequest::post("/template-request").json(input)
    }

    pub fn build_get(&self, guid: &str) -> ApiRequest {
        ApiRequest::get("/template-request").query(by_guid(guid))
    }

    pub fn build_list(&self, query: &TemplateRequestListQuery) -> ApiRequest {
        ApiRequest::get("/template-request/list").query(
            QueryParams::new()
                .push("from", query.from)
                .push("to", query.to)
                .push_opt("TemplateRequest_Name", query.name.as_deref().filter(|n| !n.is_empty())),
        )
    }

    pub fn build_update(&self, guid: &str, input: &UpdateTemplateRequest) -> Result<ApiRequest, ApiError> {
        ApiRequest::patch("/template-request").query(by_guid(guid)).json(input)
    }

    pub fn build_delete(&self, guid: &str) -> ApiRequest {
        ApiRequest::delete("/template-request").query(by_guid(guid))
    }

    pub fn build_stats(&self, range: &StatsRange) -> ApiRequest {
        ApiRequest::get("/template-request/stats").query(
            QueryParams::new()
                .push("startDate", &range.start_date)
                .push("endDate", &range.end_date),
        )
    }

    pub async fn create(&self, input: &CreateTemplateRequest) -> Result<TemplateRequestChange, ApiError> {
        self.transport.json(self.build_create(input)?).await
    }

    pub async fn get(&self, guid: &str) -> Result<TemplateRequest, ApiError> {
        let envelope: TemplateRequestEnvelope = self.transport.json(self.build_get(guid)).await?;
        Ok(envelope.template_request)
    }

    pub async fn list(&self, query: &TemplateRequestListQuery) -> Result<TemplateRequestList, ApiError> {
        self.transport.json(self.build_list(query)).await
    }

    pub async fn update(
        &self,
        guid: &str,
        input: &UpdateTemplateRequest,
    ) -> Result<TemplateRequestChange, ApiError> {
        self.transport.json(self.build_update(guid, input)?).await
    }

    /// Returns the removed record alongside the confirmation.
    pub async fn delete(&self, guid: &str) -> Result<TemplateRequestChange, ApiError> {
        self.transport.json(self.build_delete(guid)).await
    }

    pub async fn stats(&self, range: &StatsRange) -> Result<TemplateRequestStats, ApiError> {
        self.transport.json(self.build_stats(range)).await
    }
}

fn by_guid(guid: &str) -> QueryParams {
    QueryParams::new().push("TemplateRequest_guid", guid)
}
