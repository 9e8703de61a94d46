//! Template data operations (`/template-data`): stored payloads that can be
//! validated and rendered into a template.

use crate::error::ApiError;
use crate::query::QueryParams;
use crate::transport::{ApiRequest, Transport};
use crate::types::template_data::{
    ApplyTemplateData, CreateTemplateData, TemplateDataChange, TemplateDataDetail, TemplateDataEnvelope,
    TemplateDataList, TemplateDataListQuery, UpdateTemplateData, ValidateTemplateData, ValidationResult,
};
use crate::types::Message;

#[derive(Debug, Clone)]
pub struct TemplateDataApi {
    transport: Transport,
}

impl TemplateDataApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn build_create(&self, input: &CreateTemplateData) -> Result<ApiRequest, ApiError> {
        ApiRequest::post("/template-data").json(input)
    }

    pub fn build_get(&self, guid: &str) -> ApiRequest {
        ApiRequest::get("/template-data").query(by_guid(guid))
    }

    pub fn build_list(&self, query: &TemplateDataListQuery) -> ApiRequest {
        ApiRequest::get("/template-data/list").query(
            QueryParams::new()
                .push("Template_guid", &query.template_guid)
                .push("from", query.from)
                .push("to", query.to)
                .push_opt("TemplateData_Name", query.name.as_deref().filter(|n| !n.is_empty())),
        )
    }

    pub fn build_update(&self, guid: &str, input: &UpdateTemplateData) -> Result<ApiRequest, ApiError> {
        ApiRequest::patch("/template-data").query(by_guid(guid)).json(input)
    }

    pub fn build_delete(&self, guid: &str) -> ApiRequest {
        ApiRequest::delete("/template-data").query(by_guid(guid))
    }

    pub fn build_validate(&self, input: &ValidateTemplateData) -> Result<ApiRequest, ApiError> {
        ApiRequest::post("/template-data/validate").json(input)
    }

    pub fn build_apply(&self, input: &ApplyTemplateData) -> Result<ApiRequest, ApiError> {
        ApiRequest::post("/template-data/apply").json(input)
    }

    pub fn build_apply_and_generate_pdf(&self, input: &ApplyTemplateData) -> Result<ApiRequest, ApiError> {
        ApiRequest::post("/template-data/apply/pdf").json(input)
    }

    pub async fn create(&self, input: &CreateTemplateData) -> Result<TemplateDataChange, ApiError> {
        self.transport.json(self.build_create(input)?).await
    }

    pub async fn get(&self, guid: &str) -> Result<TemplateDataDetail, ApiError> {
        let envelope: TemplateDataEnvelope = self.transport.json(self.build_get(guid)).await?;
        Ok(envelope.template_data)
    }

    /// List the data sets stored for one template.
    pub async fn list(&self, query: &TemplateDataListQuery) -> Result<TemplateDataList, ApiError> {
        self.transport.json(self.build_list(query)).await
    }

    pub async fn update(&self, guid: &str, input: &UpdateTemplateData) -> Result<TemplateDataChange, ApiError> {
        self.transport.json(self.build_update(guid, input)?).await
    }

    pub async fn delete(&self, guid: &str) -> Result<Message, ApiError> {
        self.transport.json(self.build_delete(guid)).await
    }

    /// Check that `data` satisfies `interface` without storing anything.
    pub async fn validate(&self, input: &ValidateTemplateData) -> Result<ValidationResult, ApiError> {
        self.transport.json(self.build_validate(input)?).await
    }

    /// Render stored data into a template and return the HTML.
    pub async fn apply(&self, input: &ApplyTemplateData) -> Result<String, ApiError> {
        self.transport.text(self.build_apply(input)?).await
    }

    pub async fn apply_and_generate_pdf(&self, input: &ApplyTemplateData) -> Result<Vec<u8>, ApiError> {
        self.transport.binary(self.build_apply_and_generate_pdf(input)?).await
    }
}

fn by_guid(guid: &str) -> QueryParams {
    QueryParams::new().push("TemplateData_guid", guid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, SharedConfig};
    use crate::http::HttpMethod;
    use crate::transport::build_http_request;
    use serde_json::{json, Value};

    fn config() -> Config {
        Config::new("k").with_base_url("http://localhost:3000")
    }

    fn api() -> TemplateDataApi {
        TemplateDataApi::new(Transport::new(SharedConfig::new(config())).unwrap())
    }

    fn body_json(request: &ApiRequest) -> Value {
        serde_json::from_slice(request.body.as_ref().unwrap().as_bytes()).unwrap()
    }

    #[test]
    fn build_create_uses_service_field_names() {
        let input = CreateTemplateData {
            name: "March".to_string(),
            interface: "interface D { total: number }".to_string(),
            data: r#"{"total":3}"#.to_string(),
            template_guid: "t-1".to_string(),
            user_guid: "u-1".to_string(),
        };
        let req = api().build_create(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "/template-data");
        assert_eq!(
            body_json(&req),
            json!({
                "TemplateData_Name": "March",
                "TemplateData_Interface": "interface D { total: number }",
                "TemplateData_Data": "{\"total\":3}",
                "Template_guid": "t-1",
                "User_guid": "u-1"
            })
        );
    }

    #[test]
    fn build_list_requires_template_guid() {
        let query = TemplateDataListQuery {
            template_guid: "t-1".to_string(),
            from: 0,
            to: 10,
            name: Some("Mar".to_string()),
        };
        let http = build_http_request(&config(), api().build_list(&query));
        assert_eq!(
            http.url,
            "http://localhost:3000/template-data/list?Template_guid=t-1&from=0&to=10&TemplateData_Name=Mar"
        );
    }

    #[test]
    fn build_get_update_delete_share_guid_query() {
        let api = api();
        let update = UpdateTemplateData {
            data: Some("{}".to_string()),
            ..UpdateTemplateData::default()
        };
        let requests = [
            (api.build_get("d-1"), HttpMethod::Get),
            (api.build_update("d-1", &update).unwrap(), HttpMethod::Patch),
            (api.build_delete("d-1"), HttpMethod::Delete),
        ];
        for (req, method) in requests {
            assert_eq!(req.method, method);
            let http = build_http_request(&config(), req);
            assert_eq!(http.url, "http://localhost:3000/template-data?TemplateData_guid=d-1");
        }
    }

    #[test]
    fn build_validate_and_apply() {
        let api = api();
        let validate = api
            .build_validate(&ValidateTemplateData {
                interface: "interface A {}".to_string(),
                data: "{}".to_string(),
            })
            .unwrap();
        assert_eq!(validate.path, "/template-data/validate");
        assert_eq!(
            body_json(&validate),
            json!({"TemplateData_Interface": "interface A {}", "TemplateData_Data": "{}"})
        );

        let input = ApplyTemplateData {
            template_guid: "t-1".to_string(),
            template_data_guid: "d-1".to_string(),
        };
        let apply = api.build_apply(&input).unwrap();
        let pdf = api.build_apply_and_generate_pdf(&input).unwrap();
        assert_eq!(apply.path, "/template-data/apply");
        assert_eq!(pdf.path, "/template-data/apply/pdf");
        assert_eq!(body_json(&pdf), json!({"Template_guid": "t-1", "TemplateData_guid": "d-1"}));
    }
}
