//! API key operations (`/userapi`).

use crate::error::ApiError;
use crate::query::QueryParams;
use crate::transport::{ApiRequest, Transport, AUTHORIZATION};
use crate::types::user_api::{
    CreateUserApiKey, CreatedUserApiKey, UpdateUserApiKey, UserApiKey, UserApiKeyChange, UserApiKeyEnvelope,
    UserApiKeyList, Verification, VerifyUserApiKey,
};

#[derive(Debug, Clone)]
pub struct UserApiKeyApi {
    transport: Transport,
}

impl UserApiKeyApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn build_create(&self, input: &CreateUserApiKey) -> Result<ApiRequest, ApiError> {
        ApiRequest::post("/userapi").json(input)
    }

    pub fn build_list(&self) -> ApiRequest {
        ApiRequest::get("/userapi/list")
    }

    pub fn build_get(&self, guid: &str) -> ApiRequest {
        ApiRequest::get("/userapi").query(by_guid(guid))
    }

    pub fn build_update(&self, guid: &str, input: &UpdateUserApiKey) -> Result<ApiRequest, ApiError> {
        ApiRequest::patch("/userapi").query(by_guid(guid)).json(input)
    }

    pub fn build_delete(&self, guid: &str) -> ApiRequest {
        ApiRequest::delete("/userapi").query(by_guid(guid))
    }

    /// The key under test travels in the body; the configured key is not
    /// sent.
    pub fn build_verify(&self, key: &str) -> Result<ApiRequest, ApiError> {
        ApiRequest::post("/userapi/verify")
            .without_header(AUTHORIZATION)
            .json(&VerifyUserApiKey { key: key.to_string() })
    }

    pub async fn create(&self, input: &CreateUserApiKey) -> Result<CreatedUserApiKey, ApiError> {
        self.transport.json(self.build_create(input)?).await
    }

    /// All keys of the authenticated user. Not paginated.
    pub async fn list(&self) -> Result<UserApiKeyList, ApiError> {
        self.transport.json(self.build_list()).await
    }

    pub async fn get(&self, guid: &str) -> Result<UserApiKey, ApiError> {
        let envelope: UserApiKeyEnvelope = self.transport.json(self.build_get(guid)).await?;
        Ok(envelope.user_api)
    }

    pub async fn update(&self, guid: &str, input: &UpdateUserApiKey) -> Result<UserApiKeyChange, ApiError> {
        self.transport.json(self.build_update(guid, input)?).await
    }

    /// Soft delete: the key is invalidated and returned.
    pub async fn delete(&self, guid: &str) -> Result<UserApiKeyChange, ApiError> {
        self.transport.json(self.build_delete(guid)).await
    }

    pub async fn verify(&self, key: &str) -> Result<Verification, ApiError> {
        self.transport.json(self.build_verify(key)?).await
    }
}

fn by_guid(guid: &str) -> QueryParams {
    QueryParams::new().push("UserApi_guid", guid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, SharedConfig};
    use crate::http::HttpMethod;
    use crate::transport::build_http_request;

    fn config() -> Config {
        Config::new("configured").with_base_url("http://localhost:3000")
    }

    fn api() -> UserApiKeyApi {
        UserApiKeyApi::new(Transport::new(SharedConfig::new(config())).unwrap())
    }

    #[test]
    fn verify_is_sent_without_authorization() {
        let req = api().build_verify("candidate").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        let http = build_http_request(&config(), req);
        assert_eq!(http.header("authorization"), None);
        assert_eq!(http.header("content-type"), Some("application/json"));
        assert_eq!(http.body.unwrap().as_bytes(), br#"{"UserApi_Key":"candidate"}"#);
    }

    #[test]
    fn list_has_no_query() {
        let http = build_http_request(&config(), api().build_list());
        assert_eq!(http.url, "http://localhost:3000/userapi/list");
        assert_eq!(http.header("authorization"), Some("Bearer configured"));
    }

    #[test]
    fn build_update_toggles_validity() {
        let input = UpdateUserApiKey {
            valid: Some(false),
            key: None,
        };
        let req = api().build_update("k-1", &input).unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.body.as_ref().unwrap().as_bytes(), br#"{"UserApi_Valid":false}"#);
        assert_eq!(
            build_http_request(&config(), req).url,
            "http://localhost:3000/userapi?UserApi_guid=k-1"
        );
    }

    #[test]
    fn build_create_get_delete() {
        let create = api()
            .build_create(&CreateUserApiKey {
                user_guid: "u-1".to_string(),
            })
            .unwrap();
        assert_eq!(create.path, "/userapi");
        assert_eq!(create.body.unwrap().as_bytes(), br#"{"User_guid":"u-1"}"#);

        assert_eq!(api().build_get("k-1").method, HttpMethod::Get);
        assert_eq!(api().build_delete("k-1").method, HttpMethod::Delete);
    }
}
