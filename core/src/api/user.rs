//! Account operations (`/user`).

use serde_json::Value;

use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};
use crate::types::user::{CreateUser, ResendVerification, UserProfile};

#[derive(Debug, Clone)]
pub struct UserApi {
    transport: Transport,
}

impl UserApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    pub fn build_create(&self, input: &CreateUser) -> Result<ApiRequest, ApiError> {
        ApiRequest::post("/user/create").json(input)
    }

    pub fn build_resend_verification_email(&self, email: &str) -> Result<ApiRequest, ApiError> {
        ApiRequest::post("/user/resend-verification").json(&ResendVerification {
            email: email.to_string(),
        })
    }

    pub fn build_full_profile(&self) -> ApiRequest {
        ApiRequest::get("/user/profile")
    }

    /// Register a new account. The service's reply is returned as-is.
    pub async fn create(&self, input: &CreateUser) -> Result<Value, ApiError> {
        self.transport.json(self.build_create(input)?).await
    }

    pub async fn resend_verification_email(&self, email: &str) -> Result<Value, ApiError> {
        self.transport.json(self.build_resend_verification_email(email)?).await
    }

    pub async fn full_profile(&self) -> Result<UserProfile, ApiError> {
        self.transport.json(self.build_full_profile()).await
    }
}
