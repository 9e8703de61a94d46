use serde::{Deserialize, Serialize};

use super::Limits;

/// An API key belonging to the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserApiKey {
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

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserApiKey {
    #[serde(rename = "User_guid")]
    pub user_guid: String,
}

/// Enable/disable a key or rotate its value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUserApiKey {
    #[serde(rename = "UserApi_Valid", skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(rename = "UserApi_Key", skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedUserApiKey {
    pub message: String,
    #[serde(rename = "userApi")]
    pub user_api: UserApiKey,
    pub limits: Limits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserApiKeyList {
    #[serde(rename = "userApis")]
    pub user_apis: Vec<UserApiKey>,
    pub limits: Limits,
}

/// Returned by update and delete. Delete carries the (now invalid) key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserApiKeyChange {
    pub message: String,
    #[serde(rename = "userApi")]
    pub user_api: UserApiKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct UserApiKeyEnvelope {
    #[serde(rename = "userApi")]
    pub user_api: UserApiKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct VerifyUserApiKey {
    #[serde(rename = "UserApi_Key")]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedKey {
    #[serde(rename = "UserApi_guid")]
    pub guid: String,
    #[serde(rename = "UserApi_Valid")]
    pub valid: bool,
    #[serde(rename = "UserApi_CreatedAt")]
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedUser {
    #[serde(rename = "User_guid")]
    pub guid: String,
    #[serde(rename = "User_Name")]
    pub name: String,
    #[serde(rename = "User_Type")]
    pub user_type: String,
    #[serde(rename = "User_Active")]
    pub active: bool,
}

/// Result of checking a key. Key and owner details are only present for
/// valid keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    pub valid: bool,
    #[serde(rename = "userApi", default, skip_serializing_if = "Option::is_none")]
    pub user_api: Option<VerifiedKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<VerifiedUser>,
}
