use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUser {
    #[serde(rename = "User_Name")]
    pub name: String,
    #[serde(rename = "User_Email")]
    pub email: String,
    #[serde(rename = "User_Password")]
    pub password: String,
    /// Acceptance timestamp, ISO 8601.
    #[serde(rename = "User_TermsOfService")]
    pub terms_of_service: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct ResendVerification {
    #[serde(rename = "User_Email")]
    pub email: String,
}

/// The authenticated user's profile, including private fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "User_guid")]
    pub guid: String,
    #[serde(rename = "User_Email")]
    pub email: String,
    #[serde(rename = "User_FirstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "User_LastName", default)]
    pub last_name: Option<String>,
    #[serde(rename = "User_TermsOfService")]
    pub terms_of_service: String,
    #[serde(rename = "User_Active")]
    pub active: bool,
}
