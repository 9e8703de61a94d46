//! Resource modules. Each one is a fixed catalog of operations over the
//! shared `Transport`; none of them handles errors on its own.

pub mod template;
pub mod template_data;
pub mod template_request;
pub mod user;
pub mod user_api;

pub use template::TemplateApi;
pub use template_data::TemplateDataApi;
pub use template_request::TemplateRequestApi;
pub use user::UserApi;
pub use user_api::UserApiKeyApi;
