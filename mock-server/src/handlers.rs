use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;
use uuid::Uuid;

use crate::model::*;
use crate::{timestamp, AppState, MockError, Store};

type JsonResult = Result<Json<Value>, MockError>;
type CreatedResult = Result<(StatusCode, Json<Value>), MockError>;

// ---------------------------------------------------------------------------
// Query strings
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct TemplateQuery {
    #[serde(rename = "Template_guid")]
    guid: Option<String>,
}

#[derive(Deserialize)]
pub struct TemplateListQuery {
    from: Option<u64>,
    to: Option<u64>,
    #[serde(rename = "Template_Name")]
    name: Option<String>,
}

#[derive(Deserialize)]
pub struct AssetQuery {
    #[serde(rename = "Template_guid")]
    guid: Option<String>,
    #[serde(rename = "assetName")]
    asset_name: Option<String>,
}

#[derive(Deserialize)]
pub struct TemplateDataQuery {
    #[serde(rename = "TemplateData_guid")]
    guid: Option<String>,
}

#[derive(Deserialize)]
pub struct TemplateDataListQuery {
    #[serde(rename = "Template_guid")]
    template_guid: Option<String>,
    from: Option<u64>,
    to: Option<u64>,
    #[serde(rename = "TemplateData_Name")]
    name: Option<String>,
}

#[derive(Deserialize)]
pub struct TemplateRequestQuery {
    #[serde(rename = "TemplateRequest_guid")]
    guid: Option<String>,
}

#[derive(Deserialize)]
pub struct TemplateRequestListQuery {
    from: Option<u64>,
    to: Option<u64>,
    #[serde(rename = "TemplateRequest_Name")]
    name: Option<String>,
}

#[derive(Deserialize)]
pub struct StatsQuery {
    #[serde(rename = "startDate")]
    start_date: Option<String>,
    #[serde(rename = "endDate")]
    end_date: Option<String>,
}

#[derive(Deserialize)]
pub struct UserApiQuery {
    #[serde(rename = "UserApi_guid")]
    guid: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn required_query(value: Option<String>, param: &'static str) -> Result<String, MockError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| MockError::invalid_query(format!("{param} is required"), param))
}

fn required_body(value: Option<String>, param: &'static str) -> Result<String, MockError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| MockError::invalid_body(format!("{param} is required"), param))
}

fn range(from: Option<u64>, to: Option<u64>) -> Result<(u64, u64), MockError> {
    let from = from.ok_or_else(|| MockError::invalid_query("from is required", "from"))?;
    let to = to.ok_or_else(|| MockError::invalid_query("to is required", "to"))?;
    Ok((from, to))
}

fn name_matches(name: Option<&str>, filter: Option<&str>) -> bool {
    match filter.filter(|f| !f.is_empty()) {
        Some(filter) => name.is_some_and(|name| name.to_lowercase().contains(&filter.to_lowercase())),
        None => true,
    }
}

fn parse_json_data(data: &str, param: &'static str) -> Result<Value, MockError> {
    serde_json::from_str(data).map_err(|_| MockError::invalid_body(format!("{param} must be valid JSON"), param))
}

const TEMPLATE_NOT_FOUND: MockError = MockError::NotFound {
    msg: "Template not found",
    param: "Template_guid",
};

const TEMPLATE_DATA_NOT_FOUND: MockError = MockError::NotFound {
    msg: "Template data not found",
    param: "TemplateData_guid",
};

const TEMPLATE_REQUEST_NOT_FOUND: MockError = MockError::NotFound {
    msg: "Template request not found",
    param: "TemplateRequest_guid",
};

const USER_API_NOT_FOUND: MockError = MockError::NotFound {
    msg: "API key not found",
    param: "UserApi_guid",
};

fn template_index(store: &Store, guid: &str) -> Result<usize, MockError> {
    store
        .templates
        .iter()
        .position(|t| t.guid == guid)
        .ok_or(TEMPLATE_NOT_FOUND)
}

fn template_data_index(store: &Store, guid: &str) -> Result<usize, MockError> {
    store
        .template_data
        .iter()
        .position(|d| d.guid == guid)
        .ok_or(TEMPLATE_DATA_NOT_FOUND)
}

fn template_request_index(store: &Store, guid: &str) -> Result<usize, MockError> {
    store
        .template_requests
        .iter()
        .position(|r| r.guid == guid)
        .ok_or(TEMPLATE_REQUEST_NOT_FOUND)
}

fn user_api_index(store: &Store, guid: &str) -> Result<usize, MockError> {
    store
        .user_apis
        .iter()
        .position(|k| k.guid == guid)
        .ok_or(USER_API_NOT_FOUND)
}

/// Replace `{{key}}` with the matching top-level field of `data`.
fn render(content: &str, data: &Value) -> String {
    let mut html = content.to_string();
    if let Value::Object(fields) = data {
        for (key, value) in fields {
            let replacement = match value {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            html = html.replace(&format!("{{{{{key}}}}}"), &replacement);
        }
    }
    html
}

fn pdf_bytes(html: &str) -> Vec<u8> {
    let mut pdf = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
    pdf.extend_from_slice(html.as_bytes());
    pdf.extend_from_slice(b"\n%%EOF\n");
    pdf
}

fn record_request(store: &mut Store, template_index: usize, file_size: u64) -> TemplateRequest {
    let template = &store.templates[template_index];
    let request = TemplateRequest {
        guid: Uuid::new_v4().to_string(),
        created_at: timestamp(),
        name: template.name.clone().unwrap_or_else(|| "Untitled".to_string()),
        user_id: USER_ID,
        template_guid: template.guid.clone(),
        file_size,
    };
    store.template_requests.push(request.clone());
    request
}

fn html_response(html: String) -> Response {
    ([(CONTENT_TYPE, "text/html; charset=utf-8")], html).into_response()
}

fn pdf_response(pdf: Vec<u8>) -> Response {
    ([(CONTENT_TYPE, "application/pdf")], pdf).into_response()
}

// ---------------------------------------------------------------------------
// /template
// ---------------------------------------------------------------------------

pub async fn create_template(State(state): State<AppState>, Json(input): Json<CreateTemplate>) -> CreatedResult {
    let name = required_body(input.name, "Template_Name")?;
    let mut store = state.db.write().await;
    if store.templates.len() as u64 >= TEMPLATE_LIMIT {
        return Err(MockError::LimitReached(Limits::new(store.templates.len(), TEMPLATE_LIMIT)));
    }

    let layout = input.layout;
    let template = Template {
        id: store.next_id(),
        guid: Uuid::new_v4().to_string(),
        name: Some(name),
        created_at: timestamp(),
        user_id: USER_ID,
        margin_left: layout.margin_left.unwrap_or_else(|| "0px".to_string()),
        margin_right: layout.margin_right.unwrap_or_else(|| "0px".to_string()),
        margin_top: layout.margin_top.unwrap_or_else(|| "0px".to_string()),
        margin_bottom: layout.margin_bottom.unwrap_or_else(|| "0px".to_string()),
        width: layout.width.unwrap_or_else(|| "210mm".to_string()),
        height: layout.height.unwrap_or_else(|| "297mm".to_string()),
        content: input.content.unwrap_or_default(),
        assets: Vec::new(),
    };
    store.templates.push(template.clone());
    info!(guid = %template.guid, "template created");

    let limits = Limits::new(store.templates.len(), TEMPLATE_LIMIT);
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Template created successfully",
            "template": template.with_content(),
            "limits": limits,
        })),
    ))
}

pub async fn get_template(State(state): State<AppState>, Query(query): Query<TemplateQuery>) -> JsonResult {
    let guid = required_query(query.guid, "Template_guid")?;
    let store = state.db.read().await;
    let template = &store.templates[template_index(&store, &guid)?];
    Ok(Json(json!({ "template": template.with_content() })))
}

pub async fn list_templates(State(state): State<AppState>, Query(query): Query<TemplateListQuery>) -> JsonResult {
    let (from, to) = range(query.from, query.to)?;
    let store = state.db.read().await;
    let matching: Vec<Template> = store
        .templates
        .iter()
        .filter(|t| name_matches(t.name.as_deref(), query.name.as_deref()))
        .cloned()
        .collect();
    let (templates, pagination) = paginate(&matching, from, to);
    Ok(Json(json!({
        "templates": templates,
        "pagination": pagination,
        "limits": Limits::new(store.templates.len(), TEMPLATE_LIMIT),
    })))
}

pub async fn update_template(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
    Json(input): Json<UpdateTemplate>,
) -> JsonResult {
    let guid = required_query(query.guid, "Template_guid")?;
    if input.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(MockError::invalid_body("Template_Name must not be empty", "Template_Name"));
    }
    let mut store = state.db.write().await;
    let index = template_index(&store, &guid)?;
    let template = &mut store.templates[index];

    let layout = input.layout;
    if let Some(name) = input.name {
        template.name = Some(name);
    }
    if let Some(content) = input.content {
        template.content = content;
    }
    for (field, value) in [
        (&mut template.margin_left, layout.margin_left),
        (&mut template.margin_right, layout.margin_right),
        (&mut template.margin_top, layout.margin_top),
        (&mut template.margin_bottom, layout.margin_bottom),
        (&mut template.width, layout.width),
        (&mut template.height, layout.height),
    ] {
        if let Some(value) = value {
            *field = value;
        }
    }
    info!(guid = %guid, "template updated");

    Ok(Json(json!({
        "message": "Template updated successfully",
        "template": template.with_content(),
    })))
}

pub async fn delete_template(State(state): State<AppState>, Query(query): Query<TemplateQuery>) -> JsonResult {
    let guid = required_query(query.guid, "Template_guid")?;
    let mut store = state.db.write().await;
    let index = template_index(&store, &guid)?;
    let template = store.templates.remove(index);
    store.template_data.retain(|d| d.template_id != template.id);
    info!(guid = %guid, "template deleted");
    Ok(Json(json!({ "message": "Template deleted successfully" })))
}

pub async fn preview_template(
    State(state): State<AppState>,
    Json(input): Json<RenderTemplate>,
) -> Result<Response, MockError> {
    let guid = required_body(input.template_guid, "Template_guid")?;
    let store = state.db.read().await;
    let template = &store.templates[template_index(&store, &guid)?];
    Ok(html_response(render(&template.content, &input.data)))
}

pub async fn template_pdf(State(state): State<AppState>, Json(input): Json<RenderTemplate>) -> Result<Response, MockError> {
    let guid = required_body(input.template_guid, "Template_guid")?;
    let mut store = state.db.write().await;
    let index = template_index(&store, &guid)?;
    let pdf = pdf_bytes(&render(&store.templates[index].content, &input.data));
    record_request(&mut store, index, pdf.len() as u64);
    info!(guid = %guid, size = pdf.len(), "pdf generated");
    Ok(pdf_response(pdf))
}

pub async fn upload_asset(
    State(state): State<AppState>,
    Query(query): Query<AssetQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> JsonResult {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    if content_type
        .as_deref()
        .is_some_and(|ct| ct.starts_with("application/json"))
    {
        return Err(MockError::UnsupportedMediaType);
    }
    let guid = required_query(query.guid, "Template_guid")?;
    let asset_name = required_query(query.asset_name, "assetName")?;
    if body.is_empty() {
        return Err(MockError::invalid_body("Asset body is empty", "asset"));
    }

    let mut store = state.db.write().await;
    let index = template_index(&store, &guid)?;
    store.templates[index].assets.push(Asset {
        name: asset_name.clone(),
        content_type,
        size: body.len(),
    });
    info!(guid = %guid, asset = %asset_name, size = body.len(), "asset uploaded");

    Ok(Json(json!({
        "message": "Asset uploaded successfully",
        "assetName": asset_name,
        "templateGuid": guid,
    })))
}

// ---------------------------------------------------------------------------
// /template-data
// ---------------------------------------------------------------------------

pub async fn create_template_data(
    State(state): State<AppState>,
    Json(input): Json<CreateTemplateData>,
) -> CreatedResult {
    let name = required_body(input.name, "TemplateData_Name")?;
    let interface = required_body(input.interface, "TemplateData_Interface")?;
    let data = required_body(input.data, "TemplateData_Data")?;
    parse_json_data(&data, "TemplateData_Data")?;
    let template_guid = required_body(input.template_guid, "Template_guid")?;

    let mut store = state.db.write().await;
    let template_id = store.templates[template_index(&store, &template_guid)?].id;
    let now = timestamp();
    let record = TemplateData {
        guid: Uuid::new_v4().to_string(),
        name: Some(name),
        created_at: now.clone(),
        updated_at: now,
        template_id,
        user_id: USER_ID,
        data: Some(data),
        interface: Some(interface),
    };
    store.template_data.push(record.clone());
    info!(guid = %record.guid, template = %template_guid, "template data created");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Template data created successfully", "templateData": record })),
    ))
}

pub async fn get_template_data(State(state): State<AppState>, Query(query): Query<TemplateDataQuery>) -> JsonResult {
    let guid = required_query(query.guid, "TemplateData_guid")?;
    let store = state.db.read().await;
    let record = &store.template_data[template_data_index(&store, &guid)?];
    Ok(Json(json!({ "templateData": record })))
}

pub async fn list_template_data(
    State(state): State<AppState>,
    Query(query): Query<TemplateDataListQuery>,
) -> JsonResult {
    let template_guid = required_query(query.template_guid, "Template_guid")?;
    let (from, to) = range(query.from, query.to)?;
    let store = state.db.read().await;
    let template = &store.templates[template_index(&store, &template_guid)?];
    let matching: Vec<TemplateData> = store
        .template_data
        .iter()
        .filter(|d| d.template_id == template.id && name_matches(d.name.as_deref(), query.name.as_deref()))
        .cloned()
        .collect();
    let (records, pagination) = paginate(&matching, from, to);
    Ok(Json(json!({
        "templateData": records,
        "pagination": pagination,
        "template": { "Template_guid": template.guid, "Template_Name": template.name },
    })))
}

pub async fn update_template_data(
    State(state): State<AppState>,
    Query(query): Query<TemplateDataQuery>,
    Json(input): Json<UpdateTemplateData>,
) -> JsonResult {
    let guid = required_query(query.guid, "TemplateData_guid")?;
    if let Some(data) = &input.data {
        parse_json_data(data, "TemplateData_Data")?;
    }
    let mut store = state.db.write().await;
    let index = template_data_index(&store, &guid)?;
    let record = &mut store.template_data[index];
    if let Some(name) = input.name {
        record.name = Some(name);
    }
    if let Some(interface) = input.interface {
        record.interface = Some(interface);
    }
    if let Some(data) = input.data {
        record.data = Some(data);
    }
    record.updated_at = timestamp();
    info!(guid = %guid, "template data updated");
    Ok(Json(json!({ "message": "Template data updated successfully", "templateData": record })))
}

pub async fn delete_template_data(
    State(state): State<AppState>,
    Query(query): Query<TemplateDataQuery>,
) -> JsonResult {
    let guid = required_query(query.guid, "TemplateData_guid")?;
    let mut store = state.db.write().await;
    let index = template_data_index(&store, &guid)?;
    store.template_data.remove(index);
    info!(guid = %guid, "template data deleted");
    Ok(Json(json!({ "message": "Template data deleted successfully" })))
}

pub async fn validate_template_data(Json(input): Json<ValidateTemplateData>) -> JsonResult {
    let interface = required_body(input.interface, "TemplateData_Interface")?;
    let data = required_body(input.data, "TemplateData_Data")?;
    if !interface.trim_start().starts_with("interface") && !interface.trim_start().starts_with("type") {
        return Err(MockError::invalid_body(
            "TemplateData_Interface must declare an interface or type",
            "TemplateData_Interface",
        ));
    }
    parse_json_data(&data, "TemplateData_Data")?;
    Ok(Json(json!({
        "message": "Template data is valid",
        "validation": { "interface": "valid", "data": "valid" },
    })))
}

fn applied_html(store: &Store, input: ApplyTemplateData) -> Result<(usize, String), MockError> {
    let template_guid = required_body(input.template_guid, "Template_guid")?;
    let data_guid = required_body(input.template_data_guid, "TemplateData_guid")?;
    let index = template_index(store, &template_guid)?;
    let record = &store.template_data[template_data_index(store, &data_guid)?];
    let data = parse_json_data(record.data.as_deref().unwrap_or("{}"), "TemplateData_Data")?;
    Ok((index, render(&store.templates[index].content, &data)))
}

pub async fn apply_template_data(
    State(state): State<AppState>,
    Json(input): Json<ApplyTemplateData>,
) -> Result<Response, MockError> {
    let store = state.db.read().await;
    let (_, html) = applied_html(&store, input)?;
    Ok(html_response(html))
}

pub async fn apply_template_data_pdf(
    State(state): State<AppState>,
    Json(input): Json<ApplyTemplateData>,
) -> Result<Response, MockError> {
    let mut store = state.db.write().await;
    let (index, html) = applied_html(&store, input)?;
    let pdf = pdf_bytes(&html);
    record_request(&mut store, index, pdf.len() as u64);
    Ok(pdf_response(pdf))
}

// ---------------------------------------------------------------------------
// /template-request
// ---------------------------------------------------------------------------

pub async fn create_template_request(
    State(state): State<AppState>,
    Json(input): Json<CreateTemplateRequest>,
) -> CreatedResult {
    let template_guid = required_body(input.template_guid, "Template_guid")?;
    let mut store = state.db.write().await;
    let index = template_index(&store, &template_guid)?;
    let request = record_request(&mut store, index, 0);
    info!(guid = %request.guid, "template request created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Template request created successfully", "templateRequest": request })),
    ))
}

pub async fn get_template_request(
    State(state): State<AppState>,
    Query(query): Query<TemplateRequestQuery>,
) -> JsonResult {
    let guid = required_query(query.guid, "TemplateRequest_guid")?;
    let store = state.db.read().await;
    let request = &store.template_requests[template_request_index(&store, &guid)?];
    Ok(Json(json!({ "templateRequest": request })))
}

pub async fn list_template_requests(
    State(state): State<AppState>,
    Query(query): Query<TemplateRequestListQuery>,
) -> JsonResult {
    let (from, to) = range(query.from, query.to)?;
    let store = state.db.read().await;
    let matching: Vec<TemplateRequest> = store
        .template_requests
        .iter()
        .filter(|r| name_matches(Some(&r.name), query.name.as_deref()))
        .cloned()
        .collect();
    let (requests, pagination) = paginate(&matching, from, to);
    Ok(Json(json!({ "templateRequests": requests, "pagination": pagination })))
}

pub async fn update_template_request(
    State(state): State<AppState>,
    Query(query): Query<TemplateRequestQuery>,
    Json(input): Json<UpdateTemplateRequest>,
) -> JsonResult {
    let guid = required_query(query.guid, "TemplateRequest_guid")?;
    let mut store = state.db.write().await;
    let index = template_request_index(&store, &guid)?;
    let request = &mut store.template_requests[index];
    if let Some(name) = input.name {
        request.name = name;
    }
    if let Some(created_at) = input.created_at {
        request.created_at = created_at;
    }
    Ok(Json(json!({ "message": "Template request updated successfully", "templateRequest": request })))
}

pub async fn delete_template_request(
    State(state): State<AppState>,
    Query(query): Query<TemplateRequestQuery>,
) -> JsonResult {
    let guid = required_query(query.guid, "TemplateRequest_guid")?;
    let mut store = state.db.write().await;
    let index = template_request_index(&store, &guid)?;
    let request = store.template_requests.remove(index);
    info!(guid = %guid, "template request deleted");
    Ok(Json(json!({ "message": "Template request deleted successfully", "templateRequest": request })))
}

pub async fn template_request_stats(State(state): State<AppState>, Query(query): Query<StatsQuery>) -> JsonResult {
    let start_date = required_query(query.start_date, "startDate")?;
    let end_date = required_query(query.end_date, "endDate")?;
    let start = NaiveDate::parse_from_str(&start_date, "%Y-%m-%d")
        .map_err(|_| MockError::invalid_query("startDate must be an ISO date", "startDate"))?;
    let end = NaiveDate::parse_from_str(&end_date, "%Y-%m-%d")
        .map_err(|_| MockError::invalid_query("endDate must be an ISO date", "endDate"))?;

    let store = state.db.read().await;
    let mut per_template: Vec<(String, String, u64, u64)> = Vec::new();
    for request in &store.template_requests {
        let day = request
            .created_at
            .get(..10)
            .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok());
        if !day.is_some_and(|day| start <= day && day <= end) {
            continue;
        }
        match per_template.iter_mut().find(|(guid, ..)| *guid == request.template_guid) {
            Some(entry) => {
                entry.2 += 1;
                entry.3 += request.file_size;
            }
            None => {
                let name = store
                    .templates
                    .iter()
                    .find(|t| t.guid == request.template_guid)
                    .and_then(|t| t.name.clone())
                    .unwrap_or_else(|| request.name.clone());
                per_template.push((request.template_guid.clone(), name, 1, request.file_size));
            }
        }
    }

    let total_requests: u64 = per_template.iter().map(|entry| entry.2).sum();
    let total_file_size: u64 = per_template.iter().map(|entry| entry.3).sum();
    let templates: Vec<Value> = per_template
        .into_iter()
        .map(|(guid, name, requests, size)| {
            json!({
                "Template": { "Template_Name": name, "Template_guid": guid },
                "totalRequests": requests,
                "totalFileSize": size,
            })
        })
        .collect();
    Ok(Json(json!({
        "startDate": start_date,
        "endDate": end_date,
        "totalRequests": total_requests,
        "totalFileSize": total_file_size,
        "Templates": templates,
    })))
}

// ---------------------------------------------------------------------------
// /userapi
// ---------------------------------------------------------------------------

fn key_limits(store: &Store) -> Limits {
    Limits::new(store.user_apis.iter().filter(|k| k.valid).count(), API_KEY_LIMIT)
}

pub async fn create_user_api(State(state): State<AppState>, Json(input): Json<CreateUserApi>) -> CreatedResult {
    let user_guid = required_body(input.user_guid, "User_guid")?;
    if user_guid != USER_GUID {
        return Err(MockError::NotFound {
            msg: "User not found",
            param: "User_guid",
        });
    }
    let mut store = state.db.write().await;
    let limits = key_limits(&store);
    if limits.current >= API_KEY_LIMIT {
        return Err(MockError::LimitReached(limits));
    }
    let now = timestamp();
    let key = UserApi {
        guid: Uuid::new_v4().to_string(),
        key: format!("dm_{}", Uuid::new_v4().simple()),
        valid: true,
        created_at: now.clone(),
        updated_at: now,
        user_id: USER_ID,
    };
    store.user_apis.push(key.clone());
    info!(guid = %key.guid, "api key created");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "API key created successfully", "userApi": key, "limits": key_limits(&store) })),
    ))
}

pub async fn list_user_apis(State(state): State<AppState>) -> JsonResult {
    let store = state.db.read().await;
    Ok(Json(json!({ "userApis": store.user_apis, "limits": key_limits(&store) })))
}

pub async fn get_user_api(State(state): State<AppState>, Query(query): Query<UserApiQuery>) -> JsonResult {
    let guid = required_query(query.guid, "UserApi_guid")?;
    let store = state.db.read().await;
    let key = &store.user_apis[user_api_index(&store, &guid)?];
    Ok(Json(json!({ "userApi": key })))
}

pub async fn update_user_api(
    State(state): State<AppState>,
    Query(query): Query<UserApiQuery>,
    Json(input): Json<UpdateUserApi>,
) -> JsonResult {
    let guid = required_query(query.guid, "UserApi_guid")?;
    if input.key.as_deref().is_some_and(|k| k.trim().is_empty()) {
        return Err(MockError::invalid_body("UserApi_Key must not be empty", "UserApi_Key"));
    }
    let mut store = state.db.write().await;
    let index = user_api_index(&store, &guid)?;
    let key = &mut store.user_apis[index];
    if let Some(valid) = input.valid {
        key.valid = valid;
    }
    if let Some(value) = input.key {
        key.key = value;
    }
    key.updated_at = timestamp();
    info!(guid = %guid, valid = key.valid, "api key updated");
    Ok(Json(json!({ "message": "API key updated successfully", "userApi": key })))
}

pub async fn delete_user_api(State(state): State<AppState>, Query(query): Query<UserApiQuery>) -> JsonResult {
    let guid = required_query(query.guid, "UserApi_guid")?;
    let mut store = state.db.write().await;
    let index = user_api_index(&store, &guid)?;
    let key = &mut store.user_apis[index];
    key.valid = false;
    key.updated_at = timestamp();
    info!(guid = %guid, "api key deleted");
    Ok(Json(json!({ "message": "API key deleted successfully", "userApi": key })))
}

pub async fn verify_user_api(State(state): State<AppState>, Json(input): Json<VerifyUserApi>) -> JsonResult {
    let key = required_body(input.key, "UserApi_Key")?;
    let store = state.db.read().await;
    let found = store.user_apis.iter().find(|k| k.valid && k.key == key);
    Ok(Json(match found {
        Some(found) => json!({
            "valid": true,
            "userApi": {
                "UserApi_guid": found.guid,
                "UserApi_Valid": found.valid,
                "UserApi_CreatedAt": found.created_at,
            },
            "user": {
                "User_guid": USER_GUID,
                "User_Name": USER_NAME,
                "User_Type": USER_TYPE,
                "User_Active": true,
            },
        }),
        None => json!({ "valid": false }),
    }))
}

// ---------------------------------------------------------------------------
// /user
// ---------------------------------------------------------------------------

pub async fn create_user(Json(input): Json<CreateUser>) -> CreatedResult {
    let name = required_body(input.name, "User_Name")?;
    let email = required_body(input.email, "User_Email")?;
    if !email.contains('@') {
        return Err(MockError::invalid_body("User_Email must be a valid email", "User_Email"));
    }
    let password = required_body(input.password, "User_Password")?;
    if password.len() < 8 {
        return Err(MockError::invalid_body(
            "User_Password must be at least 8 characters",
            "User_Password",
        ));
    }
    required_body(input.terms_of_service, "User_TermsOfService")?;
    info!(email = %email, "user registered");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully. Please verify your email.",
            "user": { "User_guid": Uuid::new_v4().to_string(), "User_Name": name, "User_Email": email },
        })),
    ))
}

pub async fn resend_verification(Json(input): Json<ResendVerification>) -> JsonResult {
    let email = required_body(input.email, "User_Email")?;
    if !email.contains('@') {
        return Err(MockError::invalid_body("User_Email must be a valid email", "User_Email"));
    }
    Ok(Json(json!({ "message": "Verification email sent" })))
}

pub async fn user_profile() -> JsonResult {
    Ok(Json(json!({
        "User_guid": USER_GUID,
        "User_Email": USER_EMAIL,
        "User_FirstName": "Mock",
        "User_LastName": "User",
        "User_TermsOfService": "2026-01-01T00:00:00.000Z",
        "User_Active": true,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_substitutes_top_level_fields() {
        let html = render(
            "<h1>{{title}}</h1><p>{{count}}</p><i>{{missing}}</i>",
            &json!({"title": "Invoice", "count": 3}),
        );
        assert_eq!(html, "<h1>Invoice</h1><p>3</p><i>{{missing}}</i>");
    }

    #[test]
    fn render_ignores_non_object_data() {
        assert_eq!(render("{{a}}", &json!([1, 2])), "{{a}}");
    }

    #[test]
    fn pdf_bytes_are_framed() {
        let pdf = pdf_bytes("<p>x</p>");
        assert!(pdf.starts_with(b"%PDF-1.4\n"));
        assert!(pdf.ends_with(b"%%EOF\n"));
        assert!(std::str::from_utf8(&pdf).is_err());
    }

    #[test]
    fn name_filter_is_case_insensitive_substring() {
        assert!(name_matches(Some("Monthly Invoice"), Some("invoice")));
        assert!(!name_matches(Some("Receipt"), Some("invoice")));
        assert!(!name_matches(None, Some("invoice")));
        assert!(name_matches(None, None));
        assert!(name_matches(None, Some("")));
    }
}
