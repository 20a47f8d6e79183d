use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use std::collections::HashMap;

use estate_auth::Claims;
use estate_server_common::ErrorCode;

use crate::adapter::handler::error::AppError;
use crate::adapter::handler::{actor_of, AppState, PageQuery};
use crate::adapter::presenter::response::{ApiResponse, PaginatedResponse};
use crate::domain::entity::project::{CreateProject, Project, UpdateProject, UploadedImage};

const AREA: &str = "MASTER";

/// Collected multipart form: text fields by name plus the optional
/// `sign_image` file part.
struct ProjectForm {
    fields: HashMap<String, String>,
    image: Option<UploadedImage>,
}

async fn read_form(mut multipart: Multipart) -> Result<ProjectForm, AppError> {
    let mut fields = HashMap::new();
    let mut image = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::bad_request(ErrorCode::validation(AREA), &format!("malformed form: {}", e))
    })? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "sign_image" {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(|e| {
                AppError::bad_request(
                    ErrorCode::validation(AREA),
                    &format!("failed to read sign_image: {}", e),
                )
            })?;
            if !file_name.is_empty() && !bytes.is_empty() {
                image = Some(UploadedImage {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            let value = field.text().await.map_err(|e| {
                AppError::bad_request(
                    ErrorCode::validation(AREA),
                    &format!("malformed field '{}': {}", name, e),
                )
            })?;
            fields.insert(name, value);
        }
    }
    Ok(ProjectForm { fields, image })
}

fn text(fields: &HashMap<String, String>, key: &str) -> Option<String> {
    fields.get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn number(fields: &HashMap<String, String>, key: &str) -> Option<f64> {
    text(fields, key).and_then(|v| v.parse().ok())
}

pub async fn add_project(
    State(state): State<AppState>,
    claims: Option<Extension<Claims>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<Project>>), AppError> {
    let form = read_form(multipart).await?;
    let name = text(&form.fields, "name").ok_or_else(|| {
        AppError::bad_request(ErrorCode::validation(AREA), "name is required")
    })?;
    let plan_name = text(&form.fields, "plan_name").ok_or_else(|| {
        AppError::bad_request(ErrorCode::validation(AREA), "plan_name is required")
    })?;
    let input = CreateProject {
        name,
        plan_name,
        address: text(&form.fields, "address"),
        city: text(&form.fields, "city"),
        state: text(&form.fields, "state"),
        pincode: text(&form.fields, "pincode"),
        company_name: text(&form.fields, "company_name"),
        size: number(&form.fields, "size"),
        measuring_unit: text(&form.fields, "measuring_unit"),
        sign_image: None,
    };

    let project = state
        .projects_uc
        .create_project(&input, form.image, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(project))))
}

pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<Project>>>, AppError> {
    let (page, page_size) = query.resolve()?;
    let (records, total) = state
        .projects_uc
        .list_projects(page as i64, page_size as i64)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(PaginatedResponse {
        records,
        total,
        page,
        page_size,
    })))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Project>>, AppError> {
    let project = state
        .projects_uc
        .get_project(id)
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(project)))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    claims: Option<Extension<Claims>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Project>>, AppError> {
    let form = read_form(multipart).await?;
    let input = UpdateProject {
        name: text(&form.fields, "name"),
        plan_name: text(&form.fields, "plan_name"),
        address: text(&form.fields, "address"),
        city: text(&form.fields, "city"),
        state: text(&form.fields, "state"),
        pincode: text(&form.fields, "pincode"),
        company_name: text(&form.fields, "company_name"),
        size: number(&form.fields, "size"),
        measuring_unit: text(&form.fields, "measuring_unit"),
        sign_image: None,
    };

    let project = state
        .projects_uc
        .update_project(id, &input, form.image, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::ok(project)))
}

pub async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    claims: Option<Extension<Claims>>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state
        .projects_uc
        .delete_project(id, &actor_of(&claims))
        .await
        .map_err(|e| AppError::from_domain(AREA, e))?;
    Ok(Json(ApiResponse::message(format!("Project {} deleted", id))))
}
