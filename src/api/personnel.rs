//! Personnel management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::personnel::{CreatePersonnel, Personnel, PersonnelQuery, UpdatePersonnel},
};

use super::AuthenticatedStaff;

/// List a company's personnel, filterable by type and status
#[utoipa::path(
    get,
    path = "/companies/{id}/personnel",
    tag = "personnel",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("type" = Option<String>, Query, description = "Filter by type (driver or agent)"),
        ("status" = Option<String>, Query, description = "Filter by status")
    ),
    responses(
        (status = 200, description = "List of personnel", body = Vec<Personnel>),
        (status = 404, description = "Company not found")
    )
)]
pub async fn list_personnel(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(company_id): Path<i32>,
    Query(query): Query<PersonnelQuery>,
) -> AppResult<Json<Vec<Personnel>>> {
    claims.require_read()?;

    let personnel = state.services.personnel.list(company_id, &query).await?;
    Ok(Json(personnel))
}

/// Get a personnel record by ID
#[utoipa::path(
    get,
    path = "/companies/{id}/personnel/{personnel_id}",
    tag = "personnel",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("personnel_id" = i32, Path, description = "Personnel ID")
    ),
    responses(
        (status = 200, description = "Personnel details", body = Personnel),
        (status = 404, description = "Personnel not found")
    )
)]
pub async fn get_personnel(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, personnel_id)): Path<(i32, i32)>,
) -> AppResult<Json<Personnel>> {
    claims.require_read()?;

    let record = state.services.personnel.get(company_id, personnel_id).await?;
    Ok(Json(record))
}

/// Create a new personnel record
#[utoipa::path(
    post,
    path = "/companies/{id}/personnel",
    tag = "personnel",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID")
    ),
    request_body = CreatePersonnel,
    responses(
        (status = 201, description = "Personnel created", body = Personnel),
        (status = 400, description = "Invalid input (e.g. driver without license)"),
        (status = 404, description = "Company not found")
    )
)]
pub async fn create_personnel(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(company_id): Path<i32>,
    Json(personnel): Json<CreatePersonnel>,
) -> AppResult<(StatusCode, Json<Personnel>)> {
    claims.require_write()?;

    let created = state.services.personnel.create(company_id, personnel).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing personnel record
#[utoipa::path(
    put,
    path = "/companies/{id}/personnel/{personnel_id}",
    tag = "personnel",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("personnel_id" = i32, Path, description = "Personnel ID")
    ),
    request_body = UpdatePersonnel,
    responses(
        (status = 200, description = "Personnel updated", body = Personnel),
        (status = 404, description = "Personnel not found")
    )
)]
pub async fn update_personnel(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, personnel_id)): Path<(i32, i32)>,
    Json(personnel): Json<UpdatePersonnel>,
) -> AppResult<Json<Personnel>> {
    claims.require_write()?;

    let updated = state
        .services
        .personnel
        .update(company_id, personnel_id, personnel)
        .await?;
    Ok(Json(updated))
}

/// Delete a personnel record
#[utoipa::path(
    delete,
    path = "/companies/{id}/personnel/{personnel_id}",
    tag = "personnel",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("personnel_id" = i32, Path, description = "Personnel ID")
    ),
    responses(
        (status = 204, description = "Personnel deleted"),
        (status = 404, description = "Personnel not found"),
        (status = 409, description = "Personnel is still referenced by trips")
    )
)]
pub async fn delete_personnel(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, personnel_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    claims.require_write()?;

    state.services.personnel.delete(company_id, personnel_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
