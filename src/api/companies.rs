//! Company management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::company::{Company, CompanyDetails, CompanyQuery, CreateCompany, UpdateCompany, UpdateCompanyStatus},
};

use super::AuthenticatedStaff;

/// Generic paginated listing envelope
#[derive(Serialize, ToSchema)]
pub struct PaginatedResponse<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// List of items
    pub items: Vec<T>,
    /// Total number of items
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Items per page
    pub per_page: i64,
}

/// List companies with search and pagination
#[utoipa::path(
    get,
    path = "/companies",
    tag = "companies",
    security(("bearer_auth" = [])),
    params(CompanyQuery),
    responses(
        (status = 200, description = "List of companies", body = PaginatedResponse<CompanyDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_companies(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Query(query): Query<CompanyQuery>,
) -> AppResult<Json<PaginatedResponse<CompanyDetails>>> {
    claims.require_read()?;

    let (companies, total) = state.services.companies.search(&query).await?;

    Ok(Json(PaginatedResponse {
        items: companies,
        total,
        page: query.page.unwrap_or(1),
        per_page: query.per_page.unwrap_or(20),
    }))
}

/// Get company details by ID, with live resource counts
#[utoipa::path(
    get,
    path = "/companies/{id}",
    tag = "companies",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID")
    ),
    responses(
        (status = 200, description = "Company details", body = CompanyDetails),
        (status = 404, description = "Company not found")
    )
)]
pub async fn get_company(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i32>,
) -> AppResult<Json<CompanyDetails>> {
    claims.require_read()?;

    let company = state.services.companies.get(id).await?;
    Ok(Json(company))
}

/// Create a new company
#[utoipa::path(
    post,
    path = "/companies",
    tag = "companies",
    security(("bearer_auth" = [])),
    request_body = CreateCompany,
    responses(
        (status = 201, description = "Company created", body = Company),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Company name already exists")
    )
)]
pub async fn create_company(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Json(company): Json<CreateCompany>,
) -> AppResult<(StatusCode, Json<Company>)> {
    claims.require_write()?;

    let created = state.services.companies.create(company).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing company
#[utoipa::path(
    put,
    path = "/companies/{id}",
    tag = "companies",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID")
    ),
    request_body = UpdateCompany,
    responses(
        (status = 200, description = "Company updated", body = Company),
        (status = 404, description = "Company not found")
    )
)]
pub async fn update_company(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i32>,
    Json(company): Json<UpdateCompany>,
) -> AppResult<Json<Company>> {
    claims.require_write()?;

    let updated = state.services.companies.update(id, company).await?;
    Ok(Json(updated))
}

/// Toggle a company's status (companies are never hard-deleted)
#[utoipa::path(
    put,
    path = "/companies/{id}/status",
    tag = "companies",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID")
    ),
    request_body = UpdateCompanyStatus,
    responses(
        (status = 200, description = "Status updated", body = Company),
        (status = 404, description = "Company not found")
    )
)]
pub async fn update_company_status(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(id): Path<i32>,
    Json(request): Json<UpdateCompanyStatus>,
) -> AppResult<Json<Company>> {
    claims.require_write()?;

    let updated = state.services.companies.set_status(id, request.status).await?;
    Ok(Json(updated))
}
