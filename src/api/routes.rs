//! Route management endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::route::{CreateRoute, Route, RouteDetails, UpdateRoute},
};

use super::AuthenticatedStaff;

/// List a company's routes
#[utoipa::path(
    get,
    path = "/companies/{id}/routes",
    tag = "routes",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID")
    ),
    responses(
        (status = 200, description = "List of routes", body = Vec<RouteDetails>),
        (status = 404, description = "Company not found")
    )
)]
pub async fn list_routes(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(company_id): Path<i32>,
) -> AppResult<Json<Vec<RouteDetails>>> {
    claims.require_read()?;

    let routes = state.services.routes.list(company_id).await?;
    Ok(Json(routes))
}

/// Get a route by ID
#[utoipa::path(
    get,
    path = "/companies/{id}/routes/{route_id}",
    tag = "routes",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("route_id" = i32, Path, description = "Route ID")
    ),
    responses(
        (status = 200, description = "Route details", body = RouteDetails),
        (status = 404, description = "Route not found")
    )
)]
pub async fn get_route(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, route_id)): Path<(i32, i32)>,
) -> AppResult<Json<RouteDetails>> {
    claims.require_read()?;

    let route = state.services.routes.get(company_id, route_id).await?;
    Ok(Json(route))
}

/// Create a new route. Departure and arrival stations must differ.
#[utoipa::path(
    post,
    path = "/companies/{id}/routes",
    tag = "routes",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID")
    ),
    request_body = CreateRoute,
    responses(
        (status = 201, description = "Route created", body = Route),
        (status = 400, description = "Invalid input or identical stations"),
        (status = 404, description = "Company or station not found")
    )
)]
pub async fn create_route(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path(company_id): Path<i32>,
    Json(route): Json<CreateRoute>,
) -> AppResult<(StatusCode, Json<Route>)> {
    claims.require_write()?;

    let created = state.services.routes.create(company_id, route).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an existing route
#[utoipa::path(
    put,
    path = "/companies/{id}/routes/{route_id}",
    tag = "routes",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("route_id" = i32, Path, description = "Route ID")
    ),
    request_body = UpdateRoute,
    responses(
        (status = 200, description = "Route updated", body = Route),
        (status = 400, description = "Invalid input or identical stations"),
        (status = 404, description = "Route not found")
    )
)]
pub async fn update_route(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, route_id)): Path<(i32, i32)>,
    Json(route): Json<UpdateRoute>,
) -> AppResult<Json<Route>> {
    claims.require_write()?;

    let updated = state.services.routes.update(company_id, route_id, route).await?;
    Ok(Json(updated))
}

/// Delete a route
#[utoipa::path(
    delete,
    path = "/companies/{id}/routes/{route_id}",
    tag = "routes",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Company ID"),
        ("route_id" = i32, Path, description = "Route ID")
    ),
    responses(
        (status = 204, description = "Route deleted"),
        (status = 404, description = "Route not found"),
        (status = 409, description = "Route is still referenced by trips")
    )
)]
pub async fn delete_route(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Path((company_id, route_id)): Path<(i32, i32)>,
) -> AppResult<StatusCode> {
    claims.require_write()?;

    state.services.routes.delete(company_id, route_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
