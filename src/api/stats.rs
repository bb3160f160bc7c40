//! Dashboard analytics endpoints

use axum::{extract::Query, extract::State, Json};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppResult;

use super::AuthenticatedStaff;

/// Date range for dashboard queries. Defaults to the last 30 days.
#[derive(Debug, Default, Clone, Deserialize, IntoParams, ToSchema)]
pub struct DashboardQuery {
    /// Start of the window (ISO 8601)
    pub start_date: Option<DateTime<Utc>>,
    /// End of the window (ISO 8601)
    pub end_date: Option<DateTime<Utc>>,
}

/// Query parameters for top-N listings
#[derive(Debug, Default, Clone, Deserialize, IntoParams, ToSchema)]
pub struct TopQuery {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    /// Number of rows to return (default 5, max 50)
    pub limit: Option<i64>,
}

#[derive(Serialize, ToSchema)]
pub struct StatEntry {
    /// Label
    pub label: String,
    /// Value
    pub value: i64,
}

/// Commission block of the dashboard summary
#[derive(Serialize, ToSchema)]
pub struct CommissionSummary {
    /// Platform commission rate, percent
    #[schema(value_type = String)]
    pub percentage: Decimal,
    /// rate x gross revenue over the window
    #[schema(value_type = String)]
    pub total_amount: Decimal,
}

/// Booking counts and money totals over the window
#[derive(Serialize, ToSchema)]
pub struct BookingSummary {
    /// All bookings in the window, any status
    pub total: i64,
    /// Counts by status
    pub by_status: Vec<StatEntry>,
    /// Gross revenue (cancelled bookings excluded)
    #[schema(value_type = String)]
    pub revenue: Decimal,
    /// Average booking amount (cancelled bookings excluded)
    #[schema(value_type = String)]
    pub average_amount: Decimal,
    pub commission: CommissionSummary,
}

/// One revenue point per day
#[derive(Serialize, ToSchema)]
pub struct RevenuePoint {
    /// Day (YYYY-MM-DD)
    pub day: String,
    #[schema(value_type = String)]
    pub revenue: Decimal,
    pub bookings: i64,
}

/// Company row of the performance table
#[derive(Serialize, ToSchema)]
pub struct CompanyPerformance {
    pub company_id: i32,
    pub name: String,
    /// Gross revenue over the window
    #[schema(value_type = String)]
    pub revenue: Decimal,
    /// Revenue after the platform's cut
    #[schema(value_type = String)]
    pub net_revenue: Decimal,
    pub total_bookings: i64,
    pub completed_bookings: i64,
    pub cancelled_bookings: i64,
    /// completed / total
    pub completion_rate: f64,
    /// cancelled / total
    pub cancellation_rate: f64,
}

/// Route row of the popularity table
#[derive(Serialize, ToSchema)]
pub struct RoutePopularity {
    pub route_id: i32,
    pub departure_station: String,
    pub arrival_station: String,
    /// Trips on this route departing in the window
    pub trip_count: i64,
    /// trip_count / total trips in the window
    pub popularity: f64,
}

/// Day-of-week x hour-of-day booking cell
#[derive(Serialize, ToSchema)]
pub struct HistogramEntry {
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: i32,
    /// 0..23
    pub hour: i32,
    pub bookings: i64,
}

/// New customers per day
#[derive(Serialize, ToSchema)]
pub struct GrowthPoint {
    /// Day (YYYY-MM-DD)
    pub day: String,
    pub new_customers: i64,
}

/// One line of the recent-activity feed
#[derive(Serialize, ToSchema)]
pub struct ActivityEntry {
    /// "booking" or "trip"
    pub kind: String,
    pub label: String,
    pub occurred_at: DateTime<Utc>,
}

/// Full dashboard summary, assembled from five concurrently-awaited
/// aggregate queries. One failing query fails the whole response.
#[derive(Serialize, ToSchema)]
pub struct DashboardStats {
    pub bookings: BookingSummary,
    pub revenue_series: Vec<RevenuePoint>,
    pub top_companies: Vec<CompanyPerformance>,
    pub popular_routes: Vec<RoutePopularity>,
    pub booking_histogram: Vec<HistogramEntry>,
}

/// Popular routes and booking histogram for the trips dashboard
#[derive(Serialize, ToSchema)]
pub struct TripStatsResponse {
    pub popular_routes: Vec<RoutePopularity>,
    pub booking_histogram: Vec<HistogramEntry>,
}

/// Full dashboard summary for a day range
#[utoipa::path(
    get,
    path = "/dashboard/stats",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard summary", body = DashboardStats),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_dashboard_stats(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<DashboardStats>> {
    claims.require_read()?;

    let stats = state
        .services
        .stats
        .dashboard(query.start_date, query.end_date)
        .await?;
    Ok(Json(stats))
}

/// New customers per day over the window
#[utoipa::path(
    get,
    path = "/dashboard/customer-growth",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    params(DashboardQuery),
    responses(
        (status = 200, description = "Customer growth series", body = Vec<GrowthPoint>)
    )
)]
pub async fn get_customer_growth(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Query(query): Query<DashboardQuery>,
) -> AppResult<Json<Vec<GrowthPoint>>> {
    claims.require_read()?;

    let series = state
        .services
        .stats
        .customer_growth(query.start_date, query.end_date)
        .await?;
    Ok(Json(series))
}

/// Top companies by revenue with completion/cancellation rates
#[utoipa::path(
    get,
    path = "/dashboard/company-stats",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    params(TopQuery),
    responses(
        (status = 200, description = "Companies performance table", body = Vec<CompanyPerformance>)
    )
)]
pub async fn get_company_stats(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Query(query): Query<TopQuery>,
) -> AppResult<Json<Vec<CompanyPerformance>>> {
    claims.require_read()?;

    let limit = query.limit.unwrap_or(5).clamp(1, 50);
    let companies = state
        .services
        .stats
        .top_companies(query.start_date, query.end_date, limit)
        .await?;
    Ok(Json(companies))
}

/// Popular routes and booking histogram
#[utoipa::path(
    get,
    path = "/dashboard/trip-stats",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    params(TopQuery),
    responses(
        (status = 200, description = "Trip statistics", body = TripStatsResponse)
    )
)]
pub async fn get_trip_stats(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Query(query): Query<TopQuery>,
) -> AppResult<Json<TripStatsResponse>> {
    claims.require_read()?;

    let limit = query.limit.unwrap_or(5).clamp(1, 50);
    let stats = state
        .services
        .stats
        .trip_stats(query.start_date, query.end_date, limit)
        .await?;
    Ok(Json(stats))
}

/// Latest bookings and trips, interleaved
#[utoipa::path(
    get,
    path = "/dashboard/recent-activities",
    tag = "dashboard",
    security(("bearer_auth" = [])),
    params(
        ("limit" = Option<i64>, Query, description = "Number of entries (default 20)")
    ),
    responses(
        (status = 200, description = "Recent activity feed", body = Vec<ActivityEntry>)
    )
)]
pub async fn get_recent_activities(
    State(state): State<crate::AppState>,
    AuthenticatedStaff(claims): AuthenticatedStaff,
    Query(query): Query<RecentActivitiesQuery>,
) -> AppResult<Json<Vec<ActivityEntry>>> {
    claims.require_read()?;

    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let entries = state.services.stats.recent_activities(limit).await?;
    Ok(Json(entries))
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct RecentActivitiesQuery {
    pub limit: Option<i64>,
}
