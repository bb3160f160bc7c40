//! Dashboard analytics service
//!
//! Every figure is a one-shot aggregate query over the window; nothing is
//! materialized or cached. The full dashboard is five aggregate groups
//! awaited together, so a single failing query fails the whole summary.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use sqlx::Row;

use crate::{
    api::stats::{
        ActivityEntry, BookingSummary, CommissionSummary, CompanyPerformance, DashboardStats,
        GrowthPoint, HistogramEntry, RevenuePoint, RoutePopularity, StatEntry, TripStatsResponse,
    },
    config::CommissionConfig,
    error::AppResult,
    models::booking::{commission_amount, net_revenue},
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
    commission: CommissionConfig,
}

impl StatsService {
    pub fn new(repository: Repository, commission: CommissionConfig) -> Self {
        Self { repository, commission }
    }

    fn window(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> (DateTime<Utc>, DateTime<Utc>) {
        let end = end.unwrap_or_else(Utc::now);
        let start = start.unwrap_or_else(|| end - Duration::days(30));
        (start, end)
    }

    /// Full dashboard summary for a day range
    pub async fn dashboard(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<DashboardStats> {
        let (start, end) = Self::window(start, end);

        let (bookings, revenue_series, top_companies, popular_routes, booking_histogram) =
            tokio::try_join!(
                self.booking_summary(start, end),
                self.revenue_series(start, end),
                self.top_companies_in(start, end, 5),
                self.popular_routes(start, end, 5),
                self.booking_histogram(start, end),
            )?;

        Ok(DashboardStats {
            bookings,
            revenue_series,
            top_companies,
            popular_routes,
            booking_histogram,
        })
    }

    /// Booking counts by status plus money totals
    async fn booking_summary(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<BookingSummary> {
        let pool = &self.repository.pool;

        let by_status: Vec<StatEntry> = sqlx::query(
            r#"
            SELECT status AS label, COUNT(*) AS value
            FROM bookings
            WHERE created_at >= $1 AND created_at <= $2
            GROUP BY status
            ORDER BY value DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|row| StatEntry {
            label: row.get("label"),
            value: row.get("value"),
        })
        .collect();

        let total = by_status.iter().map(|e| e.value).sum();

        let money = sqlx::query(
            r#"
            SELECT COALESCE(SUM(total_amount), 0) AS revenue,
                   COALESCE(AVG(total_amount), 0) AS average_amount
            FROM bookings
            WHERE created_at >= $1 AND created_at <= $2
              AND status != 'cancelled'
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;

        let revenue: Decimal = money.get("revenue");
        let average_amount: Decimal = money.get("average_amount");

        // The dashboard reports commission as rate x gross revenue, not the
        // sum of per-booking commissions
        let commission = CommissionSummary {
            percentage: self.commission.percentage,
            total_amount: commission_amount(revenue, self.commission.percentage),
        };

        Ok(BookingSummary {
            total,
            by_status,
            revenue,
            average_amount,
            commission,
        })
    }

    /// One revenue point per day (cancelled bookings excluded)
    async fn revenue_series(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<RevenuePoint>> {
        let rows = sqlx::query(
            r#"
            SELECT TO_CHAR(DATE_TRUNC('day', created_at), 'YYYY-MM-DD') AS day,
                   COALESCE(SUM(total_amount), 0) AS revenue,
                   COUNT(*) AS bookings
            FROM bookings
            WHERE created_at >= $1 AND created_at <= $2
              AND status != 'cancelled'
            GROUP BY DATE_TRUNC('day', created_at)
            ORDER BY day
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.repository.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| RevenuePoint {
                day: row.get("day"),
                revenue: row.get("revenue"),
                bookings: row.get("bookings"),
            })
            .collect())
    }

    /// Top companies by revenue with completion/cancellation rates
    pub async fn top_companies(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: i64,
    ) -> AppResult<Vec<CompanyPerformance>> {
        let (start, end) = Self::window(start, end);
        self.top_companies_in(start, end, limit).await
    }

    async fn top_companies_in(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: i64,
    ) -> AppResult<Vec<CompanyPerformance>> {
        let rows = sqlx::query(
            r#"
            SELECT c.id AS company_id, c.name,
                   COALESCE(SUM(b.total_amount) FILTER (WHERE b.status != 'cancelled'), 0) AS revenue,
                   COUNT(b.id) AS total_bookings,
                   COUNT(b.id) FILTER (WHERE b.status = 'completed') AS completed_bookings,
                   COUNT(b.id) FILTER (WHERE b.status = 'cancelled') AS cancelled_bookings
            FROM companies c
            JOIN trips t ON t.company_id = c.id
            JOIN bookings b ON b.trip_id = t.id
            WHERE b.created_at >= $1 AND b.created_at <= $2
            GROUP BY c.id, c.name
            ORDER BY revenue DESC
            LIMIT $3
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(limit)
        .fetch_all(&self.repository.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let revenue: Decimal = row.get("revenue");
                let total_bookings: i64 = row.get("total_bookings");
                let completed_bookings: i64 = row.get("completed_bookings");
                let cancelled_bookings: i64 = row.get("cancelled_bookings");
                let rate = |n: i64| {
                    if total_bookings == 0 {
                        0.0
                    } else {
                        n as f64 / total_bookings as f64
                    }
                };
                CompanyPerformance {
                    company_id: row.get("company_id"),
                    name: row.get("name"),
                    net_revenue: net_revenue(revenue, self.commission.percentage),
                    revenue,
                    total_bookings,
                    completed_bookings,
                    cancelled_bookings,
                    completion_rate: rate(completed_bookings),
                    cancellation_rate: rate(cancelled_bookings),
                }
            })
            .collect())
    }

    /// Popular routes: trips-for-route / total trips departing in the window
    async fn popular_routes(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: i64,
    ) -> AppResult<Vec<RoutePopularity>> {
        let pool = &self.repository.pool;

        let total_trips: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM trips WHERE departure_time >= $1 AND departure_time <= $2",
        )
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await?;

        let rows = sqlx::query(
            r#"
            SELECT r.id AS route_id,
                   ds.name AS departure_station,
                   ar.name AS arrival_station,
                   COUNT(t.id) AS trip_count
            FROM routes r
            JOIN stations ds ON r.departure_station_id = ds.id
            JOIN stations ar ON r.arrival_station_id = ar.id
            JOIN trips t ON t.route_id = r.id
            WHERE t.departure_time >= $1 AND t.departure_time <= $2
            GROUP BY r.id, ds.name, ar.name
            ORDER BY trip_count DESC
            LIMIT $3
            "#,
        )
        .bind(start)
        .bind(end)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let trip_count: i64 = row.get("trip_count");
                RoutePopularity {
                    route_id: row.get("route_id"),
                    departure_station: row.get("departure_station"),
                    arrival_station: row.get("arrival_station"),
                    trip_count,
                    popularity: if total_trips == 0 {
                        0.0
                    } else {
                        trip_count as f64 / total_trips as f64
                    },
                }
            })
            .collect())
    }

    /// Day-of-week x hour-of-day booking histogram
    async fn booking_histogram(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<HistogramEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT EXTRACT(DOW FROM created_at)::int AS day_of_week,
                   EXTRACT(HOUR FROM created_at)::int AS hour,
                   COUNT(*) AS bookings
            FROM bookings
            WHERE created_at >= $1 AND created_at <= $2
            GROUP BY 1, 2
            ORDER BY 1, 2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.repository.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| HistogramEntry {
                day_of_week: row.get("day_of_week"),
                hour: row.get("hour"),
                bookings: row.get("bookings"),
            })
            .collect())
    }

    /// Popular routes + histogram for the trips dashboard
    pub async fn trip_stats(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: i64,
    ) -> AppResult<TripStatsResponse> {
        let (start, end) = Self::window(start, end);

        let (popular_routes, booking_histogram) = tokio::try_join!(
            self.popular_routes(start, end, limit),
            self.booking_histogram(start, end),
        )?;

        Ok(TripStatsResponse {
            popular_routes,
            booking_histogram,
        })
    }

    /// New customers per day over the window
    pub async fn customer_growth(
        &self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> AppResult<Vec<GrowthPoint>> {
        let (start, end) = Self::window(start, end);

        let rows = sqlx::query(
            r#"
            SELECT TO_CHAR(DATE_TRUNC('day', created_at), 'YYYY-MM-DD') AS day,
                   COUNT(*) AS new_customers
            FROM customers
            WHERE created_at >= $1 AND created_at <= $2
            GROUP BY DATE_TRUNC('day', created_at)
            ORDER BY day
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.repository.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| GrowthPoint {
                day: row.get("day"),
                new_customers: row.get("new_customers"),
            })
            .collect())
    }

    /// Latest bookings and trips, interleaved by time
    pub async fn recent_activities(&self, limit: i64) -> AppResult<Vec<ActivityEntry>> {
        let pool = &self.repository.pool;

        let bookings = sqlx::query(
            r#"
            SELECT c.first_name || ' ' || c.last_name AS customer_name,
                   b.seats_booked, b.created_at
            FROM bookings b
            JOIN customers c ON b.customer_id = c.id
            ORDER BY b.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let trips = sqlx::query(
            r#"
            SELECT ds.name AS departure_station, ar.name AS arrival_station, t.created_at
            FROM trips t
            JOIN routes r ON t.route_id = r.id
            JOIN stations ds ON r.departure_station_id = ds.id
            JOIN stations ar ON r.arrival_station_id = ar.id
            ORDER BY t.created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let mut entries: Vec<ActivityEntry> = Vec::new();

        for row in bookings {
            let customer: String = row.get("customer_name");
            let seats: i32 = row.get("seats_booked");
            entries.push(ActivityEntry {
                kind: "booking".to_string(),
                label: format!("{} booked {} seat(s)", customer, seats),
                occurred_at: row.get("created_at"),
            });
        }

        for row in trips {
            let departure: String = row.get("departure_station");
            let arrival: String = row.get("arrival_station");
            entries.push(ActivityEntry {
                kind: "trip".to_string(),
                label: format!("Trip scheduled: {} - {}", departure, arrival),
                occurred_at: row.get("created_at"),
            });
        }

        entries.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));
        entries.truncate(limit as usize);

        Ok(entries)
    }
}
