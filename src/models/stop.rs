//! Trip stop model and per-trip stop statistics

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::StopStatus;

/// Trip stop row from database
///
/// An intermediate or terminal stop of a trip at a station, with its own
/// timing and seat bookkeeping. `stop_order` defines traversal order and is
/// unique within a trip.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct TripStop {
    pub id: i32,
    pub trip_id: i32,
    pub station_id: i32,
    pub stop_order: i32,
    pub arrival_time: DateTime<Utc>,
    pub departure_time: DateTime<Utc>,
    pub available_seats: Option<i32>,
    pub boarding_count: i32,
    pub alighting_count: i32,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub platform: Option<String>,
    pub notes: Option<String>,
    pub status: StopStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create stop request
///
/// The caller picks a `stop_order` that is free within the trip; no automatic
/// renumbering is performed.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStop {
    pub station_id: i32,
    #[validate(range(min = 1))]
    pub stop_order: i32,
    pub arrival_time: DateTime<Utc>,
    pub departure_time: DateTime<Utc>,
    #[validate(range(min = 0))]
    pub available_seats: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub platform: Option<String>,
    pub notes: Option<String>,
}

/// Partial stop update
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStop {
    pub station_id: Option<i32>,
    #[validate(range(min = 1))]
    pub stop_order: Option<i32>,
    pub arrival_time: Option<DateTime<Utc>>,
    pub departure_time: Option<DateTime<Utc>>,
    #[validate(range(min = 0))]
    pub available_seats: Option<i32>,
    #[validate(range(min = 0))]
    pub boarding_count: Option<i32>,
    #[validate(range(min = 0))]
    pub alighting_count: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    pub platform: Option<String>,
    pub notes: Option<String>,
    pub status: Option<StopStatus>,
}

/// Aggregate statistics over a trip's stop sequence
///
/// Recomputed from the full stop set on every read.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StopStats {
    pub total_stops: i64,
    pub total_boardings: i64,
    pub total_alightings: i64,
    /// Mean over stops of (capacity - available_seats) / capacity.
    /// Stops without seat data are skipped.
    pub avg_occupancy_rate: f64,
    pub completed_stops: i64,
}

impl StopStats {
    /// Reduce a trip's stop sequence against the vehicle capacity
    pub fn compute(stops: &[TripStop], vehicle_capacity: i32) -> Self {
        let total_stops = stops.len() as i64;
        let total_boardings = stops.iter().map(|s| s.boarding_count as i64).sum();
        let total_alightings = stops.iter().map(|s| s.alighting_count as i64).sum();
        let completed_stops = stops
            .iter()
            .filter(|s| s.status == StopStatus::Completed)
            .count() as i64;

        let occupancy: Vec<f64> = stops
            .iter()
            .filter_map(|s| s.available_seats)
            .filter(|_| vehicle_capacity > 0)
            .map(|available| {
                let cap = vehicle_capacity as f64;
                (cap - available as f64) / cap
            })
            .collect();
        let avg_occupancy_rate = if occupancy.is_empty() {
            0.0
        } else {
            occupancy.iter().sum::<f64>() / occupancy.len() as f64
        };

        Self {
            total_stops,
            total_boardings,
            total_alightings,
            avg_occupancy_rate,
            completed_stops,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(order: i32, available: Option<i32>, boarding: i32, alighting: i32, status: StopStatus) -> TripStop {
        let now = Utc::now();
        TripStop {
            id: order,
            trip_id: 1,
            station_id: order,
            stop_order: order,
            arrival_time: now,
            departure_time: now,
            available_seats: available,
            boarding_count: boarding,
            alighting_count: alighting,
            price: None,
            platform: None,
            notes: None,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn stats_over_empty_sequence() {
        let stats = StopStats::compute(&[], 50);
        assert_eq!(stats.total_stops, 0);
        assert_eq!(stats.avg_occupancy_rate, 0.0);
    }

    #[test]
    fn stats_sum_boardings_and_alightings() {
        let stops = vec![
            stop(1, Some(40), 10, 0, StopStatus::Completed),
            stop(2, Some(30), 5, 3, StopStatus::Completed),
            stop(3, Some(45), 0, 12, StopStatus::Scheduled),
        ];
        let stats = StopStats::compute(&stops, 50);
        assert_eq!(stats.total_stops, 3);
        assert_eq!(stats.total_boardings, 15);
        assert_eq!(stats.total_alightings, 15);
        assert_eq!(stats.completed_stops, 2);
        // (10/50 + 20/50 + 5/50) / 3
        assert!((stats.avg_occupancy_rate - (0.2 + 0.4 + 0.1) / 3.0).abs() < 1e-9);
    }

    #[test]
    fn stops_without_seat_data_are_skipped() {
        let stops = vec![
            stop(1, Some(25), 0, 0, StopStatus::Scheduled),
            stop(2, None, 0, 0, StopStatus::Scheduled),
        ];
        let stats = StopStats::compute(&stops, 50);
        assert!((stats.avg_occupancy_rate - 0.5).abs() < 1e-9);
    }
}
