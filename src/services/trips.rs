//! Trip and trip-stop management service
//!
//! Owns the trip state machine: terminal trips reject edits and status
//! changes, and the transition table is enforced here rather than trusted to
//! callers.

use validator::Validate;

use crate::{
    error::{AppError, AppResult, ErrorCode},
    models::enums::{PersonnelStatus, PersonnelType, TripStatus, VehicleStatus},
    models::stop::{CreateStop, StopStats, TripStop, UpdateStop},
    models::trip::{derive_arrival_time, CreateTrip, Trip, TripDetails, TripQuery, UpdateTrip},
    repository::Repository,
};

#[derive(Clone)]
pub struct TripsService {
    repository: Repository,
}

impl TripsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search a company's trips
    pub async fn search(&self, company_id: i32, query: &TripQuery) -> AppResult<(Vec<TripDetails>, i64)> {
        self.repository.companies.get_by_id(company_id).await?;
        self.repository.trips.search(company_id, query).await
    }

    /// Get a trip with labels
    pub async fn get(&self, company_id: i32, id: i32) -> AppResult<TripDetails> {
        self.repository.trips.get_details(company_id, id).await
    }

    /// Create a new trip from a route + vehicle + driver triple
    pub async fn create(&self, company_id: i32, trip: CreateTrip) -> AppResult<Trip> {
        trip.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let route = self.repository.routes.get(company_id, trip.route_id).await?;

        let driver = self.repository.personnel.get(company_id, trip.driver_id).await?;
        if driver.personnel_type != PersonnelType::Driver {
            return Err(AppError::Validation(format!(
                "Personnel {} is not a driver",
                driver.id
            )));
        }
        if driver.status != PersonnelStatus::Active {
            return Err(AppError::Conflict(
                ErrorCode::DriverUnavailable,
                format!("Driver {} is not active", driver.id),
            ));
        }

        let vehicle = self.repository.vehicles.get(company_id, trip.vehicle_id).await?;
        if vehicle.status != VehicleStatus::Active {
            return Err(AppError::Conflict(
                ErrorCode::VehicleBusy,
                format!("Vehicle {} is not in service", vehicle.id),
            ));
        }

        let departure = trip.departure_time;
        let arrival = trip
            .arrival_time
            .unwrap_or_else(|| derive_arrival_time(departure, route.duration_minutes));
        if arrival <= departure {
            return Err(AppError::Validation(
                "Arrival time must be after departure time".to_string(),
            ));
        }

        if self
            .repository
            .trips
            .vehicle_overlaps(vehicle.id, departure, arrival, None)
            .await?
        {
            return Err(AppError::Conflict(
                ErrorCode::VehicleBusy,
                format!("Vehicle {} is already assigned to an overlapping trip", vehicle.id),
            ));
        }

        let available_seats = trip.available_seats.unwrap_or(vehicle.capacity);
        if available_seats > vehicle.capacity {
            return Err(AppError::Validation(format!(
                "Available seats ({}) exceed vehicle capacity ({})",
                available_seats, vehicle.capacity
            )));
        }

        let price = trip.price.unwrap_or(route.base_price);

        self.repository
            .trips
            .create(
                company_id,
                route.id,
                vehicle.id,
                driver.id,
                departure,
                arrival,
                price,
                available_seats,
            )
            .await
    }

    /// Update a trip's assignment and schedule fields. Only permitted while
    /// the trip is not terminal.
    pub async fn update(&self, company_id: i32, id: i32, update: UpdateTrip) -> AppResult<Trip> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let current = self.repository.trips.get(company_id, id).await?;
        if current.status.is_terminal() {
            return Err(AppError::Conflict(
                ErrorCode::TripNotEditable,
                format!("Trip {} is {} and can no longer be edited", id, current.status),
            ));
        }

        // Resolve the post-update picture before touching the row
        let route_id = update.route_id.unwrap_or(current.route_id);
        let vehicle_id = update.vehicle_id.unwrap_or(current.vehicle_id);
        let driver_id = update.driver_id.unwrap_or(current.driver_id);
        let departure = update.departure_time.unwrap_or(current.departure_time);
        let arrival = update.arrival_time.unwrap_or(current.arrival_time);

        if arrival <= departure {
            return Err(AppError::Validation(
                "Arrival time must be after departure time".to_string(),
            ));
        }

        self.repository.routes.get(company_id, route_id).await?;

        if driver_id != current.driver_id {
            let driver = self.repository.personnel.get(company_id, driver_id).await?;
            if driver.personnel_type != PersonnelType::Driver {
                return Err(AppError::Validation(format!(
                    "Personnel {} is not a driver",
                    driver.id
                )));
            }
            if driver.status != PersonnelStatus::Active {
                return Err(AppError::Conflict(
                    ErrorCode::DriverUnavailable,
                    format!("Driver {} is not active", driver.id),
                ));
            }
        }

        let vehicle = self.repository.vehicles.get(company_id, vehicle_id).await?;
        if let Some(seats) = update.available_seats {
            if seats > vehicle.capacity {
                return Err(AppError::Validation(format!(
                    "Available seats ({}) exceed vehicle capacity ({})",
                    seats, vehicle.capacity
                )));
            }
        }

        if self
            .repository
            .trips
            .vehicle_overlaps(vehicle_id, departure, arrival, Some(id))
            .await?
        {
            return Err(AppError::Conflict(
                ErrorCode::VehicleBusy,
                format!("Vehicle {} is already assigned to an overlapping trip", vehicle_id),
            ));
        }

        self.repository.trips.update(company_id, id, &update).await
    }

    /// Apply a status transition, enforcing the state machine
    pub async fn set_status(&self, company_id: i32, id: i32, next: TripStatus) -> AppResult<Trip> {
        let current = self.repository.trips.get(company_id, id).await?;
        if !current.status.can_transition_to(next) {
            return Err(AppError::Conflict(
                ErrorCode::InvalidTransition,
                format!("Cannot transition trip from {} to {}", current.status, next),
            ));
        }
        self.repository.trips.set_status(id, next).await
    }

    /// Delete a trip. Only scheduled trips without active bookings can go.
    pub async fn delete(&self, company_id: i32, id: i32) -> AppResult<()> {
        let trip = self.repository.trips.get(company_id, id).await?;
        if trip.status != TripStatus::Scheduled {
            return Err(AppError::Conflict(
                ErrorCode::TripNotEditable,
                format!("Only scheduled trips can be deleted, trip {} is {}", id, trip.status),
            ));
        }
        if self.repository.trips.has_active_bookings(id).await? {
            return Err(AppError::Conflict(
                ErrorCode::TripNotEditable,
                format!("Trip {} still has active bookings", id),
            ));
        }
        self.repository.trips.delete(company_id, id).await
    }

    // ------------------------------------------------------------------
    // Stops
    // ------------------------------------------------------------------

    /// List a trip's stops in traversal order
    pub async fn list_stops(&self, company_id: i32, trip_id: i32) -> AppResult<Vec<TripStop>> {
        self.repository.trips.get(company_id, trip_id).await?;
        self.repository.stops.list_for_trip(trip_id).await
    }

    /// Add a stop to a trip. The caller picks a free stop_order.
    pub async fn add_stop(&self, company_id: i32, trip_id: i32, stop: CreateStop) -> AppResult<TripStop> {
        stop.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let trip = self.repository.trips.get(company_id, trip_id).await?;
        if trip.status.is_terminal() {
            return Err(AppError::Conflict(
                ErrorCode::TripNotEditable,
                format!("Trip {} is {} and can no longer be edited", trip_id, trip.status),
            ));
        }

        if stop.arrival_time > stop.departure_time {
            return Err(AppError::Validation(
                "Stop arrival time must not be after its departure time".to_string(),
            ));
        }

        // Station may belong to any company (shared terminals), it just has
        // to exist
        self.station_exists(stop.station_id).await?;

        self.repository.stops.create(trip_id, &stop).await
    }

    /// Partial update of a stop
    pub async fn update_stop(
        &self,
        company_id: i32,
        trip_id: i32,
        stop_id: i32,
        update: UpdateStop,
    ) -> AppResult<TripStop> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        self.repository.trips.get(company_id, trip_id).await?;
        let current = self.repository.stops.get(trip_id, stop_id).await?;

        let arrival = update.arrival_time.unwrap_or(current.arrival_time);
        let departure = update.departure_time.unwrap_or(current.departure_time);
        if arrival > departure {
            return Err(AppError::Validation(
                "Stop arrival time must not be after its departure time".to_string(),
            ));
        }

        if let Some(station_id) = update.station_id {
            self.station_exists(station_id).await?;
        }

        self.repository.stops.update(trip_id, stop_id, &update).await
    }

    /// Remove a stop from a trip
    pub async fn delete_stop(&self, company_id: i32, trip_id: i32, stop_id: i32) -> AppResult<()> {
        self.repository.trips.get(company_id, trip_id).await?;
        self.repository.stops.delete(trip_id, stop_id).await
    }

    /// Aggregate statistics over a trip's stop sequence, recomputed from the
    /// full stop set on every call
    pub async fn stop_stats(&self, company_id: i32, trip_id: i32) -> AppResult<StopStats> {
        let trip = self.repository.trips.get_details(company_id, trip_id).await?;
        let stops = self.repository.stops.list_for_trip(trip_id).await?;
        Ok(StopStats::compute(&stops, trip.vehicle_capacity))
    }

    async fn station_exists(&self, station_id: i32) -> AppResult<()> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM stations WHERE id = $1)")
            .bind(station_id)
            .fetch_one(&self.repository.pool)
            .await?;
        if !exists {
            return Err(AppError::NotFound(format!("Station with id {} not found", station_id)));
        }
        Ok(())
    }
}
