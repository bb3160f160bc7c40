//! Repository layer for database operations

pub mod bookings;
pub mod companies;
pub mod customers;
pub mod personnel;
pub mod routes;
pub mod staff;
pub mod stations;
pub mod stops;
pub mod trips;
pub mod vehicles;

use sqlx::{Pool, Postgres};

use crate::error::AppError;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub companies: companies::CompaniesRepository,
    pub stations: stations::StationsRepository,
    pub routes: routes::RoutesRepository,
    pub vehicles: vehicles::VehiclesRepository,
    pub personnel: personnel::PersonnelRepository,
    pub trips: trips::TripsRepository,
    pub stops: stops::StopsRepository,
    pub customers: customers::CustomersRepository,
    pub bookings: bookings::BookingsRepository,
    pub staff: staff::StaffRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            companies: companies::CompaniesRepository::new(pool.clone()),
            stations: stations::StationsRepository::new(pool.clone()),
            routes: routes::RoutesRepository::new(pool.clone()),
            vehicles: vehicles::VehiclesRepository::new(pool.clone()),
            personnel: personnel::PersonnelRepository::new(pool.clone()),
            trips: trips::TripsRepository::new(pool.clone()),
            stops: stops::StopsRepository::new(pool.clone()),
            customers: customers::CustomersRepository::new(pool.clone()),
            bookings: bookings::BookingsRepository::new(pool.clone()),
            staff: staff::StaffRepository::new(pool.clone()),
            pool,
        }
    }
}

/// Translate unique / foreign-key violations into a domain conflict,
/// leaving every other database error untouched
pub(crate) fn constraint_error(err: sqlx::Error, message: &str) -> AppError {
    let code = err
        .as_database_error()
        .and_then(|e| e.code().map(|c| c.to_string()));
    match code.as_deref() {
        Some("23505") | Some("23503") => AppError::conflict(message),
        _ => AppError::Database(err),
    }
}
