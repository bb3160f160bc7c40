//! Business logic services

pub mod auth;
pub mod bookings;
pub mod companies;
pub mod customers;
pub mod personnel;
pub mod routes;
pub mod stations;
pub mod stats;
pub mod trips;
pub mod vehicles;

use crate::{
    config::{AuthConfig, CommissionConfig},
    error::AppResult,
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub companies: companies::CompaniesService,
    pub stations: stations::StationsService,
    pub routes: routes::RoutesService,
    pub vehicles: vehicles::VehiclesService,
    pub personnel: personnel::PersonnelService,
    pub trips: trips::TripsService,
    pub bookings: bookings::BookingsService,
    pub customers: customers::CustomersService,
    pub stats: stats::StatsService,
}

impl Services {
    /// Create all services with the given repository
    pub async fn new(
        repository: Repository,
        auth_config: AuthConfig,
        commission_config: CommissionConfig,
    ) -> AppResult<Self> {
        let services = Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            companies: companies::CompaniesService::new(repository.clone()),
            stations: stations::StationsService::new(repository.clone()),
            routes: routes::RoutesService::new(repository.clone()),
            vehicles: vehicles::VehiclesService::new(repository.clone()),
            personnel: personnel::PersonnelService::new(repository.clone()),
            trips: trips::TripsService::new(repository.clone()),
            bookings: bookings::BookingsService::new(repository.clone(), commission_config.clone()),
            customers: customers::CustomersService::new(repository.clone()),
            stats: stats::StatsService::new(repository, commission_config),
        };

        // First start on an empty database gets a bootstrap admin account
        services.auth.ensure_bootstrap_admin().await?;

        Ok(services)
    }
}
