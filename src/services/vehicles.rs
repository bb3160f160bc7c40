//! Vehicle management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::vehicle::{CreateVehicle, UpdateVehicle, Vehicle},
    repository::Repository,
};

#[derive(Clone)]
pub struct VehiclesService {
    repository: Repository,
}

impl VehiclesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List a company's vehicles
    pub async fn list(&self, company_id: i32) -> AppResult<Vec<Vehicle>> {
        self.repository.companies.get_by_id(company_id).await?;
        self.repository.vehicles.list_for_company(company_id).await
    }

    /// Get a vehicle
    pub async fn get(&self, company_id: i32, id: i32) -> AppResult<Vehicle> {
        self.repository.vehicles.get(company_id, id).await
    }

    /// Create a new vehicle
    pub async fn create(&self, company_id: i32, vehicle: CreateVehicle) -> AppResult<Vehicle> {
        vehicle
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.companies.get_by_id(company_id).await?;
        self.repository.vehicles.create(company_id, &vehicle).await
    }

    /// Update an existing vehicle
    pub async fn update(&self, company_id: i32, id: i32, vehicle: UpdateVehicle) -> AppResult<Vehicle> {
        vehicle
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.vehicles.update(company_id, id, &vehicle).await
    }

    /// Delete a vehicle
    pub async fn delete(&self, company_id: i32, id: i32) -> AppResult<()> {
        self.repository.vehicles.delete(company_id, id).await
    }
}
