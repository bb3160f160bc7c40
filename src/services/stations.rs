//! Station management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::station::{CreateStation, Station, UpdateStation},
    repository::Repository,
};

#[derive(Clone)]
pub struct StationsService {
    repository: Repository,
}

impl StationsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List a company's stations
    pub async fn list(&self, company_id: i32) -> AppResult<Vec<Station>> {
        // Verify company exists
        self.repository.companies.get_by_id(company_id).await?;
        self.repository.stations.list_for_company(company_id).await
    }

    /// Get a station
    pub async fn get(&self, company_id: i32, id: i32) -> AppResult<Station> {
        self.repository.stations.get(company_id, id).await
    }

    /// Create a new station
    pub async fn create(&self, company_id: i32, station: CreateStation) -> AppResult<Station> {
        station
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.companies.get_by_id(company_id).await?;
        self.repository.stations.create(company_id, &station).await
    }

    /// Update an existing station
    pub async fn update(&self, company_id: i32, id: i32, station: UpdateStation) -> AppResult<Station> {
        station
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.stations.update(company_id, id, &station).await
    }

    /// Delete a station
    pub async fn delete(&self, company_id: i32, id: i32) -> AppResult<()> {
        self.repository.stations.delete(company_id, id).await
    }
}
