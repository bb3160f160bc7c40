//! Personnel management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::enums::PersonnelType,
    models::personnel::{CreatePersonnel, Personnel, PersonnelQuery, UpdatePersonnel},
    repository::Repository,
};

#[derive(Clone)]
pub struct PersonnelService {
    repository: Repository,
}

impl PersonnelService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List a company's personnel with optional type/status filters
    pub async fn list(&self, company_id: i32, query: &PersonnelQuery) -> AppResult<Vec<Personnel>> {
        self.repository.companies.get_by_id(company_id).await?;
        self.repository.personnel.list_for_company(company_id, query).await
    }

    /// Get a personnel record
    pub async fn get(&self, company_id: i32, id: i32) -> AppResult<Personnel> {
        self.repository.personnel.get(company_id, id).await
    }

    /// Create a new personnel record. Drivers must carry a license number.
    pub async fn create(&self, company_id: i32, personnel: CreatePersonnel) -> AppResult<Personnel> {
        personnel
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if personnel.personnel_type == PersonnelType::Driver
            && personnel.license_number.as_deref().map_or(true, |l| l.is_empty())
        {
            return Err(AppError::Validation(
                "Drivers must have a license number".to_string(),
            ));
        }

        self.repository.companies.get_by_id(company_id).await?;
        self.repository.personnel.create(company_id, &personnel).await
    }

    /// Update an existing personnel record
    pub async fn update(&self, company_id: i32, id: i32, personnel: UpdatePersonnel) -> AppResult<Personnel> {
        personnel
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.personnel.update(company_id, id, &personnel).await
    }

    /// Delete a personnel record
    pub async fn delete(&self, company_id: i32, id: i32) -> AppResult<()> {
        self.repository.personnel.delete(company_id, id).await
    }
}
