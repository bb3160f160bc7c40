//! Company management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::company::{Company, CompanyDetails, CompanyQuery, CreateCompany, UpdateCompany},
    models::enums::CompanyStatus,
    repository::Repository,
};

#[derive(Clone)]
pub struct CompaniesService {
    repository: Repository,
}

impl CompaniesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search companies with live resource counts
    pub async fn search(&self, query: &CompanyQuery) -> AppResult<(Vec<CompanyDetails>, i64)> {
        self.repository.companies.search(query).await
    }

    /// Get a company with live resource counts
    pub async fn get(&self, id: i32) -> AppResult<CompanyDetails> {
        self.repository.companies.get_details(id).await
    }

    /// Create a new company
    pub async fn create(&self, company: CreateCompany) -> AppResult<Company> {
        company
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.companies.create(&company).await
    }

    /// Update an existing company
    pub async fn update(&self, id: i32, company: UpdateCompany) -> AppResult<Company> {
        company
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.companies.update(id, &company).await
    }

    /// Toggle a company's status (never hard-deleted)
    pub async fn set_status(&self, id: i32, status: CompanyStatus) -> AppResult<Company> {
        self.repository.companies.set_status(id, status).await
    }
}
