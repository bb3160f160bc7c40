//! Customer account management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::customer::{CreateCustomer, Customer, CustomerQuery, UpdateCustomer},
    models::enums::CustomerStatus,
    repository::Repository,
};

#[derive(Clone)]
pub struct CustomersService {
    repository: Repository,
}

impl CustomersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Search customers
    pub async fn search(&self, query: &CustomerQuery) -> AppResult<(Vec<Customer>, i64)> {
        self.repository.customers.search(query).await
    }

    /// Get a customer
    pub async fn get(&self, id: i32) -> AppResult<Customer> {
        self.repository.customers.get_by_id(id).await
    }

    /// Register a customer account on behalf of a walk-in traveller
    pub async fn create(&self, customer: CreateCustomer) -> AppResult<Customer> {
        customer
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.customers.create(&customer).await
    }

    /// Update a customer's identity and contact fields
    pub async fn update(&self, id: i32, customer: UpdateCustomer) -> AppResult<Customer> {
        customer
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.customers.update(id, &customer).await
    }

    /// Change a customer's account status
    pub async fn set_status(&self, id: i32, status: CustomerStatus) -> AppResult<Customer> {
        self.repository.customers.set_status(id, status).await
    }
}
