//! Route management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::route::{CreateRoute, Route, RouteDetails, UpdateRoute},
    repository::Repository,
};

#[derive(Clone)]
pub struct RoutesService {
    repository: Repository,
}

impl RoutesService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List a company's routes
    pub async fn list(&self, company_id: i32) -> AppResult<Vec<RouteDetails>> {
        self.repository.companies.get_by_id(company_id).await?;
        self.repository.routes.list_for_company(company_id).await
    }

    /// Get a route with station names
    pub async fn get(&self, company_id: i32, id: i32) -> AppResult<RouteDetails> {
        self.repository.routes.get_details(company_id, id).await
    }

    /// Create a new route. Both stations must belong to the company and must
    /// differ.
    pub async fn create(&self, company_id: i32, route: CreateRoute) -> AppResult<Route> {
        route
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.check_station_pair(company_id, route.departure_station_id, route.arrival_station_id)
            .await?;
        self.repository.routes.create(company_id, &route).await
    }

    /// Update an existing route, revalidating the resulting station pair
    pub async fn update(&self, company_id: i32, id: i32, route: UpdateRoute) -> AppResult<Route> {
        route
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let current = self.repository.routes.get(company_id, id).await?;
        let departure = route.departure_station_id.unwrap_or(current.departure_station_id);
        let arrival = route.arrival_station_id.unwrap_or(current.arrival_station_id);
        self.check_station_pair(company_id, departure, arrival).await?;

        self.repository.routes.update(company_id, id, &route).await
    }

    /// Delete a route
    pub async fn delete(&self, company_id: i32, id: i32) -> AppResult<()> {
        self.repository.routes.delete(company_id, id).await
    }

    async fn check_station_pair(
        &self,
        company_id: i32,
        departure_station_id: i32,
        arrival_station_id: i32,
    ) -> AppResult<()> {
        if departure_station_id == arrival_station_id {
            return Err(AppError::Validation(
                "Departure and arrival stations must differ".to_string(),
            ));
        }
        self.repository.stations.get(company_id, departure_station_id).await?;
        self.repository.stations.get(company_id, arrival_station_id).await?;
        Ok(())
    }
}
