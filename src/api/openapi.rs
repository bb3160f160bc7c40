//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, bookings, companies, customers, health, personnel, routes, stations, stats, trips, vehicles};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AfriCar API",
        version = "1.0.0",
        description = "Bus Transport Marketplace REST API",
        contact(name = "AfriCar Team", email = "contact@africar.app")
    ),
    servers(
        (url = "/api", description = "API root")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Companies
        companies::list_companies,
        companies::get_company,
        companies::create_company,
        companies::update_company,
        companies::update_company_status,
        // Stations
        stations::list_stations,
        stations::get_station,
        stations::create_station,
        stations::update_station,
        stations::delete_station,
        // Routes
        routes::list_routes,
        routes::get_route,
        routes::create_route,
        routes::update_route,
        routes::delete_route,
        // Vehicles
        vehicles::list_vehicles,
        vehicles::get_vehicle,
        vehicles::create_vehicle,
        vehicles::update_vehicle,
        vehicles::delete_vehicle,
        // Personnel
        personnel::list_personnel,
        personnel::get_personnel,
        personnel::create_personnel,
        personnel::update_personnel,
        personnel::delete_personnel,
        // Trips
        trips::list_trips,
        trips::get_trip,
        trips::create_trip,
        trips::update_trip,
        trips::update_trip_status,
        trips::delete_trip,
        trips::list_stops,
        trips::get_stop_stats,
        trips::create_stop,
        trips::update_stop,
        trips::delete_stop,
        // Customers
        customers::list_customers,
        customers::create_customer,
        customers::update_customer,
        customers::update_customer_status,
        // Bookings
        bookings::list_bookings,
        bookings::get_booking,
        bookings::create_booking,
        bookings::update_booking_status,
        // Dashboard
        stats::get_dashboard_stats,
        stats::get_customer_growth,
        stats::get_company_stats,
        stats::get_trip_stats,
        stats::get_recent_activities,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            crate::models::staff::StaffProfile,
            crate::models::staff::StaffRole,
            // Companies
            crate::models::company::Company,
            crate::models::company::CompanyDetails,
            crate::models::company::CreateCompany,
            crate::models::company::UpdateCompany,
            crate::models::company::UpdateCompanyStatus,
            crate::models::enums::CompanyStatus,
            // Stations
            crate::models::station::Station,
            crate::models::station::CreateStation,
            crate::models::station::UpdateStation,
            crate::models::enums::StationStatus,
            // Routes
            crate::models::route::Route,
            crate::models::route::RouteDetails,
            crate::models::route::CreateRoute,
            crate::models::route::UpdateRoute,
            // Vehicles
            crate::models::vehicle::Vehicle,
            crate::models::vehicle::CreateVehicle,
            crate::models::vehicle::UpdateVehicle,
            crate::models::enums::VehicleStatus,
            // Personnel
            crate::models::personnel::Personnel,
            crate::models::personnel::CreatePersonnel,
            crate::models::personnel::UpdatePersonnel,
            crate::models::enums::PersonnelType,
            crate::models::enums::PersonnelStatus,
            // Trips
            crate::models::trip::Trip,
            crate::models::trip::TripDetails,
            crate::models::trip::CreateTrip,
            crate::models::trip::UpdateTrip,
            crate::models::trip::UpdateTripStatus,
            crate::models::enums::TripStatus,
            // Stops
            crate::models::stop::TripStop,
            crate::models::stop::CreateStop,
            crate::models::stop::UpdateStop,
            crate::models::stop::StopStats,
            crate::models::enums::StopStatus,
            // Customers
            crate::models::customer::Customer,
            crate::models::customer::CreateCustomer,
            crate::models::customer::UpdateCustomer,
            crate::models::customer::UpdateCustomerStatus,
            crate::models::enums::CustomerStatus,
            // Bookings
            crate::models::booking::Booking,
            crate::models::booking::BookingDetails,
            crate::models::booking::CreateBooking,
            crate::models::booking::UpdateBookingStatus,
            crate::models::booking::PassengerManifest,
            crate::models::booking::PassengerEntry,
            crate::models::enums::BookingStatus,
            // Dashboard
            stats::DashboardStats,
            stats::BookingSummary,
            stats::CommissionSummary,
            stats::StatEntry,
            stats::RevenuePoint,
            stats::CompanyPerformance,
            stats::RoutePopularity,
            stats::HistogramEntry,
            stats::GrowthPoint,
            stats::ActivityEntry,
            stats::TripStatsResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "companies", description = "Transport company management"),
        (name = "stations", description = "Station management"),
        (name = "routes", description = "Route management"),
        (name = "vehicles", description = "Fleet management"),
        (name = "personnel", description = "Driver and agent management"),
        (name = "trips", description = "Trip scheduling and stops"),
        (name = "customers", description = "Customer account management"),
        (name = "bookings", description = "Booking lifecycle"),
        (name = "dashboard", description = "Analytics dashboards")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
