//! Data models for AfriCar

pub mod booking;
pub mod company;
pub mod customer;
pub mod enums;
pub mod personnel;
pub mod route;
pub mod staff;
pub mod station;
pub mod stop;
pub mod trip;
pub mod vehicle;

// Re-export commonly used types
pub use booking::{Booking, BookingDetails};
pub use company::{Company, CompanyDetails};
pub use customer::Customer;
pub use enums::{BookingStatus, CompanyStatus, CustomerStatus, PersonnelStatus, PersonnelType, StationStatus, StopStatus, TripStatus, VehicleStatus};
pub use personnel::Personnel;
pub use route::Route;
pub use staff::{StaffClaims, StaffUser};
pub use station::Station;
pub use stop::TripStop;
pub use trip::{Trip, TripDetails};
pub use vehicle::Vehicle;
