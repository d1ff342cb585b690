// src/services/mod.rs
pub mod car_service;
pub mod driver_service;
pub mod manufacturer_service;
pub mod store;

pub use car_service::{CarOperations, CarService};
pub use driver_service::{DriverOperations, DriverService};
pub use manufacturer_service::{ManufacturerOperations, ManufacturerService};
pub use store::FleetStore;
