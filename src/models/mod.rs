// src/models/mod.rs
pub mod car;
pub mod driver;
pub mod manufacturer;

pub use car::*;
pub use driver::*;
pub use manufacturer::*;
