pub mod errors;
pub mod forms;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use errors::{TaxiError, TaxiResult, ValidationError};
pub use forms::validate_license_number;
pub use handlers::create_app;
