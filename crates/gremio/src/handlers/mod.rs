pub mod curriculum;
pub mod error;
pub mod health;

pub use error::AppError;
