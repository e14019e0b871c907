pub mod catalog;
pub mod connection;
pub mod error;
pub mod search;

// Re-exports to keep imports short elsewhere
pub use error::DomainError;
