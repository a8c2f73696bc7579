// Public API - what other modules can use
pub use handlers::{publish, query, unpublish};

// Internal modules
pub mod clock;
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
pub mod types;
