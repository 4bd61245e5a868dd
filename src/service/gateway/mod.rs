pub mod common_error;
pub mod contract;
pub mod error;
pub mod models;
pub mod service;
