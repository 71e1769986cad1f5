//! API Route Handlers

pub mod dashboard;
pub mod export;
pub mod health;
