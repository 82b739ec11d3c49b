//! API models for request and response payloads

pub mod coerce;
pub mod favorite;
pub mod history;
pub mod user;
