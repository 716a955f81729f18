//! Row types for each table and their conversion into domain values.

pub mod comment;
pub mod ticket;
pub mod user;
