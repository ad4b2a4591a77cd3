//! Database models and configuration shared across the directory.

pub mod config;
pub mod customer;
