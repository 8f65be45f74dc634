//! Core domain types and logic.

pub mod bar;
pub mod config_validation;
pub mod engine;
pub mod equity;
pub mod error;
pub mod metrics;
pub mod rules;
pub mod series;
pub mod synthetic;
pub mod trade;
