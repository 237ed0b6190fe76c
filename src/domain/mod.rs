//! Core domain types and logic.

pub mod price;
pub mod indicator;
pub mod signal;
pub mod strategy;
pub mod portfolio;
pub mod backtest;
pub mod monthly;
pub mod accumulation;
pub mod metrics;
pub mod universe;
pub mod config;
pub mod config_validation;
pub mod error;
