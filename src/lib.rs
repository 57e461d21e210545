//! MediNova Library
//!
//! Weekly diet and exercise plans, nutrition and workout totals, and BMI.

pub mod client;
pub mod config;
pub mod db;
pub mod mcp;
pub mod metrics;
pub mod models;
pub mod planner;
pub mod tools;
