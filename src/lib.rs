//! Core workflows for a beauty-service marketplace back office: the vendor
//! approval gate and the booking assignment state machine, plus the thin
//! HTTP surface that exposes them.

pub mod config;
pub mod error;
pub mod store;
pub mod telemetry;
pub mod workflows;
