//! HTTP API: configuration, access gate, routing, and per-resource view state.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
