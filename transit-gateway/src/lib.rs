//! Transit gateway server.
//!
//! A REST gateway that puts the bus tracker and train tracker APIs behind
//! one schema-validated HTTP surface.

pub mod bus;
pub mod config;
pub mod provider;
pub mod schema;
pub mod train;
pub mod web;
