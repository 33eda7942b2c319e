//! Lab equipment checkout/return tracker
//!
//! The server owns the status store and activity log and decides every
//! operation. Kiosk and admin clients talk to it over HTTP.

pub mod adapters;
pub mod api;
pub mod application;
pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod ports;
pub mod view;
