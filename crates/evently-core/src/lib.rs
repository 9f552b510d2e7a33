//! Core evently library (session, API client, routing, config).

pub mod api;
pub mod config;
pub mod events;
pub mod logging;
pub mod routes;
pub mod session;
