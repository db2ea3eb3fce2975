//! Library crate for leaderboard-back, exposing modules for binaries and integration tests.

pub mod config;
/// Score persistence: entities, storage errors and the SQL backends.
pub mod dao;
mod dto;
mod error;
/// HTTP routes and the router they compose into.
pub mod routes;
/// Business operations behind the routes.
pub mod services;
/// Shared application state.
pub mod state;
