//! Library exports for dashgate, shared between the binary and tests.

pub mod auth;
pub mod config;
pub mod guard;
pub mod menu;
pub mod models;
pub mod pages;
pub mod providers;
pub mod routes;
pub mod startup;
pub mod state;
pub mod utils;
