pub mod auth;
pub mod authz;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod impact;
pub mod middleware;
pub mod services;
pub mod starter;
pub mod store;
