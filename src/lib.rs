pub mod config;
pub mod controllers;
pub mod datasource;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;
