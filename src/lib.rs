pub mod calendar;
pub mod cart;
pub mod config;
pub mod demand;
pub mod dispatch;
pub mod dto;
pub mod error;
pub mod harvest;
pub mod middleware;
pub mod models;
pub mod response;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
