pub mod config;
pub mod cuisine;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
