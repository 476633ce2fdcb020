pub mod client;
pub mod config;
pub mod dedup;
pub mod error;
pub mod model;
pub mod service;
pub mod web;
