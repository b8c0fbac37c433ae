// src/infra/mod.rs

pub mod artifacts;
pub mod config;
pub mod errors;
pub mod logger;
pub mod paths;
