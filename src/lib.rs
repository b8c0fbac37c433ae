// src/lib.rs — Library root for session-scorer

pub mod api;
pub mod cli;
pub mod core;
pub mod encoders;
pub mod features;
pub mod infra;
pub mod model;
