//! zintel - completion commit engine for C/C++-like editors
//!
//! Module structure:
//! - intel: candidate model, proposal items, commit algorithm
//! - models: rope-backed text buffer
//! - surface: buffer contract the commit algorithm edits through
//! - config: persisted completion settings
//! - logging: tracing bootstrap for hosts

pub mod config;
pub mod intel;
pub mod logging;
pub mod models;
pub mod surface;
