//! Backend services for the devochat application.
//!
//! Ships two entry points: the HTTP server (image generation via the
//! Hugging Face Inference API, persisted as conversation messages) and the
//! `make-admin` tool that grants admin rights to a registered user.

pub mod auth;
pub mod config;
pub mod error;
pub mod hf;
pub mod models;
pub mod permissions;
pub mod prompt;
pub mod routes;
pub mod state;
pub mod store;

pub use error::{Error, Result};
