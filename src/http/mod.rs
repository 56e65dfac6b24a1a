//! HTTP presentation layer: one browse view, one admin surface

pub mod handler;
pub mod server;

pub use handler::ADMIN_TOKEN_HEADER;
pub use server::{AppState, HttpServer};
