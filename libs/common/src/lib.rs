//! Common library for the TikTok publisher backend
//!
//! This crate provides shared functionality used across the services,
//! currently the in-memory access token store.

pub mod token_store;

pub use token_store::{StoredToken, TokenStore};
