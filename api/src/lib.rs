//! Client for the Career AI REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend owns all state: accounts, profiles, roadmaps, applications
//! and the agent's chat transcript. This crate is the typed edge of that
//! contract. [`ApiClient`] wraps the HTTP calls, [`ChatSession`] keeps the
//! local transcript a chat view renders from.

pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use chat::{ChatBackend, ChatSession, Message, Role, SUGGESTIONS};
pub use client::ApiClient;
pub use config::{ApiConfig, ApiTimeouts};
pub use error::ApiError;
pub use types::{AuthResponse, HistoryEntry, Resource, User};
