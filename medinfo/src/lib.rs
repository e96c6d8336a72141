//! Shared session, API, and form logic for the MedQR admin frontend.
//!
//! This crate owns everything that does not need a browser: the REST wire
//! types, the HTTP client wrapper over a pluggable [`client::Transport`], the
//! session state machine and the service that drives it, route-guard
//! decisions, and client-side validation. The Leptos `client` and the `cli`
//! both build on it, plugging in their own transport and credential storage.

pub mod client;
pub mod config;
pub mod error;
pub mod guard;
pub mod records;
pub mod service;
pub mod session;
pub mod store;
pub mod translation;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use client::{ApiClient, HttpRequest, HttpResponse, Method, Transport};
pub use config::ApiConfig;
pub use error::{ApiError, StoreError, TransportError};
pub use service::{AuthOutcome, SessionService};
pub use session::{Session, SessionAction, SessionPhase};
pub use store::{CredentialStore, Credentials, MemoryStore};
pub use types::{AdminProfile, InfoRecord, LoginRequest, NewInfoRecord, SignupRequest};
