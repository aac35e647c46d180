//! Client for the undocumented Duolingo web API.
//!
//! # Overview
//! Logs in, fetches users, languages and skills, and looks up word
//! translations. `ApiClient` builds `HttpRequest` values and parses
//! `HttpResponse` values without touching the network; `Duolingo` owns the
//! session and runs each request through a `Transport`.
//!
//! # Design
//! - `ApiClient` is stateless; it holds only the base URLs.
//! - Raw wire shapes (`schema`) are kept apart from the returned domain types
//!   (`types`); `mapping` holds the pure conversions between them.
//! - The session lives only inside `Duolingo`. Fetchers take `&self`,
//!   `login`/`logout` take `&mut self`.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod duolingo;
pub mod error;
pub mod http;
pub mod mapping;
pub mod schema;
pub mod session;
pub mod types;

pub use client::{ApiClient, LoginResult};
pub use config::ClientConfig;
pub use duolingo::Duolingo;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use session::Session;
pub use types::{Language, LanguageSummary, Skill, SkillSummary, Streak, Translations, User};
