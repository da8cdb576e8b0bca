//! Sans-IO client core for the blog service.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern), and defines the in-memory
//! `BlogState` with the transition table that applies each operation's
//! outcome to it.
//!
//! # Design
//! - `BlogClient` is stateless; it holds only `base_url`.
//! - Bearer credentials are passed into every `build_*` call rather than
//!   read from shared state.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod state;
pub mod types;

pub use client::BlogClient;
pub use config::ClientConfig;
pub use credentials::Credentials;
pub use error::ApiError;
pub use http::{FormPart, HttpMethod, HttpRequest, HttpResponse, PartValue, RequestBody};
pub use state::{BlogAction, BlogState};
pub use types::{Attachment, BlogPatch, BlogRecord, NewBlog};
