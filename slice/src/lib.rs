//! Async blog state slice.
//!
//! # Overview
//! Wires the sans-IO `blog-core` client to a real HTTP stack and keeps the
//! UI-facing `BlogState` in sync with server responses.
//!
//! # Design
//! - `Transport` abstracts the round-trip; `ReqwestTransport` is the
//!   production implementation.
//! - `BlogSlice` owns the state and exposes `list_blogs`, `create_blog`,
//!   `update_blog` and `delete_blog`. Callers pass `Credentials` per call.

pub mod slice;
pub mod transport;

pub use blog_core::{
    ApiError, Attachment, BlogAction, BlogClient, BlogPatch, BlogRecord, BlogState, ClientConfig,
    Credentials, NewBlog,
};
pub use slice::BlogSlice;
pub use transport::{ReqwestTransport, Transport};

