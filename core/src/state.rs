//! In-memory collection state and its transition table.
//!
//! # Design
//! `BlogState` is only ever changed through `BlogState::apply`, one action
//! per resolved operation. Only the list fetch has pending and rejected
//! transitions; create, update and delete apply on success and leave
//! `loading` and `error` alone.

use crate::types::BlogRecord;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlogState {
    /// Server order, except that newly created records are prepended.
    pub blogs: Vec<BlogRecord>,
    /// True only while a list fetch is in flight.
    pub loading: bool,
    /// Last list-fetch failure.
    pub error: Option<String>,
}

/// The outcome of an operation, as applied to `BlogState`.
#[derive(Debug, Clone, PartialEq)]
pub enum BlogAction {
    FetchPending,
    FetchFulfilled(Vec<BlogRecord>),
    FetchRejected(String),
    Created(BlogRecord),
    Updated(BlogRecord),
    Deleted(String),
}

impl BlogAction {
    pub fn type_tag(&self) -> &'static str {
        match self {
            BlogAction::FetchPending => "blogs/fetch/pending",
            BlogAction::FetchFulfilled(_) => "blogs/fetch/fulfilled",
            BlogAction::FetchRejected(_) => "blogs/fetch/rejected",
            BlogAction::Created(_) => "blog/create/fulfilled",
            BlogAction::Updated(_) => "blogs/update/fulfilled",
            BlogAction::Deleted(_) => "blogs/delete/fulfilled",
        }
    }
}

impl BlogState {
    pub fn apply(&mut self, action: BlogAction) {
        match action {
            BlogAction::FetchPending => {
                self.loading = true;
                self.error = None;
            }
            BlogAction::FetchFulfilled(blogs) => {
                self.loading = false;
                self.blogs = blogs;
            }
            BlogAction::FetchRejected(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            BlogAction::Created(record) => {
                self.blogs.insert(0, record);
            }
            BlogAction::Updated(record) => {
                // No match is a no-op, not an error.
                for blog in self.blogs.iter_mut().filter(|b| b.same_identity(&record)) {
                    *blog = record.clone();
                }
            }
            BlogAction::Deleted(id) => {
                self.blogs.retain(|b| b.id != id);
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<&BlogRecord> {
        self.blogs.iter().find(|b| b.id == id)
    }
}
