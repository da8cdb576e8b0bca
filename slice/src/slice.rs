//! The blog state slice: four async operations over one `BlogState`.
//!
//! # Design
//! Each operation builds its request with `BlogClient`, runs it through the
//! `Transport`, parses the response, and dispatches the outcome to the state
//! held in a `watch` channel. The UI subscribes to that channel and re-renders
//! on change.
//!
//! Operations take `&self`, so any number can be in flight at once. State is
//! only touched inside `dispatch`, which applies one action synchronously; the
//! last operation to resolve wins. Only the list fetch reports its pending and
//! failed phases to the state. Create, update and delete failures are handed
//! back to the caller and leave `error` untouched.

use blog_core::{
    ApiError, BlogAction, BlogClient, BlogPatch, BlogRecord, BlogState, Credentials, NewBlog,
};
use tokio::sync::watch;
use tracing::Instrument;
use uuid::Uuid;

use crate::transport::Transport;

pub struct BlogSlice<T> {
    client: BlogClient,
    transport: T,
    state: watch::Sender<BlogState>,
}

impl<T: Transport> BlogSlice<T> {
    pub fn new(client: BlogClient, transport: T) -> Self {
        let (state, _) = watch::channel(BlogState::default());
        Self {
            client,
            transport,
            state,
        }
    }

    pub fn client(&self) -> &BlogClient {
        &self.client
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> BlogState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<BlogState> {
        self.state.subscribe()
    }

    pub fn dispatch(&self, action: BlogAction) {
        tracing::debug!(action = action.type_tag(), "dispatch");
        self.state.send_modify(|state| state.apply(action));
    }

    pub async fn list_blogs(&self, credentials: &Credentials) -> Result<Vec<BlogRecord>, ApiError> {
        let span = tracing::info_span!("list_blogs", request_id = %Uuid::new_v4());
        async {
            self.dispatch(BlogAction::FetchPending);
            let request = self.client.build_list_blogs(credentials);
            let result = match self.transport.execute(request).await {
                Ok(response) => self.client.parse_list_blogs(response),
                Err(err) => Err(err),
            };
            match result {
                Ok(blogs) => {
                    tracing::info!(count = blogs.len(), "blogs fetched");
                    self.dispatch(BlogAction::FetchFulfilled(blogs.clone()));
                    Ok(blogs)
                }
                Err(err) => {
                    tracing::warn!(error = %err, "fetching blogs failed");
                    self.dispatch(BlogAction::FetchRejected(err.rejection_message()));
                    Err(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    pub async fn create_blog(&self, credentials: &Credentials, input: NewBlog) -> Result<BlogRecord, ApiError> {
        let span = tracing::info_span!("create_blog", request_id = %Uuid::new_v4());
        async {
            let request = self.client.build_create_blog(credentials, &input);
            let response = self.transport.execute(request).await?;
            let record = self.client.parse_create_blog(response).inspect_err(|err| {
                tracing::warn!(error = %err, "creating blog failed");
            })?;
            tracing::info!(id = %record.id, "blog created");
            self.dispatch(BlogAction::Created(record.clone()));
            Ok(record)
        }
        .instrument(span)
        .await
    }

    pub async fn update_blog(
        &self,
        credentials: &Credentials,
        id: &str,
        patch: &BlogPatch,
    ) -> Result<BlogRecord, ApiError> {
        let span = tracing::info_span!("update_blog", request_id = %Uuid::new_v4(), %id);
        async {
            let request = self.client.build_update_blog(credentials, id, patch)?;
            let response = self.transport.execute(request).await?;
            let record = self.client.parse_update_blog(response).inspect_err(|err| {
                tracing::warn!(error = %err, "updating blog failed");
            })?;
            self.dispatch(BlogAction::Updated(record.clone()));
            Ok(record)
        }
        .instrument(span)
        .await
    }

    pub async fn delete_blog(&self, credentials: &Credentials, id: &str) -> Result<String, ApiError> {
        let span = tracing::info_span!("delete_blog", request_id = %Uuid::new_v4(), %id);
        async {
            let request = self.client.build_delete_blog(credentials, id);
            let response = self.transport.execute(request).await?;
            let deleted = self.client.parse_delete_blog(id, response).inspect_err(|err| {
                tracing::warn!(error = %err, "deleting blog failed");
            })?;
            self.dispatch(BlogAction::Deleted(deleted.clone()));
            Ok(deleted)
        }
        .instrument(span)
        .await
    }
}
