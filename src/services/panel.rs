//! Entity CRUD panel
//!
//! A panel owns, for one resource type, the cached collection, the editor
//! session and the failure notice. Every mutation goes to the server first;
//! the collection is only ever replaced by a fresh list fetch.

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{EntityId, Resource},
    repository::RemoteCollection,
    validation::ValidationResult,
};

use super::{editor::EditorSession, notifier::Notifier};

/// Outcome of submitting the open editor
#[derive(Debug, Clone, PartialEq)]
pub enum Submission<T> {
    /// The server accepted the write; the editor is closed. Holds the saved
    /// entity when the server echoed it back.
    Saved(Option<T>),
    /// Client-side validation failed; nothing was sent
    Invalid(ValidationResult),
    /// The server or network refused; the notifier holds the reason
    Failed,
}

impl<T> Submission<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Submission<U> {
        match self {
            Submission::Saved(value) => Submission::Saved(value.map(f)),
            Submission::Invalid(errors) => Submission::Invalid(errors),
            Submission::Failed => Submission::Failed,
        }
    }
}

pub struct Panel<R: Resource> {
    remote: Arc<dyn RemoteCollection<R>>,
    collection: Vec<R::Entity>,
    editor: EditorSession<R>,
    notifier: Notifier,
}

impl<R: Resource> Panel<R> {
    /// Create an empty panel; call [`Panel::refresh`] to load it
    pub fn new(remote: Arc<dyn RemoteCollection<R>>) -> Self {
        Self {
            remote,
            collection: Vec::new(),
            editor: EditorSession::Closed,
            notifier: Notifier::new(),
        }
    }

    /// Create a panel and fetch its collection
    pub async fn mount(remote: Arc<dyn RemoteCollection<R>>) -> Self {
        let mut panel = Self::new(remote);
        panel.refresh().await;
        panel
    }

    pub fn collection(&self) -> &[R::Entity] {
        &self.collection
    }

    pub fn editor(&self) -> &EditorSession<R> {
        &self.editor
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn find(&self, id: EntityId) -> Option<&R::Entity> {
        self.collection.iter().find(|e| R::entity_id(e) == id)
    }

    /// Replace the collection with the server's list. On failure the previous
    /// collection stays and the notifier is set.
    pub async fn refresh(&mut self) -> bool {
        match self.remote.list().await {
            Ok(entities) => {
                tracing::debug!("Fetched {} {}", entities.len(), R::KIND.plural());
                self.collection = entities;
                true
            }
            Err(e) => {
                self.fail(&format!("Error fetching {}", R::KIND.plural()), &e);
                false
            }
        }
    }

    pub fn open_new(&mut self) -> AppResult<()> {
        self.editor.open_new()
    }

    /// Open the editor on a cached entity
    pub fn open_edit(&mut self, id: EntityId) -> AppResult<()> {
        if self.editor.is_open() {
            return Err(AppError::EditorBusy);
        }
        let entity = self
            .find(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("{} {}", R::KIND.singular(), id)))?;
        self.editor.open_existing(entity)
    }

    pub fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        self.editor.set_field(field, value)
    }

    /// Close the editor without sending anything
    pub fn cancel(&mut self) {
        self.editor.close();
    }

    pub fn dismiss(&mut self) {
        self.notifier.dismiss();
    }

    /// Validate the draft and, when valid, send exactly one create or update.
    ///
    /// Errors only when no editor is open (or the draft cannot be mapped to a
    /// payload); remote failures are reported through the notifier.
    pub async fn submit(&mut self) -> AppResult<Submission<R::Entity>> {
        let mode = self.editor.mode().ok_or(AppError::EditorClosed)?;
        let draft = self.editor.draft().cloned().ok_or(AppError::EditorClosed)?;

        let errors = R::validate(&draft, mode);
        if !errors.is_valid() {
            tracing::debug!("{} draft rejected: {}", R::KIND.singular(), errors);
            self.editor.attach_errors(errors.clone());
            return Ok(Submission::Invalid(errors));
        }

        let result = match self.editor.editing_id() {
            Some(id) => {
                let payload = R::update_payload(&draft)?;
                self.remote.update(id, &payload).await
            }
            None => {
                let payload = R::create_payload(&draft)?;
                self.remote.create(&payload).await
            }
        };

        match result {
            Ok(entity) => {
                match &entity {
                    Some(entity) => tracing::info!("Saved {} {}", R::KIND.singular(), R::entity_id(entity)),
                    None => tracing::info!("Saved {}", R::KIND.singular()),
                }
                self.editor.close();
                self.refresh().await;
                Ok(Submission::Saved(entity))
            }
            Err(e) => {
                self.fail(&format!("Error saving {}", R::KIND.singular()), &e);
                Ok(Submission::Failed)
            }
        }
    }

    /// Delete an entity on the server, then refetch
    pub async fn delete(&mut self, id: EntityId) -> bool {
        match self.remote.delete(id).await {
            Ok(()) => {
                tracing::info!("Deleted {} {}", R::KIND.singular(), id);
                if self.editor.editing_id() == Some(id) {
                    self.editor.close();
                }
                self.refresh().await;
                true
            }
            Err(e) => {
                self.fail(&format!("Error deleting {}", R::KIND.singular()), &e);
                false
            }
        }
    }

    fn fail(&mut self, headline: &str, error: &AppError) {
        tracing::error!("{}: {}", headline, error);
        self.notifier.notify(error.notice(headline));
    }
}
