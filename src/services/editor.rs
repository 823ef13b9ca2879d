//! Editor session state machine
//!
//! ```text
//! Closed --open_new--> Creating
//! Closed --open_existing--> Editing
//! Creating | Editing --close--> Closed
//! Creating | Editing --attach_errors--> same state
//! ```
//!
//! Opening while a session is already open is refused; a panel owns a single
//! editor.

use crate::{
    error::{AppError, AppResult},
    models::{Draft, EditMode, EntityId, Resource},
    validation::ValidationResult,
};

#[derive(Debug)]
pub enum EditorSession<R: Resource> {
    Closed,
    Creating {
        draft: R::Draft,
        errors: ValidationResult,
    },
    Editing {
        entity: R::Entity,
        draft: R::Draft,
        errors: ValidationResult,
    },
}

impl<R: Resource> Default for EditorSession<R> {
    fn default() -> Self {
        EditorSession::Closed
    }
}

impl<R: Resource> EditorSession<R> {
    pub fn is_open(&self) -> bool {
        !matches!(self, EditorSession::Closed)
    }

    pub fn mode(&self) -> Option<EditMode> {
        match self {
            EditorSession::Closed => None,
            EditorSession::Creating { .. } => Some(EditMode::Create),
            EditorSession::Editing { .. } => Some(EditMode::Update),
        }
    }

    /// Start a draft for a new entity
    pub fn open_new(&mut self) -> AppResult<()> {
        if self.is_open() {
            return Err(AppError::EditorBusy);
        }
        *self = EditorSession::Creating {
            draft: R::new_draft(),
            errors: ValidationResult::new(),
        };
        Ok(())
    }

    /// Start a draft seeded from a persisted entity
    pub fn open_existing(&mut self, entity: R::Entity) -> AppResult<()> {
        if self.is_open() {
            return Err(AppError::EditorBusy);
        }
        let draft = R::draft_of(&entity);
        *self = EditorSession::Editing {
            entity,
            draft,
            errors: ValidationResult::new(),
        };
        Ok(())
    }

    /// Discard the draft
    pub fn close(&mut self) {
        *self = EditorSession::Closed;
    }

    /// Id of the entity being edited
    pub fn editing_id(&self) -> Option<EntityId> {
        match self {
            EditorSession::Editing { entity, .. } => Some(R::entity_id(entity)),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&R::Draft> {
        match self {
            EditorSession::Closed => None,
            EditorSession::Creating { draft, .. } | EditorSession::Editing { draft, .. } => Some(draft),
        }
    }

    pub fn errors(&self) -> Option<&ValidationResult> {
        match self {
            EditorSession::Closed => None,
            EditorSession::Creating { errors, .. } | EditorSession::Editing { errors, .. } => Some(errors),
        }
    }

    /// Edit one draft field; clears the stale error on that field
    pub fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        match self {
            EditorSession::Closed => Err(AppError::EditorClosed),
            EditorSession::Creating { draft, errors } | EditorSession::Editing { draft, errors, .. } => {
                draft.set_field(field, value)?;
                errors.remove(field);
                Ok(())
            }
        }
    }

    pub fn attach_errors(&mut self, result: ValidationResult) {
        match self {
            EditorSession::Closed => {}
            EditorSession::Creating { errors, .. } | EditorSession::Editing { errors, .. } => *errors = result,
        }
    }
}
