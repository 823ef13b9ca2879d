//! Console services: panels, editors and notices

pub mod editor;
pub mod notifier;
pub mod panel;

use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{
        Authors, BookOrders, Books, Borrows, Categories, Draft, EditMode, EntityId, FieldKind, FieldSpec,
        Publishers, Resource, ResourceKind,
    },
    repository::{RemoteCollection, Repository},
    validation::ValidationResult,
};

pub use editor::EditorSession;
pub use notifier::Notifier;
pub use panel::{Panel, Submission};

/// Selectable entity for a relation field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub id: EntityId,
    pub label: String,
}

/// Snapshot of an open editor
#[derive(Debug, Clone, PartialEq)]
pub struct EditorView {
    pub mode: EditMode,
    pub title: String,
    pub fields: Vec<(FieldSpec, String)>,
    pub errors: ValidationResult,
}

/// Snapshot of a panel, ready for rendering
#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub kind: ResourceKind,
    pub columns: &'static [&'static str],
    pub rows: Vec<(EntityId, Vec<String>)>,
    pub editor: Option<EditorView>,
    pub notice: Option<String>,
}

/// Resource-agnostic handle on a mounted panel
#[async_trait]
pub trait PanelControl: Send {
    fn kind(&self) -> ResourceKind;

    /// Resources the open editor's fields can point at; empty when closed
    fn relations(&self) -> Vec<ResourceKind>;

    async fn refresh(&mut self) -> bool;

    fn open_new(&mut self) -> AppResult<()>;

    fn open_edit(&mut self, id: EntityId) -> AppResult<()>;

    fn set_field(&mut self, field: &str, value: &str) -> AppResult<()>;

    fn cancel(&mut self);

    async fn submit(&mut self) -> AppResult<Submission<EntityId>>;

    async fn delete(&mut self, id: EntityId) -> bool;

    fn dismiss(&mut self);

    fn view(&self) -> PanelView;
}

#[async_trait]
impl<R: Resource> PanelControl for Panel<R> {
    fn kind(&self) -> ResourceKind {
        R::KIND
    }

    fn relations(&self) -> Vec<ResourceKind> {
        let Some(mode) = self.editor().mode() else {
            return Vec::new();
        };
        R::RELATIONS
            .iter()
            .copied()
            .filter(|kind| {
                R::FIELDS.iter().any(|f| {
                    f.applies_to(mode)
                        && matches!(f.kind, FieldKind::Reference(k) | FieldKind::ReferenceList(k) if k == *kind)
                })
            })
            .collect()
    }

    async fn refresh(&mut self) -> bool {
        Panel::refresh(self).await
    }

    fn open_new(&mut self) -> AppResult<()> {
        Panel::open_new(self)
    }

    fn open_edit(&mut self, id: EntityId) -> AppResult<()> {
        Panel::open_edit(self, id)
    }

    fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        Panel::set_field(self, field, value)
    }

    fn cancel(&mut self) {
        Panel::cancel(self)
    }

    async fn submit(&mut self) -> AppResult<Submission<EntityId>> {
        Ok(Panel::submit(self).await?.map(|entity| R::entity_id(&entity)))
    }

    async fn delete(&mut self, id: EntityId) -> bool {
        Panel::delete(self, id).await
    }

    fn dismiss(&mut self) {
        Panel::dismiss(self)
    }

    fn view(&self) -> PanelView {
        let editor = match (self.editor().mode(), self.editor().draft(), self.editor().errors()) {
            (Some(mode), Some(draft), Some(errors)) => {
                let verb = match mode {
                    EditMode::Create => "Add New",
                    EditMode::Update => "Edit",
                };
                Some(EditorView {
                    mode,
                    title: format!("{} {}", verb, title_case(R::KIND.singular())),
                    fields: R::FIELDS
                        .iter()
                        .filter(|f| f.applies_to(mode))
                        .map(|f| (*f, draft.field_value(f.name).unwrap_or_default()))
                        .collect(),
                    errors: errors.clone(),
                })
            }
            _ => None,
        };

        PanelView {
            kind: R::KIND,
            columns: R::COLUMNS,
            rows: self
                .collection()
                .iter()
                .map(|e| (R::entity_id(e), R::row(e)))
                .collect(),
            editor,
            notice: self.notifier().message().map(str::to_string),
        }
    }
}

fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Container for console services
#[derive(Clone)]
pub struct Services {
    repository: Repository,
}

impl Services {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    fn remote<R: Resource>(&self) -> Arc<dyn RemoteCollection<R>> {
        Arc::new(self.repository.collection::<R>())
    }

    /// Build a panel for a resource and fetch its collection
    pub async fn mount(&self, kind: ResourceKind) -> Box<dyn PanelControl> {
        tracing::debug!("Mounting {} panel", kind);
        match kind {
            ResourceKind::Publishers => Box::new(Panel::<Publishers>::mount(self.remote()).await),
            ResourceKind::Categories => Box::new(Panel::<Categories>::mount(self.remote()).await),
            ResourceKind::Authors => Box::new(Panel::<Authors>::mount(self.remote()).await),
            ResourceKind::Books => Box::new(Panel::<Books>::mount(self.remote()).await),
            ResourceKind::Borrows => Box::new(Panel::<Borrows>::mount(self.remote()).await),
            ResourceKind::BookOrders => Box::new(Panel::<BookOrders>::mount(self.remote()).await),
        }
    }

    /// Options for a relation field pointing at `kind`
    pub async fn choices(&self, kind: ResourceKind) -> AppResult<Vec<Choice>> {
        match kind {
            ResourceKind::Publishers => self.choices_of::<Publishers>().await,
            ResourceKind::Categories => self.choices_of::<Categories>().await,
            ResourceKind::Authors => self.choices_of::<Authors>().await,
            ResourceKind::Books => self.choices_of::<Books>().await,
            ResourceKind::Borrows => self.choices_of::<Borrows>().await,
            ResourceKind::BookOrders => self.choices_of::<BookOrders>().await,
        }
    }

    async fn choices_of<R: Resource>(&self) -> AppResult<Vec<Choice>> {
        let entities = self.repository.collection::<R>().list().await?;
        Ok(entities
            .iter()
            .map(|e| Choice {
                id: R::entity_id(e),
                label: R::label(e),
            })
            .collect())
    }
}
