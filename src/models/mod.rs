//! Catalog entity schemas
//!
//! Each catalog resource (publishers, books, ...) is described once by a
//! [`Resource`] implementation: its wire types, its editable fields, its
//! validation rules and how a draft maps onto request payloads. The generic
//! panel in [`crate::services::panel`] is driven entirely by this schema.

pub mod author;
pub mod book;
pub mod book_order;
pub mod borrow;
pub mod category;
pub mod publisher;

use std::fmt;
use std::str::FromStr;

use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

use crate::{
    error::{AppError, AppResult},
    validation::ValidationResult,
};

// Re-export commonly used types
pub use author::{Author, AuthorDraft, Authors};
pub use book::{Book, BookDraft, Books};
pub use book_order::{BookOrder, BookOrderDraft, BookOrders};
pub use borrow::{Borrow, BorrowDraft, Borrows};
pub use category::{Categories, Category, CategoryDraft};
pub use publisher::{Publisher, PublisherDraft, Publishers};

/// Server-assigned identifier
pub type EntityId = i64;

/// Reference to another entity, as nested in payloads and responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EntityRef {
    pub fn id(id: EntityId) -> Self {
        Self { id, name: None }
    }

    /// Display label, falling back to `#id` when the server omitted the name
    pub fn label(&self) -> String {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("#{}", self.id),
        }
    }
}

/// Whether a draft will be submitted as a new entity or an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Create,
    Update,
}

/// Kind of value an editable field holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Reference(ResourceKind),
    ReferenceList(ResourceKind),
}

/// Editable field description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name, also used as the validation key
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Field only shown for the given mode
    pub only: Option<EditMode>,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, only: None }
    }

    pub const fn only(mut self, mode: EditMode) -> Self {
        self.only = Some(mode);
        self
    }

    pub fn applies_to(&self, mode: EditMode) -> bool {
        self.only.map_or(true, |only| only == mode)
    }
}

/// Editable buffer for one entity
pub trait Draft: Clone + Default + fmt::Debug + Send + Sync + 'static {
    /// Set one field from raw text input
    fn set_field(&mut self, field: &str, value: &str) -> AppResult<()>;

    /// Current value of a field as display text
    fn field_value(&self, field: &str) -> Option<String>;
}

/// Schema of one catalog resource
pub trait Resource: fmt::Debug + Send + Sync + 'static {
    type Entity: DeserializeOwned + Serialize + Clone + fmt::Debug + Send + Sync + 'static;
    type Draft: Draft;
    type CreatePayload: Serialize + fmt::Debug + Send + Sync;
    type UpdatePayload: Serialize + fmt::Debug + Send + Sync;

    const KIND: ResourceKind;
    const FIELDS: &'static [FieldSpec];
    const COLUMNS: &'static [&'static str];
    /// Resources whose entities can be picked in this resource's editor
    const RELATIONS: &'static [ResourceKind] = &[];

    fn entity_id(entity: &Self::Entity) -> EntityId;

    /// Short human label, used for relation choices
    fn label(entity: &Self::Entity) -> String;

    /// Table cells, one per column
    fn row(entity: &Self::Entity) -> Vec<String>;

    /// Draft for a new entity
    fn new_draft() -> Self::Draft {
        Self::Draft::default()
    }

    /// Draft seeded from a persisted entity
    fn draft_of(entity: &Self::Entity) -> Self::Draft;

    fn validate(draft: &Self::Draft, mode: EditMode) -> ValidationResult;

    fn create_payload(draft: &Self::Draft) -> AppResult<Self::CreatePayload>;

    fn update_payload(draft: &Self::Draft) -> AppResult<Self::UpdatePayload>;
}

/// Every catalog resource the console knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Publishers,
    Categories,
    Authors,
    Books,
    Borrows,
    BookOrders,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Publishers,
        ResourceKind::Categories,
        ResourceKind::Authors,
        ResourceKind::Books,
        ResourceKind::Borrows,
        ResourceKind::BookOrders,
    ];

    /// Plural name, also the command-line spelling
    pub fn plural(&self) -> &'static str {
        match self {
            ResourceKind::Publishers => "publishers",
            ResourceKind::Categories => "categories",
            ResourceKind::Authors => "authors",
            ResourceKind::Books => "books",
            ResourceKind::Borrows => "borrows",
            ResourceKind::BookOrders => "book-orders",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            ResourceKind::Publishers => "publisher",
            ResourceKind::Categories => "category",
            ResourceKind::Authors => "author",
            ResourceKind::Books => "book",
            ResourceKind::Borrows => "borrow",
            ResourceKind::BookOrders => "book order",
        }
    }

    /// Title shown above the list
    pub fn title(&self) -> &'static str {
        match self {
            ResourceKind::Publishers => "Publishers",
            ResourceKind::Categories => "Categories",
            ResourceKind::Authors => "Authors",
            ResourceKind::Books => "Books",
            ResourceKind::Borrows => "Book Borrows",
            ResourceKind::BookOrders => "Book Orders",
        }
    }

    pub fn default_path(&self) -> &'static str {
        match self {
            ResourceKind::Publishers => "/publishers",
            ResourceKind::Categories => "/categories",
            ResourceKind::Authors => "/authors",
            ResourceKind::Books => "/books",
            ResourceKind::Borrows => "/borrows",
            ResourceKind::BookOrders => "/book-orders",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

impl FromStr for ResourceKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.plural() == wanted || kind.singular().replace(' ', "-") == wanted)
            .ok_or_else(|| AppError::BadRequest(format!("unknown resource '{}'", s.trim())))
    }
}

/// Parse an optional integer field; blank input clears it
pub(crate) fn parse_number<T: FromStr>(field: &str, value: &str) -> AppResult<Option<T>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    value
        .parse()
        .map(Some)
        .map_err(|_| AppError::Field(format!("{} must be a number, got '{}'", field, value)))
}

/// Parse a comma separated list of ids
pub(crate) fn parse_id_list(field: &str, value: &str) -> AppResult<Vec<EntityId>> {
    let mut ids = Vec::new();
    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let id = part
            .parse()
            .map_err(|_| AppError::Field(format!("{} must list numeric ids, got '{}'", field, part)))?;
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    Ok(ids)
}

/// Decode an explicit `null` the same way as a missing key
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn unknown_field(field: &str) -> AppError {
    AppError::Field(format!("unknown field '{}'", field))
}
