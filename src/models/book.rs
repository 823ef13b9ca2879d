//! Book model and schema
//!
//! Books reference one author, one publisher and any number of categories.
//! The catalog nests those references as objects; the shape of the nested
//! object varies between API deployments, so every reference is decoded as an
//! optional [`EntityRef`] whose name may be missing.

use serde::{Deserialize, Serialize};

use super::{
    null_as_default, parse_id_list, parse_number, unknown_field, Draft, EditMode, EntityId, EntityRef, FieldKind, FieldSpec,
    Resource, ResourceKind,
};
use crate::{error::AppResult, validation::ValidationResult};

/// Book as returned by the catalog API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub publication_year: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stock: i32,
    #[serde(default)]
    pub author: Option<EntityRef>,
    #[serde(default)]
    pub publisher: Option<EntityRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<EntityRef>,
}

/// Create/update book request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookPayload {
    pub name: String,
    pub publication_year: i32,
    pub stock: i32,
    pub author: EntityRef,
    pub publisher: EntityRef,
    pub categories: Vec<EntityRef>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookDraft {
    pub name: String,
    pub author_id: Option<EntityId>,
    pub publisher_id: Option<EntityId>,
    pub publication_year: Option<i32>,
    pub stock: Option<i32>,
    pub category_ids: Vec<EntityId>,
}

impl Draft for BookDraft {
    fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        match field {
            "name" => self.name = value.to_string(),
            "author" => self.author_id = parse_number(field, value)?,
            "publisher" => self.publisher_id = parse_number(field, value)?,
            "publicationYear" => self.publication_year = parse_number(field, value)?,
            "stock" => self.stock = parse_number(field, value)?,
            "categories" => self.category_ids = parse_id_list(field, value)?,
            _ => return Err(unknown_field(field)),
        }
        Ok(())
    }

    fn field_value(&self, field: &str) -> Option<String> {
        let number = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();
        match field {
            "name" => Some(self.name.clone()),
            "author" => Some(number(self.author_id)),
            "publisher" => Some(number(self.publisher_id)),
            "publicationYear" => Some(number(self.publication_year.map(i64::from))),
            "stock" => Some(number(self.stock.map(i64::from))),
            "categories" => Some(
                self.category_ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Books;

impl Resource for Books {
    type Entity = Book;
    type Draft = BookDraft;
    type CreatePayload = BookPayload;
    type UpdatePayload = BookPayload;

    const KIND: ResourceKind = ResourceKind::Books;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("name", "Title", FieldKind::Text),
        FieldSpec::new("author", "Author", FieldKind::Reference(ResourceKind::Authors)),
        FieldSpec::new("publisher", "Publisher", FieldKind::Reference(ResourceKind::Publishers)),
        FieldSpec::new("categories", "Categories", FieldKind::ReferenceList(ResourceKind::Categories)),
        FieldSpec::new("publicationYear", "Publication Year", FieldKind::Number),
        FieldSpec::new("stock", "Stock", FieldKind::Number),
    ];
    const COLUMNS: &'static [&'static str] =
        &["Title", "Publication Year", "Stock", "Author", "Publisher", "Category"];
    const RELATIONS: &'static [ResourceKind] =
        &[ResourceKind::Authors, ResourceKind::Publishers, ResourceKind::Categories];

    fn entity_id(entity: &Book) -> EntityId {
        entity.id
    }

    fn label(entity: &Book) -> String {
        entity.name.clone()
    }

    fn row(entity: &Book) -> Vec<String> {
        let reference = |r: &Option<EntityRef>| r.as_ref().map(EntityRef::label).unwrap_or_else(|| "-".to_string());
        vec![
            entity.name.clone(),
            entity.publication_year.to_string(),
            entity.stock.to_string(),
            reference(&entity.author),
            reference(&entity.publisher),
            entity
                .categories
                .iter()
                .map(EntityRef::label)
                .collect::<Vec<_>>()
                .join(", "),
        ]
    }

    fn draft_of(entity: &Book) -> BookDraft {
        BookDraft {
            name: entity.name.clone(),
            author_id: entity.author.as_ref().map(|a| a.id),
            publisher_id: entity.publisher.as_ref().map(|p| p.id),
            publication_year: Some(entity.publication_year),
            stock: Some(entity.stock),
            category_ids: entity.categories.iter().map(|c| c.id).collect(),
        }
    }

    fn validate(draft: &BookDraft, _mode: EditMode) -> ValidationResult {
        let mut errors = ValidationResult::new();
        errors.require_text("name", &draft.name, "Title is required.");
        errors.require_id("author", draft.author_id, "Author is required.");
        errors.require_id("publisher", draft.publisher_id, "Publisher is required.");
        errors.require_positive(
            "publicationYear",
            draft.publication_year,
            "Publication year must be greater than 0.",
        );
        errors.require_positive("stock", draft.stock, "Stock must be greater than 0.");
        errors
    }

    fn create_payload(draft: &BookDraft) -> AppResult<BookPayload> {
        Ok(BookPayload {
            name: draft.name.trim().to_string(),
            publication_year: draft.publication_year.unwrap_or_default(),
            stock: draft.stock.unwrap_or_default(),
            author: EntityRef::id(draft.author_id.unwrap_or_default()),
            publisher: EntityRef::id(draft.publisher_id.unwrap_or_default()),
            categories: draft.category_ids.iter().copied().map(EntityRef::id).collect(),
        })
    }

    fn update_payload(draft: &BookDraft) -> AppResult<BookPayload> {
        Self::create_payload(draft)
    }
}
