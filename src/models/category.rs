//! Category model and schema

use serde::{Deserialize, Serialize};

use super::{
    null_as_default, unknown_field, Draft, EditMode, EntityId, FieldKind, FieldSpec, Resource, ResourceKind,
};
use crate::{error::AppResult, validation::ValidationResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPayload {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
}

impl Draft for CategoryDraft {
    fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        match field {
            "name" => self.name = value.to_string(),
            "description" => self.description = value.to_string(),
            _ => return Err(unknown_field(field)),
        }
        Ok(())
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "description" => Some(self.description.clone()),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Categories;

impl Resource for Categories {
    type Entity = Category;
    type Draft = CategoryDraft;
    type CreatePayload = CategoryPayload;
    type UpdatePayload = CategoryPayload;

    const KIND: ResourceKind = ResourceKind::Categories;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("name", "Name", FieldKind::Text),
        FieldSpec::new("description", "Description", FieldKind::Text),
    ];
    const COLUMNS: &'static [&'static str] = &["Name", "Description"];

    fn entity_id(entity: &Category) -> EntityId {
        entity.id
    }

    fn label(entity: &Category) -> String {
        entity.name.clone()
    }

    fn row(entity: &Category) -> Vec<String> {
        vec![entity.name.clone(), entity.description.clone()]
    }

    fn draft_of(entity: &Category) -> CategoryDraft {
        CategoryDraft {
            name: entity.name.clone(),
            description: entity.description.clone(),
        }
    }

    fn validate(draft: &CategoryDraft, _mode: EditMode) -> ValidationResult {
        let mut errors = ValidationResult::new();
        errors.require_text("name", &draft.name, "Name cannot be empty.");
        errors.require_text("description", &draft.description, "Description cannot be empty.");
        errors
    }

    fn create_payload(draft: &CategoryDraft) -> AppResult<CategoryPayload> {
        Ok(CategoryPayload {
            name: draft.name.trim().to_string(),
            description: draft.description.trim().to_string(),
        })
    }

    fn update_payload(draft: &CategoryDraft) -> AppResult<CategoryPayload> {
        Self::create_payload(draft)
    }
}
