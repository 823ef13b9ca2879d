//! Publisher model and schema

use serde::{Deserialize, Serialize};

use super::{
    null_as_default, parse_number, unknown_field, Draft, EditMode, EntityId, FieldKind, FieldSpec, Resource,
    ResourceKind,
};
use crate::{error::AppResult, validation::ValidationResult};

/// Publisher as returned by the catalog API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publisher {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub establishment_year: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
}

/// Create/update publisher request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublisherPayload {
    pub name: String,
    pub establishment_year: i32,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublisherDraft {
    pub name: String,
    pub establishment_year: Option<i32>,
    pub address: String,
}

impl Draft for PublisherDraft {
    fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        match field {
            "name" => self.name = value.to_string(),
            "establishmentYear" => self.establishment_year = parse_number(field, value)?,
            "address" => self.address = value.to_string(),
            _ => return Err(unknown_field(field)),
        }
        Ok(())
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "establishmentYear" => Some(self.establishment_year.map(|y| y.to_string()).unwrap_or_default()),
            "address" => Some(self.address.clone()),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Publishers;

impl Resource for Publishers {
    type Entity = Publisher;
    type Draft = PublisherDraft;
    type CreatePayload = PublisherPayload;
    type UpdatePayload = PublisherPayload;

    const KIND: ResourceKind = ResourceKind::Publishers;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("name", "Name", FieldKind::Text),
        FieldSpec::new("establishmentYear", "Establishment Year", FieldKind::Number),
        FieldSpec::new("address", "Address", FieldKind::Text),
    ];
    const COLUMNS: &'static [&'static str] = &["Name", "Establishment Year", "Address"];

    fn entity_id(entity: &Publisher) -> EntityId {
        entity.id
    }

    fn label(entity: &Publisher) -> String {
        entity.name.clone()
    }

    fn row(entity: &Publisher) -> Vec<String> {
        vec![
            entity.name.clone(),
            entity.establishment_year.to_string(),
            entity.address.clone(),
        ]
    }

    fn draft_of(entity: &Publisher) -> PublisherDraft {
        PublisherDraft {
            name: entity.name.clone(),
            establishment_year: Some(entity.establishment_year),
            address: entity.address.clone(),
        }
    }

    fn validate(draft: &PublisherDraft, _mode: EditMode) -> ValidationResult {
        let mut errors = ValidationResult::new();
        errors.require_text("name", &draft.name, "Name is required.");
        errors.require_positive(
            "establishmentYear",
            draft.establishment_year,
            "Establishment year must be greater than 0.",
        );
        errors.require_text("address", &draft.address, "Address is required.");
        errors
    }

    fn create_payload(draft: &PublisherDraft) -> AppResult<PublisherPayload> {
        Ok(PublisherPayload {
            name: draft.name.trim().to_string(),
            establishment_year: draft.establishment_year.unwrap_or_default(),
            address: draft.address.trim().to_string(),
        })
    }

    fn update_payload(draft: &PublisherDraft) -> AppResult<PublisherPayload> {
        Self::create_payload(draft)
    }
}
