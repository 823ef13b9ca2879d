//! Author model and schema

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    null_as_default, unknown_field, Draft, EditMode, EntityId, FieldKind, FieldSpec, Resource, ResourceKind,
};
use crate::{
    error::{AppError, AppResult},
    validation::{parse_date, ValidationResult, DATE_FORMAT},
};

/// Author as returned by the catalog API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: String,
}

/// Create/update author request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorPayload {
    pub name: String,
    pub birth_date: NaiveDate,
    pub country: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorDraft {
    pub name: String,
    /// Raw `YYYY-MM-DD` text
    pub birth_date: String,
    pub country: String,
}

impl Draft for AuthorDraft {
    fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        match field {
            "name" => self.name = value.to_string(),
            "birthDate" => self.birth_date = value.trim().to_string(),
            "country" => self.country = value.to_string(),
            _ => return Err(unknown_field(field)),
        }
        Ok(())
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "name" => Some(self.name.clone()),
            "birthDate" => Some(self.birth_date.clone()),
            "country" => Some(self.country.clone()),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Authors;

impl Resource for Authors {
    type Entity = Author;
    type Draft = AuthorDraft;
    type CreatePayload = AuthorPayload;
    type UpdatePayload = AuthorPayload;

    const KIND: ResourceKind = ResourceKind::Authors;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("name", "Name", FieldKind::Text),
        FieldSpec::new("birthDate", "Birth Date", FieldKind::Date),
        FieldSpec::new("country", "Country", FieldKind::Text),
    ];
    const COLUMNS: &'static [&'static str] = &["Name", "Birth Date", "Country"];

    fn entity_id(entity: &Author) -> EntityId {
        entity.id
    }

    fn label(entity: &Author) -> String {
        entity.name.clone()
    }

    fn row(entity: &Author) -> Vec<String> {
        vec![
            entity.name.clone(),
            entity
                .birth_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            entity.country.clone(),
        ]
    }

    fn draft_of(entity: &Author) -> AuthorDraft {
        AuthorDraft {
            name: entity.name.clone(),
            birth_date: entity
                .birth_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            country: entity.country.clone(),
        }
    }

    fn validate(draft: &AuthorDraft, _mode: EditMode) -> ValidationResult {
        let mut errors = ValidationResult::new();
        errors.require_text("name", &draft.name, "Name is required.");
        errors.require_date("birthDate", &draft.birth_date, "Birth date is required.");
        errors.require_text("country", &draft.country, "Country is required.");
        errors
    }

    fn create_payload(draft: &AuthorDraft) -> AppResult<AuthorPayload> {
        let birth_date = parse_date(&draft.birth_date)
            .ok_or_else(|| AppError::Field(format!("birthDate '{}' is not a date", draft.birth_date)))?;
        Ok(AuthorPayload {
            name: draft.name.trim().to_string(),
            birth_date,
            country: draft.country.trim().to_string(),
        })
    }

    fn update_payload(draft: &AuthorDraft) -> AppResult<AuthorPayload> {
        Self::create_payload(draft)
    }
}
