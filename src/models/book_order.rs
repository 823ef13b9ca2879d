//! Book order model, served under `/book-orders` by older catalog deployments

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{
    null_as_default, unknown_field, Draft, EditMode, EntityId, FieldKind, FieldSpec, Resource, ResourceKind,
};
use crate::{
    error::{AppError, AppResult},
    validation::{parse_date, ValidationResult, DATE_FORMAT},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookOrder {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub book_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_name: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookOrderPayload {
    pub book_title: String,
    pub customer_name: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookOrderDraft {
    pub book_title: String,
    pub customer_name: String,
    pub date: String,
}

impl Draft for BookOrderDraft {
    fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        match field {
            "bookTitle" => self.book_title = value.to_string(),
            "customerName" => self.customer_name = value.to_string(),
            "date" => self.date = value.trim().to_string(),
            _ => return Err(unknown_field(field)),
        }
        Ok(())
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "bookTitle" => Some(self.book_title.clone()),
            "customerName" => Some(self.customer_name.clone()),
            "date" => Some(self.date.clone()),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct BookOrders;

impl Resource for BookOrders {
    type Entity = BookOrder;
    type Draft = BookOrderDraft;
    type CreatePayload = BookOrderPayload;
    type UpdatePayload = BookOrderPayload;

    const KIND: ResourceKind = ResourceKind::BookOrders;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("bookTitle", "Book Title", FieldKind::Text),
        FieldSpec::new("customerName", "Customer Name", FieldKind::Text),
        FieldSpec::new("date", "Date", FieldKind::Date),
    ];
    const COLUMNS: &'static [&'static str] = &["Book Title", "Customer Name", "Date"];

    fn entity_id(entity: &BookOrder) -> EntityId {
        entity.id
    }

    fn label(entity: &BookOrder) -> String {
        format!("{} for {}", entity.book_title, entity.customer_name)
    }

    fn row(entity: &BookOrder) -> Vec<String> {
        vec![
            entity.book_title.clone(),
            entity.customer_name.clone(),
            entity.date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default(),
        ]
    }

    fn draft_of(entity: &BookOrder) -> BookOrderDraft {
        BookOrderDraft {
            book_title: entity.book_title.clone(),
            customer_name: entity.customer_name.clone(),
            date: entity.date.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default(),
        }
    }

    fn validate(draft: &BookOrderDraft, _mode: EditMode) -> ValidationResult {
        let mut errors = ValidationResult::new();
        errors.require_text("bookTitle", &draft.book_title, "Book title is required.");
        errors.require_text("customerName", &draft.customer_name, "Customer name is required.");
        errors.require_date("date", &draft.date, "Date is required.");
        errors
    }

    fn create_payload(draft: &BookOrderDraft) -> AppResult<BookOrderPayload> {
        let date = parse_date(&draft.date)
            .ok_or_else(|| AppError::Field(format!("date '{}' is not a date", draft.date)))?;
        Ok(BookOrderPayload {
            book_title: draft.book_title.trim().to_string(),
            customer_name: draft.customer_name.trim().to_string(),
            date,
        })
    }

    fn update_payload(draft: &BookOrderDraft) -> AppResult<BookOrderPayload> {
        Self::create_payload(draft)
    }
}
