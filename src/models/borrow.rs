//! Borrow (loan) model and schema
//!
//! Borrows are the one resource whose create and update requests differ: a
//! new borrow names the borrower and the book, an update only moves dates.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{
    null_as_default, parse_number, unknown_field, Draft, EditMode, EntityId, EntityRef, FieldKind, FieldSpec, Resource,
    ResourceKind,
};
use crate::{
    error::{AppError, AppResult},
    validation::{parse_date, ValidationResult, DATE_FORMAT},
};

/// Borrow as returned by the catalog API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Borrow {
    pub id: EntityId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub borrower_name: String,
    #[serde(default)]
    pub borrower_mail: Option<String>,
    #[serde(default)]
    pub borrowing_date: Option<NaiveDate>,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub book: Option<EntityRef>,
}

/// Create borrow request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBorrow {
    pub borrower_name: String,
    pub borrower_mail: String,
    pub borrowing_date: NaiveDate,
    pub book_for_borrowing_request: EntityRef,
}

/// Update borrow request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBorrow {
    pub borrower_name: String,
    pub borrowing_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BorrowDraft {
    pub borrower_name: String,
    pub borrower_mail: String,
    pub borrowing_date: String,
    pub return_date: String,
    pub book_id: Option<EntityId>,
}

impl Draft for BorrowDraft {
    fn set_field(&mut self, field: &str, value: &str) -> AppResult<()> {
        match field {
            "borrowerName" => self.borrower_name = value.to_string(),
            "borrowerMail" => self.borrower_mail = value.trim().to_string(),
            "borrowingDate" => self.borrowing_date = value.trim().to_string(),
            "returnDate" => self.return_date = value.trim().to_string(),
            "book" => self.book_id = parse_number(field, value)?,
            _ => return Err(unknown_field(field)),
        }
        Ok(())
    }

    fn field_value(&self, field: &str) -> Option<String> {
        match field {
            "borrowerName" => Some(self.borrower_name.clone()),
            "borrowerMail" => Some(self.borrower_mail.clone()),
            "borrowingDate" => Some(self.borrowing_date.clone()),
            "returnDate" => Some(self.return_date.clone()),
            "book" => Some(self.book_id.map(|id| id.to_string()).unwrap_or_default()),
            _ => None,
        }
    }
}

fn required_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    parse_date(value).ok_or_else(|| AppError::Field(format!("{} '{}' is not a date", field, value)))
}

#[derive(Debug)]
pub struct Borrows;

impl Resource for Borrows {
    type Entity = Borrow;
    type Draft = BorrowDraft;
    type CreatePayload = CreateBorrow;
    type UpdatePayload = UpdateBorrow;

    const KIND: ResourceKind = ResourceKind::Borrows;
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::new("borrowerName", "Borrower Name", FieldKind::Text),
        FieldSpec::new("borrowingDate", "Borrowing Date", FieldKind::Date),
        FieldSpec::new("returnDate", "Return Date", FieldKind::Date).only(EditMode::Update),
        FieldSpec::new("borrowerMail", "Borrower Mail", FieldKind::Text).only(EditMode::Create),
        FieldSpec::new("book", "Book", FieldKind::Reference(ResourceKind::Books)).only(EditMode::Create),
    ];
    const COLUMNS: &'static [&'static str] = &["Borrower Name", "Borrowing Date", "Return Date"];
    const RELATIONS: &'static [ResourceKind] = &[ResourceKind::Books];

    fn entity_id(entity: &Borrow) -> EntityId {
        entity.id
    }

    fn label(entity: &Borrow) -> String {
        match entity.borrowing_date {
            Some(date) => format!("{} ({})", entity.borrower_name, date.format(DATE_FORMAT)),
            None => entity.borrower_name.clone(),
        }
    }

    fn row(entity: &Borrow) -> Vec<String> {
        vec![
            entity.borrower_name.clone(),
            entity
                .borrowing_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            entity
                .return_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
        ]
    }

    /// New borrows start today
    fn new_draft() -> BorrowDraft {
        BorrowDraft {
            borrowing_date: Local::now().date_naive().format(DATE_FORMAT).to_string(),
            ..BorrowDraft::default()
        }
    }

    fn draft_of(entity: &Borrow) -> BorrowDraft {
        BorrowDraft {
            borrower_name: entity.borrower_name.clone(),
            borrower_mail: entity.borrower_mail.clone().unwrap_or_default(),
            borrowing_date: entity
                .borrowing_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            return_date: entity
                .return_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            book_id: entity.book.as_ref().map(|b| b.id),
        }
    }

    fn validate(draft: &BorrowDraft, mode: EditMode) -> ValidationResult {
        let mut errors = ValidationResult::new();
        errors.require_text("borrowerName", &draft.borrower_name, "Borrower name cannot be empty.");
        let borrowed = errors.require_date("borrowingDate", &draft.borrowing_date, "Borrowing date is required.");
        match mode {
            EditMode::Create => {
                errors.require_id("book", draft.book_id, "Select a book.");
                errors.optional_email("borrowerMail", &draft.borrower_mail, "Borrower mail is not a valid address.");
            }
            EditMode::Update => {
                let returned = errors.optional_date("returnDate", &draft.return_date);
                if let (Some(borrowed), Some(returned)) = (borrowed, returned) {
                    if returned < borrowed {
                        errors.add("returnDate", "Return date cannot be before the borrowing date.");
                    }
                }
            }
        }
        errors
    }

    fn create_payload(draft: &BorrowDraft) -> AppResult<CreateBorrow> {
        let book_id = draft
            .book_id
            .ok_or_else(|| AppError::Field("book must be selected".to_string()))?;
        Ok(CreateBorrow {
            borrower_name: draft.borrower_name.trim().to_string(),
            borrower_mail: draft.borrower_mail.clone(),
            borrowing_date: required_date("borrowingDate", &draft.borrowing_date)?,
            book_for_borrowing_request: EntityRef::id(book_id),
        })
    }

    fn update_payload(draft: &BorrowDraft) -> AppResult<UpdateBorrow> {
        let return_date = if draft.return_date.is_empty() {
            None
        } else {
            Some(required_date("returnDate", &draft.return_date)?)
        };
        Ok(UpdateBorrow {
            borrower_name: draft.borrower_name.trim().to_string(),
            borrowing_date: required_date("borrowingDate", &draft.borrowing_date)?,
            return_date,
        })
    }
}
