//! Field-level draft validation
//!
//! Validators never stop at the first problem: every rule runs and every
//! violated field gets its own message so an editor can annotate all of them
//! at once.

use std::fmt;

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;
use validator::ValidateEmail;

/// Date format accepted for every date field
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Ordered mapping from field name to error message. Empty means valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult(IndexMap<&'static str, String>);

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Record a violation. The first message for a field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) {
        self.0.shift_remove(field);
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// Text must be non-empty after trimming
    pub fn require_text(&mut self, field: &'static str, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.add(field, message);
        }
    }

    /// Number must be present and strictly positive
    pub fn require_positive(&mut self, field: &'static str, value: Option<i32>, message: &str) {
        match value {
            Some(v) if v > 0 => {}
            _ => self.add(field, message),
        }
    }

    /// Relation id must be selected
    pub fn require_id<T>(&mut self, field: &'static str, value: Option<T>, message: &str) {
        if value.is_none() {
            self.add(field, message);
        }
    }

    /// Date must be present and parse as `YYYY-MM-DD`
    pub fn require_date(&mut self, field: &'static str, value: &str, message: &str) -> Option<NaiveDate> {
        if value.trim().is_empty() {
            self.add(field, message);
            return None;
        }
        self.optional_date(field, value)
    }

    /// Date may be blank, but must parse when given
    pub fn optional_date(&mut self, field: &'static str, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        match parse_date(value) {
            Some(date) => Some(date),
            None => {
                self.add(field, format!("{} is not a valid date (expected YYYY-MM-DD)", value));
                None
            }
        }
    }

    /// Email may be blank, but must be well formed when given
    pub fn optional_email(&mut self, field: &'static str, value: &str, message: &str) {
        let value = value.trim().to_string();
        if !value.is_empty() && !value.validate_email() {
            self.add(field, message);
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, msg) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, msg)?;
            first = false;
        }
        Ok(())
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}
