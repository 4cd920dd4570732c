//! Validation Schemas
//!
//! Each form's values validate into the request body they produce, or into a
//! field -> message map. Synchronous and per-field only.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};

use crate::error::ApiError;
use crate::forms::TagList;
use crate::models::{LoginRequest, Note, NotePayload, RegisterRequest};

/// Field name -> human-readable message
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Measured in UTF-16 code units, the way the browser counts string length
pub const NOTE_CONTENT_MIN_CHARS: usize = 3;

pub trait Schema {
    type Output;

    fn validate(&self) -> Result<Self::Output, FieldErrors>;

    /// `validate` with failures as `ApiError::Validation`
    fn check(&self) -> Result<Self::Output, ApiError> {
        self.validate().map_err(ApiError::Validation)
    }
}

fn require(errors: &mut FieldErrors, field: &'static str, value: &str, message: &str) {
    if value.is_empty() {
        errors.insert(field, message.to_string());
    }
}

fn finish<T>(errors: FieldErrors, output: impl FnOnce() -> T) -> Result<T, FieldErrors> {
    if errors.is_empty() {
        Ok(output())
    } else {
        Err(errors)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginValues {
    pub email: String,
    pub password: String,
}

impl Schema for LoginValues {
    type Output = LoginRequest;

    fn validate(&self) -> Result<LoginRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "email", &self.email, "Email is required");
        require(&mut errors, "password", &self.password, "Password is required");
        finish(errors, || LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignUpValues {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Schema for SignUpValues {
    type Output = RegisterRequest;

    fn validate(&self) -> Result<RegisterRequest, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "name", &self.name, "Name is required");
        require(&mut errors, "email", &self.email, "Email is required");
        require(&mut errors, "password", &self.password, "Password is required");
        finish(errors, || RegisterRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

/// Note create/update form. Tags are client-managed and never fail validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteValues {
    pub title: String,
    pub content: String,
    pub date: Option<NaiveDate>,
    pub tags: TagList,
}

impl NoteValues {
    /// Seed an edit form; a note without a date starts at `today`
    pub fn from_note(note: &Note, today: NaiveDate) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            date: Some(note.date.map(|d| d.date_naive()).unwrap_or(today)),
            tags: TagList::from_tags(note.tags.clone()),
        }
    }
}

impl Schema for NoteValues {
    type Output = NotePayload;

    fn validate(&self) -> Result<NotePayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        require(&mut errors, "title", &self.title, "Title is required");
        if self.content.encode_utf16().count() < NOTE_CONTENT_MIN_CHARS {
            errors.insert(
                "content",
                format!("Content must be at least {} characters", NOTE_CONTENT_MIN_CHARS),
            );
        }
        let Some(date) = self.date else {
            errors.insert("date", "Date is required".to_string());
            return Err(errors);
        };
        finish(errors, || NotePayload {
            title: self.title.clone(),
            content: self.content.clone(),
            tags: self.tags.to_vec(),
            date: date.and_time(NaiveTime::MIN).and_utc(),
        })
    }
}

/// Parse the value of an `<input type="date">` (`YYYY-MM-DD`)
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn date_input_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default()
}
