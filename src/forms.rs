//! Form Controllers
//!
//! Field values, field errors and the pending flag for one form instance.
//! Submission is split in two so the UI can await the mutation in between:
//! `begin_submit` validates (and blocks the request on failure),
//! `finish_submit` records the outcome.

use crate::error::ApiError;
use crate::validation::{FieldErrors, Schema};

/// Create forms clear after a successful submit; edit forms keep their values
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FormController<S> {
    values: S,
    initial: S,
    errors: FieldErrors,
    pending: bool,
    submitted: bool,
    mode: FormMode,
}

impl<S: Schema + Clone> FormController<S> {
    pub fn create(defaults: S) -> Self {
        Self::with_mode(defaults, FormMode::Create)
    }

    pub fn edit(current: S) -> Self {
        Self::with_mode(current, FormMode::Edit)
    }

    fn with_mode(initial: S, mode: FormMode) -> Self {
        Self {
            values: initial.clone(),
            initial,
            errors: FieldErrors::new(),
            pending: false,
            submitted: false,
            mode,
        }
    }

    pub fn values(&self) -> &S {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Edit values. After a rejected submit, errors follow the edits.
    pub fn update(&mut self, edit: impl FnOnce(&mut S)) {
        edit(&mut self.values);
        if self.submitted {
            self.errors = self.values.validate().err().unwrap_or_default();
        }
    }

    /// Validated output to send, or `None` when invalid or already submitting
    pub fn begin_submit(&mut self) -> Option<S::Output> {
        if self.pending {
            return None;
        }
        self.submitted = true;
        match self.values.check() {
            Ok(output) => {
                self.errors.clear();
                self.pending = true;
                Some(output)
            }
            Err(ApiError::Validation(errors)) => {
                log::debug!("[form] rejected: {:?}", errors.keys().collect::<Vec<_>>());
                self.errors = errors;
                None
            }
            Err(err) => {
                log::error!("[form] {}", err);
                None
            }
        }
    }

    /// On failure values stay as typed so the user can retry
    pub fn finish_submit(&mut self, succeeded: bool) {
        self.pending = false;
        if succeeded && self.mode == FormMode::Create {
            self.reset();
        }
    }

    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
        self.submitted = false;
    }

    /// Re-seed an edit form (e.g. the note changed on the server)
    pub fn reset_to(&mut self, values: S) {
        self.initial = values;
        self.reset();
    }
}

/// Ordered tag labels plus the single-line draft they are appended from.
/// Duplicates are kept; removal drops every occurrence of the value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagList {
    tags: Vec<String>,
    draft: String,
}

impl TagList {
    pub fn from_tags(tags: Vec<String>) -> Self {
        Self { tags, draft: String::new() }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, draft: String) {
        self.draft = draft;
    }

    /// Append the draft; an empty draft is ignored
    pub fn commit_draft(&mut self) -> bool {
        if self.draft.is_empty() {
            return false;
        }
        self.tags.push(std::mem::take(&mut self.draft));
        true
    }

    pub fn remove(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.tags.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Masked/plain display of a password input. Rendering only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PasswordVisibility {
    visible: bool,
}

impl PasswordVisibility {
    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn input_type(&self) -> &'static str {
        if self.visible { "text" } else { "password" }
    }
}
