//! UI Components
//!
//! Reusable Leptos components.

mod delete_confirm_button;
mod field_error;
mod navbar;
mod note_card;
mod note_form;
mod password_input;
mod profile;
mod search_bar;
mod spinner;
mod tag_input;
mod toaster;

pub use delete_confirm_button::DeleteConfirmButton;
pub use field_error::FieldError;
pub use navbar::Navbar;
pub use note_card::NoteCard;
pub use note_form::NoteFormDialog;
pub use password_input::PasswordInput;
pub use profile::Profile;
pub use search_bar::SearchBar;
pub use spinner::Spinner;
pub use tag_input::TagInput;
pub use toaster::Toaster;
