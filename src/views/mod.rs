//! View models for the navigable screens.
//!
//! Each view owns the data it fetched for as long as it lives. Nothing is
//! shared between views.

pub mod history;
pub mod result;
pub mod submit;

pub use history::{HistoryState, HistoryView, Listing};
pub use result::{ResultState, ResultView};
pub use submit::{InputMode, SubmitForm, SubmitView, ValidationError};
