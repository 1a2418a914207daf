//! Content submission: URL or raw text in, summary route out.

use crate::api::{ApiError, SummaryApi};
use crate::notify::Notifier;
use crate::route::Route;
use crate::summary::{SubmissionRequest, DEFAULT_TITLE};
use std::sync::Arc;
use thiserror::Error;
use url::Url;

/// Shortest text (in characters, after trimming) worth summarising
pub const MIN_TEXT_CHARS: usize = 50;

/// Fallback for a non-ok response without an `error` message
pub const SUBMIT_FAILED: &str = "Failed to process content";
/// Shown when the backend could not be reached
pub const GENERIC_ERROR: &str = "An error occurred. Please try again.";

/// Local input problems. These never reach the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid URL")]
    InvalidUrl,
    #[error("Please enter some text")]
    MissingText,
    #[error("Text is too short. Please enter at least 50 characters.")]
    TextTooShort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Url,
    Text,
}

/// Raw form fields as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitForm {
    pub mode: InputMode,
    pub url: String,
    pub text: String,
    /// Optional title for text submissions
    pub title: String,
}

impl SubmitForm {
    pub fn url(url: impl Into<String>) -> Self {
        Self {
            mode: InputMode::Url,
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            mode: InputMode::Text,
            text: text.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Check the active mode's fields and build the request body.
    pub fn validate(&self) -> Result<SubmissionRequest, ValidationError> {
        match self.mode {
            InputMode::Url => {
                let url = self.url.trim();
                if url.is_empty() || Url::parse(url).is_err() {
                    return Err(ValidationError::InvalidUrl);
                }
                Ok(SubmissionRequest::Url {
                    url: url.to_string(),
                })
            }
            InputMode::Text => {
                let trimmed = self.text.trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::MissingText);
                }
                if trimmed.chars().count() < MIN_TEXT_CHARS {
                    return Err(ValidationError::TextTooShort);
                }
                let title = if self.title.is_empty() {
                    DEFAULT_TITLE.to_string()
                } else {
                    self.title.clone()
                };
                Ok(SubmissionRequest::Text {
                    text: self.text.clone(),
                    title,
                })
            }
        }
    }
}

/// Message to show for a failed submission
pub fn submit_error_message(err: &ApiError) -> &str {
    match err {
        ApiError::Server { .. } => err.server_message().unwrap_or(SUBMIT_FAILED),
        _ => GENERIC_ERROR,
    }
}

/// View model of the submission form
pub struct SubmitView {
    api: Arc<dyn SummaryApi>,
    notifier: Arc<dyn Notifier>,
    pub form: SubmitForm,
    error: Option<ValidationError>,
}

impl SubmitView {
    pub fn new(api: Arc<dyn SummaryApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            form: SubmitForm::default(),
            error: None,
        }
    }

    pub fn set_mode(&mut self, mode: InputMode) {
        self.form.mode = mode;
    }

    /// Inline validation error from the last attempt
    pub fn error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    /// Validate and submit the form.
    ///
    /// Returns the route of the new summary on success. Validation errors
    /// are kept in [`SubmitView::error`]; request failures are notified.
    /// The view stays borrowed while the request is outstanding, and a
    /// cancelled submission leaves it ready for another attempt.
    pub async fn submit(&mut self) -> Option<Route> {
        self.error = None;

        let request = match self.form.validate() {
            Ok(request) => request,
            Err(e) => {
                log::debug!("submission rejected locally: {}", e);
                self.error = Some(e);
                return None;
            }
        };

        match self.api.summarize(&request).await {
            Ok(response) => {
                log::info!("summary {} created", response.id);
                Some(Route::Summary(response.id))
            }
            Err(e) => {
                log::error!("error processing content: {}", e);
                self.notifier.error(submit_error_message(&e));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_TEXT: &str =
        "Rust is a multi-paradigm, general-purpose programming language that emphasizes performance.";

    #[test]
    fn url_mode_requires_a_parseable_url() {
        for bad in ["", "   ", "not a url", "example.com/article", "http://"] {
            assert_eq!(
                SubmitForm::url(bad).validate(),
                Err(ValidationError::InvalidUrl),
                "{:?}",
                bad
            );
        }
        assert_eq!(
            SubmitForm::url(" https://example.com/a ").validate(),
            Ok(SubmissionRequest::Url {
                url: "https://example.com/a".to_string()
            })
        );
    }

    #[test]
    fn invalid_url_message() {
        assert_eq!(ValidationError::InvalidUrl.to_string(), "Please enter a valid URL");
    }

    #[test]
    fn text_mode_enforces_minimum_trimmed_length() {
        assert_eq!(SubmitForm::text("  ", "").validate(), Err(ValidationError::MissingText));

        let padded = format!("   {}   ", "x".repeat(MIN_TEXT_CHARS - 1));
        assert_eq!(
            SubmitForm::text(padded, "").validate(),
            Err(ValidationError::TextTooShort)
        );

        let exact = "y".repeat(MIN_TEXT_CHARS);
        assert!(SubmitForm::text(exact, "").validate().is_ok());
    }

    #[test]
    fn text_title_defaults_to_untitled() {
        assert_eq!(
            SubmitForm::text(LONG_TEXT, "").validate(),
            Ok(SubmissionRequest::Text {
                text: LONG_TEXT.to_string(),
                title: "Untitled".to_string()
            })
        );
        match SubmitForm::text(LONG_TEXT, " Notes ").validate() {
            Ok(SubmissionRequest::Text { title, .. }) => assert_eq!(title, " Notes "),
            other => panic!("unexpected {:?}", other),
        }
        match SubmitForm::text(LONG_TEXT, "   ").validate() {
            Ok(SubmissionRequest::Text { title, .. }) => assert_eq!(title, "   "),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn error_messages_prefer_the_server() {
        let with_message = ApiError::Server {
            status: 400,
            message: Some("Text too short to summarize".to_string()),
        };
        assert_eq!(submit_error_message(&with_message), "Text too short to summarize");

        let bare = ApiError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(submit_error_message(&bare), SUBMIT_FAILED);
        assert_eq!(
            submit_error_message(&ApiError::Network("refused".into())),
            GENERIC_ERROR
        );
    }
}
