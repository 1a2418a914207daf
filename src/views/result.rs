//! Result view: one summary, copy/share actions and follow-up questions.

use crate::api::{ApiError, SummaryApi};
use crate::notify::Notifier;
use crate::platform::{Platform, SharePayload, ShareOutcome};
use crate::route::Route;
use crate::summary::{AnswerRequest, Summary};
use std::sync::Arc;

pub const LOAD_FAILED: &str = "Failed to load summary";
pub const EMPTY_QUESTION: &str = "Please enter a question";
pub const ANSWER_FAILED: &str = "Failed to get answer";
pub const QUESTION_FAILED: &str = "Failed to process question";
pub const COPIED: &str = "Copied to clipboard!";
pub const LINK_COPIED: &str = "Link copied to clipboard!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultState {
    Loading,
    Loaded(Summary),
    /// The backend did not return the summary
    NotFound,
    /// The backend could not be reached
    Failed(String),
}

/// View model of `/summary/:id`
pub struct ResultView {
    api: Arc<dyn SummaryApi>,
    notifier: Arc<dyn Notifier>,
    platform: Arc<dyn Platform>,
    /// Web front end base for share links
    web_url: String,
    id: String,
    state: ResultState,
    /// Pending question text
    pub question: String,
}

impl ResultView {
    pub fn new(
        api: Arc<dyn SummaryApi>,
        notifier: Arc<dyn Notifier>,
        platform: Arc<dyn Platform>,
        web_url: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            api,
            notifier,
            platform,
            web_url: web_url.into(),
            id: id.into(),
            state: ResultState::Loading,
            question: String::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &ResultState {
        &self.state
    }

    pub fn summary(&self) -> Option<&Summary> {
        match &self.state {
            ResultState::Loaded(summary) => Some(summary),
            _ => None,
        }
    }

    /// Link to this summary on the web front end
    pub fn page_url(&self) -> String {
        format!(
            "{}{}",
            self.web_url.trim_end_matches('/'),
            Route::Summary(self.id.clone()).path()
        )
    }

    /// Fetch the summary for the current id
    pub async fn load(&mut self) {
        self.state = ResultState::Loading;
        self.state = match self.api.summary(&self.id).await {
            Ok(summary) => ResultState::Loaded(summary),
            Err(ApiError::Server { status, .. }) => {
                log::warn!("summary {} not available ({})", self.id, status);
                ResultState::NotFound
            }
            Err(e) => {
                log::error!("failed to fetch summary {}: {}", self.id, e);
                self.notifier.error(LOAD_FAILED);
                ResultState::Failed(e.to_string())
            }
        };
    }

    /// Switch to another summary and fetch it. Same id is a no-op.
    pub async fn open(&mut self, id: impl Into<String>) {
        let id = id.into();
        if id == self.id && self.summary().is_some() {
            return;
        }
        self.id = id;
        self.question.clear();
        self.load().await;
    }

    /// Copy the summary text
    pub fn copy_summary(&self) {
        if let Some(summary) = self.summary() {
            self.copy(&summary.summary, COPIED);
        }
    }

    /// Copy one answer's text
    pub fn copy_answer(&self, qa_id: &str) {
        if let Some(qa) = self.summary().and_then(|s| s.answer(qa_id)) {
            self.copy(&qa.answer, COPIED);
        }
    }

    /// Share through the platform, or copy the page link when it cannot share
    pub fn share(&self) {
        let Some(summary) = self.summary() else {
            return;
        };
        let payload = SharePayload {
            title: summary.title.clone(),
            text: summary.summary.clone(),
            url: self.page_url(),
        };
        match self.platform.share(&payload) {
            ShareOutcome::Shared => log::debug!("shared {}", payload.url),
            ShareOutcome::Unsupported => self.copy(&payload.url, LINK_COPIED),
            ShareOutcome::Failed(e) => log::error!("share failed: {}", e),
        }
    }

    fn copy(&self, text: &str, confirmation: &str) {
        match self.platform.copy_text(text) {
            Ok(()) => self.notifier.success(confirmation),
            Err(e) => {
                log::warn!("copy failed: {}", e);
                self.notifier.error(&e.to_string());
            }
        }
    }

    /// Ask the pending question.
    ///
    /// On success the answer is prepended to the summary's questions and the
    /// input is cleared. On failure the input is kept for another try.
    pub async fn ask(&mut self) -> bool {
        if self.question.trim().is_empty() {
            self.notifier.warning(EMPTY_QUESTION);
            return false;
        }
        if self.summary().is_none() {
            return false;
        }

        let request = AnswerRequest {
            question: self.question.clone(),
            summary_id: self.id.clone(),
        };
        match self.api.answer(&request).await {
            Ok(qa) => {
                log::info!("question {} answered", qa.id);
                if let ResultState::Loaded(summary) = &mut self.state {
                    summary.push_answer(qa);
                }
                self.question.clear();
                true
            }
            Err(e) => {
                log::error!("question failed: {}", e);
                let message = if e.is_connectivity() {
                    QUESTION_FAILED
                } else {
                    ANSWER_FAILED
                };
                self.notifier.error(message);
                false
            }
        }
    }
}
