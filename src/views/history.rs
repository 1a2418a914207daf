//! History view: previously summarised content with a live filter.

use crate::api::{ApiError, SummaryApi};
use crate::notify::Notifier;
use crate::summary::{filter_summaries, Summary};
use std::sync::Arc;

pub const FETCH_FAILED: &str = "Failed to fetch history";
pub const LOAD_FAILED: &str = "Failed to load history";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryState {
    Loading,
    Loaded(Vec<Summary>),
    Failed(String),
}

/// What the history list should show right now
#[derive(Debug, PartialEq, Eq)]
pub enum Listing<'a> {
    Loading,
    Failed(&'a str),
    /// Nothing has been summarised yet
    Empty,
    /// Summaries exist but none match the filter
    NoMatches,
    Matches(Vec<&'a Summary>),
}

/// View model of `/history`
pub struct HistoryView {
    api: Arc<dyn SummaryApi>,
    notifier: Arc<dyn Notifier>,
    state: HistoryState,
    filter: String,
}

impl HistoryView {
    pub fn new(api: Arc<dyn SummaryApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            state: HistoryState::Loading,
            filter: String::new(),
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Fetch the summary list
    pub async fn load(&mut self) {
        self.state = HistoryState::Loading;
        self.state = match self.api.summaries().await {
            Ok(summaries) => {
                log::debug!("loaded {} summaries", summaries.len());
                HistoryState::Loaded(summaries)
            }
            Err(ApiError::Server { status, .. }) => {
                log::warn!("history request failed with {}", status);
                HistoryState::Failed(FETCH_FAILED.to_string())
            }
            Err(e) => {
                log::error!("failed to fetch history: {}", e);
                self.notifier.error(LOAD_FAILED);
                HistoryState::Failed(e.to_string())
            }
        };
    }

    /// Update the filter term. Purely local.
    pub fn set_filter(&mut self, term: impl Into<String>) {
        self.filter = term.into();
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    pub fn listing(&self) -> Listing<'_> {
        match &self.state {
            HistoryState::Loading => Listing::Loading,
            HistoryState::Failed(message) => Listing::Failed(message),
            HistoryState::Loaded(summaries) if summaries.is_empty() => Listing::Empty,
            HistoryState::Loaded(summaries) => {
                let matches = filter_summaries(summaries, &self.filter);
                if matches.is_empty() {
                    Listing::NoMatches
                } else {
                    Listing::Matches(matches)
                }
            }
        }
    }
}
