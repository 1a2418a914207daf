//! Summary types exchanged with the SmartReader backend.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use url::Url;

/// Title used for text submissions when none is given.
pub const DEFAULT_TITLE: &str = "Untitled";

/// A follow-up question and the backend's answer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub id: String,
    pub question: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// A summary produced by the backend for a submitted article or text.
///
/// The client only ever holds a transient copy. `questions` is kept
/// newest-first: answers received during a visit are prepended locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    /// The condensed text
    pub summary: String,
    pub created_at: String,
    /// Start of the original content, when the backend provides it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionAnswer>,
}

impl Summary {
    /// Record a freshly answered question in front of the existing ones.
    pub fn push_answer(&mut self, qa: QuestionAnswer) {
        self.questions.insert(0, qa);
    }

    /// Case-insensitive substring match over title and summary text.
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.summary.to_lowercase().contains(needle)
    }

    /// Host name of the source URL, if the summary came from one
    pub fn source_host(&self) -> Option<String> {
        let url = Url::parse(self.url.as_deref()?).ok()?;
        url.host_str().map(str::to_string)
    }

    /// Creation time parsed from the backend timestamp
    pub fn created(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.created_at)
    }

    /// Look up an answer by its id
    pub fn answer(&self, id: &str) -> Option<&QuestionAnswer> {
        self.questions.iter().find(|qa| qa.id == id)
    }
}

/// Filter summaries by a search term, keeping their order.
///
/// An empty term keeps everything.
pub fn filter_summaries<'a>(summaries: &'a [Summary], term: &str) -> Vec<&'a Summary> {
    let needle = term.to_lowercase();
    summaries.iter().filter(|s| s.matches(&needle)).collect()
}

/// Shorten text to `max_len` characters, appending `...` when cut.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        let cut: String = text.chars().take(max_len).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Parse a backend timestamp. Accepts RFC 3339 and naive ISO 8601.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    raw.parse::<NaiveDateTime>().ok()
}

/// Body of `POST /summarize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubmissionRequest {
    Url { url: String },
    Text { text: String, title: String },
}

impl SubmissionRequest {
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionRequest::Url { .. } => "url",
            SubmissionRequest::Text { .. } => "text",
        }
    }
}

/// Response of `POST /summarize`. Only `id` is required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SummarizeResponse {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `POST /answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerRequest {
    pub question: String,
    pub summary_id: String,
}

/// Response of `GET /status`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ServerStatus {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

impl ServerStatus {
    pub const INITIALIZING: &'static str = "initializing";

    pub fn is_initializing(&self) -> bool {
        self.status == Self::INITIALIZING
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn summary(id: &str, title: &str, text: &str) -> Summary {
        Summary {
            id: id.to_string(),
            title: title.to_string(),
            url: None,
            summary: text.to_string(),
            created_at: "2024-05-01T10:30:00".to_string(),
            preview: None,
            questions: Vec::new(),
        }
    }

    fn qa(id: &str) -> QuestionAnswer {
        QuestionAnswer {
            id: id.to_string(),
            question: format!("question {}", id),
            answer: format!("answer {}", id),
            created_at: None,
        }
    }

    #[test]
    fn push_answer_prepends() {
        let mut s = summary("1", "Alpha", "text");
        s.questions = vec![qa("q0")];
        s.push_answer(qa("q1"));
        let ids: Vec<_> = s.questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q0"]);
    }

    #[test]
    fn filter_is_case_insensitive_over_title_and_summary() {
        let all = vec![
            summary("1", "Alpha", "first"),
            summary("2", "Beta", "second about ALPINE lakes"),
            summary("3", "Gamma", "third"),
        ];
        let ids: Vec<_> = filter_summaries(&all, "ALP").iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(filter_summaries(&all, "").len(), 3);
        assert!(filter_summaries(&all, "zzz").is_empty());
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        assert_eq!(truncate_text("åäöåäö", 3), "åäö...");
    }

    #[test]
    fn timestamps_parse_naive_and_rfc3339() {
        assert!(parse_timestamp("2024-05-01T10:30:00.123456").is_some());
        assert!(parse_timestamp("2024-05-01T10:30:00Z").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn source_host_from_url() {
        let mut s = summary("1", "Alpha", "text");
        assert_eq!(s.source_host(), None);
        s.url = Some("https://news.example.com/a/b".to_string());
        assert_eq!(s.source_host().as_deref(), Some("news.example.com"));
    }

    #[test]
    fn submission_request_serializes_without_tag() {
        let url = SubmissionRequest::Url {
            url: "https://example.com/a".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&url).unwrap(),
            serde_json::json!({"url": "https://example.com/a"})
        );
        let text = SubmissionRequest::Text {
            text: "body".to_string(),
            title: DEFAULT_TITLE.to_string(),
        };
        assert_eq!(
            serde_json::to_value(&text).unwrap(),
            serde_json::json!({"text": "body", "title": "Untitled"})
        );
    }

    #[test]
    fn list_entries_decode_without_questions() {
        let raw = r#"{"id":"7","title":"T","summary":"S","url":null,"created_at":"2024-05-01T10:30:00","preview":"P"}"#;
        let s: Summary = serde_json::from_str(raw).unwrap();
        assert!(s.questions.is_empty());
        assert_eq!(s.preview.as_deref(), Some("P"));
    }
}
