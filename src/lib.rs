//! # SmartReader
//!
//! A terminal client for the SmartReader summarisation service.
//!
//! ## Features
//!
//! - **Submit content**: article URLs or raw text, validated before anything is sent
//! - **Follow-up questions**: ask about a summary, newest answers first
//! - **History**: browse earlier summaries with a live filter
//! - **Readiness polling**: waits for a backend that is still loading its models

pub mod api;
pub mod config;
pub mod logging;
pub mod notify;
pub mod platform;
pub mod poller;
pub mod route;
pub mod summary;
pub mod ui;
pub mod views;

pub use api::{ApiError, HttpApi, SummaryApi};
pub use config::Config;
pub use notify::Notifier;
pub use poller::{Readiness, ReadinessPoller};
pub use route::Route;
pub use summary::{QuestionAnswer, Summary};
