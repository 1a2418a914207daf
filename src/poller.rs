//! Background readiness polling of the backend.
//!
//! The backend loads its models after start-up and answers `/status` with
//! `"initializing"` until done. The poller keeps asking until the server is
//! ready, publishing the current [`Readiness`] on a watch channel. It is
//! bound to its owner: cancelling or dropping it stops the task.

use crate::api::{ApiError, SummaryApi};
use crate::config::PollConfig;
use crate::notify::Notifier;
use crate::summary::ServerStatus;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Shown once per failed status check
pub const UNREACHABLE_MESSAGE: &str = "Cannot connect to server. Please try again later.";

/// Backend readiness as seen by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// No status check has completed yet
    Unknown,
    /// Server is up but still loading
    Initializing,
    /// Last status check failed
    Unreachable,
    Ready,
}

impl Readiness {
    pub fn is_ready(self) -> bool {
        self == Readiness::Ready
    }

    /// Whether the "server is initializing" banner should be shown
    pub fn blocks(self) -> bool {
        matches!(self, Readiness::Initializing | Readiness::Unreachable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub initializing_delay: Duration,
    pub offline_delay: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        PollSettings::from(&PollConfig::default())
    }
}

impl From<&PollConfig> for PollSettings {
    fn from(config: &PollConfig) -> Self {
        Self {
            initializing_delay: Duration::from_secs(config.initializing_secs),
            offline_delay: Duration::from_secs(config.offline_secs),
        }
    }
}

/// Result of one status check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollStep {
    pub readiness: Readiness,
    /// Delay before the next check; `None` stops polling
    pub retry_after: Option<Duration>,
}

/// Decide what a status check means for readiness and when to check again.
pub fn evaluate(result: &Result<ServerStatus, ApiError>, settings: &PollSettings) -> PollStep {
    match result {
        Ok(status) if status.is_initializing() => PollStep {
            readiness: Readiness::Initializing,
            retry_after: Some(settings.initializing_delay),
        },
        Ok(_) => PollStep {
            readiness: Readiness::Ready,
            retry_after: None,
        },
        Err(_) => PollStep {
            readiness: Readiness::Unreachable,
            retry_after: Some(settings.offline_delay),
        },
    }
}

/// Handle to a running readiness poll
pub struct ReadinessPoller {
    token: CancellationToken,
    readiness: watch::Receiver<Readiness>,
    handle: Option<JoinHandle<()>>,
}

impl ReadinessPoller {
    /// Start polling on the current tokio runtime
    pub fn spawn(
        api: Arc<dyn SummaryApi>,
        notifier: Arc<dyn Notifier>,
        settings: PollSettings,
    ) -> Self {
        let token = CancellationToken::new();
        let (tx, rx) = watch::channel(Readiness::Unknown);
        let handle = tokio::spawn(poll_loop(api, notifier, settings, tx, token.clone()));
        Self {
            token,
            readiness: rx,
            handle: Some(handle),
        }
    }

    /// Latest known readiness
    pub fn readiness(&self) -> Readiness {
        *self.readiness.borrow()
    }

    /// A receiver that observes every readiness change
    pub fn subscribe(&self) -> watch::Receiver<Readiness> {
        self.readiness.clone()
    }

    /// Wait until the server is ready. Returns the last readiness seen if
    /// polling stopped first.
    pub async fn wait_ready(&self) -> Readiness {
        let mut rx = self.readiness.clone();
        let seen = rx.wait_for(|r| r.is_ready()).await.map(|r| *r);
        match seen {
            Ok(r) => r,
            Err(_) => *rx.borrow(),
        }
    }

    /// Stop polling. No state updates or notifications happen afterwards.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel and wait for the task to finish
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                log::warn!("readiness poller ended abnormally: {}", e);
            }
        }
    }
}

impl Drop for ReadinessPoller {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn poll_loop(
    api: Arc<dyn SummaryApi>,
    notifier: Arc<dyn Notifier>,
    settings: PollSettings,
    tx: watch::Sender<Readiness>,
    token: CancellationToken,
) {
    loop {
        let result = tokio::select! {
            _ = token.cancelled() => return,
            result = api.status() => result,
        };
        // Cancelled while the request was being answered
        if token.is_cancelled() {
            return;
        }

        let step = evaluate(&result, &settings);
        match &result {
            Ok(status) if status.is_initializing() => {
                log::info!("server is initializing, checking again in {:?}", step.retry_after);
            }
            Ok(_) => log::info!("server is ready"),
            Err(e) => {
                log::warn!("server check failed: {}", e);
                notifier.error(UNREACHABLE_MESSAGE);
            }
        }
        tx.send_replace(step.readiness);

        let Some(delay) = step.retry_after else {
            return;
        };
        tokio::select! {
            _ = token.cancelled() => return,
            _ = tokio::time::sleep(delay) => {}
        }
    }
}
