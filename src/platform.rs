//! Clipboard and share facilities of the host environment.

use crossterm::clipboard::CopyToClipboard;
use crossterm::execute;
use std::io;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] io::Error),
    #[error("share failed: {0}")]
    Share(String),
}

/// Content handed to a native share facility
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// What happened when sharing was attempted
#[derive(Debug)]
pub enum ShareOutcome {
    Shared,
    /// No native share facility; callers fall back to copying the link
    Unsupported,
    Failed(PlatformError),
}

pub trait Platform: Send + Sync {
    fn copy_text(&self, text: &str) -> Result<(), PlatformError>;

    fn share(&self, payload: &SharePayload) -> ShareOutcome;
}

/// Terminal host: copies through the OSC 52 escape sequence, cannot share.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPlatform;

impl Platform for TerminalPlatform {
    fn copy_text(&self, text: &str) -> Result<(), PlatformError> {
        execute!(io::stdout(), CopyToClipboard::to_clipboard_from(text))?;
        Ok(())
    }

    fn share(&self, _payload: &SharePayload) -> ShareOutcome {
        ShareOutcome::Unsupported
    }
}

/// In-memory clipboard, optionally with a share facility that records payloads
#[derive(Debug, Default)]
pub struct MemoryPlatform {
    can_share: bool,
    clipboard: Mutex<Option<String>>,
    shared: Mutex<Vec<SharePayload>>,
}

impl MemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// A platform whose share facility accepts every payload
    pub fn with_share() -> Self {
        Self {
            can_share: true,
            ..Self::default()
        }
    }

    pub fn clipboard(&self) -> Option<String> {
        self.clipboard.lock().ok().and_then(|c| c.clone())
    }

    pub fn shared(&self) -> Vec<SharePayload> {
        self.shared.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl Platform for MemoryPlatform {
    fn copy_text(&self, text: &str) -> Result<(), PlatformError> {
        if let Ok(mut clipboard) = self.clipboard.lock() {
            *clipboard = Some(text.to_string());
        }
        Ok(())
    }

    fn share(&self, payload: &SharePayload) -> ShareOutcome {
        if !self.can_share {
            return ShareOutcome::Unsupported;
        }
        match self.shared.lock() {
            Ok(mut shared) => {
                shared.push(payload.clone());
                ShareOutcome::Shared
            }
            Err(e) => ShareOutcome::Failed(PlatformError::Share(e.to_string())),
        }
    }
}
