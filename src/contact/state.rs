//! Submission lifecycle state and the user-facing notices it produces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the contact form is in its submission lifecycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    /// Succeeded and Failed fall back to Idle on the next edit or submit attempt.
    pub fn is_settled(&self) -> bool {
        matches!(self, SubmissionState::Succeeded | SubmissionState::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitting => "submitting",
            SubmissionState::Succeeded => "succeeded",
            SubmissionState::Failed => "failed",
        }
    }
}

impl fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Failure,
}

/// Message shown to the visitor after a submission resolves
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn sent() -> Self {
        Self {
            kind: NoticeKind::Success,
            title: "Message sent!".to_string(),
            body: "Thanks for reaching out. I typically respond within 24 hours.".to_string(),
        }
    }

    /// Generic failure notice. The cause is never part of it.
    pub fn failed(fallback_email: Option<&str>) -> Self {
        let body = match fallback_email {
            Some(email) => format!(
                "Something went wrong. Please try again, or email me directly at {}.",
                email
            ),
            None => "Something went wrong. Please try again in a moment.".to_string(),
        };
        Self {
            kind: NoticeKind::Failure,
            title: "Failed to send message".to_string(),
            body,
        }
    }
}
