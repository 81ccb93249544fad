//! Transient success/error message shown above the dashboard

use serde::Serialize;
use std::time::{Duration, Instant};

/// How long a banner stays visible
pub const BANNER_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub text: String,
    pub kind: BannerKind,
    pub shown_at: Instant,
}

impl Banner {
    pub fn success(text: impl Into<String>, now: Instant) -> Self {
        Self {
            text: text.into(),
            kind: BannerKind::Success,
            shown_at: now,
        }
    }

    pub fn error(text: impl Into<String>, now: Instant) -> Self {
        Self {
            text: text.into(),
            kind: BannerKind::Error,
            shown_at: now,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= BANNER_TTL
    }
}
