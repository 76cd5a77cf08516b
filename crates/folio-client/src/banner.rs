//! Dismissible, self-expiring feedback banners.

use std::time::{Duration, Instant};

/// How long a banner stays up unless dismissed first.
pub const BANNER_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// A banner shown above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    pub shown_at: Instant,
}

impl Banner {
    pub fn new(kind: BannerKind, message: impl Into<String>, now: Instant) -> Self {
        Self {
            kind,
            message: message.into(),
            shown_at: now,
        }
    }

    /// True once `BANNER_TTL` has passed since the banner was shown.
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= BANNER_TTL
    }

    /// Time left before the banner removes itself.
    pub fn remaining(&self, now: Instant) -> Duration {
        BANNER_TTL.saturating_sub(now.saturating_duration_since(self.shown_at))
    }
}
