// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::{Duration, Instant};

use serde::Serialize;

use crate::models::TransactionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Feedback for the last mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    /// Record touched by a successful save, for transient highlighting.
    pub record_id: Option<TransactionId>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
            record_id: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
            record_id: None,
        }
    }

    pub fn with_record(mut self, id: TransactionId) -> Self {
        self.record_id = Some(id);
        self
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}

/// Holds at most one notice and drops it once `ttl` has elapsed.
///
/// Time is passed in by the caller so expiry can be driven by whatever
/// clock the front end runs on.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    ttl: Duration,
    current: Option<(Notice, Instant)>,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    /// Replaces any pending notice.
    pub fn post(&mut self, notice: Notice, now: Instant) {
        self.current = Some((notice, now));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Drops the notice if it has expired at `now`.
    pub fn expire(&mut self, now: Instant) {
        if let Some((_, posted)) = &self.current {
            if now.saturating_duration_since(*posted) >= self.ttl {
                self.current = None;
            }
        }
    }

    pub fn current(&self, now: Instant) -> Option<&Notice> {
        match &self.current {
            Some((n, posted)) if now.saturating_duration_since(*posted) < self.ttl => Some(n),
            _ => None,
        }
    }
}
