//! The shared game log and message phrasing.
//!
//! Every broadcast is appended here and mirrored to `tracing`. Players are
//! not pushed messages as they happen; each player keeps a cursor into the
//! log and catches up before being asked anything and at the end of every
//! turn.
//!
//! Cursors are absolute message numbers. A log with a retention limit
//! forgets messages that every player has already been sent, keeping at
//! most that many of them, so long auto-played games run in bounded
//! memory while `tracing` still sees every line.

use std::collections::VecDeque;

use parking_lot::Mutex;

#[derive(Debug, Default)]
struct Lines {
    kept: VecDeque<String>,
    /// Messages forgotten from the front.
    dropped: usize,
}

/// Ordered list of public messages.
#[derive(Debug, Default)]
pub struct GameLog {
    lines: Mutex<Lines>,
    retention: Option<usize>,
}

impl GameLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that keeps at most `retention` delivered messages.
    #[must_use]
    pub fn with_retention(retention: Option<usize>) -> Self {
        Self {
            lines: Mutex::default(),
            retention,
        }
    }

    pub fn push(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "dominion_engine::game", "{message}");
        self.lines.lock().kept.push_back(message);
    }

    /// Messages from `cursor` on that are still kept.
    #[must_use]
    pub fn since(&self, cursor: usize) -> Vec<String> {
        let lines = self.lines.lock();
        let start = cursor.saturating_sub(lines.dropped);
        lines.kept.iter().skip(start).cloned().collect()
    }

    /// Messages ever pushed, forgotten ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        let lines = self.lines.lock();
        lines.dropped + lines.kept.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Messages still kept.
    #[must_use]
    pub fn retained(&self) -> usize {
        self.lines.lock().kept.len()
    }

    /// Forget delivered messages beyond the retention limit. Nothing at or
    /// after `delivered` is ever dropped.
    pub fn trim(&self, delivered: usize) {
        let Some(retention) = self.retention else {
            return;
        };
        let mut lines = self.lines.lock();
        let seen = delivered.saturating_sub(lines.dropped).min(lines.kept.len());
        let excess = seen.saturating_sub(retention);
        if excess > 0 {
            lines.kept.drain(..excess);
            lines.dropped += excess;
            tracing::trace!(dropped = lines.dropped, kept = lines.kept.len(), "game log trimmed");
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.lines.lock().kept.iter().cloned().collect()
    }

    /// Whether any kept message contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().kept.iter().any(|message| message.contains(needle))
    }
}

/// "a Silver", "an Estate".
#[must_use]
pub fn article(name: &str) -> String {
    match name.chars().next() {
        Some(first) if "aeiouAEIOU".contains(first) => format!("an {name}"),
        _ => format!("a {name}"),
    }
}

/// "1 buy", "2 buys".
#[must_use]
pub fn plural(count: impl Into<i64>, word: &str) -> String {
    let count = count.into();
    if count.abs() == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Names joined for a message, e.g. "Copper, Copper, Estate".
#[must_use]
pub fn name_list<S: AsRef<str>>(names: &[S]) -> String {
    if names.is_empty() {
        return "nothing".to_string();
    }
    names.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}
