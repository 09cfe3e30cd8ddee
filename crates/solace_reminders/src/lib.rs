//! Time-triggered reminders, spoken at most once per day each.
//!
//! The scheduler holds its registry in memory for the process lifetime
//! and has no clock of its own: the host polls [`ReminderScheduler::due_now`]
//! (once a minute is plenty) and calls [`ReminderScheduler::reset_daily`]
//! when the calendar day rolls over. Reminders recur daily and are never
//! deleted — there is deliberately no removal operation; callers drop
//! the whole scheduler to clear it.
//!
//! Per reminder the state machine is just Pending -> Spoken on a due
//! check hit, and back to Pending at the daily reset.

use chrono::Local;
use serde::Serialize;

/// One registered reminder.
#[derive(Debug, Clone, Serialize)]
pub struct Reminder {
    pub text: String,
    /// Time of day as "HH:MM"; compared by string equality at minute
    /// granularity.
    pub time: String,
    pub spoken_today: bool,
}

/// Registry of reminders. Not a process global: the host owns an
/// instance and serializes access to it (one writer at a time keeps the
/// once-per-day guarantee intact).
#[derive(Debug, Default)]
pub struct ReminderScheduler {
    reminders: Vec<Reminder>,
}

impl ReminderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reminder in the pending state.
    pub fn add(&mut self, text: impl Into<String>, time: impl Into<String>) {
        let reminder = Reminder {
            text: text.into(),
            time: time.into(),
            spoken_today: false,
        };
        tracing::info!(time = %reminder.time, "registered reminder");
        self.reminders.push(reminder);
    }

    /// Texts of every reminder due at `current` ("HH:MM"), in
    /// registration order. Each hit transitions the reminder to spoken,
    /// so a second call within the same minute returns nothing.
    pub fn due_now(&mut self, current: &str) -> Vec<String> {
        let mut due = Vec::new();
        for reminder in &mut self.reminders {
            if reminder.time == current && !reminder.spoken_today {
                reminder.spoken_today = true;
                due.push(reminder.text.clone());
            }
        }
        due
    }

    /// Convenience wrapper over [`due_now`](Self::due_now) using the
    /// local wall clock.
    pub fn due_at_local_now(&mut self) -> Vec<String> {
        let now = Local::now().format("%H:%M").to_string();
        self.due_now(&now)
    }

    /// Return every reminder to pending. The host calls this once per
    /// calendar day.
    pub fn reset_daily(&mut self) {
        for reminder in &mut self.reminders {
            reminder.spoken_today = false;
        }
        tracing::debug!(count = self.reminders.len(), "reset daily reminder flags");
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn len(&self) -> usize {
        self.reminders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reminders.is_empty()
    }
}
