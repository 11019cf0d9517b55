use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::daily::DailyRecord;
use crate::history::HistoryLog;
use crate::session::DialogSession;

/// Opaque stable identifier for a sender. Wide enough for Telegram ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Everything the core tracks for one user. All fields for one user are
/// mutated atomically with respect to one feature invocation.
#[derive(Debug, Default)]
pub struct UserState {
    pub magic: Option<DailyRecord<u32>>,
    pub luck: Option<DailyRecord<u32>>,
    pub ritual: Option<DailyRecord<String>>,
    pub history: HistoryLog,
    pub session: DialogSession,
}

/// Per-user state behind a single lock. Handlers for different users need
/// no coordination beyond this; handlers for the same user serialize here.
/// The lock is never held across an await: the responder is synchronous and
/// all I/O happens outside it.
///
/// Records are overwritten in place on day rollover and never swept, so the
/// map grows with the number of distinct users seen during the process
/// lifetime.
#[derive(Debug, Default)]
pub struct StateStore {
    users: Mutex<HashMap<UserId, UserState>>,
}

impl StateStore {
    /// Run `f` against one user's state bundle, creating it on first use.
    pub fn with_user<R>(&self, user: UserId, f: impl FnOnce(&mut UserState) -> R) -> R {
        let mut users = self.users.lock().unwrap_or_else(|e| e.into_inner());
        f(users.entry(user).or_default())
    }

    /// Number of distinct users ever seen.
    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
