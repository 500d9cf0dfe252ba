//! Client synchronization: optimistic local changes, best-effort remote
//! replay, and sticky online/offline tracking.

mod controller;

use std::fmt;

use serde::Serialize;

pub use controller::{SyncController, INITIAL_LOAD_FAILED_MESSAGE, RESYNC_FAILED_MESSAGE};

/// Connection state of a client session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncMode {
    /// No load attempt has finished yet
    Loading,
    /// The last remote call succeeded; mutations are replayed remotely
    Online,
    /// A remote call failed; mutations stay local until a resync succeeds
    Offline,
}

impl SyncMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

impl fmt::Display for SyncMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
