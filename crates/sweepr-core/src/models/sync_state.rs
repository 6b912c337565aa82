use serde::{Deserialize, Serialize};

/// Summary of a repository's relationship to its remote and working tree.
///
/// Absence of information maps to `Unknown`, never to a missing field.
/// `Behind` is part of the wire contract even though the current
/// classification policy never produces it (clean tree + failed fetch probe
/// is reported as `Synced`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    Synced,
    Behind,
    Dirty,
    Unknown,
}

impl std::fmt::Display for SyncState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncState::Synced => write!(f, "synced"),
            SyncState::Behind => write!(f, "behind"),
            SyncState::Dirty => write!(f, "dirty"),
            SyncState::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for SyncState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "synced" => Ok(SyncState::Synced),
            "behind" => Ok(SyncState::Behind),
            "dirty" => Ok(SyncState::Dirty),
            "unknown" => Ok(SyncState::Unknown),
            _ => Err(format!("unknown sync state: {s}")),
        }
    }
}
