use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a publication row.
///
/// Domination only ever sees Published rows; it is the sole writer of the
/// Superseded transition, and an external retention sweep moves dead rows
/// onward once their stay of execution expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationStatus {
    Pending,
    Published,
    Superseded,
    Deleted,
    Obsolete,
}

impl PublicationStatus {
    /// Returns true when the row is a domination candidate.
    pub fn is_published(self) -> bool {
        matches!(self, Self::Published)
    }

    /// Returns true once the row has left the live set for good.
    pub fn is_dead(self) -> bool {
        matches!(self, Self::Superseded | Self::Deleted | Self::Obsolete)
    }

    /// Canonical lowercase name, as used in logs and snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Published => "published",
            Self::Superseded => "superseded",
            Self::Deleted => "deleted",
            Self::Obsolete => "obsolete",
        }
    }
}

impl fmt::Display for PublicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
