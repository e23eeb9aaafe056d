use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named sub-channel of a distribution series used for staged rollout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pocket {
    Release,
    Security,
    Updates,
    Proposed,
    Backports,
}

impl Pocket {
    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Security => "security",
            Self::Updates => "updates",
            Self::Proposed => "proposed",
            Self::Backports => "backports",
        }
    }
}

impl fmt::Display for Pocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pocket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "release" => Ok(Self::Release),
            "security" => Ok(Self::Security),
            "updates" => Ok(Self::Updates),
            "proposed" => Ok(Self::Proposed),
            "backports" => Ok(Self::Backports),
            _ => Err(format!("unknown pocket: {s}")),
        }
    }
}

/// Grouping key for domination: package name plus optional channel.
///
/// Publications in different channels are never compared against each
/// other; the channel is part of the key, not a filter applied later.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageKey {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    channel: Option<String>,
}

impl PackageKey {
    /// Creates a key for the traditional (channel-less) publishing flow.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            channel: None,
        }
    }

    /// Attaches a channel (e.g. `"stable"`, `"candidate"`).
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// The package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The channel, if the publication came from a channel-aware flow.
    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }
}

impl fmt::Display for PackageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.channel {
            Some(channel) => write!(f, "{}/{channel}", self.name),
            None => f.write_str(&self.name),
        }
    }
}
