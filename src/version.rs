use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A Debian package version: `[epoch:]upstream[-revision]`.
///
/// Parsing validates the version grammar once, at ingestion; comparison
/// reproduces `dpkg`'s `verrevcmp` ordering exactly. Archives downstream
/// depend on this ordering bit for bit, so it is a compatibility contract
/// rather than a convenience.
#[derive(Debug, Clone)]
pub struct DebianVersion {
    raw: String,
    epoch: u64,
    upstream: String,
    revision: String,
}

impl DebianVersion {
    /// Parses and validates a version string.
    pub fn parse(raw: &str) -> Result<Self, VersionError> {
        if raw.is_empty() {
            return Err(VersionError::Empty);
        }
        if raw.chars().any(|c| c.is_ascii_whitespace()) {
            return Err(VersionError::EmbeddedWhitespace { version: raw.to_string() });
        }
        let (epoch, rest) = match raw.split_once(':') {
            Some((epoch_part, rest)) => {
                if epoch_part.is_empty() || !epoch_part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(VersionError::BadEpoch { epoch: epoch_part.to_string() });
                }
                let epoch = epoch_part
                    .parse::<u64>()
                    .map_err(|_| VersionError::BadEpoch { epoch: epoch_part.to_string() })?;
                (epoch, rest)
            }
            None => (0, raw),
        };
        let (upstream, revision) = match rest.rsplit_once('-') {
            Some((upstream, revision)) => (upstream, revision),
            None => (rest, ""),
        };
        if upstream.is_empty() {
            return Err(VersionError::EmptyUpstream { version: raw.to_string() });
        }
        for c in upstream.chars() {
            // '-' here implies a revision was split off; ':' implies an epoch was.
            if !(c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '~' | '-' | ':')) {
                return Err(VersionError::IllegalCharacter { character: c, version: raw.to_string() });
            }
        }
        for c in revision.chars() {
            if !(c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '~')) {
                return Err(VersionError::IllegalRevisionCharacter {
                    character: c,
                    version: raw.to_string(),
                });
            }
        }
        Ok(Self {
            raw: raw.to_string(),
            epoch,
            upstream: upstream.to_string(),
            revision: revision.to_string(),
        })
    }

    /// The original version string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The epoch component (0 when absent).
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// The upstream-version component.
    pub fn upstream(&self) -> &str {
        &self.upstream
    }

    /// The debian-revision component (empty when absent).
    pub fn revision(&self) -> &str {
        &self.revision
    }

    /// Compares two versions with `dpkg`'s algorithm: epoch numerically,
    /// then upstream and revision with `verrevcmp`.
    ///
    /// Distinct strings can compare equal here (`"1.0"` vs `"1.00"`); the
    /// `Ord` impl adds a raw-string tie-break so ordering stays consistent
    /// with equality.
    pub fn dpkg_cmp(&self, other: &Self) -> Ordering {
        self.epoch
            .cmp(&other.epoch)
            .then_with(|| verrevcmp(&self.upstream, &other.upstream))
            .then_with(|| verrevcmp(&self.revision, &other.revision))
    }
}

impl PartialEq for DebianVersion {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for DebianVersion {}

impl std::hash::Hash for DebianVersion {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl PartialOrd for DebianVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DebianVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dpkg_cmp(other).then_with(|| self.raw.cmp(&other.raw))
    }
}

impl fmt::Display for DebianVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for DebianVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for DebianVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for DebianVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Character weight for the non-digit phase of `verrevcmp`: `~` sorts below
/// end-of-string, letters below every other character.
fn char_order(c: u8) -> i32 {
    if c.is_ascii_digit() {
        0
    } else if c.is_ascii_alphabetic() {
        i32::from(c)
    } else if c == b'~' {
        -1
    } else {
        i32::from(c) + 256
    }
}

/// `dpkg`'s component comparison: alternating non-digit and numeric runs.
fn verrevcmp(a: &str, b: &str) -> Ordering {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let (mut i, mut j) = (0, 0);
    while i < a.len() || j < b.len() {
        while (i < a.len() && !a[i].is_ascii_digit()) || (j < b.len() && !b[j].is_ascii_digit()) {
            // An exhausted side weighs 0, so a remaining `~` still loses to it.
            let wa = if i < a.len() { char_order(a[i]) } else { 0 };
            let wb = if j < b.len() { char_order(b[j]) } else { 0 };
            if wa != wb {
                return wa.cmp(&wb);
            }
            i += 1;
            j += 1;
        }
        while i < a.len() && a[i] == b'0' {
            i += 1;
        }
        while j < b.len() && b[j] == b'0' {
            j += 1;
        }
        let mut first_diff = Ordering::Equal;
        while i < a.len() && a[i].is_ascii_digit() && j < b.len() && b[j].is_ascii_digit() {
            if first_diff == Ordering::Equal {
                first_diff = a[i].cmp(&b[j]);
            }
            i += 1;
            j += 1;
        }
        if i < a.len() && a[i].is_ascii_digit() {
            return Ordering::Greater;
        }
        if j < b.len() && b[j].is_ascii_digit() {
            return Ordering::Less;
        }
        if first_diff != Ordering::Equal {
            return first_diff;
        }
    }
    Ordering::Equal
}

/// Rejections raised while parsing a version string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionError {
    #[error("version string is empty")]
    Empty,
    #[error("version {version:?} contains whitespace")]
    EmbeddedWhitespace { version: String },
    #[error("epoch {epoch:?} is not an unsigned number")]
    BadEpoch { epoch: String },
    #[error("version {version:?} has an empty upstream component")]
    EmptyUpstream { version: String },
    #[error("invalid character {character:?} in upstream component of {version:?}")]
    IllegalCharacter { character: char, version: String },
    #[error("invalid character {character:?} in revision component of {version:?}")]
    IllegalRevisionCharacter { character: char, version: String },
}
