//! Archive data model: publication statuses, scope keys, and the source and
//! binary publication records the domination engine operates on.

pub mod publication;
pub mod scope;
pub mod status;

pub use publication::{
    BinaryFormat, BinaryPublication, BinaryReleaseId, PublicationId, SourcePublication,
    SourceReleaseId,
};
pub use scope::{PackageKey, Pocket};
pub use status::PublicationStatus;
