//! The domination engine: decides, for each package in a publishing scope,
//! which Published rows stay live and which are superseded or deleted.
//!
//! The pieces compose bottom-up: the [`Publication`] abstraction and its
//! total order, the live-version finders (one for sources, two cooperating
//! passes for binaries), the reprieve cache behind pass 2, the linear
//! partition planner, and the [`Dominator`] driver that ties them to a
//! storage collaborator.

pub mod arch_cache;
pub mod error;
pub mod generalization;
pub mod judge;
pub mod liveness;
pub mod plan;

pub use arch_cache::{ArchSpecificPublicationsCache, ReprieveKey};
pub use error::DominationError;
pub use generalization::{compare, sort_publications, Publication};
pub use judge::{DominationStats, Dominator};
pub use liveness::{
    find_live_binary_versions_pass1, find_live_binary_versions_pass2, find_live_source_versions,
};
pub use plan::{plan_package_domination, DominationPlan};
