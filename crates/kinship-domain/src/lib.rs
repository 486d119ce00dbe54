//! Kinship Domain Layer
//!
//! This crate contains the domain model for the family-relationship graph of
//! a membership registry. Its only external dependency is `uuid`; it defines
//! the value objects and the store trait that the other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **Member**: a registered person, referenced by [`MemberId`]
//! - **Family edge**: one directed, labeled link from a member to a relative
//! - **Linked member**: the other party of an edge when they are registered too
//! - **Relation label**: the closed set of labels an edge can carry
//!
//! ## Architecture
//!
//! - Pure domain logic only
//! - Infrastructure implementations live in other crates
//! - [`traits::FamilyStore`] is the boundary the inference engine talks to

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod edge;
pub mod member;
pub mod relation;
pub mod traits;

// Re-exports for convenience
pub use edge::{FamilyEdge, NewFamilyEdge};
pub use member::{Member, MemberId, Sex};
pub use relation::RelationLabel;
pub use traits::FamilyStore;
