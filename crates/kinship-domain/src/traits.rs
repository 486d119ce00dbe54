//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{FamilyEdge, Member, MemberId, NewFamilyEdge, RelationLabel};

/// Read/write access to family edges inside one caller-owned transaction
///
/// Implemented by the infrastructure layer (kinship-store). Every call runs
/// against the same transaction; the implementation never retries and never
/// commits on its own.
pub trait FamilyStore {
    /// Error type for store operations
    type Error;

    /// Get a member by ID
    fn get_member(&self, id: MemberId) -> Result<Option<Member>, Self::Error>;

    /// True if an edge `subject_id -> linked_id` exists, whatever its label
    fn edge_exists(&self, subject_id: MemberId, linked_id: MemberId) -> Result<bool, Self::Error>;

    /// All edges of a subject that point at a registered member, in insertion order
    fn direct_linked_edges(&self, subject_id: MemberId) -> Result<Vec<FamilyEdge>, Self::Error>;

    /// Insert one edge
    ///
    /// Callers guarantee the edge is not a self-link.
    fn create_edge(&mut self, edge: NewFamilyEdge) -> Result<(), Self::Error>;

    /// Current display name of a member, or `None` if it no longer exists
    fn member_name(&self, id: MemberId) -> Result<Option<String>, Self::Error> {
        Ok(self.get_member(id)?.map(|m| m.name))
    }

    /// Linked member ids of a subject's edges whose label satisfies `filter`
    fn linked_ids_where<F>(&self, subject_id: MemberId, filter: F) -> Result<Vec<MemberId>, Self::Error>
    where
        F: Fn(RelationLabel) -> bool,
    {
        Ok(self
            .direct_linked_edges(subject_id)?
            .into_iter()
            .filter(|edge| filter(edge.label))
            .filter_map(|edge| edge.linked_member_id)
            .collect())
    }
}
