//! Transaction handle passed to every family-graph read and write

use crate::{queries, StoreError};
use kinship_domain::{FamilyEdge, FamilyStore, Member, MemberId, NewFamilyEdge};
use rusqlite::Transaction;

/// One open SQLite write transaction
///
/// This is the handle a member save opens, writes the member and its
/// explicit edges through, hands to the inference engine, and finally
/// commits. Dropping it without [`commit`](Self::commit) rolls back the
/// whole save, derived edges included.
pub struct FamilyTransaction<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> FamilyTransaction<'conn> {
    pub(crate) fn new(tx: Transaction<'conn>) -> Self {
        Self { tx }
    }

    /// Commit every write made through this handle
    pub fn commit(self) -> Result<(), StoreError> {
        self.tx.commit()?;
        Ok(())
    }

    /// Discard every write made through this handle
    pub fn rollback(self) -> Result<(), StoreError> {
        self.tx.rollback()?;
        Ok(())
    }

    /// Insert a new member
    pub fn insert_member(&self, member: &Member) -> Result<MemberId, StoreError> {
        queries::insert_member(&self.tx, member)?;
        tracing::debug!(member = %member.id, name = %member.name, "member inserted");
        Ok(member.id)
    }

    /// Update name and sex of an existing member
    ///
    /// Names already copied into other members' edges are left as they are.
    pub fn update_member(&self, member: &Member) -> Result<(), StoreError> {
        queries::update_member(&self.tx, member)
    }

    /// Delete a member together with the edges it owns
    ///
    /// Edges that other members hold towards it stay behind as stale
    /// references. Returns false if the member did not exist.
    pub fn delete_member(&self, id: MemberId) -> Result<bool, StoreError> {
        let deleted = queries::delete_member(&self.tx, id)?;
        if deleted {
            tracing::debug!(member = %id, "member deleted");
        }
        Ok(deleted)
    }

    /// Record an explicit edge entered by a user
    ///
    /// Unlike inference, an explicit edge for an already linked pair is an
    /// error rather than a silent no-op.
    pub fn add_edge(&self, edge: NewFamilyEdge) -> Result<(), StoreError> {
        queries::insert_edge(&self.tx, &edge)
    }

    /// Remove every edge a member owns, explicit and derived alike
    pub fn clear_edges(&self, subject_id: MemberId) -> Result<usize, StoreError> {
        let removed = queries::clear_edges(&self.tx, subject_id)?;
        tracing::debug!(member = %subject_id, removed, "family edges cleared");
        Ok(removed)
    }

    /// Replace a member's edge set, as a re-saved form does
    pub fn replace_edges(
        &self,
        subject_id: MemberId,
        edges: impl IntoIterator<Item = NewFamilyEdge>,
    ) -> Result<usize, StoreError> {
        self.clear_edges(subject_id)?;
        let mut inserted = 0;
        for edge in edges {
            if edge.subject_id != subject_id {
                return Err(StoreError::InvalidData(format!(
                    "edge owned by {} passed while saving {}",
                    edge.subject_id, subject_id
                )));
            }
            queries::insert_edge(&self.tx, &edge)?;
            inserted += 1;
        }
        Ok(inserted)
    }

    /// All edges owned by a member, linked or not
    pub fn family_of(&self, subject_id: MemberId) -> Result<Vec<FamilyEdge>, StoreError> {
        queries::edges_of(&self.tx, subject_id, false)
    }
}

impl FamilyStore for FamilyTransaction<'_> {
    type Error = StoreError;

    fn get_member(&self, id: MemberId) -> Result<Option<Member>, Self::Error> {
        queries::get_member(&self.tx, id)
    }

    fn edge_exists(&self, subject_id: MemberId, linked_id: MemberId) -> Result<bool, Self::Error> {
        queries::edge_exists(&self.tx, subject_id, linked_id)
    }

    fn direct_linked_edges(&self, subject_id: MemberId) -> Result<Vec<FamilyEdge>, Self::Error> {
        queries::edges_of(&self.tx, subject_id, true)
    }

    fn create_edge(&mut self, edge: NewFamilyEdge) -> Result<(), Self::Error> {
        queries::insert_edge(&self.tx, &edge)
    }
}
