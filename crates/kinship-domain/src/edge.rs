//! Family edge module - directed, labeled links between members
//!
//! Edges are not symmetric in storage: a marriage is two edges, `A -> B`
//! and `B -> A`, each created on its own. At most one edge exists per
//! ordered `(subject, linked member)` pair, whatever its label.

use crate::{MemberId, RelationLabel};

/// A stored family edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyEdge {
    /// Member whose family list this edge appears in
    pub subject_id: MemberId,

    /// Relation of the other party to the subject
    pub label: RelationLabel,

    /// Display name of the other party, copied when the edge was created
    pub related_name: String,

    /// The other party, when they are themselves a registered member
    ///
    /// Unlinked (free-text) relatives are invisible to inference.
    pub linked_member_id: Option<MemberId>,
}

impl FamilyEdge {
    /// True when the other party is a registered member
    pub fn is_linked(&self) -> bool {
        self.linked_member_id.is_some()
    }
}

/// Request to insert one edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFamilyEdge {
    /// Owning member
    pub subject_id: MemberId,

    /// Relation label
    pub label: RelationLabel,

    /// Display name of the other party
    pub related_name: String,

    /// Linked member, if registered
    pub linked_member_id: Option<MemberId>,
}

impl NewFamilyEdge {
    /// Edge towards another registered member
    pub fn linked(
        subject_id: MemberId,
        label: RelationLabel,
        related_name: impl Into<String>,
        linked_member_id: MemberId,
    ) -> Self {
        Self {
            subject_id,
            label,
            related_name: related_name.into(),
            linked_member_id: Some(linked_member_id),
        }
    }

    /// Edge towards a relative who is not a registered member
    pub fn unlinked(
        subject_id: MemberId,
        label: RelationLabel,
        related_name: impl Into<String>,
    ) -> Self {
        Self {
            subject_id,
            label,
            related_name: related_name.into(),
            linked_member_id: None,
        }
    }

    /// True when the edge would point the subject at itself
    pub fn is_self_link(&self) -> bool {
        self.linked_member_id == Some(self.subject_id)
    }
}

impl From<NewFamilyEdge> for FamilyEdge {
    fn from(edge: NewFamilyEdge) -> Self {
        Self {
            subject_id: edge.subject_id,
            label: edge.label,
            related_name: edge.related_name,
            linked_member_id: edge.linked_member_id,
        }
    }
}
