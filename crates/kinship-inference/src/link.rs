//! The idempotent edge-creation primitive every rule goes through

use crate::InferenceError;
use kinship_domain::{FamilyStore, MemberId, NewFamilyEdge, RelationLabel};

/// What `ensure_link` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A new edge was written
    Created,

    /// An edge for the pair already existed and was left untouched
    AlreadyLinked,

    /// Subject and linked member were the same
    SelfLink,

    /// One of the two members no longer exists
    MissingMember,
}

/// Create `subject -> linked` with `label` unless the pair is already linked
///
/// First writer wins: an existing edge is never relabeled, whatever its
/// label. A member that has disappeared (stale reference) is skipped
/// silently; only store failures are errors.
pub fn ensure_link<S>(
    store: &mut S,
    subject_id: MemberId,
    label: RelationLabel,
    linked_id: MemberId,
) -> Result<LinkOutcome, InferenceError>
where
    S: FamilyStore,
    S::Error: std::fmt::Display,
{
    if subject_id == linked_id {
        return Ok(LinkOutcome::SelfLink);
    }

    if store
        .edge_exists(subject_id, linked_id)
        .map_err(InferenceError::data_access)?
    {
        return Ok(LinkOutcome::AlreadyLinked);
    }

    let Some(related_name) = store
        .member_name(linked_id)
        .map_err(InferenceError::data_access)?
    else {
        tracing::debug!(subject = %subject_id, linked = %linked_id, "linked member gone, skipping");
        return Ok(LinkOutcome::MissingMember);
    };

    if store
        .get_member(subject_id)
        .map_err(InferenceError::data_access)?
        .is_none()
    {
        tracing::debug!(subject = %subject_id, linked = %linked_id, "subject gone, skipping");
        return Ok(LinkOutcome::MissingMember);
    }

    store
        .create_edge(NewFamilyEdge::linked(subject_id, label, related_name, linked_id))
        .map_err(InferenceError::data_access)?;

    tracing::debug!(subject = %subject_id, %label, linked = %linked_id, "derived edge created");
    Ok(LinkOutcome::Created)
}
