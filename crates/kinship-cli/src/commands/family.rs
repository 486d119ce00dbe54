//! Family command implementation.
//!
//! Every write runs the explicit edges and the inference pass inside one
//! transaction, so a failed inference leaves the store untouched.

use crate::cli::{FamilyAction, FamilyArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use kinship_domain::{FamilyStore, Member, MemberId, NewFamilyEdge, RelationLabel};
use kinship_inference::{InferenceEngine, InferenceReport};
use kinship_store::{FamilyTransaction, SqliteStore};

/// Execute a family command.
pub fn execute_family(
    args: FamilyArgs,
    store: &mut SqliteStore,
    engine: &InferenceEngine,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        FamilyAction::Link { subject, label, linked } => {
            let report = link_members(store, engine, subject, label.into(), linked)?;
            println!("{}", formatter.format_report(&report)?);
        }
        FamilyAction::Relative { subject, label, name } => {
            add_relative(store, subject, label.into(), &name)?;
            println!("{}", formatter.success(&format!("Relative recorded: {}", name.trim())));
        }
        FamilyAction::Show { id } => {
            if store.get_member(id)?.is_none() {
                return Err(CliError::MemberNotFound(id));
            }
            let edges = store.family_of(id)?;
            println!("{}", formatter.format_edges(&edges)?);
        }
        FamilyAction::Infer { id } => {
            let report = rerun_inference(store, engine, id)?;
            println!("{}", formatter.format_report(&report)?);
        }
        FamilyAction::Clear { id } => {
            let removed = clear_family(store, id)?;
            println!("{}", formatter.bulk_result("Removed", removed));
        }
    }

    Ok(())
}

/// Link `subject` to `linked` under `label`, write the reciprocal edge when
/// the linked member has none yet, then infer from the subject.
pub fn link_members(
    store: &mut SqliteStore,
    engine: &InferenceEngine,
    subject_id: MemberId,
    label: RelationLabel,
    linked_id: MemberId,
) -> Result<InferenceReport> {
    if subject_id == linked_id {
        return Err(CliError::InvalidInput("A member cannot be linked to itself".into()));
    }

    let mut tx = store.transaction()?;
    let subject = require_member(&tx, subject_id)?;
    let linked = require_member(&tx, linked_id)?;

    tx.add_edge(NewFamilyEdge::linked(subject.id, label, linked.name.clone(), linked.id))?;

    if !tx.edge_exists(linked.id, subject.id)? {
        let back = label.reciprocal(subject.sex, engine.parent_label(None));
        tx.add_edge(NewFamilyEdge::linked(linked.id, back, subject.name.clone(), subject.id))?;
    }

    let report = engine.infer_family_relations(subject.id, subject.sex, &mut tx)?;
    tx.commit()?;

    tracing::debug!(subject = %subject.id, linked = %linked.id, label = %label, "members linked");
    Ok(report)
}

/// Record a relative who is not a registered member.
pub fn add_relative(store: &mut SqliteStore, subject_id: MemberId, label: RelationLabel, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidInput("Relative name cannot be empty".into()));
    }

    let tx = store.transaction()?;
    require_member(&tx, subject_id)?;
    tx.add_edge(NewFamilyEdge::unlinked(subject_id, label, name))?;
    tx.commit()?;
    Ok(())
}

/// Run inference for a member over its current edges.
pub fn rerun_inference(store: &mut SqliteStore, engine: &InferenceEngine, id: MemberId) -> Result<InferenceReport> {
    let mut tx = store.transaction()?;
    let member = require_member(&tx, id)?;
    let report = engine.infer_family_relations(member.id, member.sex, &mut tx)?;
    tx.commit()?;
    Ok(report)
}

/// Remove every edge a member owns.
pub fn clear_family(store: &mut SqliteStore, id: MemberId) -> Result<usize> {
    let tx = store.transaction()?;
    require_member(&tx, id)?;
    let removed = tx.clear_edges(id)?;
    tx.commit()?;
    Ok(removed)
}

fn require_member(tx: &FamilyTransaction<'_>, id: MemberId) -> Result<Member> {
    tx.get_member(id)?.ok_or(CliError::MemberNotFound(id))
}
