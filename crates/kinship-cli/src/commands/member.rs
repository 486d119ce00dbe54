//! Member command implementation.

use crate::cli::{MemberAction, MemberArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use kinship_domain::{Member, MemberId, Sex};
use kinship_store::SqliteStore;

/// Execute a member command.
pub fn execute_member(args: MemberArgs, store: &mut SqliteStore, formatter: &Formatter) -> Result<()> {
    match args.action {
        MemberAction::Add { name, sex } => {
            let id = add_member(store, &name, sex.map(Into::into))?;
            println!("{}", formatter.member_added(&id));
        }
        MemberAction::List => {
            let members = store.list_members()?;
            println!("{}", formatter.format_members(&members)?);
        }
        MemberAction::Show { id } => {
            let member = store.get_member(id)?.ok_or(CliError::MemberNotFound(id))?;
            println!("{}", formatter.format_member(&member)?);
        }
        MemberAction::Remove { id } => {
            remove_member(store, id)?;
            println!("{}", formatter.success(&format!("Member removed: {}", id)));
        }
    }

    Ok(())
}

/// Register a new member.
pub fn add_member(store: &mut SqliteStore, name: &str, sex: Option<Sex>) -> Result<MemberId> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CliError::InvalidInput("Member name cannot be empty".into()));
    }

    let member = Member::new(name, sex);
    let tx = store.transaction()?;
    let id = tx.insert_member(&member)?;
    tx.commit()?;

    tracing::info!(member = %id, "member added");
    Ok(id)
}

/// Delete a member together with the edges it owns.
///
/// Edges of other members that point at it are left in place and become
/// stale references.
pub fn remove_member(store: &mut SqliteStore, id: MemberId) -> Result<()> {
    let tx = store.transaction()?;
    if !tx.delete_member(id)? {
        return Err(CliError::MemberNotFound(id));
    }
    tx.commit()?;

    tracing::info!(member = %id, "member removed");
    Ok(())
}
