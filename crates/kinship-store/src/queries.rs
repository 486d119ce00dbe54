//! SQL shared by the store and its transactions
//!
//! Every function takes a plain `&Connection`; a `rusqlite::Transaction`
//! derefs to one, so the same statements serve both paths.

use crate::StoreError;
use kinship_domain::{FamilyEdge, Member, MemberId, NewFamilyEdge, RelationLabel, Sex};
use rusqlite::{ffi, params, Connection, OptionalExtension, Row};

/// Convert MemberId to bytes for storage
pub(crate) fn member_id_to_bytes(id: MemberId) -> Vec<u8> {
    id.value().to_be_bytes().to_vec()
}

/// Convert bytes to MemberId
pub(crate) fn bytes_to_member_id(bytes: &[u8]) -> Result<MemberId, StoreError> {
    if bytes.len() != 16 {
        return Err(StoreError::InvalidData(format!(
            "Expected 16 bytes for MemberId, got {}",
            bytes.len()
        )));
    }
    let mut arr = [0u8; 16];
    arr.copy_from_slice(bytes);
    Ok(MemberId::from_value(u128::from_be_bytes(arr)))
}

/// Wrap a conversion failure so it can travel through a row closure
fn conversion_error(column: usize, ty: rusqlite::types::Type, err: StoreError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, ty, Box::new(err))
}

fn read_member_id(row: &Row<'_>, column: usize) -> rusqlite::Result<MemberId> {
    let bytes: Vec<u8> = row.get(column)?;
    bytes_to_member_id(&bytes)
        .map_err(|e| conversion_error(column, rusqlite::types::Type::Blob, e))
}

fn member_from_row(row: &Row<'_>) -> rusqlite::Result<Member> {
    let sex: Option<String> = row.get(2)?;
    let sex = match sex {
        Some(s) => Some(Sex::parse(&s).ok_or_else(|| {
            conversion_error(
                2,
                rusqlite::types::Type::Text,
                StoreError::InvalidData(format!("Unknown sex: {}", s)),
            )
        })?),
        None => None,
    };

    Ok(Member {
        id: read_member_id(row, 0)?,
        name: row.get(1)?,
        sex,
    })
}

fn edge_from_row(row: &Row<'_>) -> rusqlite::Result<FamilyEdge> {
    let relation: String = row.get(1)?;
    let label = RelationLabel::parse(&relation).ok_or_else(|| {
        conversion_error(
            1,
            rusqlite::types::Type::Text,
            StoreError::InvalidData(format!("Unknown relation label: {}", relation)),
        )
    })?;

    let linked: Option<Vec<u8>> = row.get(3)?;
    let linked_member_id = match linked {
        Some(bytes) => Some(
            bytes_to_member_id(&bytes)
                .map_err(|e| conversion_error(3, rusqlite::types::Type::Blob, e))?,
        ),
        None => None,
    };

    Ok(FamilyEdge {
        subject_id: read_member_id(row, 0)?,
        label,
        related_name: row.get(2)?,
        linked_member_id,
    })
}

/// Map constraint violations to the store's own error kinds
fn constraint_error(err: rusqlite::Error, what: impl FnOnce() -> String) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                || e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            StoreError::Duplicate(what())
        }
        rusqlite::Error::SqliteFailure(e, _) if e.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
            StoreError::NotFound(what())
        }
        _ => StoreError::Database(err),
    }
}

pub(crate) fn get_member(conn: &Connection, id: MemberId) -> Result<Option<Member>, StoreError> {
    let member = conn
        .query_row(
            "SELECT id, name, sex FROM members WHERE id = ?1",
            params![member_id_to_bytes(id)],
            member_from_row,
        )
        .optional()?;
    Ok(member)
}

pub(crate) fn list_members(conn: &Connection) -> Result<Vec<Member>, StoreError> {
    let mut stmt = conn.prepare("SELECT id, name, sex FROM members ORDER BY name, id")?;
    let members = stmt
        .query_map([], member_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(members)
}

pub(crate) fn insert_member(conn: &Connection, member: &Member) -> Result<(), StoreError> {
    conn.execute(
        "INSERT INTO members (id, name, sex) VALUES (?1, ?2, ?3)",
        params![
            member_id_to_bytes(member.id),
            &member.name,
            member.sex.map(|s| s.as_str()),
        ],
    )
    .map_err(|e| constraint_error(e, || format!("member {}", member.id)))?;
    Ok(())
}

pub(crate) fn update_member(conn: &Connection, member: &Member) -> Result<(), StoreError> {
    let changed = conn.execute(
        "UPDATE members SET name = ?2, sex = ?3 WHERE id = ?1",
        params![
            member_id_to_bytes(member.id),
            &member.name,
            member.sex.map(|s| s.as_str()),
        ],
    )?;
    if changed == 0 {
        return Err(StoreError::NotFound(member.id.to_string()));
    }
    Ok(())
}

pub(crate) fn delete_member(conn: &Connection, id: MemberId) -> Result<bool, StoreError> {
    let changed = conn.execute(
        "DELETE FROM members WHERE id = ?1",
        params![member_id_to_bytes(id)],
    )?;
    Ok(changed > 0)
}

pub(crate) fn edge_exists(
    conn: &Connection,
    subject_id: MemberId,
    linked_id: MemberId,
) -> Result<bool, StoreError> {
    let exists = conn
        .query_row(
            "SELECT 1 FROM family_edges WHERE subject_id = ?1 AND linked_member_id = ?2",
            params![member_id_to_bytes(subject_id), member_id_to_bytes(linked_id)],
            |_| Ok(true),
        )
        .optional()?
        .unwrap_or(false);
    Ok(exists)
}

/// Edges of a subject in insertion order, optionally only the linked ones
pub(crate) fn edges_of(
    conn: &Connection,
    subject_id: MemberId,
    linked_only: bool,
) -> Result<Vec<FamilyEdge>, StoreError> {
    let sql = if linked_only {
        "SELECT subject_id, relation, related_name, linked_member_id
         FROM family_edges WHERE subject_id = ?1 AND linked_member_id IS NOT NULL
         ORDER BY id"
    } else {
        "SELECT subject_id, relation, related_name, linked_member_id
         FROM family_edges WHERE subject_id = ?1
         ORDER BY id"
    };

    let mut stmt = conn.prepare(sql)?;
    let edges = stmt
        .query_map(params![member_id_to_bytes(subject_id)], edge_from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(edges)
}

pub(crate) fn insert_edge(conn: &Connection, edge: &NewFamilyEdge) -> Result<(), StoreError> {
    if edge.is_self_link() {
        return Err(StoreError::SelfLink(edge.subject_id));
    }

    conn.execute(
        "INSERT INTO family_edges (subject_id, relation, related_name, linked_member_id)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            member_id_to_bytes(edge.subject_id),
            edge.label.as_str(),
            &edge.related_name,
            edge.linked_member_id.map(member_id_to_bytes),
        ],
    )
    .map_err(|e| {
        constraint_error(e, || match edge.linked_member_id {
            Some(linked) => format!("edge {} -> {}", edge.subject_id, linked),
            None => format!("member {}", edge.subject_id),
        })
    })?;
    Ok(())
}

pub(crate) fn clear_edges(conn: &Connection, subject_id: MemberId) -> Result<usize, StoreError> {
    let removed = conn.execute(
        "DELETE FROM family_edges WHERE subject_id = ?1",
        params![member_id_to_bytes(subject_id)],
    )?;
    Ok(removed)
}
