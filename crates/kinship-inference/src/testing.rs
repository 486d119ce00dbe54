//! In-memory store used by the unit tests

use kinship_domain::{FamilyEdge, FamilyStore, Member, MemberId, NewFamilyEdge, RelationLabel, Sex};
use std::collections::HashMap;

/// Mock store enforcing the same pair and self-link invariants as SQLite
pub(crate) struct MockStore {
    members: HashMap<MemberId, Member>,
    edges: Vec<FamilyEdge>,
    fail_writes: bool,
}

impl MockStore {
    pub(crate) fn new() -> Self {
        Self {
            members: HashMap::new(),
            edges: Vec::new(),
            fail_writes: false,
        }
    }

    pub(crate) fn add_member(&mut self, name: &str, sex: Option<Sex>) -> MemberId {
        let member = Member::new(name, sex);
        let id = member.id;
        self.members.insert(id, member);
        id
    }

    pub(crate) fn remove_member(&mut self, id: MemberId) {
        self.members.remove(&id);
        self.edges.retain(|e| e.subject_id != id);
    }

    /// Explicit edge, as the CRUD layer would write it
    pub(crate) fn link(&mut self, subject: MemberId, label: RelationLabel, linked: MemberId) {
        let name = self.members[&linked].name.clone();
        self.create_edge(NewFamilyEdge::linked(subject, label, name, linked))
            .expect("explicit edge");
    }

    pub(crate) fn fail_writes(&mut self) {
        self.fail_writes = true;
    }

    pub(crate) fn edges_of(&self, subject: MemberId) -> Vec<FamilyEdge> {
        self.edges.iter().filter(|e| e.subject_id == subject).cloned().collect()
    }

    pub(crate) fn label_between(&self, subject: MemberId, linked: MemberId) -> Option<RelationLabel> {
        self.edges
            .iter()
            .find(|e| e.subject_id == subject && e.linked_member_id == Some(linked))
            .map(|e| e.label)
    }

    pub(crate) fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn all_edges(&self) -> &[FamilyEdge] {
        &self.edges
    }
}

impl FamilyStore for MockStore {
    type Error = String;

    fn get_member(&self, id: MemberId) -> Result<Option<Member>, Self::Error> {
        Ok(self.members.get(&id).cloned())
    }

    fn edge_exists(&self, subject_id: MemberId, linked_id: MemberId) -> Result<bool, Self::Error> {
        Ok(self.label_between(subject_id, linked_id).is_some())
    }

    fn direct_linked_edges(&self, subject_id: MemberId) -> Result<Vec<FamilyEdge>, Self::Error> {
        Ok(self
            .edges
            .iter()
            .filter(|e| e.subject_id == subject_id && e.is_linked())
            .cloned()
            .collect())
    }

    fn create_edge(&mut self, edge: NewFamilyEdge) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err("disk I/O error".to_string());
        }
        if edge.is_self_link() {
            return Err(format!("self link on {}", edge.subject_id));
        }
        if let Some(linked) = edge.linked_member_id {
            if self.label_between(edge.subject_id, linked).is_some() {
                return Err(format!("duplicate edge {} -> {}", edge.subject_id, linked));
            }
        }
        self.edges.push(edge.into());
        Ok(())
    }
}
