//! Family-relation inference over a member's direct edges

use crate::link::ensure_link;
use crate::{InferenceConfig, InferenceError, InferenceReport, Rule};
use kinship_domain::{FamilyEdge, FamilyStore, MemberId, RelationLabel, Sex};

/// A subject's linked edges partitioned by role
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilySnapshot {
    /// Members the subject lists as Child
    pub children: Vec<MemberId>,

    /// Members the subject lists as Father or Mother
    pub parents: Vec<MemberId>,

    /// Members the subject lists as Spouse, in insertion order
    pub spouses: Vec<MemberId>,
}

impl FamilySnapshot {
    /// Partition edges; unlinked edges and other labels are ignored
    pub fn from_edges(edges: &[FamilyEdge]) -> Self {
        let mut snapshot = Self::default();
        for edge in edges {
            let Some(linked) = edge.linked_member_id else {
                continue;
            };
            match edge.label {
                RelationLabel::Child => snapshot.children.push(linked),
                RelationLabel::Father | RelationLabel::Mother => snapshot.parents.push(linked),
                RelationLabel::Spouse => snapshot.spouses.push(linked),
                _ => {}
            }
        }
        snapshot
    }
}

/// Derives the transitive family graph after a member's direct edges change
///
/// Every derived edge goes through [`ensure_link`], so cycles in the family
/// graph cannot make it grow without bound. Once explicit edges are stored
/// together with their reciprocals (see [`RelationLabel::reciprocal`]), a
/// second run over unchanged data creates nothing.
///
/// # Examples
///
/// ```no_run
/// use kinship_domain::Sex;
/// use kinship_inference::InferenceEngine;
/// use kinship_store::SqliteStore;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// # let member_id = kinship_domain::MemberId::new();
/// let mut store = SqliteStore::new("kinship.db")?;
/// let engine = InferenceEngine::default_config();
///
/// let mut tx = store.transaction()?;
/// // ... write the member and its explicit edges through `tx` ...
/// let report = engine.infer_family_relations(member_id, Some(Sex::Female), &mut tx)?;
/// tx.commit()?;
/// println!("{}", report.summary());
/// # Ok(())
/// # }
/// ```
pub struct InferenceEngine {
    config: InferenceConfig,
    parent_fallback: RelationLabel,
}

impl InferenceEngine {
    /// Create an engine, validating the configuration
    pub fn new(config: InferenceConfig) -> Result<Self, InferenceError> {
        let parent_fallback = config.parent_fallback()?;
        Ok(Self {
            config,
            parent_fallback,
        })
    }

    /// Create an engine with default configuration
    pub fn default_config() -> Self {
        Self {
            config: InferenceConfig::default(),
            parent_fallback: RelationLabel::Father,
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Label a child's edge carries towards a parent of the given sex
    pub fn parent_label(&self, sex: Option<Sex>) -> RelationLabel {
        RelationLabel::parent_for(sex, self.parent_fallback)
    }

    /// Materialize the derived family edges around `subject_id`
    ///
    /// The subject's explicit edges must already be written through `store`,
    /// which is expected to be the same transaction as the member save. On
    /// error the caller must roll that transaction back.
    ///
    /// Rules, in order:
    /// 1. the spouse's children become the subject's children
    /// 2. the subject's children become the spouse's children
    /// 3. the subject's parents become grandparents of all its children
    /// 4. the spouse's parents become grandparents of all its children
    /// 5. the children's children become the subject's grandchildren
    ///
    /// Rules 3 to 5 use the child list re-read after rules 1 and 2.
    pub fn infer_family_relations<S>(
        &self,
        subject_id: MemberId,
        subject_sex: Option<Sex>,
        store: &mut S,
    ) -> Result<InferenceReport, InferenceError>
    where
        S: FamilyStore,
        S::Error: std::fmt::Display,
    {
        let mut report = InferenceReport::new(subject_id);
        let parent_label = self.parent_label(subject_sex);

        let edges = store
            .direct_linked_edges(subject_id)
            .map_err(InferenceError::data_access)?;
        let snapshot = FamilySnapshot::from_edges(&edges);
        let spouse = self.resolve_spouse(subject_id, &snapshot)?;

        if let Some(spouse_id) = spouse {
            self.spouse_children(store, subject_id, parent_label, spouse_id, &mut report)?;
            self.children_to_spouse(store, spouse_id, &snapshot.children, &mut report)?;
        }

        let all_children = store
            .linked_ids_where(subject_id, |label| label == RelationLabel::Child)
            .map_err(InferenceError::data_access)?;

        self.grandparents_of(
            store,
            &snapshot.parents,
            &all_children,
            Rule::ParentsAsGrandparents,
            &mut report,
        )?;

        if let Some(spouse_id) = spouse {
            let spouse_parents = store
                .linked_ids_where(spouse_id, |label| label.is_parent())
                .map_err(InferenceError::data_access)?;
            self.grandparents_of(
                store,
                &spouse_parents,
                &all_children,
                Rule::SpouseParentsAsGrandparents,
                &mut report,
            )?;
        }

        self.grandchildren_of_children(store, subject_id, &all_children, &mut report)?;

        tracing::info!(
            subject = %subject_id,
            created = report.total_created(),
            skipped = report.total_skipped(),
            "family inference complete"
        );

        Ok(report)
    }

    /// Pick the spouse to derive through
    fn resolve_spouse(
        &self,
        subject_id: MemberId,
        snapshot: &FamilySnapshot,
    ) -> Result<Option<MemberId>, InferenceError> {
        let count = snapshot.spouses.len();
        if count > 1 {
            if self.config.strict_single_spouse {
                return Err(InferenceError::MultipleSpouses {
                    subject: subject_id,
                    count,
                });
            }
            tracing::warn!(
                subject = %subject_id,
                count,
                "member has several spouse edges, using the first"
            );
        }
        Ok(snapshot.spouses.first().copied())
    }

    /// Rule 1: the spouse's children become the subject's children
    fn spouse_children<S>(
        &self,
        store: &mut S,
        subject_id: MemberId,
        parent_label: RelationLabel,
        spouse_id: MemberId,
        report: &mut InferenceReport,
    ) -> Result<(), InferenceError>
    where
        S: FamilyStore,
        S::Error: std::fmt::Display,
    {
        let spouse_children = store
            .linked_ids_where(spouse_id, |label| label == RelationLabel::Child)
            .map_err(InferenceError::data_access)?;

        for child in spouse_children {
            link_both_ways(
                store,
                Rule::SpouseChildren,
                report,
                (subject_id, RelationLabel::Child),
                (child, parent_label),
            )?;
        }
        Ok(())
    }

    /// Rule 2: the subject's children become the spouse's children
    fn children_to_spouse<S>(
        &self,
        store: &mut S,
        spouse_id: MemberId,
        children: &[MemberId],
        report: &mut InferenceReport,
    ) -> Result<(), InferenceError>
    where
        S: FamilyStore,
        S::Error: std::fmt::Display,
    {
        let spouse_sex = store
            .get_member(spouse_id)
            .map_err(InferenceError::data_access)?
            .and_then(|spouse| spouse.sex);
        let spouse_parent_label = self.parent_label(spouse_sex);

        for &child in children {
            link_both_ways(
                store,
                Rule::ChildrenToSpouse,
                report,
                (spouse_id, RelationLabel::Child),
                (child, spouse_parent_label),
            )?;
        }
        Ok(())
    }

    /// Rules 3 and 4: every given ancestor becomes grandparent of every child
    fn grandparents_of<S>(
        &self,
        store: &mut S,
        grandparents: &[MemberId],
        children: &[MemberId],
        rule: Rule,
        report: &mut InferenceReport,
    ) -> Result<(), InferenceError>
    where
        S: FamilyStore,
        S::Error: std::fmt::Display,
    {
        for &grandparent in grandparents {
            for &child in children {
                link_both_ways(
                    store,
                    rule,
                    report,
                    (grandparent, RelationLabel::Grandparent),
                    (child, RelationLabel::Grandchild),
                )?;
            }
        }
        Ok(())
    }

    /// Rule 5: the children's children become the subject's grandchildren
    fn grandchildren_of_children<S>(
        &self,
        store: &mut S,
        subject_id: MemberId,
        children: &[MemberId],
        report: &mut InferenceReport,
    ) -> Result<(), InferenceError>
    where
        S: FamilyStore,
        S::Error: std::fmt::Display,
    {
        for &child in children {
            let grandchildren = store
                .linked_ids_where(child, |label| label == RelationLabel::Child)
                .map_err(InferenceError::data_access)?;

            for grandchild in grandchildren {
                link_both_ways(
                    store,
                    Rule::GrandchildrenOfChildren,
                    report,
                    (subject_id, RelationLabel::Grandparent),
                    (grandchild, RelationLabel::Grandchild),
                )?;
            }
        }
        Ok(())
    }
}

/// `a --a_label--> b` followed by `b --b_label--> a`
fn link_both_ways<S>(
    store: &mut S,
    rule: Rule,
    report: &mut InferenceReport,
    (a, a_label): (MemberId, RelationLabel),
    (b, b_label): (MemberId, RelationLabel),
) -> Result<(), InferenceError>
where
    S: FamilyStore,
    S::Error: std::fmt::Display,
{
    report.record(rule, ensure_link(store, a, a_label, b)?);
    report.record(rule, ensure_link(store, b, b_label, a)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockStore;

    #[test]
    fn test_engine_creation() {
        let engine = InferenceEngine::default_config();
        assert!(!engine.config().strict_single_spouse);
        assert_eq!(engine.parent_label(None), RelationLabel::Father);
        assert_eq!(engine.parent_label(Some(Sex::Female)), RelationLabel::Mother);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = InferenceConfig {
            unspecified_sex_parent_label: "sibling".to_string(),
            ..Default::default()
        };
        assert!(matches!(InferenceEngine::new(config), Err(InferenceError::Config(_))));
    }

    #[test]
    fn test_snapshot_partition() {
        let subject = MemberId::new();
        let (c, f, m, s) = (MemberId::new(), MemberId::new(), MemberId::new(), MemberId::new());
        let edge = |label, linked: Option<MemberId>| FamilyEdge {
            subject_id: subject,
            label,
            related_name: String::new(),
            linked_member_id: linked,
        };
        let edges = vec![
            edge(RelationLabel::Child, Some(c)),
            edge(RelationLabel::Father, Some(f)),
            edge(RelationLabel::Mother, Some(m)),
            edge(RelationLabel::Spouse, Some(s)),
            edge(RelationLabel::Sibling, Some(MemberId::new())),
            edge(RelationLabel::Child, None),
        ];

        let snapshot = FamilySnapshot::from_edges(&edges);
        assert_eq!(snapshot.children, vec![c]);
        assert_eq!(snapshot.parents, vec![f, m]);
        assert_eq!(snapshot.spouses, vec![s]);
    }

    #[test]
    fn test_spouse_inherits_children() {
        // A (male) has child C, then marries B (female)
        let mut store = MockStore::new();
        let a = store.add_member("Antônio", Some(Sex::Male));
        let b = store.add_member("Beatriz", Some(Sex::Female));
        let c = store.add_member("Clara", None);
        store.link(a, RelationLabel::Child, c);
        store.link(c, RelationLabel::Father, a);
        store.link(a, RelationLabel::Spouse, b);

        let engine = InferenceEngine::default_config();
        let report = engine.infer_family_relations(a, Some(Sex::Male), &mut store).unwrap();

        assert_eq!(store.label_between(b, c), Some(RelationLabel::Child));
        assert_eq!(store.label_between(c, b), Some(RelationLabel::Mother));
        assert_eq!(store.label_between(c, a), Some(RelationLabel::Father));
        assert_eq!(report.created_by(Rule::ChildrenToSpouse), 2);
    }

    #[test]
    fn test_subject_adopts_spouse_children() {
        // B (female) already has child C; A (male) lists B as spouse
        let mut store = MockStore::new();
        let a = store.add_member("Antônio", Some(Sex::Male));
        let b = store.add_member("Beatriz", Some(Sex::Female));
        let c = store.add_member("Clara", None);
        store.link(b, RelationLabel::Child, c);
        store.link(a, RelationLabel::Spouse, b);

        let engine = InferenceEngine::default_config();
        let report = engine.infer_family_relations(a, Some(Sex::Male), &mut store).unwrap();

        assert_eq!(store.label_between(a, c), Some(RelationLabel::Child));
        assert_eq!(store.label_between(c, a), Some(RelationLabel::Father));
        assert_eq!(report.created_by(Rule::SpouseChildren), 2);
    }

    #[test]
    fn test_female_subject_gets_mother_label() {
        let mut store = MockStore::new();
        let a = store.add_member("Ana", Some(Sex::Female));
        let b = store.add_member("Bruno", Some(Sex::Male));
        let c = store.add_member("Caio", None);
        store.link(b, RelationLabel::Child, c);
        store.link(a, RelationLabel::Spouse, b);

        InferenceEngine::default_config()
            .infer_family_relations(a, Some(Sex::Female), &mut store)
            .unwrap();

        assert_eq!(store.label_between(c, a), Some(RelationLabel::Mother));
    }

    #[test]
    fn test_unspecified_sex_uses_configured_fallback() {
        let mut store = MockStore::new();
        let a = store.add_member("Alex", None);
        let b = store.add_member("Bruno", Some(Sex::Male));
        let c = store.add_member("Caio", None);
        store.link(b, RelationLabel::Child, c);
        store.link(a, RelationLabel::Spouse, b);

        let engine = InferenceEngine::new(InferenceConfig {
            unspecified_sex_parent_label: "mother".to_string(),
            ..Default::default()
        })
        .unwrap();
        engine.infer_family_relations(a, None, &mut store).unwrap();

        assert_eq!(store.label_between(c, a), Some(RelationLabel::Mother));
    }

    #[test]
    fn test_parents_become_grandparents() {
        // A lists G as father and C as child
        let mut store = MockStore::new();
        let a = store.add_member("Ana", Some(Sex::Female));
        let g = store.add_member("Geraldo", Some(Sex::Male));
        let c = store.add_member("Caio", None);
        store.link(a, RelationLabel::Father, g);
        store.link(a, RelationLabel::Child, c);

        let report = InferenceEngine::default_config()
            .infer_family_relations(a, Some(Sex::Female), &mut store)
            .unwrap();

        assert_eq!(store.label_between(g, c), Some(RelationLabel::Grandparent));
        assert_eq!(store.label_between(c, g), Some(RelationLabel::Grandchild));
        assert_eq!(report.created_by(Rule::ParentsAsGrandparents), 2);
    }

    #[test]
    fn test_parents_reach_children_inherited_from_spouse() {
        let mut store = MockStore::new();
        let a = store.add_member("Ana", Some(Sex::Female));
        let b = store.add_member("Bruno", Some(Sex::Male));
        let g = store.add_member("Glória", Some(Sex::Female));
        let c = store.add_member("Caio", None);
        store.link(a, RelationLabel::Mother, g);
        store.link(a, RelationLabel::Spouse, b);
        store.link(b, RelationLabel::Child, c);

        InferenceEngine::default_config()
            .infer_family_relations(a, Some(Sex::Female), &mut store)
            .unwrap();

        assert_eq!(store.label_between(g, c), Some(RelationLabel::Grandparent));
        assert_eq!(store.label_between(c, g), Some(RelationLabel::Grandchild));
    }

    #[test]
    fn test_spouse_parents_become_grandparents() {
        let mut store = MockStore::new();
        let a = store.add_member("Ana", Some(Sex::Female));
        let b = store.add_member("Bruno", Some(Sex::Male));
        let h = store.add_member("Hélio", Some(Sex::Male));
        let c = store.add_member("Caio", None);
        store.link(a, RelationLabel::Spouse, b);
        store.link(a, RelationLabel::Child, c);
        store.link(b, RelationLabel::Father, h);

        let report = InferenceEngine::default_config()
            .infer_family_relations(a, Some(Sex::Female), &mut store)
            .unwrap();

        assert_eq!(store.label_between(h, c), Some(RelationLabel::Grandparent));
        assert_eq!(store.label_between(c, h), Some(RelationLabel::Grandchild));
        assert_eq!(report.created_by(Rule::SpouseParentsAsGrandparents), 2);
    }

    #[test]
    fn test_grandchildren_discovered_through_children() {
        // A has child C; C already has child N
        let mut store = MockStore::new();
        let a = store.add_member("Ana", Some(Sex::Female));
        let c = store.add_member("Caio", Some(Sex::Male));
        let n = store.add_member("Nina", None);
        store.link(a, RelationLabel::Child, c);
        store.link(c, RelationLabel::Child, n);

        let report = InferenceEngine::default_config()
            .infer_family_relations(a, Some(Sex::Female), &mut store)
            .unwrap();

        assert_eq!(store.label_between(a, n), Some(RelationLabel::Grandparent));
        assert_eq!(store.label_between(n, a), Some(RelationLabel::Grandchild));
        assert_eq!(report.created_by(Rule::GrandchildrenOfChildren), 2);
    }

    #[test]
    fn test_second_run_is_noop() {
        let mut store = MockStore::new();
        let a = store.add_member("Ana", Some(Sex::Female));
        let b = store.add_member("Bruno", Some(Sex::Male));
        let g = store.add_member("Glória", Some(Sex::Female));
        let c = store.add_member("Caio", None);
        let n = store.add_member("Nina", None);
        store.link(a, RelationLabel::Mother, g);
        store.link(a, RelationLabel::Spouse, b);
        store.link(a, RelationLabel::Child, c);
        store.link(c, RelationLabel::Child, n);
        // reciprocals, as written alongside explicit edges
        store.link(g, RelationLabel::Child, a);
        store.link(b, RelationLabel::Spouse, a);
        store.link(c, RelationLabel::Mother, a);
        store.link(n, RelationLabel::Father, c);

        let engine = InferenceEngine::default_config();
        let first = engine.infer_family_relations(a, Some(Sex::Female), &mut store).unwrap();
        assert!(!first.is_noop());
        let edges_after_first = store.edge_count();

        let second = engine.infer_family_relations(a, Some(Sex::Female), &mut store).unwrap();
        assert!(second.is_noop());
        assert_eq!(store.edge_count(), edges_after_first);
    }

    #[test]
    fn test_existing_edge_keeps_its_label() {
        // C already calls B "Other"; inheritance must not relabel it
        let mut store = MockStore::new();
        let a = store.add_member("Antônio", Some(Sex::Male));
        let b = store.add_member("Beatriz", Some(Sex::Female));
        let c = store.add_member("Clara", None);
        store.link(a, RelationLabel::Child, c);
        store.link(a, RelationLabel::Spouse, b);
        store.link(c, RelationLabel::Other, b);

        let report = InferenceEngine::default_config()
            .infer_family_relations(a, Some(Sex::Male), &mut store)
            .unwrap();

        assert_eq!(store.label_between(c, b), Some(RelationLabel::Other));
        assert_eq!(store.label_between(b, c), Some(RelationLabel::Child));
        assert!(report.already_linked >= 1);
    }

    #[test]
    fn test_stale_child_does_not_abort_run() {
        let mut store = MockStore::new();
        let a = store.add_member("Ana", Some(Sex::Female));
        let g = store.add_member("Glória", Some(Sex::Female));
        let gone = store.add_member("Gone", None);
        let c = store.add_member("Caio", None);
        store.link(a, RelationLabel::Mother, g);
        store.link(a, RelationLabel::Child, gone);
        store.link(a, RelationLabel::Child, c);
        store.remove_member(gone);

        let report = InferenceEngine::default_config()
            .infer_family_relations(a, Some(Sex::Female), &mut store)
            .unwrap();

        assert!(store.label_between(g, gone).is_none());
        assert!(store.edges_of(gone).is_empty());
        assert_eq!(store.label_between(g, c), Some(RelationLabel::Grandparent));
        assert!(report.missing_member >= 2);
    }

    #[test]
    fn test_stale_spouse_is_skipped() {
        let mut store = MockStore::new();
        let a = store.add_member("Ana", Some(Sex::Female));
        let b = store.add_member("Bruno", Some(Sex::Male));
        let c = store.add_member("Caio", None);
        store.link(a, RelationLabel::Spouse, b);
        store.link(a, RelationLabel::Child, c);
        store.remove_member(b);

        let report = InferenceEngine::default_config()
            .infer_family_relations(a, Some(Sex::Female), &mut store)
            .unwrap();

        assert!(store.edges_of(b).is_empty());
        assert!(store.label_between(c, b).is_none());
        assert_eq!(report.missing_member, 2);
    }

    #[test]
    fn test_multiple_spouses_uses_first() {
        let mut store = MockStore::new();
        let a = store.add_member("Antônio", Some(Sex::Male));
        let b1 = store.add_member("Beatriz", Some(Sex::Female));
        let b2 = store.add_member("Bianca", Some(Sex::Female));
        let c = store.add_member("Clara", None);
        store.link(a, RelationLabel::Spouse, b1);
        store.link(a, RelationLabel::Spouse, b2);
        store.link(a, RelationLabel::Child, c);

        InferenceEngine::default_config()
            .infer_family_relations(a, Some(Sex::Male), &mut store)
            .unwrap();

        assert_eq!(store.label_between(b1, c), Some(RelationLabel::Child));
        assert!(store.label_between(b2, c).is_none());
    }

    #[test]
    fn test_multiple_spouses_strict() {
        let mut store = MockStore::new();
        let a = store.add_member("Antônio", Some(Sex::Male));
        let b1 = store.add_member("Beatriz", Some(Sex::Female));
        let b2 = store.add_member("Bianca", Some(Sex::Female));
        store.link(a, RelationLabel::Spouse, b1);
        store.link(a, RelationLabel::Spouse, b2);

        let engine = InferenceEngine::new(InferenceConfig::strict()).unwrap();
        let result = engine.infer_family_relations(a, Some(Sex::Male), &mut store);
        assert!(matches!(
            result,
            Err(InferenceError::MultipleSpouses { count: 2, .. })
        ));
        assert_eq!(store.edge_count(), 2);
    }

    #[test]
    fn test_unlinked_relatives_ignored() {
        let mut store = MockStore::new();
        let a = store.add_member("Ana", Some(Sex::Female));
        let c = store.add_member("Caio", None);
        store.link(a, RelationLabel::Child, c);
        store
            .create_edge(kinship_domain::NewFamilyEdge::unlinked(a, RelationLabel::Father, "Seu Jorge"))
            .unwrap();

        let report = InferenceEngine::default_config()
            .infer_family_relations(a, Some(Sex::Female), &mut store)
            .unwrap();

        assert!(report.is_noop());
        assert_eq!(store.edges_of(c).len(), 0);
    }

    #[test]
    fn test_store_failure_propagates() {
        let mut store = MockStore::new();
        let a = store.add_member("Ana", Some(Sex::Female));
        let g = store.add_member("Glória", Some(Sex::Female));
        let c = store.add_member("Caio", None);
        store.link(a, RelationLabel::Mother, g);
        store.link(a, RelationLabel::Child, c);
        store.fail_writes();

        let result = InferenceEngine::default_config().infer_family_relations(a, Some(Sex::Female), &mut store);
        assert!(matches!(result, Err(InferenceError::DataAccess(_))));
    }

    #[test]
    fn test_no_self_edges_in_cyclic_family() {
        // B lists A as a child while A lists B as spouse
        let mut store = MockStore::new();
        let a = store.add_member("Ana", Some(Sex::Female));
        let b = store.add_member("Bruno", Some(Sex::Male));
        store.link(a, RelationLabel::Spouse, b);
        store.link(b, RelationLabel::Child, a);

        let report = InferenceEngine::default_config()
            .infer_family_relations(a, Some(Sex::Female), &mut store)
            .unwrap();

        assert!(report.self_links >= 2);
        assert!(store
            .all_edges()
            .iter()
            .all(|e| e.linked_member_id != Some(e.subject_id)));
    }
}
