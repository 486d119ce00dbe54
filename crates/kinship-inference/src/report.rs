//! Per-run accounting of what inference created and skipped

use crate::LinkOutcome;
use kinship_domain::MemberId;
use std::collections::BTreeMap;

/// The derivation rules, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rule {
    /// Spouse's children become the subject's children
    SpouseChildren,

    /// Subject's children are inherited by the spouse
    ChildrenToSpouse,

    /// Subject's parents become grandparents of the subject's children
    ParentsAsGrandparents,

    /// Spouse's parents become grandparents of the subject's children
    SpouseParentsAsGrandparents,

    /// Children's children make the subject a grandparent
    GrandchildrenOfChildren,
}

impl Rule {
    /// Short name for logs and summaries
    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::SpouseChildren => "spouse-children",
            Rule::ChildrenToSpouse => "children-to-spouse",
            Rule::ParentsAsGrandparents => "parents-as-grandparents",
            Rule::SpouseParentsAsGrandparents => "spouse-parents-as-grandparents",
            Rule::GrandchildrenOfChildren => "grandchildren-of-children",
        }
    }
}

/// Outcome of one inference run
///
/// Tracks edges created per rule plus every kind of skipped link.
#[derive(Debug, Clone)]
pub struct InferenceReport {
    /// Member the run was for
    pub subject: MemberId,

    /// Edges created per rule
    pub created: BTreeMap<Rule, usize>,

    /// Links skipped because the pair was already linked
    pub already_linked: usize,

    /// Links skipped because one endpoint no longer exists
    pub missing_member: usize,

    /// Links skipped because both endpoints were the same member
    pub self_links: usize,
}

impl InferenceReport {
    /// Create an empty report
    pub fn new(subject: MemberId) -> Self {
        Self {
            subject,
            created: BTreeMap::new(),
            already_linked: 0,
            missing_member: 0,
            self_links: 0,
        }
    }

    /// Record the outcome of one `ensure_link` call
    pub fn record(&mut self, rule: Rule, outcome: LinkOutcome) {
        match outcome {
            LinkOutcome::Created => *self.created.entry(rule).or_insert(0) += 1,
            LinkOutcome::AlreadyLinked => self.already_linked += 1,
            LinkOutcome::MissingMember => self.missing_member += 1,
            LinkOutcome::SelfLink => self.self_links += 1,
        }
    }

    /// Edges created by one rule
    pub fn created_by(&self, rule: Rule) -> usize {
        self.created.get(&rule).copied().unwrap_or(0)
    }

    /// Edges created across all rules
    pub fn total_created(&self) -> usize {
        self.created.values().sum()
    }

    /// Links skipped for any reason
    pub fn total_skipped(&self) -> usize {
        self.already_linked + self.missing_member + self.self_links
    }

    /// True when the run changed nothing
    pub fn is_noop(&self) -> bool {
        self.total_created() == 0
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            format!("Family inference for {}", self.subject),
            format!("Edges created: {}", self.total_created()),
        ];

        for (rule, count) in &self.created {
            lines.push(format!("  {}: {}", rule.as_str(), count));
        }

        lines.push(format!("Already linked: {}", self.already_linked));
        if self.missing_member > 0 {
            lines.push(format!("Stale references skipped: {}", self.missing_member));
        }
        if self.self_links > 0 {
            lines.push(format!("Self links skipped: {}", self.self_links));
        }

        lines.join("\n")
    }
}
