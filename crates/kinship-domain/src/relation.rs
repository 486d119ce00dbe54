//! Relation labels carried by family edges

use crate::Sex;

/// Label of a directed family edge, read from the subject's point of view
///
/// `A --Father--> B` means "B is A's father". The set is closed; localized
/// display names belong to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationLabel {
    /// The linked member is the subject's father
    Father,

    /// The linked member is the subject's mother
    Mother,

    /// The linked member is the subject's spouse
    Spouse,

    /// The linked member is the subject's child (or stepchild)
    Child,

    /// The linked member is the subject's sibling
    Sibling,

    /// The linked member is one of the subject's grandparents
    Grandparent,

    /// The linked member is one of the subject's grandchildren
    Grandchild,

    /// Any other relative
    Other,
}

impl RelationLabel {
    /// Every label, in declaration order
    pub const ALL: [RelationLabel; 8] = [
        RelationLabel::Father,
        RelationLabel::Mother,
        RelationLabel::Spouse,
        RelationLabel::Child,
        RelationLabel::Sibling,
        RelationLabel::Grandparent,
        RelationLabel::Grandchild,
        RelationLabel::Other,
    ];

    /// Get the label name as stored
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationLabel::Father => "father",
            RelationLabel::Mother => "mother",
            RelationLabel::Spouse => "spouse",
            RelationLabel::Child => "child",
            RelationLabel::Sibling => "sibling",
            RelationLabel::Grandparent => "grandparent",
            RelationLabel::Grandchild => "grandchild",
            RelationLabel::Other => "other",
        }
    }

    /// Parse a label from a string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "father" => Some(RelationLabel::Father),
            "mother" => Some(RelationLabel::Mother),
            "spouse" => Some(RelationLabel::Spouse),
            "child" => Some(RelationLabel::Child),
            "sibling" => Some(RelationLabel::Sibling),
            "grandparent" => Some(RelationLabel::Grandparent),
            "grandchild" => Some(RelationLabel::Grandchild),
            "other" => Some(RelationLabel::Other),
            _ => None,
        }
    }

    /// True for Father and Mother
    pub fn is_parent(&self) -> bool {
        matches!(self, RelationLabel::Father | RelationLabel::Mother)
    }

    /// The label a child's edge should carry towards a parent of the given sex
    ///
    /// `fallback` is used when the sex is unspecified and must itself be a
    /// parent label; callers validate it up front.
    ///
    /// # Examples
    ///
    /// ```
    /// use kinship_domain::{RelationLabel, Sex};
    ///
    /// let label = RelationLabel::parent_for(Some(Sex::Female), RelationLabel::Father);
    /// assert_eq!(label, RelationLabel::Mother);
    ///
    /// let label = RelationLabel::parent_for(None, RelationLabel::Father);
    /// assert_eq!(label, RelationLabel::Father);
    /// ```
    pub fn parent_for(sex: Option<Sex>, fallback: RelationLabel) -> Self {
        debug_assert!(fallback.is_parent(), "fallback must be Father or Mother");
        match sex {
            Some(Sex::Female) => RelationLabel::Mother,
            Some(Sex::Male) => RelationLabel::Father,
            None => fallback,
        }
    }

    /// The label the linked member's edge back to the subject should carry
    ///
    /// `subject_sex` only matters when the linked member is the subject's
    /// child, where the way back is Father or Mother.
    ///
    /// # Examples
    ///
    /// ```
    /// use kinship_domain::{RelationLabel, Sex};
    ///
    /// let back = RelationLabel::Child.reciprocal(Some(Sex::Female), RelationLabel::Father);
    /// assert_eq!(back, RelationLabel::Mother);
    /// assert_eq!(RelationLabel::Grandparent.reciprocal(None, RelationLabel::Father), RelationLabel::Grandchild);
    /// ```
    pub fn reciprocal(&self, subject_sex: Option<Sex>, fallback: RelationLabel) -> Self {
        match self {
            RelationLabel::Father | RelationLabel::Mother => RelationLabel::Child,
            RelationLabel::Child => RelationLabel::parent_for(subject_sex, fallback),
            RelationLabel::Grandparent => RelationLabel::Grandchild,
            RelationLabel::Grandchild => RelationLabel::Grandparent,
            RelationLabel::Spouse => RelationLabel::Spouse,
            RelationLabel::Sibling => RelationLabel::Sibling,
            RelationLabel::Other => RelationLabel::Other,
        }
    }
}

impl std::fmt::Display for RelationLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid relation label: {}", s))
    }
}
