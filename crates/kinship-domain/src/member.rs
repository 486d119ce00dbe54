//! Member module - the registered people that family edges point at

use std::fmt;

/// Unique identifier for a registered member based on UUIDv7
///
/// Generated without coordination, so the CRUD layer can mint ids before
/// the member row exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(u128);

impl MemberId {
    /// Generate a new UUIDv7-based MemberId
    ///
    /// # Examples
    ///
    /// ```
    /// use kinship_domain::MemberId;
    ///
    /// let id = MemberId::new();
    /// assert!(id.value() > 0);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().as_u128())
    }

    /// Create a MemberId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a MemberId from its hyphenated UUID string
    ///
    /// # Examples
    ///
    /// ```
    /// use kinship_domain::MemberId;
    ///
    /// let id = MemberId::new();
    /// let parsed = MemberId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid member id '{}': {}", s, e))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl std::str::FromStr for MemberId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// Recorded sex of a member
///
/// Members may leave this unspecified, so it is carried as `Option<Sex>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    /// Male
    Male,

    /// Female
    Female,
}

impl Sex {
    /// Storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Parse a sex marker (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Sex::Male),
            "female" | "f" => Some(Sex::Female),
            _ => None,
        }
    }
}

impl std::str::FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid sex: {}", s))
    }
}

/// A registered member
///
/// The member lifecycle belongs to the CRUD layer; family inference only
/// reads the name (for denormalized edge labels) and the sex (to pick
/// Father or Mother).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Unique identifier
    pub id: MemberId,

    /// Display name
    pub name: String,

    /// Sex, if recorded
    pub sex: Option<Sex>,
}

impl Member {
    /// Create a member with a freshly generated id
    pub fn new(name: impl Into<String>, sex: Option<Sex>) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
            sex,
        }
    }
}
