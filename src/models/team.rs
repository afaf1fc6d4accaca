//! Team: immutable participant record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A bracket team. Rank 1 is the strongest seed.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    /// Seed: positive integer, lower is stronger.
    pub rank: u32,
    /// Display hint only; never affects simulation or identity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Team {
    pub fn new(name: impl Into<String>, rank: u32) -> Self {
        Self {
            name: name.into(),
            rank,
            color: None,
        }
    }

    pub fn with_color(name: impl Into<String>, rank: u32, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rank,
            color: Some(color.into()),
        }
    }
}

/// Identity is (name, rank); color is presentation only.
impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.rank == other.rank
    }
}

impl Eq for Team {}

impl Hash for Team {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.rank.hash(state);
    }
}

/// Formatted as `#<rank> <name>`, the canonical key form.
impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.rank, self.name)
    }
}
