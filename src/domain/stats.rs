//! Aggregate and derived views over members.

use serde::{Serialize, Serializer};

use crate::domain::types::{Age, TeamName, Username};

/// Count, sum, average, maximum and minimum of member ages.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct AgeStats {
    pub count: i64,
    pub sum: i64,
    pub avg: Option<f64>,
    pub max: Option<i32>,
    pub min: Option<i32>,
}

/// Average member age within one team.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct TeamAverageAge {
    pub team_name: TeamName,
    pub avg_age: f64,
}

/// Coarse age classification of a member.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AgeBracket {
    UpToTwenty,
    TwentyOneToThirty,
    Other,
}

impl AgeBracket {
    pub fn from_age(age: Age) -> Self {
        match age.get() {
            0..=20 => AgeBracket::UpToTwenty,
            21..=30 => AgeBracket::TwentyOneToThirty,
            _ => AgeBracket::Other,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBracket::UpToTwenty => "0~20",
            AgeBracket::TwentyOneToThirty => "21~30",
            AgeBracket::Other => "other",
        }
    }
}

impl Serialize for AgeBracket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Username and age of a member together with its [`AgeBracket`].
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct MemberSummary {
    pub username: Username,
    pub age: Age,
    pub bracket: AgeBracket,
}

impl MemberSummary {
    pub fn new(username: Username, age: Age) -> Self {
        Self {
            username,
            age,
            bracket: AgeBracket::from_age(age),
        }
    }
}
