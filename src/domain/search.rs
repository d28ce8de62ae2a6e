//! Search conditions and the conjunctive predicate built from them.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::types::{Age, MemberId, TeamId, TeamName, Username};

/// Optional filters for a member search. Absent fields impose no constraint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MemberSearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    #[validate(range(min = 0))]
    pub age_goe: Option<i32>,
    #[validate(range(min = 0))]
    pub age_loe: Option<i32>,
}

impl MemberSearchCondition {
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }
}

/// A single filter over the `members LEFT JOIN teams` relation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MemberCriterion {
    UsernameEq(String),
    TeamNameEq(String),
    AgeEq(i32),
    /// `age >= n`
    AgeGoe(i32),
    /// `age <= n`
    AgeLoe(i32),
    /// Inclusive on both ends.
    AgeBetween(i32, i32),
}

/// Logical AND of zero or more [`MemberCriterion`] values.
///
/// An empty predicate matches every row. Criteria keep their insertion
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemberPredicate {
    criteria: Vec<MemberCriterion>,
}

impl MemberPredicate {
    /// Predicate that matches every row.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn and(mut self, criterion: MemberCriterion) -> Self {
        self.criteria.push(criterion);
        self
    }

    /// Appends `criterion` only when it is present.
    pub fn and_some(self, criterion: Option<MemberCriterion>) -> Self {
        match criterion {
            Some(criterion) => self.and(criterion),
            None => self,
        }
    }

    pub fn criteria(&self) -> &[MemberCriterion] {
        &self.criteria
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }
}

/// Returns the string when it contains at least one non-whitespace character.
fn has_text(value: &Option<String>) -> Option<&String> {
    value
        .as_ref()
        .filter(|s| s.chars().any(|c| !c.is_whitespace()))
}

impl From<&MemberSearchCondition> for MemberPredicate {
    fn from(condition: &MemberSearchCondition) -> Self {
        MemberPredicate::all()
            .and_some(has_text(&condition.username).cloned().map(MemberCriterion::UsernameEq))
            .and_some(has_text(&condition.team_name).cloned().map(MemberCriterion::TeamNameEq))
            .and_some(condition.age_goe.map(MemberCriterion::AgeGoe))
            .and_some(condition.age_loe.map(MemberCriterion::AgeLoe))
    }
}

/// Flat projection of a member joined with its (optional) team.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeamRow {
    pub member_id: MemberId,
    pub username: Username,
    pub age: Age,
    pub team_id: Option<TeamId>,
    pub team_name: Option<TeamName>,
}
