use serde::{Deserialize, Serialize};

use crate::domain::types::{Age, MemberId, TeamId, Username};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub username: Username,
    pub age: Age,
    /// Team the member belongs to, if any.
    pub team_id: Option<TeamId>,
}

impl Member {
    /// Moves the member to another team, or out of any team with `None`.
    ///
    /// Only the member side holds the reference; a team's member list is
    /// always derived by querying on `team_id`.
    pub fn change_team(&mut self, team_id: Option<TeamId>) {
        self.team_id = team_id;
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewMember {
    pub username: Username,
    pub age: Age,
    pub team_id: Option<TeamId>,
}

impl NewMember {
    #[must_use]
    pub fn new(username: Username, age: Age, team_id: Option<TeamId>) -> Self {
        Self {
            username,
            age,
            team_id,
        }
    }
}

/// Ordering applied when listing members.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemberOrder {
    #[default]
    IdAsc,
    /// Oldest first, ties broken alphabetically.
    AgeDescUsernameAsc,
    UsernameDesc,
}
