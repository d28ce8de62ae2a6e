//! Repository implementation for teams.

use diesel::dsl::{count, sum};
use diesel::prelude::*;

use crate::{
    domain::{
        member::Member,
        stats::TeamAverageAge,
        team::{NewTeam, Team},
        types::{TeamId, TeamName},
    },
    models::{
        member::Member as DbMember,
        team::{NewTeam as DbNewTeam, Team as DbTeam},
    },
    repository::{
        DieselRepository, TeamReader, TeamWriter,
        errors::{RepositoryError, RepositoryResult},
        into_domain,
    },
};

impl TeamWriter for DieselRepository {
    fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team> {
        use crate::schema::teams;

        let mut conn = self.conn()?;
        let db_new_team: DbNewTeam = new_team.into();

        let db_team = diesel::insert_into(teams::table)
            .values(&db_new_team)
            .get_result::<DbTeam>(&mut conn)?;

        Ok(Team::try_from(db_team)?)
    }
}

impl TeamReader for DieselRepository {
    fn get_team_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>> {
        use crate::schema::teams;

        let mut conn = self.conn()?;
        let db_team = teams::table
            .find(id.get())
            .first::<DbTeam>(&mut conn)
            .optional()?;

        db_team
            .map(Team::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn get_team_by_name(&self, name: &TeamName) -> RepositoryResult<Option<Team>> {
        use crate::schema::teams;

        let mut conn = self.conn()?;
        let db_team = teams::table
            .filter(teams::name.eq(name.as_str()))
            .order(teams::id.asc())
            .first::<DbTeam>(&mut conn)
            .optional()?;

        db_team
            .map(Team::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_teams(&self) -> RepositoryResult<Vec<Team>> {
        use crate::schema::teams;

        let mut conn = self.conn()?;
        let db_teams = teams::table
            .order(teams::id.asc())
            .load::<DbTeam>(&mut conn)?;

        into_domain(db_teams)
    }

    fn list_team_members(&self, name: &TeamName) -> RepositoryResult<Vec<Member>> {
        use crate::schema::{members, teams};

        let mut conn = self.conn()?;
        let db_members = members::table
            .inner_join(teams::table)
            .filter(teams::name.eq(name.as_str()))
            .order(members::id.asc())
            .select(DbMember::as_select())
            .load::<DbMember>(&mut conn)?;

        into_domain(db_members)
    }

    fn average_age_by_team(&self) -> RepositoryResult<Vec<TeamAverageAge>> {
        use crate::schema::{members, teams};

        let mut conn = self.conn()?;
        let groups = members::table
            .inner_join(teams::table)
            .group_by(teams::name)
            .select((teams::name, sum(members::age), count(members::id)))
            .order(teams::name.asc())
            .load::<(String, Option<i64>, i64)>(&mut conn)?;

        groups
            .into_iter()
            .map(|(name, total_age, members_count)| -> RepositoryResult<TeamAverageAge> {
                Ok(TeamAverageAge {
                    team_name: TeamName::new(name)?,
                    avg_age: total_age.unwrap_or_default() as f64 / members_count as f64,
                })
            })
            .collect()
    }
}
