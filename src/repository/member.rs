//! Repository implementation for members.

use diesel::dsl::{count_star, max, min, sum};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use log::info;

use crate::{
    domain::{
        member::{Member, MemberOrder, NewMember},
        search::MemberPredicate,
        stats::{AgeStats, MemberSummary},
        team::Team,
        types::{Age, MemberId, TeamId, TeamName, Username},
    },
    models::{
        member::{Member as DbMember, MemberSummary as DbMemberSummary, NewMember as DbNewMember},
        team::Team as DbTeam,
    },
    repository::{
        DieselRepository, MemberListQuery, MemberReader, MemberWriter,
        errors::{RepositoryError, RepositoryResult},
        into_domain,
        search::member_team_query,
    },
};

impl MemberWriter for DieselRepository {
    fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member> {
        use crate::schema::members;

        let mut conn = self.conn()?;
        let db_new_member: DbNewMember = new_member.into();

        let db_member = diesel::insert_into(members::table)
            .values(&db_new_member)
            .get_result::<DbMember>(&mut conn)?;

        Ok(Member::try_from(db_member)?)
    }

    fn change_member_team(
        &self,
        member_id: MemberId,
        team_id: Option<TeamId>,
    ) -> RepositoryResult<Member> {
        use crate::schema::members;

        let mut conn = self.conn()?;

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_member = members::table
                .find(member_id.get())
                .first::<DbMember>(conn)?;
            let mut member = Member::try_from(db_member)?;
            member.change_team(team_id);

            diesel::update(members::table.find(member_id.get()))
                .set(members::team_id.eq(member.team_id.map(TeamId::get)))
                .execute(conn)?;

            Ok(member)
        })
    }

    fn increment_all_ages(&self, delta: i32) -> RepositoryResult<usize> {
        use crate::schema::members;

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, RepositoryError, _>(|conn| {
            let (youngest, oldest) = members::table
                .select((min(members::age), max(members::age)))
                .get_result::<(Option<i32>, Option<i32>)>(conn)?;

            if let (Some(youngest), Some(oldest)) = (youngest, oldest) {
                let shifted_youngest = youngest.checked_add(delta);
                let shifted_oldest = oldest.checked_add(delta);
                if !matches!(shifted_youngest, Some(age) if age >= 0) || shifted_oldest.is_none() {
                    return Err(RepositoryError::ValidationError(format!(
                        "shifting ages {youngest}..={oldest} by {delta} leaves the valid age range"
                    )));
                }
            }

            Ok(diesel::update(members::table)
                .set(members::age.eq(members::age + delta))
                .execute(conn)?)
        })?;

        info!("Shifted the age of {affected} members by {delta}");
        Ok(affected)
    }

    fn delete_members_older_than(&self, age: Age) -> RepositoryResult<usize> {
        use crate::schema::{members, test_entities};

        let mut conn = self.conn()?;

        let removed = conn.transaction::<usize, RepositoryError, _>(|conn| {
            let doomed = members::table
                .filter(members::age.gt(age.get()))
                .select(members::id);

            diesel::delete(test_entities::table.filter(test_entities::member_id.eq_any(doomed)))
                .execute(conn)?;

            let removed = diesel::delete(members::table.filter(members::age.gt(age.get())))
                .execute(conn)?;

            Ok(removed)
        })?;

        info!("Removed {removed} members older than {age}");
        Ok(removed)
    }
}

impl MemberReader for DieselRepository {
    fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>> {
        use crate::schema::members;

        let mut conn = self.conn()?;
        let db_member = members::table
            .find(id.get())
            .first::<DbMember>(&mut conn)
            .optional()?;

        db_member
            .map(Member::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn find_member_by_username(&self, username: &Username) -> RepositoryResult<Option<Member>> {
        use crate::schema::members;

        let mut conn = self.conn()?;
        let db_member = members::table
            .filter(members::username.eq(username.as_str()))
            .order(members::id.asc())
            .first::<DbMember>(&mut conn)
            .optional()?;

        db_member
            .map(Member::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_members(&self, query: MemberListQuery) -> RepositoryResult<(usize, Vec<Member>)> {
        use crate::schema::members;

        let mut conn = self.conn()?;

        let total = members::table.count().get_result::<i64>(&mut conn)? as usize;

        let mut items = members::table.into_boxed::<Sqlite>();
        items = match query.order {
            MemberOrder::IdAsc => items.order(members::id.asc()),
            MemberOrder::AgeDescUsernameAsc => {
                items.order((members::age.desc(), members::username.asc()))
            }
            MemberOrder::UsernameDesc => {
                items.order((members::username.desc(), members::id.asc()))
            }
        };

        if let Some(page) = &query.pagination {
            items = items.offset(page.offset()).limit(page.limit());
        }

        let db_members = items.load::<DbMember>(&mut conn)?;
        Ok((total, into_domain(db_members)?))
    }

    fn find_members(&self, predicate: &MemberPredicate) -> RepositoryResult<Vec<Member>> {
        use crate::schema::members;

        let mut conn = self.conn()?;
        let db_members = member_team_query(predicate)
            .select(DbMember::as_select())
            .order(members::id.asc())
            .load::<DbMember>(&mut conn)?;

        into_domain(db_members)
    }

    fn list_members_named_after_teams(&self) -> RepositoryResult<Vec<Member>> {
        use crate::schema::{members, teams};

        let mut conn = self.conn()?;
        let db_members = members::table
            .filter(members::username.eq_any(teams::table.select(teams::name)))
            .order(members::id.asc())
            .load::<DbMember>(&mut conn)?;

        into_domain(db_members)
    }

    fn list_members_with_team_filter(
        &self,
        name: &TeamName,
    ) -> RepositoryResult<Vec<(Member, Option<Team>)>> {
        use crate::schema::{members, teams};

        let mut conn = self.conn()?;
        let rows = members::table
            .left_join(
                teams::table.on(members::team_id
                    .assume_not_null()
                    .eq(teams::id)
                    .and(teams::name.eq(name.as_str()))),
            )
            .select((members::all_columns, teams::all_columns.nullable()))
            .order(members::id.asc())
            .load::<(DbMember, Option<DbTeam>)>(&mut conn)?;

        rows.into_iter()
            .map(|(member, team)| -> RepositoryResult<(Member, Option<Team>)> {
                Ok((Member::try_from(member)?, team.map(Team::try_from).transpose()?))
            })
            .collect()
    }

    fn list_oldest_members(&self) -> RepositoryResult<Vec<Member>> {
        use crate::schema::members;

        let mut conn = self.conn()?;

        let db_members = conn.transaction::<_, RepositoryError, _>(|conn| {
            let max_age = members::table
                .select(max(members::age))
                .get_result::<Option<i32>>(conn)?;

            let Some(max_age) = max_age else {
                return Ok(Vec::new());
            };

            Ok(members::table
                .filter(members::age.eq(max_age))
                .order(members::id.asc())
                .load::<DbMember>(conn)?)
        })?;

        into_domain(db_members)
    }

    fn list_members_at_least_average_age(&self) -> RepositoryResult<Vec<Member>> {
        use crate::schema::members;

        let mut conn = self.conn()?;

        let db_members = conn.transaction::<_, RepositoryError, _>(|conn| {
            let (count, total_age) = members::table
                .select((count_star(), sum(members::age)))
                .get_result::<(i64, Option<i64>)>(conn)?;

            if count == 0 {
                return Ok(Vec::new());
            }

            // For integer ages, `age >= avg` holds exactly when `age >= ceil(avg)`.
            let threshold = total_age.unwrap_or_default().max(0) as u64;
            let threshold = threshold.div_ceil(count as u64) as i32;

            Ok(members::table
                .filter(members::age.ge(threshold))
                .order(members::id.asc())
                .load::<DbMember>(conn)?)
        })?;

        into_domain(db_members)
    }

    fn age_stats(&self) -> RepositoryResult<AgeStats> {
        use crate::schema::members;

        let mut conn = self.conn()?;
        let (count, total_age, max_age, min_age) = members::table
            .select((
                count_star(),
                sum(members::age),
                max(members::age),
                min(members::age),
            ))
            .get_result::<(i64, Option<i64>, Option<i32>, Option<i32>)>(&mut conn)?;

        let sum = total_age.unwrap_or_default();
        let avg = (count > 0).then(|| sum as f64 / count as f64);

        Ok(AgeStats {
            count,
            sum,
            avg,
            max: max_age,
            min: min_age,
        })
    }

    fn list_member_summaries(&self) -> RepositoryResult<Vec<MemberSummary>> {
        use crate::schema::members;

        let mut conn = self.conn()?;
        let rows = members::table
            .select((members::username, members::age))
            .order(members::id.asc())
            .load::<DbMemberSummary>(&mut conn)?;

        into_domain(rows)
    }
}
