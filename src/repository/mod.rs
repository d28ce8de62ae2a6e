//! Repository traits for the roster and their Diesel implementation.

use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        member::{Member, MemberOrder, NewMember},
        search::{MemberPredicate, MemberSearchCondition, MemberTeamRow},
        stats::{AgeStats, MemberSummary, TeamAverageAge},
        team::{NewTeam, Team},
        test_entity::{TestEntity, TestEntityId},
        types::{Age, MemberId, TeamId, TeamName, TypeConstraintError, Username},
    },
    pagination::{Page, PageRequest},
    repository::errors::{RepositoryError, RepositoryResult},
};

pub mod errors;
pub mod member;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod search;
pub mod team;
pub mod test_entity;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Converts Diesel rows into validated domain values.
fn into_domain<D, T>(rows: Vec<D>) -> RepositoryResult<Vec<T>>
where
    T: TryFrom<D, Error = TypeConstraintError>,
{
    rows.into_iter()
        .map(T::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(RepositoryError::from)
}

#[derive(Debug, Clone, Default)]
pub struct MemberListQuery {
    pub order: MemberOrder,
    pub pagination: Option<PageRequest>,
}

impl MemberListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order(mut self, order: MemberOrder) -> Self {
        self.order = order;
        self
    }

    pub fn paginate(mut self, page: PageRequest) -> Self {
        self.pagination = Some(page);
        self
    }
}

pub trait TeamReader {
    fn get_team_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>>;
    fn get_team_by_name(&self, name: &TeamName) -> RepositoryResult<Option<Team>>;
    fn list_teams(&self) -> RepositoryResult<Vec<Team>>;
    /// Members that belong to the named team (inner join).
    fn list_team_members(&self, name: &TeamName) -> RepositoryResult<Vec<Member>>;
    /// Average member age per team, ordered by team name. Teams without
    /// members are omitted.
    fn average_age_by_team(&self) -> RepositoryResult<Vec<TeamAverageAge>>;
}

pub trait TeamWriter {
    fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team>;
}

pub trait MemberReader {
    fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
    /// First member (lowest id) with the given username.
    fn find_member_by_username(&self, username: &Username) -> RepositoryResult<Option<Member>>;
    fn list_members(&self, query: MemberListQuery) -> RepositoryResult<(usize, Vec<Member>)>;
    /// Members matching an arbitrary predicate over `members LEFT JOIN teams`.
    fn find_members(&self, predicate: &MemberPredicate) -> RepositoryResult<Vec<Member>>;
    /// Members whose username equals the name of some team.
    fn list_members_named_after_teams(&self) -> RepositoryResult<Vec<Member>>;
    /// Every member, paired with its team only when that team has `name`.
    fn list_members_with_team_filter(
        &self,
        name: &TeamName,
    ) -> RepositoryResult<Vec<(Member, Option<Team>)>>;
    /// Members whose age equals the maximum age.
    fn list_oldest_members(&self) -> RepositoryResult<Vec<Member>>;
    /// Members whose age is greater than or equal to the average age.
    fn list_members_at_least_average_age(&self) -> RepositoryResult<Vec<Member>>;
    fn age_stats(&self) -> RepositoryResult<AgeStats>;
    fn list_member_summaries(&self) -> RepositoryResult<Vec<MemberSummary>>;
}

pub trait MemberWriter {
    fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member>;
    fn change_member_team(
        &self,
        member_id: MemberId,
        team_id: Option<TeamId>,
    ) -> RepositoryResult<Member>;
    /// Adds `delta` to every member's age, returning the affected row count.
    fn increment_all_ages(&self, delta: i32) -> RepositoryResult<usize>;
    /// Removes members strictly older than `age` along with their test
    /// entities, returning the number of members removed.
    fn delete_members_older_than(&self, age: Age) -> RepositoryResult<usize>;
}

pub trait TestEntityReader {
    fn get_test_entity(&self, id: TestEntityId) -> RepositoryResult<Option<TestEntity>>;
}

pub trait TestEntityWriter {
    fn create_test_entity(&self, entity: &TestEntity) -> RepositoryResult<TestEntity>;
}

/// Conditional member/team search with paging.
pub trait MemberSearch {
    /// Every row matching `condition`, ordered by member id.
    fn search(&self, condition: &MemberSearchCondition) -> RepositoryResult<Vec<MemberTeamRow>>;
    /// Page of matching rows; always runs the count query.
    fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        page: PageRequest,
    ) -> RepositoryResult<Page<MemberTeamRow>>;
    /// Page of matching rows; runs the count query only when the content
    /// does not already determine the total.
    fn search_page_optimized(
        &self,
        condition: &MemberSearchCondition,
        page: PageRequest,
    ) -> RepositoryResult<Page<MemberTeamRow>>;
}
