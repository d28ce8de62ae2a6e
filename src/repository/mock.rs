//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::member::{Member, NewMember};
use crate::domain::search::{MemberPredicate, MemberSearchCondition, MemberTeamRow};
use crate::domain::stats::{AgeStats, MemberSummary, TeamAverageAge};
use crate::domain::team::{NewTeam, Team};
use crate::domain::types::{Age, MemberId, TeamId, TeamName, Username};
use crate::pagination::{Page, PageRequest};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    MemberListQuery, MemberReader, MemberSearch, MemberWriter, TeamReader, TeamWriter,
};

mock! {
    pub Repository {}

    impl TeamReader for Repository {
        fn get_team_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>>;
        fn get_team_by_name(&self, name: &TeamName) -> RepositoryResult<Option<Team>>;
        fn list_teams(&self) -> RepositoryResult<Vec<Team>>;
        fn list_team_members(&self, name: &TeamName) -> RepositoryResult<Vec<Member>>;
        fn average_age_by_team(&self) -> RepositoryResult<Vec<TeamAverageAge>>;
    }

    impl TeamWriter for Repository {
        fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team>;
    }

    impl MemberReader for Repository {
        fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
        fn find_member_by_username(&self, username: &Username) -> RepositoryResult<Option<Member>>;
        fn list_members(&self, query: MemberListQuery) -> RepositoryResult<(usize, Vec<Member>)>;
        fn find_members(&self, predicate: &MemberPredicate) -> RepositoryResult<Vec<Member>>;
        fn list_members_named_after_teams(&self) -> RepositoryResult<Vec<Member>>;
        fn list_members_with_team_filter(
            &self,
            name: &TeamName,
        ) -> RepositoryResult<Vec<(Member, Option<Team>)>>;
        fn list_oldest_members(&self) -> RepositoryResult<Vec<Member>>;
        fn list_members_at_least_average_age(&self) -> RepositoryResult<Vec<Member>>;
        fn age_stats(&self) -> RepositoryResult<AgeStats>;
        fn list_member_summaries(&self) -> RepositoryResult<Vec<MemberSummary>>;
    }

    impl MemberWriter for Repository {
        fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member>;
        fn change_member_team(
            &self,
            member_id: MemberId,
            team_id: Option<TeamId>,
        ) -> RepositoryResult<Member>;
        fn increment_all_ages(&self, delta: i32) -> RepositoryResult<usize>;
        fn delete_members_older_than(&self, age: Age) -> RepositoryResult<usize>;
    }

    impl MemberSearch for Repository {
        fn search(&self, condition: &MemberSearchCondition) -> RepositoryResult<Vec<MemberTeamRow>>;
        fn search_page_simple(
            &self,
            condition: &MemberSearchCondition,
            page: PageRequest,
        ) -> RepositoryResult<Page<MemberTeamRow>>;
        fn search_page_optimized(
            &self,
            condition: &MemberSearchCondition,
            page: PageRequest,
        ) -> RepositoryResult<Page<MemberTeamRow>>;
    }
}
