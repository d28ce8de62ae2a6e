//! Roster maintenance: demo data, reports and bulk age updates.

use serde::Serialize;

use crate::domain::member::{Member, NewMember};
use crate::domain::stats::{AgeStats, MemberSummary, TeamAverageAge};
use crate::domain::team::{NewTeam, Team};
use crate::domain::types::{Age, TeamName, Username};
use crate::repository::errors::RepositoryError;
use crate::repository::{MemberReader, MemberWriter, TeamReader, TeamWriter};
use crate::services::{ServiceError, ServiceResult};

/// Teams and members created by [`seed_demo_roster`].
#[derive(Debug, Serialize)]
pub struct SeededRoster {
    pub teams: Vec<Team>,
    pub members: Vec<Member>,
}

/// Aggregated view of the roster.
#[derive(Debug, Serialize)]
pub struct RosterReport {
    pub stats: AgeStats,
    pub team_averages: Vec<TeamAverageAge>,
    pub oldest: Vec<Member>,
    pub summaries: Vec<MemberSummary>,
}

/// Creates `teamA` with member1 (10) and member2 (20), and `teamB` with
/// member3 (30) and member4 (40).
pub fn seed_demo_roster<R>(repo: &R) -> ServiceResult<SeededRoster>
where
    R: TeamWriter + MemberWriter + ?Sized,
{
    let team_a = repo.create_team(&NewTeam::new(TeamName::new("teamA")?))?;
    let team_b = repo.create_team(&NewTeam::new(TeamName::new("teamB")?))?;

    let mut members = Vec::with_capacity(4);
    for (index, team) in [&team_a, &team_a, &team_b, &team_b].into_iter().enumerate() {
        let number = index as i32 + 1;
        let new_member = NewMember::new(
            Username::new(format!("member{number}"))?,
            Age::new(number * 10)?,
            Some(team.id),
        );
        members.push(repo.create_member(&new_member)?);
    }

    log::info!("Seeded 2 teams and {} members", members.len());

    Ok(SeededRoster {
        teams: vec![team_a, team_b],
        members,
    })
}

pub fn roster_report<R>(repo: &R) -> ServiceResult<RosterReport>
where
    R: MemberReader + TeamReader + ?Sized,
{
    Ok(RosterReport {
        stats: repo.age_stats()?,
        team_averages: repo.average_age_by_team()?,
        oldest: repo.list_oldest_members()?,
        summaries: repo.list_member_summaries()?,
    })
}

/// Looks a member up by username, failing with [`ServiceError::NotFound`].
pub fn find_member<R>(repo: &R, username: &str) -> ServiceResult<Member>
where
    R: MemberReader + ?Sized,
{
    let username = Username::new(username)?;
    repo.find_member_by_username(&username)?
        .ok_or(ServiceError::NotFound)
}

/// Adds `delta` years to every member.
pub fn bump_ages<R>(repo: &R, delta: i32) -> ServiceResult<usize>
where
    R: MemberWriter + ?Sized,
{
    repo.increment_all_ages(delta).map_err(|err| {
        log::error!("Failed to update ages: {err}");
        match err {
            RepositoryError::ValidationError(message) => ServiceError::Validation(message),
            err => ServiceError::from(err),
        }
    })
}

/// Removes every member strictly older than `age`.
pub fn purge_older_than<R>(repo: &R, age: i32) -> ServiceResult<usize>
where
    R: MemberWriter + ?Sized,
{
    let age = Age::new(age)?;
    repo.delete_members_older_than(age).map_err(|err| {
        log::error!("Failed to delete members older than {age}: {err}");
        ServiceError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI32, Ordering};

    use super::*;
    use crate::domain::types::{MemberId, TeamId};
    use crate::repository::mock::MockRepository;

    #[test]
    fn seed_assigns_two_members_per_team() {
        let mut repo = MockRepository::new();
        let team_ids = AtomicI32::new(0);
        repo.expect_create_team().times(2).returning(move |new_team| {
            Ok(Team {
                id: TeamId::new(team_ids.fetch_add(1, Ordering::SeqCst) + 1).unwrap(),
                name: new_team.name.clone(),
            })
        });
        let member_ids = AtomicI32::new(0);
        repo.expect_create_member().times(4).returning(move |new_member| {
            Ok(Member {
                id: MemberId::new(member_ids.fetch_add(1, Ordering::SeqCst) + 1).unwrap(),
                username: new_member.username.clone(),
                age: new_member.age,
                team_id: new_member.team_id,
            })
        });

        let seeded = seed_demo_roster(&repo).unwrap();

        let team_of = |i: usize| seeded.members[i].team_id.map(TeamId::get);
        assert_eq!(seeded.teams[0].name.as_str(), "teamA");
        assert_eq!((team_of(0), team_of(1)), (Some(1), Some(1)));
        assert_eq!((team_of(2), team_of(3)), (Some(2), Some(2)));
        assert_eq!(seeded.members[3].age.get(), 40);
    }

    #[test]
    fn find_member_reports_missing_username() {
        let mut repo = MockRepository::new();
        repo.expect_find_member_by_username()
            .returning(|_| Ok(None));

        let result = find_member(&repo, "ghost");

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn find_member_rejects_blank_username() {
        let repo = MockRepository::new();
        assert!(matches!(
            find_member(&repo, "  "),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn purge_rejects_negative_age() {
        let repo = MockRepository::new();
        assert!(matches!(
            purge_older_than(&repo, -1),
            Err(ServiceError::Validation(_))
        ));
    }

    #[test]
    fn purge_passes_age_through() {
        let mut repo = MockRepository::new();
        repo.expect_delete_members_older_than()
            .withf(|age| age.get() == 18)
            .times(1)
            .returning(|_| Ok(3));

        assert_eq!(purge_older_than(&repo, 18).unwrap(), 3);
    }

    #[test]
    fn bump_ages_returns_affected_rows() {
        let mut repo = MockRepository::new();
        repo.expect_increment_all_ages()
            .withf(|delta| *delta == 1)
            .returning(|_| Ok(4));

        assert_eq!(bump_ages(&repo, 1).unwrap(), 4);
    }

    #[test]
    fn bump_ages_reports_out_of_range_shift_as_validation() {
        let mut repo = MockRepository::new();
        repo.expect_increment_all_ages().returning(|_| {
            Err(RepositoryError::ValidationError(
                "age out of range".to_string(),
            ))
        });

        assert!(matches!(
            bump_ages(&repo, -15),
            Err(ServiceError::Validation(_))
        ));
    }
}
