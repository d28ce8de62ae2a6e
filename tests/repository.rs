use member_roster::domain::member::{Member, MemberOrder};
use member_roster::domain::search::{MemberCriterion, MemberPredicate};
use member_roster::domain::stats::AgeBracket;
use member_roster::domain::team::NewTeam;
use member_roster::domain::test_entity::{TestEntity, TestEntityId};
use member_roster::domain::types::{Age, MemberId, TeamId, TeamName, Username};
use member_roster::pagination::PageRequest;
use member_roster::repository::errors::RepositoryError;
use member_roster::services::ServiceError;
use member_roster::services::roster::bump_ages;
use member_roster::repository::{
    MemberListQuery, MemberReader, MemberWriter, TeamReader, TeamWriter, TestEntityReader,
    TestEntityWriter,
};

mod common;

fn names<'a>(members: impl IntoIterator<Item = &'a Member>) -> Vec<&'a str> {
    members.into_iter().map(|m| m.username.as_str()).collect()
}

fn team_name(name: &str) -> TeamName {
    TeamName::new(name).unwrap()
}

#[test]
fn test_team_repository_crud() {
    let test_db = common::TestDb::new("test_team_repository_crud.db");
    let repo = test_db.repo();

    let team = repo.create_team(&NewTeam::new(team_name("teamA"))).unwrap();
    assert!(team.id.get() > 0);

    let by_id = repo.get_team_by_id(team.id).unwrap().unwrap();
    assert_eq!(by_id, team);

    let by_name = repo.get_team_by_name(&team_name("teamA")).unwrap().unwrap();
    assert_eq!(by_name.id, team.id);

    assert!(repo.get_team_by_name(&team_name("teamZ")).unwrap().is_none());
    assert!(repo.get_team_by_id(TeamId::new(999).unwrap()).unwrap().is_none());

    repo.create_team(&NewTeam::new(team_name("teamB"))).unwrap();
    let teams = repo.list_teams().unwrap();
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[1].name.as_str(), "teamB");
}

#[test]
fn test_member_lookup_and_team_change() {
    let test_db = common::TestDb::new("test_member_lookup_and_team_change.db");
    let repo = test_db.repo();
    let seeded = common::seed(&repo);

    let member1 = repo
        .find_member_by_username(&Username::new("member1").unwrap())
        .unwrap()
        .unwrap();
    let again = repo
        .find_member_by_username(&Username::new("member1").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(member1, again);
    assert_eq!(member1.age.get(), 10);

    let team_b = seeded.teams[1].id;
    let moved = repo.change_member_team(member1.id, Some(team_b)).unwrap();
    assert_eq!(moved.team_id, Some(team_b));
    assert_eq!(
        names(&repo.list_team_members(&team_name("teamB")).unwrap()),
        vec!["member1", "member3", "member4"]
    );

    let released = repo.change_member_team(member1.id, None).unwrap();
    assert_eq!(released.team_id, None);
    let stored = repo.get_member_by_id(member1.id).unwrap().unwrap();
    assert_eq!(stored.team_id, None);
}

#[test]
fn test_change_team_errors() {
    let test_db = common::TestDb::new("test_change_team_errors.db");
    let repo = test_db.repo();
    let seeded = common::seed(&repo);

    let missing_team =
        repo.change_member_team(seeded.members[0].id, Some(TeamId::new(999).unwrap()));
    assert!(matches!(
        missing_team,
        Err(RepositoryError::ConstraintViolation(_))
    ));

    let missing_member = repo.change_member_team(MemberId::new(999).unwrap(), None);
    assert!(matches!(missing_member, Err(RepositoryError::NotFound)));
}

#[test]
fn test_list_members_orders_and_pages() {
    let test_db = common::TestDb::new("test_list_members_orders_and_pages.db");
    let repo = test_db.repo();
    common::seed(&repo);
    common::add_member(&repo, "member5", 100, None);
    common::add_member(&repo, "member6", 100, None);

    let (total, members) = repo
        .list_members(MemberListQuery::new().order(MemberOrder::AgeDescUsernameAsc))
        .unwrap();
    assert_eq!(total, 6);
    assert_eq!(
        names(&members),
        vec!["member5", "member6", "member4", "member3", "member2", "member1"]
    );

    let (total, members) = repo
        .list_members(
            MemberListQuery::new()
                .order(MemberOrder::UsernameDesc)
                .paginate(PageRequest::new(1, 2).unwrap()),
        )
        .unwrap();
    assert_eq!(total, 6);
    assert_eq!(names(&members), vec!["member4", "member3"]);
}

#[test]
fn test_predicate_executor() {
    let test_db = common::TestDb::new("test_predicate_executor.db");
    let repo = test_db.repo();
    common::seed(&repo);

    let between = MemberPredicate::all().and(MemberCriterion::AgeBetween(20, 40));
    assert_eq!(
        names(&repo.find_members(&between).unwrap()),
        vec!["member2", "member3", "member4"]
    );

    let nobody = between.and(MemberCriterion::UsernameEq("result".to_string()));
    assert!(repo.find_members(&nobody).unwrap().is_empty());

    let exact = MemberPredicate::all()
        .and(MemberCriterion::UsernameEq("member1".to_string()))
        .and(MemberCriterion::AgeEq(10));
    assert_eq!(names(&repo.find_members(&exact).unwrap()), vec!["member1"]);

    let by_team = MemberPredicate::all().and(MemberCriterion::TeamNameEq("teamA".to_string()));
    assert_eq!(
        names(&repo.find_members(&by_team).unwrap()),
        vec!["member1", "member2"]
    );
}

#[test]
fn test_join_queries() {
    let test_db = common::TestDb::new("test_join_queries.db");
    let repo = test_db.repo();
    common::seed(&repo);

    assert_eq!(
        names(&repo.list_team_members(&team_name("teamA")).unwrap()),
        vec!["member1", "member2"]
    );

    common::add_member(&repo, "teamA", 1, None);
    common::add_member(&repo, "teamB", 2, None);
    common::add_member(&repo, "teamC", 3, None);
    assert_eq!(
        names(&repo.list_members_named_after_teams().unwrap()),
        vec!["teamA", "teamB"]
    );

    let filtered = repo
        .list_members_with_team_filter(&team_name("teamA"))
        .unwrap();
    assert_eq!(filtered.len(), 7);
    for (member, team) in &filtered {
        match member.username.as_str() {
            "member1" | "member2" => {
                assert_eq!(team.as_ref().map(|t| t.name.as_str()), Some("teamA"))
            }
            _ => assert!(team.is_none()),
        }
    }
}

#[test]
fn test_subqueries_and_aggregates() {
    let test_db = common::TestDb::new("test_subqueries_and_aggregates.db");
    let repo = test_db.repo();

    assert!(repo.list_oldest_members().unwrap().is_empty());

    let empty = repo.age_stats().unwrap();
    assert_eq!(empty.count, 0);
    assert_eq!(empty.avg, None);
    assert_eq!(empty.max, None);
    assert!(repo.list_members_at_least_average_age().unwrap().is_empty());

    common::seed(&repo);

    let oldest = repo.list_oldest_members().unwrap();
    assert_eq!(names(&oldest), vec!["member4"]);
    assert_eq!(oldest[0].age.get(), 40);

    assert_eq!(
        names(&repo.list_members_at_least_average_age().unwrap()),
        vec!["member3", "member4"]
    );

    let stats = repo.age_stats().unwrap();
    assert_eq!(stats.count, 4);
    assert_eq!(stats.sum, 100);
    assert_eq!(stats.avg, Some(25.0));
    assert_eq!(stats.max, Some(40));
    assert_eq!(stats.min, Some(10));

    let averages = repo.average_age_by_team().unwrap();
    assert_eq!(averages.len(), 2);
    assert_eq!(averages[0].team_name.as_str(), "teamA");
    assert_eq!(averages[0].avg_age, 15.0);
    assert_eq!(averages[1].team_name.as_str(), "teamB");
    assert_eq!(averages[1].avg_age, 35.0);

    let brackets: Vec<AgeBracket> = repo
        .list_member_summaries()
        .unwrap()
        .into_iter()
        .map(|s| s.bracket)
        .collect();
    assert_eq!(
        brackets,
        vec![
            AgeBracket::UpToTwenty,
            AgeBracket::UpToTwenty,
            AgeBracket::TwentyOneToThirty,
            AgeBracket::Other,
        ]
    );
}

#[test]
fn test_bulk_update_and_delete() {
    let test_db = common::TestDb::new("test_bulk_update_and_delete.db");
    let repo = test_db.repo();
    let seeded = common::seed(&repo);

    assert_eq!(repo.increment_all_ages(1).unwrap(), 4);
    let (_, members) = repo.list_members(MemberListQuery::new()).unwrap();
    let ages: Vec<i32> = members.iter().map(|m| m.age.get()).collect();
    assert_eq!(ages, vec![11, 21, 31, 41]);

    let member4 = seeded.members[3].id;
    repo.create_test_entity(&TestEntity::new(member4, 1)).unwrap();

    let removed = repo.delete_members_older_than(Age::new(18).unwrap()).unwrap();
    assert_eq!(removed, 3);

    let (total, members) = repo.list_members(MemberListQuery::new()).unwrap();
    assert_eq!(total, 1);
    assert_eq!(names(&members), vec!["member1"]);
    assert!(
        repo.get_test_entity(TestEntityId::new(member4, 1))
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_age_shift_outside_valid_range_is_rejected() {
    let test_db = common::TestDb::new("test_age_shift_outside_valid_range_is_rejected.db");
    let repo = test_db.repo();
    common::seed(&repo);

    assert!(matches!(
        repo.increment_all_ages(-15),
        Err(RepositoryError::ValidationError(_))
    ));
    assert!(matches!(
        repo.increment_all_ages(i32::MAX),
        Err(RepositoryError::ValidationError(_))
    ));

    let stats = repo.age_stats().unwrap();
    assert_eq!((stats.min, stats.max), (Some(10), Some(40)));
    assert_eq!(repo.list_member_summaries().unwrap().len(), 4);

    assert!(matches!(
        bump_ages(&repo, -15),
        Err(ServiceError::Validation(_))
    ));
    assert_eq!(bump_ages(&repo, -10).unwrap(), 4);
    assert_eq!(repo.age_stats().unwrap().min, Some(0));
}

#[test]
fn test_age_shift_on_empty_roster_is_a_no_op() {
    let test_db = common::TestDb::new("test_age_shift_on_empty_roster_is_a_no_op.db");
    let repo = test_db.repo();

    assert_eq!(repo.increment_all_ages(-100).unwrap(), 0);
}

#[test]
fn test_composite_key_entity() {
    let test_db = common::TestDb::new("test_composite_key_entity.db");
    let repo = test_db.repo();
    let member = common::add_member(&repo, "member1", 10, None);

    let created = repo.create_test_entity(&TestEntity::new(member.id, 2)).unwrap();
    assert_eq!(created.id(), TestEntityId::new(member.id, 2));

    let found = repo
        .get_test_entity(TestEntityId::new(member.id, 2))
        .unwrap()
        .unwrap();
    assert_eq!(found.member_id, member.id);
    assert_eq!(found.test_id, 2);

    assert!(
        repo.get_test_entity(TestEntityId::new(member.id, 3))
            .unwrap()
            .is_none()
    );

    let duplicate = repo.create_test_entity(&TestEntity::new(member.id, 2));
    assert!(matches!(
        duplicate,
        Err(RepositoryError::ConstraintViolation(_))
    ));
}
