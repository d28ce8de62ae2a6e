#![allow(dead_code)]

use member_roster::db::{DbPool, establish_connection_pool, run_pending_migrations};
use member_roster::domain::member::{Member, NewMember};
use member_roster::domain::types::{Age, TeamId, Username};
use member_roster::repository::{DieselRepository, MemberWriter};
use member_roster::services::roster::{SeededRoster, seed_demo_roster};
use tempfile::TempDir;

/// Migrated SQLite database living in a temporary directory.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("establish pool");
        run_pending_migrations(&pool).expect("run migrations");
        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}

/// teamA: member1 (10), member2 (20); teamB: member3 (30), member4 (40).
pub fn seed(repo: &DieselRepository) -> SeededRoster {
    seed_demo_roster(repo).expect("seed roster")
}

pub fn add_member(
    repo: &DieselRepository,
    username: &str,
    age: i32,
    team_id: Option<TeamId>,
) -> Member {
    repo.create_member(&NewMember::new(
        Username::new(username).expect("valid username"),
        Age::new(age).expect("valid age"),
        team_id,
    ))
    .expect("create member")
}
