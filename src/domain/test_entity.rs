//! Entity keyed by a composite `(member_id, test_id)` primary key.

use serde::{Deserialize, Serialize};

use crate::domain::types::MemberId;

/// Composite identifier of a [`TestEntity`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TestEntityId {
    pub member_id: MemberId,
    pub test_id: i64,
}

impl TestEntityId {
    #[must_use]
    pub fn new(member_id: MemberId, test_id: i64) -> Self {
        Self { member_id, test_id }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestEntity {
    pub member_id: MemberId,
    pub test_id: i64,
}

impl TestEntity {
    #[must_use]
    pub fn new(member_id: MemberId, test_id: i64) -> Self {
        Self { member_id, test_id }
    }

    pub fn id(&self) -> TestEntityId {
        TestEntityId::new(self.member_id, self.test_id)
    }
}
