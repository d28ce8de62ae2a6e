use diesel::prelude::*;

use crate::domain::test_entity::TestEntity as DomainTestEntity;
use crate::domain::types::{MemberId, TypeConstraintError};
use crate::models::member::Member;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations, Insertable)]
#[diesel(table_name = crate::schema::test_entities)]
#[diesel(primary_key(member_id, test_id))]
#[diesel(belongs_to(Member, foreign_key = member_id))]
pub struct TestEntity {
    pub member_id: i32,
    pub test_id: i64,
}

impl TryFrom<TestEntity> for DomainTestEntity {
    type Error = TypeConstraintError;

    fn try_from(entity: TestEntity) -> Result<Self, Self::Error> {
        Ok(Self {
            member_id: MemberId::try_from(entity.member_id)?,
            test_id: entity.test_id,
        })
    }
}

impl From<&DomainTestEntity> for TestEntity {
    fn from(entity: &DomainTestEntity) -> Self {
        Self {
            member_id: entity.member_id.get(),
            test_id: entity.test_id,
        }
    }
}
