use diesel::prelude::*;

use crate::{
    domain::test_entity::{TestEntity, TestEntityId},
    models::test_entity::TestEntity as DbTestEntity,
    repository::{
        DieselRepository, TestEntityReader, TestEntityWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl TestEntityWriter for DieselRepository {
    fn create_test_entity(&self, entity: &TestEntity) -> RepositoryResult<TestEntity> {
        use crate::schema::test_entities;

        let mut conn = self.conn()?;
        let db_entity: DbTestEntity = entity.into();

        let created = diesel::insert_into(test_entities::table)
            .values(&db_entity)
            .get_result::<DbTestEntity>(&mut conn)?;

        Ok(TestEntity::try_from(created)?)
    }
}

impl TestEntityReader for DieselRepository {
    fn get_test_entity(&self, id: TestEntityId) -> RepositoryResult<Option<TestEntity>> {
        use crate::schema::test_entities;

        let mut conn = self.conn()?;
        let db_entity = test_entities::table
            .find((id.member_id.get(), id.test_id))
            .first::<DbTestEntity>(&mut conn)
            .optional()?;

        db_entity
            .map(TestEntity::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}
