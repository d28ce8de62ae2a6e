//! Member/team search over `members LEFT JOIN teams`.

use diesel::dsl::{IntoBoxed, LeftJoin};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use log::debug;

use crate::{
    domain::search::{MemberCriterion, MemberPredicate, MemberSearchCondition, MemberTeamRow},
    models::member::MemberTeamRow as DbMemberTeamRow,
    pagination::{Page, PageRequest, page_with_deferred_count},
    repository::{
        DieselRepository, MemberSearch,
        errors::{RepositoryError, RepositoryResult},
        into_domain,
    },
    schema::{members, teams},
};

pub(crate) type BoxedMemberTeamQuery<'a> =
    IntoBoxed<'a, LeftJoin<members::table, teams::table>, Sqlite>;

/// Starts a `members LEFT JOIN teams` query filtered by every criterion of
/// `predicate`, in order.
pub(crate) fn member_team_query<'a>(predicate: &MemberPredicate) -> BoxedMemberTeamQuery<'a> {
    let mut query = members::table.left_join(teams::table).into_boxed();

    for criterion in predicate.criteria() {
        query = match criterion {
            MemberCriterion::UsernameEq(username) => {
                query.filter(members::username.eq(username.clone()))
            }
            MemberCriterion::TeamNameEq(name) => query.filter(teams::name.eq(name.clone())),
            MemberCriterion::AgeEq(age) => query.filter(members::age.eq(*age)),
            MemberCriterion::AgeGoe(age) => query.filter(members::age.ge(*age)),
            MemberCriterion::AgeLoe(age) => query.filter(members::age.le(*age)),
            MemberCriterion::AgeBetween(low, high) => {
                query.filter(members::age.between(*low, *high))
            }
        };
    }

    query
}

fn load_rows(
    conn: &mut SqliteConnection,
    predicate: &MemberPredicate,
    page: Option<PageRequest>,
) -> RepositoryResult<Vec<MemberTeamRow>> {
    let mut query = member_team_query(predicate)
        .select((
            members::id,
            members::username,
            members::age,
            teams::id.nullable(),
            teams::name.nullable(),
        ))
        .order(members::id.asc());

    if let Some(page) = page {
        query = query.offset(page.offset()).limit(page.limit());
    }

    let rows = query.load::<DbMemberTeamRow>(conn)?;
    into_domain(rows)
}

fn count_rows(conn: &mut SqliteConnection, predicate: &MemberPredicate) -> RepositoryResult<usize> {
    let total = member_team_query(predicate)
        .count()
        .get_result::<i64>(conn)?;
    Ok(total as usize)
}

impl MemberSearch for DieselRepository {
    fn search(&self, condition: &MemberSearchCondition) -> RepositoryResult<Vec<MemberTeamRow>> {
        let mut conn = self.conn()?;
        let predicate = MemberPredicate::from(condition);
        load_rows(&mut conn, &predicate, None)
    }

    fn search_page_simple(
        &self,
        condition: &MemberSearchCondition,
        page: PageRequest,
    ) -> RepositoryResult<Page<MemberTeamRow>> {
        let mut conn = self.conn()?;
        let predicate = MemberPredicate::from(condition);

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let content = load_rows(conn, &predicate, Some(page))?;
            let total = count_rows(conn, &predicate)?;
            Ok(Page::new(content, page, total))
        })
    }

    fn search_page_optimized(
        &self,
        condition: &MemberSearchCondition,
        page: PageRequest,
    ) -> RepositoryResult<Page<MemberTeamRow>> {
        let mut conn = self.conn()?;
        let predicate = MemberPredicate::from(condition);

        let content = load_rows(&mut conn, &predicate, Some(page))?;
        let mut counted = false;
        let result = page_with_deferred_count(content, page, || {
            counted = true;
            count_rows(&mut conn, &predicate)
        })?;

        if !counted {
            debug!(
                "Skipped count query for page {} (size {}), total {}",
                page.page_number(),
                page.page_size(),
                result.total
            );
        }

        Ok(result)
    }
}
