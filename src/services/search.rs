use validator::Validate;

use crate::domain::search::{MemberSearchCondition, MemberTeamRow};
use crate::pagination::{Page, PageRequest};
use crate::repository::MemberSearch;
use crate::services::{ServiceError, ServiceResult};

/// How the total row count of a search page is obtained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CountStrategy {
    /// Always issue the count query.
    Always,
    /// Issue the count query only when the page content cannot determine it.
    #[default]
    SkipWhenShort,
}

fn validate_condition(condition: &MemberSearchCondition) -> ServiceResult<()> {
    if let Err(err) = condition.validate() {
        log::error!("Failed to validate search condition: {err}");
        return Err(ServiceError::Validation(err.to_string()));
    }

    if let (Some(goe), Some(loe)) = (condition.age_goe, condition.age_loe)
        && goe > loe
    {
        return Err(ServiceError::Validation(format!(
            "lower age bound {goe} exceeds upper age bound {loe}"
        )));
    }

    Ok(())
}

/// Validates the condition and returns one page of matching member rows.
pub fn search_members<R>(
    repo: &R,
    condition: &MemberSearchCondition,
    page: PageRequest,
    strategy: CountStrategy,
) -> ServiceResult<Page<MemberTeamRow>>
where
    R: MemberSearch + ?Sized,
{
    validate_condition(condition)?;

    let result = match strategy {
        CountStrategy::Always => repo.search_page_simple(condition, page),
        CountStrategy::SkipWhenShort => repo.search_page_optimized(condition, page),
    };

    result.map_err(|err| {
        log::error!("Failed to search members: {err}");
        ServiceError::from(err)
    })
}

/// Validates the condition and returns every matching member row.
pub fn search_all_members<R>(
    repo: &R,
    condition: &MemberSearchCondition,
) -> ServiceResult<Vec<MemberTeamRow>>
where
    R: MemberSearch + ?Sized,
{
    validate_condition(condition)?;
    repo.search(condition).map_err(ServiceError::from)
}
