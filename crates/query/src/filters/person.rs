//! Person filter: id, names, birth date (exact or ranged).

use chrono::NaiveDate;

use catalog::constants::{MAX_FIRST_NAME_LENGTH, MAX_LAST_NAME_LENGTH};
use catalog::types::{Person, PersonId};

use crate::error::Result;
use crate::filters::{check_id, check_length, check_past_date};

/// Immutable set of optional person criteria.
///
/// ## Matching semantics
/// - `id`: exact equality
/// - `first_name`, `last_name`: case-insensitive exact match
/// - `birth_date`: exact equality
/// - `birth_date_from` / `birth_date_to`: inclusive bounds, applied
///   independently (no from ≤ to cross-check)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonFilter {
    id: Option<PersonId>,
    first_name: Option<String>,
    last_name: Option<String>,
    birth_date: Option<NaiveDate>,
    birth_date_from: Option<NaiveDate>,
    birth_date_to: Option<NaiveDate>,
}

impl PersonFilter {
    /// Start building a filter
    pub fn builder() -> PersonFilterBuilder {
        PersonFilterBuilder::default()
    }

    pub fn id(&self) -> Option<PersonId> {
        self.id
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.birth_date
    }

    pub fn birth_date_from(&self) -> Option<NaiveDate> {
        self.birth_date_from
    }

    pub fn birth_date_to(&self) -> Option<NaiveDate> {
        self.birth_date_to
    }

    /// Does this person satisfy every present criterion?
    pub fn matches(&self, person: &Person) -> bool {
        self.id.is_none_or(|id| person.id == id)
            && self
                .first_name
                .as_ref()
                .is_none_or(|n| person.first_name.eq_ignore_ascii_case(n))
            && self
                .last_name
                .as_ref()
                .is_none_or(|n| person.last_name.eq_ignore_ascii_case(n))
            && self.birth_date.is_none_or(|d| person.birth_date == d)
            && self.birth_date_from.is_none_or(|d| person.birth_date >= d)
            && self.birth_date_to.is_none_or(|d| person.birth_date <= d)
    }

    /// Lazily select the persons satisfying every present criterion.
    pub fn apply<I>(&self, input: I) -> impl Iterator<Item = Person>
    where
        I: Iterator<Item = Person>,
    {
        input.filter(move |person| self.matches(person))
    }
}

/// Builder that validates each criterion as it is supplied.
#[derive(Debug, Clone, Default)]
pub struct PersonFilterBuilder {
    filter: PersonFilter,
}

impl PersonFilterBuilder {
    pub fn with_id(mut self, id: Option<PersonId>) -> Result<Self> {
        if let Some(id) = id {
            check_id("id", id)?;
        }
        self.filter.id = id;
        Ok(self)
    }

    pub fn with_first_name(mut self, first_name: Option<String>) -> Result<Self> {
        if let Some(ref name) = first_name {
            check_length("firstName", name, MAX_FIRST_NAME_LENGTH)?;
        }
        self.filter.first_name = first_name;
        Ok(self)
    }

    pub fn with_last_name(mut self, last_name: Option<String>) -> Result<Self> {
        if let Some(ref name) = last_name {
            check_length("lastName", name, MAX_LAST_NAME_LENGTH)?;
        }
        self.filter.last_name = last_name;
        Ok(self)
    }

    pub fn with_birth_date(mut self, birth_date: Option<NaiveDate>) -> Result<Self> {
        if let Some(date) = birth_date {
            check_past_date("birthDate", date)?;
        }
        self.filter.birth_date = birth_date;
        Ok(self)
    }

    pub fn with_birth_date_from(mut self, from: Option<NaiveDate>) -> Result<Self> {
        if let Some(date) = from {
            check_past_date("birthDateFrom", date)?;
        }
        self.filter.birth_date_from = from;
        Ok(self)
    }

    pub fn with_birth_date_to(mut self, to: Option<NaiveDate>) -> Result<Self> {
        if let Some(date) = to {
            check_past_date("birthDateTo", date)?;
        }
        self.filter.birth_date_to = to;
        Ok(self)
    }

    /// Freeze the accumulated criteria
    pub fn build(self) -> PersonFilter {
        self.filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use chrono::{Duration, Local};

    fn test_person(id: i64, first: &str, last: &str, born: (i32, u32, u32)) -> Person {
        Person {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            birth_date: NaiveDate::from_ymd_opt(born.0, born.1, born.2).unwrap(),
        }
    }

    #[test]
    fn test_name_match_ignores_case() {
        let filter = PersonFilter::builder()
            .with_first_name(Some("sofia".to_string()))
            .unwrap()
            .build();

        assert!(filter.matches(&test_person(1, "Sofia", "Coppola", (1971, 5, 14))));
        assert!(!filter.matches(&test_person(2, "Sofianne", "Coppola", (1971, 5, 14))));
    }

    #[test]
    fn test_birth_date_range_is_inclusive() {
        let born = test_person(1, "Sofia", "Coppola", (1971, 5, 14));
        let bound = NaiveDate::from_ymd_opt(1971, 5, 14).unwrap();

        let from = PersonFilter::builder()
            .with_birth_date_from(Some(bound))
            .unwrap()
            .build();
        assert!(from.matches(&born));

        let to = PersonFilter::builder()
            .with_birth_date_to(Some(bound))
            .unwrap()
            .build();
        assert!(to.matches(&born));
    }

    #[test]
    fn test_bounds_apply_independently() {
        // from > to matches nothing, but building it is not an error
        let filter = PersonFilter::builder()
            .with_birth_date_from(Some(NaiveDate::from_ymd_opt(1990, 1, 1).unwrap()))
            .unwrap()
            .with_birth_date_to(Some(NaiveDate::from_ymd_opt(1980, 1, 1).unwrap()))
            .unwrap()
            .build();

        assert!(!filter.matches(&test_person(1, "A", "B", (1985, 6, 1))));
    }

    #[test]
    fn test_future_birth_date_rejected() {
        let tomorrow = Local::now().date_naive() + Duration::days(1);
        let result = PersonFilter::builder().with_birth_date(Some(tomorrow));
        assert!(matches!(
            result,
            Err(QueryError::Validation { field: "birthDate", .. })
        ));
    }

    #[test]
    fn test_round_trip_accessors() {
        let date = NaiveDate::from_ymd_opt(1971, 5, 14).unwrap();
        let filter = PersonFilter::builder()
            .with_id(Some(3))
            .unwrap()
            .with_first_name(Some("Sofia".to_string()))
            .unwrap()
            .with_last_name(Some("Coppola".to_string()))
            .unwrap()
            .with_birth_date(Some(date))
            .unwrap()
            .build();

        assert_eq!(filter.id(), Some(3));
        assert_eq!(filter.first_name(), Some("Sofia"));
        assert_eq!(filter.last_name(), Some("Coppola"));
        assert_eq!(filter.birth_date(), Some(date));
    }
}
