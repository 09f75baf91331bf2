//! Person CRUD, querying, and filmography summaries.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Local, NaiveDate};
use tracing::debug;

use catalog::constants::{MAX_FIRST_NAME_LENGTH, MAX_LAST_NAME_LENGTH};
use catalog::types::{Person, PersonId};
use catalog::CatalogStore;
use query::filters::PersonFilter;
use query::page::{paginate, PageRequest};
use query::sort::{sort_persons, SortOrder};

use crate::error::{Result, ServiceError};
use crate::records::PersonRecord;

/// Partial person update; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PersonPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// Service for directors and actors.
#[derive(Debug, Clone)]
pub struct PersonService {
    store: Arc<RwLock<CatalogStore>>,
}

impl PersonService {
    pub fn new(store: Arc<RwLock<CatalogStore>>) -> Self {
        Self { store }
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate and store a new person; the id is assigned by the store.
    pub fn create(&self, person: Person) -> Result<Person> {
        validate_person(&person)?;
        Ok(self.write().create_person(person))
    }

    /// Fetch one person by id
    pub fn find_by_id(&self, id: PersonId) -> Result<Person> {
        check_id(id)?;
        self.read()
            .get_person(id)
            .cloned()
            .ok_or(ServiceError::NotFound { entity: "Person", id })
    }

    /// Apply a partial update; only the fields present in the patch change.
    pub fn update(&self, id: PersonId, patch: PersonPatch) -> Result<Person> {
        check_id(id)?;
        let mut store = self.write();
        let mut person = store
            .get_person(id)
            .cloned()
            .ok_or(ServiceError::NotFound { entity: "Person", id })?;

        if let Some(first_name) = patch.first_name {
            person.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            person.last_name = last_name;
        }
        if let Some(birth_date) = patch.birth_date {
            person.birth_date = birth_date;
        }

        validate_person(&person)?;
        store.insert_person(person.clone());
        Ok(person)
    }

    /// Delete a person by id
    pub fn delete_by_id(&self, id: PersonId) -> Result<()> {
        check_id(id)?;
        self.write()
            .remove_person(id)
            .map(|_| ())
            .ok_or(ServiceError::NotFound { entity: "Person", id })
    }

    /// Run the query pipeline over the person snapshot.
    pub fn find_all(
        &self,
        filter: &PersonFilter,
        order: &SortOrder,
        page: &PageRequest,
    ) -> Vec<Person> {
        let store = self.read();
        let mut people = store.people();
        let total = people.len();

        sort_persons(&mut people, order);
        let selected: Vec<Person> = paginate(filter.apply(people.into_iter()), page).collect();
        debug!(total, selected = selected.len(), "person query");
        selected
    }

    /// Count the persons matching a filter, ignoring pagination.
    pub fn count(&self, filter: &PersonFilter) -> u64 {
        let people = self.read().people();
        filter.apply(people.into_iter()).count() as u64
    }

    /// Filmography summary: per matching person, how many movies they
    /// directed and how many they acted in.
    pub fn summary(&self, filter: &PersonFilter, page: &PageRequest) -> Vec<PersonRecord> {
        let store = self.read();
        let movies = store.movies();
        let people = store.people();

        let records = people.into_iter().filter(|p| filter.matches(p)).map(|p| {
            let directed = movies.iter().filter(|m| m.director_id == p.id).count() as u64;
            let acted = movies
                .iter()
                .filter(|m| m.actor_ids.contains(&p.id))
                .count() as u64;
            PersonRecord {
                id: p.id,
                first_name: p.first_name,
                last_name: p.last_name,
                directed,
                acted,
            }
        });

        paginate(records, page).collect()
    }
}

fn check_id(id: i64) -> Result<()> {
    if id < 0 {
        return Err(ServiceError::Invalid("Id must not be negative".to_string()));
    }
    Ok(())
}

/// Entity-level validation for create and update.
fn validate_person(person: &Person) -> Result<()> {
    if person.first_name.trim().is_empty() {
        return Err(ServiceError::Invalid(
            "First name cannot be blank".to_string(),
        ));
    }
    if person.first_name.chars().count() > MAX_FIRST_NAME_LENGTH {
        return Err(ServiceError::Invalid(format!(
            "Maximum first name length is {MAX_FIRST_NAME_LENGTH}"
        )));
    }
    if person.last_name.trim().is_empty() {
        return Err(ServiceError::Invalid(
            "Last name cannot be blank".to_string(),
        ));
    }
    if person.last_name.chars().count() > MAX_LAST_NAME_LENGTH {
        return Err(ServiceError::Invalid(format!(
            "Maximum last name length is {MAX_LAST_NAME_LENGTH}"
        )));
    }
    if person.birth_date > Local::now().date_naive() {
        return Err(ServiceError::Invalid(
            "Birth date cannot be in the future".to_string(),
        ));
    }
    Ok(())
}
