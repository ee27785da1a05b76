//! Person directory.
//!
//! Holds the names and bank details the payment flow needs. Payment
//! instruction creation looks IBANs up here; a person without one
//! cannot be paid.

use dashmap::DashMap;
use serde::Serialize;
use tahsis_shared::types::Person;

/// A directory entry for one person.
#[derive(Debug, Clone, Serialize)]
pub struct PersonRecord {
    /// The typed person key.
    pub person: Person,
    /// Display name.
    pub name: String,
    /// Bank account for payouts, if on file.
    pub iban: Option<String>,
}

/// Thread-safe person directory.
#[derive(Debug, Default)]
pub struct PersonDirectory {
    people: DashMap<Person, PersonRecord>,
}

impl PersonDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces a person's record. Blank IBANs are stored
    /// as absent.
    pub fn upsert(&self, person: Person, name: String, iban: Option<String>) -> PersonRecord {
        let record = PersonRecord {
            person,
            name,
            iban: iban.filter(|iban| !iban.trim().is_empty()),
        };
        self.people.insert(person, record.clone());
        record
    }

    /// Looks up a person's record.
    #[must_use]
    pub fn get(&self, person: Person) -> Option<PersonRecord> {
        self.people.get(&person).map(|entry| entry.clone())
    }

    /// Returns the person's IBAN, if on file.
    #[must_use]
    pub fn iban_of(&self, person: Person) -> Option<String> {
        self.people.get(&person).and_then(|entry| entry.iban.clone())
    }
}
