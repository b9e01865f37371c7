/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct PersonId(pub u32);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/**
 * A person moving around the building.
 *
 * People are passive records; the building and its lifts decide where they are.
 * Everybody starts out on the ground floor.
 *
 * # Fields
 * - `id`:          Identity used by the building to track the person.
 * - `name`:        Display name.
 * - `age`:         Age in years.
 * - `weight`:      Weight in kilograms, counted against lift weight limits.
 * - `floor`:       The floor the person is currently on.
 * - `destination`: The floor the person wants to get off at.
 */
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub age: u64,
    pub weight: u32,
    pub floor: u8,
    pub destination: u8,
}

impl Person {
    pub fn new(id: PersonId, name: impl Into<String>, weight: u32) -> Person {
        Person {
            id,
            name: name.into(),
            age: 0,
            weight,
            floor: 0,
            destination: 0,
        }
    }

    pub fn with_age(mut self, age: u64) -> Person {
        self.age = age;
        self
    }

    pub fn with_destination(mut self, destination: u8) -> Person {
        self.destination = destination;
        self
    }

    pub fn has_arrived(&self, floor: u8) -> bool {
        self.destination == floor
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
