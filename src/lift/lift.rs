/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::LiftConfig;
use crate::shared::{Person, PersonId};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct LiftId(pub usize);

impl fmt::Display for LiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "lift {}", self.0)
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Error)]
#[serde(rename_all = "camelCase")]
pub enum RefusalReason {
    #[error("lift is full ({max} passengers)")]
    TooManyPassengers { max: usize },
    #[error("weight limit exceeded ({attempted} kg > {max} kg)")]
    WeightLimitExceeded { max: u32, attempted: u64 },
}

/// A refused boarding. The person is handed back to the caller untouched.
#[derive(Debug, Error)]
#[error("boarding refused: {reason}")]
pub struct Rejected {
    pub person: Person,
    pub reason: RefusalReason,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LiftState {
    pub id: LiftId,
    pub floor: u8,
    #[serde(rename = "maxPassengers")]
    pub max_passengers: usize,
    #[serde(rename = "maxWeight")]
    pub max_weight: u32,
    pub passengers: Vec<Person>,
}

/**
 * An elevator car with bounded capacity.
 *
 * The lift owns its passengers while they ride. Moving the lift moves everybody
 * inside it, so a passenger's floor always equals the lift's floor.
 *
 * # Fields
 * - `id`:              Position of the lift in the building's lift list.
 * - `floor`:           The floor the lift is currently at.
 * - `passengers`:      People currently inside, in boarding order.
 * - `max_passengers`:  Upper bound on `passengers.len()`.
 * - `max_weight`:      Upper bound on the summed passenger weight, in kilograms.
 */
#[derive(Debug, Clone)]
pub struct Lift {
    id: LiftId,
    floor: u8,
    passengers: Vec<Person>,
    max_passengers: usize,
    max_weight: u32,
}

impl Lift {
    pub fn new(id: LiftId, config: &LiftConfig) -> Lift {
        Lift {
            id,
            floor: 0,
            passengers: Vec::new(),
            max_passengers: config.max_passengers,
            max_weight: config.max_weight,
        }
    }

    pub fn id(&self) -> LiftId {
        self.id
    }

    pub fn floor(&self) -> u8 {
        self.floor
    }

    pub fn passengers(&self) -> &[Person] {
        &self.passengers
    }

    pub fn max_passengers(&self) -> usize {
        self.max_passengers
    }

    pub fn max_weight(&self) -> u32 {
        self.max_weight
    }

    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }

    /// Summed in `u64` so a full roster of heavy passengers cannot overflow.
    pub fn total_weight(&self) -> u64 {
        self.passengers.iter().map(|p| u64::from(p.weight)).sum()
    }

    pub fn is_full(&self) -> bool {
        self.passengers.len() >= self.max_passengers
    }

    pub fn contains(&self, id: PersonId) -> bool {
        self.passengers.iter().any(|p| p.id == id)
    }

    pub fn passenger_mut(&mut self, id: PersonId) -> Option<&mut Person> {
        self.passengers.iter_mut().find(|p| p.id == id)
    }

    pub fn distance_to(&self, floor: u8) -> u8 {
        self.floor.abs_diff(floor)
    }

    /**
     * Boards `person` if both limits still hold afterwards.
     *
     * The passenger count is checked before the weight. On refusal the person is
     * returned inside `Rejected` and the lift is left unchanged.
     */
    pub fn enter(&mut self, person: Person) -> Result<(), Rejected> {
        if let Some(reason) = self.refusal_for(&person) {
            return Err(Rejected { person, reason });
        }
        self.passengers.push(person);
        Ok(())
    }

    pub fn travel_to(&mut self, floor: u8) {
        self.floor = floor;
        for passenger in self.passengers.iter_mut() {
            passenger.floor = floor;
        }
    }

    pub fn leave(&mut self, id: PersonId) -> Option<Person> {
        let index = self.passengers.iter().position(|p| p.id == id)?;
        Some(self.passengers.remove(index))
    }

    /// Takes out every passenger whose destination is the current floor.
    pub fn unload_arrivals(&mut self) -> Vec<Person> {
        let floor = self.floor;
        let (arrived, staying): (Vec<Person>, Vec<Person>) = std::mem::take(&mut self.passengers)
            .into_iter()
            .partition(|p| p.has_arrived(floor));
        self.passengers = staying;
        arrived
    }

    pub fn state(&self) -> LiftState {
        LiftState {
            id: self.id,
            floor: self.floor,
            max_passengers: self.max_passengers,
            max_weight: self.max_weight,
            passengers: self.passengers.clone(),
        }
    }

    fn refusal_for(&self, person: &Person) -> Option<RefusalReason> {
        if self.is_full() {
            return Some(RefusalReason::TooManyPassengers {
                max: self.max_passengers,
            });
        }

        let attempted = self.total_weight() + u64::from(person.weight);
        if attempted > u64::from(self.max_weight) {
            return Some(RefusalReason::WeightLimitExceeded {
                max: self.max_weight,
                attempted,
            });
        }

        None
    }
}
