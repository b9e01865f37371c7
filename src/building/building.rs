/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, warn};
use serde::Serialize;
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{BuildingConfig, LiftConfig};
use crate::lift::{Lift, LiftId, LiftState, RefusalReason};
use crate::shared::{Person, PersonId};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Debug, Error, PartialEq)]
pub enum BuildingError {
    #[error("person {0} is not an occupant of the building")]
    NotAnOccupant(PersonId),
    #[error("person {0} is riding a lift")]
    AlreadyInLift(PersonId),
    #[error("person {0} is not in the building")]
    UnknownPerson(PersonId),
    #[error("the building has no lifts")]
    NoLifts,
    #[error("there is no {0}")]
    UnknownLift(LiftId),
    #[error("floor {floor} is outside 0..{floors}")]
    FloorOutOfRange { floor: u8, floors: u8 },
    #[error("boarding refused: {0}")]
    Boarding(RefusalReason),
}

/// Notifications sent to the optional event channel as the simulation changes.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum BuildingEvent {
    LiftMoved { lift: LiftId, from: u8, to: u8 },
    Boarded { lift: LiftId, person: PersonId },
    BoardingRefused { lift: LiftId, person: PersonId, reason: RefusalReason },
    Alighted { lift: LiftId, person: PersonId, floor: u8 },
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CurrentLoad {
    pub passengers: usize,
    pub weight: u64,
}

/// Summed limits and load of every lift in the building.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapacityReport {
    #[serde(rename = "maxPassengers")]
    pub max_passengers: usize,
    #[serde(rename = "maxWeight")]
    pub max_weight: u64,
    pub current: CurrentLoad,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BuildingState {
    pub name: String,
    pub postcode: Option<String>,
    pub floors: u8,
    pub lifts: Vec<LiftState>,
    pub occupants: Vec<Person>,
}

/**
 * Owns the lifts and the people standing on its floors.
 *
 * A person is either an occupant (on a floor) or a passenger (inside exactly one
 * lift), never both. Every operation that moves people preserves that split.
 *
 * # Fields
 * - `name`:        Building name.
 * - `postcode`:    Optional postcode.
 * - `floors`:      Number of floors; valid floors are `0..floors`.
 * - `lifts`:       Lifts in dispatch order. A lift's id is its index here.
 * - `occupants`:   People on a floor, in arrival order.
 * - `event_tx`:    Optional sink for `BuildingEvent`s.
 */
pub struct Building {
    name: String,
    postcode: Option<String>,
    floors: u8,
    lifts: Vec<Lift>,
    occupants: Vec<Person>,
    event_tx: Option<cbc::Sender<BuildingEvent>>,
}

impl Building {
    pub fn new(config: &BuildingConfig, lift_config: &LiftConfig) -> Building {
        let lifts = (0..config.lifts)
            .map(|i| Lift::new(LiftId(i), lift_config))
            .collect();

        Building {
            name: config.name.clone(),
            postcode: config.postcode.clone(),
            floors: config.floors.max(1),
            lifts,
            occupants: Vec::new(),
            event_tx: None,
        }
    }

    pub fn with_events(mut self, event_tx: cbc::Sender<BuildingEvent>) -> Building {
        self.event_tx = Some(event_tx);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn postcode(&self) -> Option<&str> {
        self.postcode.as_deref()
    }

    pub fn floors(&self) -> u8 {
        self.floors
    }

    pub fn lifts(&self) -> &[Lift] {
        &self.lifts
    }

    pub fn lift(&self, id: LiftId) -> Option<&Lift> {
        self.lifts.get(id.0)
    }

    pub fn occupants(&self) -> &[Person] {
        &self.occupants
    }

    pub fn is_occupant(&self, id: PersonId) -> bool {
        self.occupants.iter().any(|p| p.id == id)
    }

    /// The lift `id` is riding, if any.
    pub fn lift_of(&self, id: PersonId) -> Option<LiftId> {
        self.lifts.iter().find(|l| l.contains(id)).map(|l| l.id())
    }

    /// Looks a person up wherever they are.
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.occupants
            .iter()
            .chain(self.lifts.iter().flat_map(|l| l.passengers()))
            .find(|p| p.id == id)
    }

    /**
     * Adds `person` to the occupants.
     *
     * Returns `Ok(false)` if somebody with the same id is already an occupant, in
     * which case the occupant list is left as it was.
     */
    pub fn entered_by(&mut self, person: Person) -> Result<bool, BuildingError> {
        if self.lift_of(person.id).is_some() {
            return Err(BuildingError::AlreadyInLift(person.id));
        }
        self.check_floor(person.floor)?;
        self.check_floor(person.destination)?;

        if self.is_occupant(person.id) {
            return Ok(false);
        }
        debug!("{} entered {} on floor {}", person, self.name, person.floor);
        self.occupants.push(person);
        Ok(true)
    }

    pub fn vacated_by(&mut self, id: PersonId) -> Option<Person> {
        let index = self.occupant_index(id)?;
        Some(self.occupants.remove(index))
    }

    /**
     * Sends the nearest lift to `floor` and returns it.
     *
     * Distance is `|lift.floor - floor|`; ties go to the lift that comes first in
     * the lift list.
     */
    pub fn call_lift(&mut self, floor: u8) -> Result<LiftId, BuildingError> {
        self.check_floor(floor)?;

        let id = self
            .lifts
            .iter()
            .min_by_key(|l| l.distance_to(floor))
            .map(|l| l.id())
            .ok_or(BuildingError::NoLifts)?;

        self.move_lift(id, floor);
        Ok(id)
    }

    pub fn travel_lift(&mut self, id: LiftId, floor: u8) -> Result<(), BuildingError> {
        if id.0 >= self.lifts.len() {
            return Err(BuildingError::UnknownLift(id));
        }
        self.check_floor(floor)?;
        self.move_lift(id, floor);
        Ok(())
    }

    /**
     * Dispatches a lift to an occupant and boards them.
     *
     * The lift is sent even if boarding is then refused. On refusal the person
     * stays an occupant in their original position.
     */
    pub fn catch_lift(&mut self, id: PersonId) -> Result<LiftId, BuildingError> {
        let index = self
            .occupant_index(id)
            .ok_or(BuildingError::NotAnOccupant(id))?;
        let floor = self.occupants[index].floor;

        let lift_id = self.call_lift(floor)?;
        let person = self.occupants.remove(index);

        match self.lifts[lift_id.0].enter(person) {
            Ok(()) => {
                debug!("person {} boarded {} on floor {}", id, lift_id, floor);
                self.emit(BuildingEvent::Boarded {
                    lift: lift_id,
                    person: id,
                });
                Ok(lift_id)
            }
            Err(rejected) => {
                warn!("{} could not board {}: {}", rejected.person, lift_id, rejected.reason);
                let reason = rejected.reason;
                self.occupants.insert(index, rejected.person);
                self.emit(BuildingEvent::BoardingRefused {
                    lift: lift_id,
                    person: id,
                    reason,
                });
                Err(BuildingError::Boarding(reason))
            }
        }
    }

    /**
     * Lets out every passenger who has reached their destination.
     *
     * Returns the ids of the people who got out, lift by lift in boarding order.
     */
    pub fn exit_lifts(&mut self) -> Vec<PersonId> {
        let mut events = Vec::new();

        for lift in self.lifts.iter_mut() {
            let floor = lift.floor();
            for mut person in lift.unload_arrivals() {
                person.floor = floor;
                events.push(BuildingEvent::Alighted {
                    lift: lift.id(),
                    person: person.id,
                    floor,
                });
                debug!("{} left {} on floor {}", person, lift.id(), floor);
                debug_assert!(
                    !self.occupants.iter().any(|p| p.id == person.id),
                    "{} is both riding and on a floor",
                    person
                );
                self.occupants.push(person);
            }
        }

        let exited = events
            .iter()
            .filter_map(|e| match e {
                BuildingEvent::Alighted { person, .. } => Some(*person),
                _ => None,
            })
            .collect();

        for event in events {
            self.emit(event);
        }
        exited
    }

    /// Changes where somebody wants to go, whether they are on a floor or riding.
    pub fn set_destination(&mut self, id: PersonId, floor: u8) -> Result<(), BuildingError> {
        self.check_floor(floor)?;

        let person = match self.occupants.iter_mut().find(|p| p.id == id) {
            Some(person) => person,
            None => self
                .lifts
                .iter_mut()
                .find_map(|l| l.passenger_mut(id))
                .ok_or(BuildingError::UnknownPerson(id))?,
        };

        person.destination = floor;
        Ok(())
    }

    pub fn capacity(&self) -> CapacityReport {
        self.lifts
            .iter()
            .fold(CapacityReport::default(), |mut report, lift| {
                report.max_passengers += lift.max_passengers();
                report.max_weight += u64::from(lift.max_weight());
                report.current.passengers += lift.passenger_count();
                report.current.weight += lift.total_weight();
                report
            })
    }

    pub fn snapshot(&self) -> BuildingState {
        BuildingState {
            name: self.name.clone(),
            postcode: self.postcode.clone(),
            floors: self.floors,
            lifts: self.lifts.iter().map(|l| l.state()).collect(),
            occupants: self.occupants.clone(),
        }
    }

    fn move_lift(&mut self, id: LiftId, floor: u8) {
        let lift = &mut self.lifts[id.0];
        let from = lift.floor();
        lift.travel_to(floor);

        if from != floor {
            debug!("{} moved from floor {} to {}", id, from, floor);
            self.emit(BuildingEvent::LiftMoved {
                lift: id,
                from,
                to: floor,
            });
        }
    }

    fn occupant_index(&self, id: PersonId) -> Option<usize> {
        self.occupants.iter().position(|p| p.id == id)
    }

    fn check_floor(&self, floor: u8) -> Result<(), BuildingError> {
        if floor >= self.floors {
            return Err(BuildingError::FloorOutOfRange {
                floor,
                floors: self.floors,
            });
        }
        Ok(())
    }

    fn emit(&self, event: BuildingEvent) {
        if let Some(tx) = &self.event_tx {
            let _ = tx.send(event);
        }
    }
}
