/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::building::{Building, BuildingError};
use crate::config::Config;
use crate::lift::LiftId;
use crate::shared::{Person, PersonId};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Step {
    /// Fetch a lift for the named person and board it.
    Catch { person: String },
    /// Drive a lift to a floor.
    Travel { lift: usize, floor: u8 },
    /// Let everybody who has arrived out of every lift.
    Exit,
    /// Change where the named person wants to go.
    Destination { person: String, floor: u8 },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum Outcome {
    Boarded { lift: LiftId },
    Travelled { lift: LiftId, floor: u8 },
    Exited { people: Vec<PersonId> },
    DestinationSet { floor: u8 },
    Failed { error: String },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StepOutcome {
    pub step: Step,
    pub outcome: Outcome,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct ScenarioReport {
    pub outcomes: Vec<StepOutcome>,
}

impl ScenarioReport {
    pub fn failures(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Failed { .. }))
            .count()
    }
}

/**
 * A scripted run through the building.
 *
 * People are numbered in the order they are declared, starting at 1. Steps refer
 * to people by name. A failing step is logged and recorded; the run continues
 * with the next step.
 */
pub struct Scenario {
    people: Vec<Person>,
    steps: Vec<Step>,
    ids: HashMap<String, PersonId>,
}

impl Scenario {
    pub fn new(people: Vec<Person>, steps: Vec<Step>) -> Scenario {
        let ids = people.iter().map(|p| (p.name.clone(), p.id)).collect();
        Scenario { people, steps, ids }
    }

    pub fn from_config(config: &Config) -> Scenario {
        let people = config
            .people
            .iter()
            .zip(1..)
            .map(|(p, id)| {
                Person::new(PersonId(id), p.name.clone(), p.weight)
                    .with_age(p.age)
                    .with_destination(p.destination)
            })
            .collect();

        Scenario::new(people, config.steps.clone())
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Puts every declared person on the ground floor of `building`.
    pub fn populate(&self, building: &mut Building) -> Result<(), BuildingError> {
        for person in &self.people {
            building.entered_by(person.clone())?;
        }
        info!("{} people entered {}", self.people.len(), building.name());
        Ok(())
    }

    pub fn run(&self, building: &mut Building) -> ScenarioReport {
        let mut report = ScenarioReport::default();

        for (index, step) in self.steps.iter().enumerate() {
            let outcome = match self.apply(building, step) {
                Ok(outcome) => {
                    info!("step {}: {:?} -> {:?}", index, step, outcome);
                    outcome
                }
                Err(e) => {
                    warn!("step {}: {:?} failed: {}", index, step, e);
                    Outcome::Failed {
                        error: e.to_string(),
                    }
                }
            };

            report.outcomes.push(StepOutcome {
                step: step.clone(),
                outcome,
            });
        }

        report
    }

    fn apply(&self, building: &mut Building, step: &Step) -> Result<Outcome, ScenarioError> {
        match step {
            Step::Catch { person } => {
                let id = self.lookup(person)?;
                let lift = building.catch_lift(id)?;
                Ok(Outcome::Boarded { lift })
            }
            Step::Travel { lift, floor } => {
                let lift = LiftId(*lift);
                building.travel_lift(lift, *floor)?;
                Ok(Outcome::Travelled {
                    lift,
                    floor: *floor,
                })
            }
            Step::Exit => Ok(Outcome::Exited {
                people: building.exit_lifts(),
            }),
            Step::Destination { person, floor } => {
                let id = self.lookup(person)?;
                building.set_destination(id, *floor)?;
                Ok(Outcome::DestinationSet { floor: *floor })
            }
        }
    }

    fn lookup(&self, name: &str) -> Result<PersonId, ScenarioError> {
        self.ids
            .get(name)
            .copied()
            .ok_or_else(|| ScenarioError::UnknownName(name.to_string()))
    }
}

#[derive(Debug, thiserror::Error)]
enum ScenarioError {
    #[error("nobody called '{0}' is in the scenario")]
    UnknownName(String),
    #[error(transparent)]
    Building(#[from] BuildingError),
}
