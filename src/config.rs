/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::scenario::Step;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug)]
pub struct Config {
    pub building: BuildingConfig,
    #[serde(default)]
    pub lift: LiftConfig,
    #[serde(default)]
    pub people: Vec<PersonConfig>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct BuildingConfig {
    pub name: String,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default = "default_floors")]
    pub floors: u8,
    pub lifts: usize,
}

/// Capacity limits shared by every lift in the building.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct LiftConfig {
    #[serde(default = "default_max_passengers")]
    pub max_passengers: usize,
    /// Kilograms.
    #[serde(default = "default_max_weight")]
    pub max_weight: u32,
}

#[derive(Deserialize, Clone, Debug)]
pub struct PersonConfig {
    pub name: String,
    #[serde(default)]
    pub age: u64,
    pub weight: u32,
    #[serde(default)]
    pub destination: u8,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

impl Default for LiftConfig {
    fn default() -> Self {
        LiftConfig {
            max_passengers: default_max_passengers(),
            max_weight: default_max_weight(),
        }
    }
}

fn default_floors() -> u8 {
    1
}

fn default_max_passengers() -> usize {
    8
}

fn default_max_weight() -> u32 {
    800
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&config_str)
}

pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /**
     * Checks the parts of the configuration serde cannot express.
     *
     * Every floor mentioned must exist, names must be unique, and steps may only
     * refer to declared people and lifts.
     */
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floors = self.building.floors;
        if floors == 0 {
            return Err(invalid("building must have at least one floor"));
        }
        if self.lift.max_passengers == 0 {
            return Err(invalid("lifts must carry at least one passenger"));
        }

        let mut names = HashSet::new();
        for person in &self.people {
            if !names.insert(person.name.as_str()) {
                return Err(invalid(format!("person '{}' is declared twice", person.name)));
            }
            if person.destination >= floors {
                return Err(invalid(format!(
                    "destination {} of '{}' is outside 0..{}",
                    person.destination, person.name, floors
                )));
            }
        }

        for (index, step) in self.steps.iter().enumerate() {
            match step {
                Step::Catch { person } => {
                    if !names.contains(person.as_str()) {
                        return Err(invalid(format!("step {}: unknown person '{}'", index, person)));
                    }
                }
                Step::Travel { lift, floor } => {
                    if *lift >= self.building.lifts {
                        return Err(invalid(format!("step {}: unknown lift {}", index, lift)));
                    }
                    if *floor >= floors {
                        return Err(invalid(format!(
                            "step {}: floor {} is outside 0..{}",
                            index, floor, floors
                        )));
                    }
                }
                Step::Destination { person, floor } => {
                    if !names.contains(person.as_str()) {
                        return Err(invalid(format!("step {}: unknown person '{}'", index, person)));
                    }
                    if *floor >= floors {
                        return Err(invalid(format!(
                            "step {}: floor {} is outside 0..{}",
                            index, floor, floors
                        )));
                    }
                }
                Step::Exit => (),
            }
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}
