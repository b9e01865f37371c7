/* 3rd party libraries */
use clap::Parser;
use crossbeam_channel as cbc;
use log::info;
use std::path::PathBuf;

/* Custom libraries */
use lift_sim::building::{Building, BuildingEvent};
use lift_sim::config;
use lift_sim::scenario::Scenario;
use lift_sim::unwrap_or_exit;

/// Scripted lift simulation for a single building
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Building and scenario description
    #[clap(long, default_value = "config.toml")]
    config: PathBuf,

    /// Print the final building state as JSON
    #[clap(long)]
    json: bool,
}

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    // Load the configuration
    let config = unwrap_or_exit!(config::load_config(&args.config));

    // Building events are collected and logged once the run is over
    let (event_tx, event_rx) = cbc::unbounded::<BuildingEvent>();
    let mut building = Building::new(&config.building, &config.lift).with_events(event_tx);

    let scenario = Scenario::from_config(&config);
    unwrap_or_exit!(scenario.populate(&mut building));

    info!(
        "Running {} steps in {} ({} floors, {} lifts)",
        scenario.steps().len(),
        building.name(),
        building.floors(),
        building.lifts().len()
    );
    let report = scenario.run(&mut building);

    for event in event_rx.try_iter() {
        log::debug!("{:?}", event);
    }

    if args.json {
        let output = serde_json::json!({
            "report": report,
            "capacity": building.capacity(),
            "building": building.snapshot(),
        });
        println!("{}", unwrap_or_exit!(serde_json::to_string_pretty(&output)));
    } else {
        print_summary(&building);
    }

    if report.failures() > 0 {
        info!("{} of {} steps failed", report.failures(), report.outcomes.len());
    }
}

fn print_summary(building: &Building) {
    let capacity = building.capacity();

    println!("{}", building.name());
    if let Some(postcode) = building.postcode() {
        println!("{}", postcode);
    }
    println!(
        "Load: {}/{} passengers, {}/{} kg",
        capacity.current.passengers,
        capacity.max_passengers,
        capacity.current.weight,
        capacity.max_weight
    );

    for lift in building.lifts() {
        let names: Vec<&str> = lift.passengers().iter().map(|p| p.name.as_str()).collect();
        println!("  {} @ floor {}: [{}]", lift.id(), lift.floor(), names.join(", "));
    }
    for person in building.occupants() {
        println!("  {} on floor {} (going to {})", person.name, person.floor, person.destination);
    }
}
