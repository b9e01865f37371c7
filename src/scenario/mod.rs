pub mod scenario;


pub use scenario::Outcome;
pub use scenario::Scenario;
pub use scenario::ScenarioReport;
pub use scenario::Step;
