pub mod building;


pub use building::Building;
pub use building::BuildingError;
pub use building::BuildingEvent;
pub use building::BuildingState;
pub use building::CapacityReport;
