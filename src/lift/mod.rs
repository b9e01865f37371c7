pub mod lift;


pub use lift::Lift;
pub use lift::LiftId;
pub use lift::LiftState;
pub use lift::RefusalReason;
pub use lift::Rejected;
