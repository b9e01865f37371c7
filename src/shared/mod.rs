pub mod macros;
pub mod structs;


pub use structs::Person;
pub use structs::PersonId;
