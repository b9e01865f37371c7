/***************************************/
/*              Modules                */
/***************************************/
pub mod building;
pub mod config;
pub mod lift;
pub mod scenario;
pub mod shared;

mod config_tests;
