//! Command implementations.

pub mod extract;
pub mod generate;
pub mod run;
pub mod setup;
pub mod verify;

pub use self::extract::execute_extract;
pub use self::generate::execute_generate;
pub use self::run::execute_run;
pub use self::setup::execute_setup;
pub use self::verify::execute_verify;
