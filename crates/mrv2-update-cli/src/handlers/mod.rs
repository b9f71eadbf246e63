//! One handler per subcommand.

pub mod check;
pub mod locate;
pub mod platform;
pub mod update;
