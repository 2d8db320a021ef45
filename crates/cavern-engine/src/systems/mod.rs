pub mod movement;
pub mod combat;
pub mod patrol;
pub mod snapshot;
