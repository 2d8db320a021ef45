pub mod actor;
pub mod equipment;
pub mod health;
pub mod tilemap;
pub mod timer;
