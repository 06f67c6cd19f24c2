//! RQG Damage - hit location, wound and health state resolution

pub mod ability;
pub mod combat;
pub mod core;
pub mod health;
