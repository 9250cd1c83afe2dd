pub mod index;
pub mod schedule;
pub mod status;
