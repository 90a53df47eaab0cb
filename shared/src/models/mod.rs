//! Closed domain enumerations

pub mod audit;
pub mod dining_table;
pub mod menu;
pub mod order;
pub mod reservation;
pub mod role;
