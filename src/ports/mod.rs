//! Port traits: the seams between domain logic and I/O.

pub mod chart_port;
pub mod config_port;
pub mod data_port;
