//! Port traits: the boundaries to external collaborators.

pub mod config_port;
pub mod data_port;
pub mod report_port;
