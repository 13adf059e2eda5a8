// Classroom Operations - Absence Workflow Core
//
// This crate provides the backend for reporting absences against scheduled
// sessions and deciding them exactly once, with every change audited.
// Architecture follows domain-driven design: domains/*/{models,data,events,actions}.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
