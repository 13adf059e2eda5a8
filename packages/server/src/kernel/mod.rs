//! Kernel module - server infrastructure and dependencies.

pub mod absence_store;
pub mod audit;
pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use absence_store::PostgresAbsenceStore;
pub use audit::{PostgresAuditSink, TracingAuditSink};
pub use deps::{ServerDeps, WorkflowPolicy};
pub use test_dependencies::{FailingAuditSink, MemoryAbsenceStore, SpyAuditSink, TestDependencies};
pub use traits::*;
