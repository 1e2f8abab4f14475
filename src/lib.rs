//! Banker's-algorithm safety check over a fixed snapshot of processes and
//! reusable resources.
//!
//! [`need::compute_need`] derives remaining demand, [`safety::is_safe`]
//! searches for a completion order, and [`scenario::ScenarioRunner`] drives
//! several available-vector trials against one snapshot.

pub mod error;
pub mod model;
pub mod need;
pub mod report;
pub mod safety;
pub mod scenario;
mod scratch;

pub use error::{BankerError, Result, Shape};
pub use model::{Matrix, ProcessId, ResourceVector, Units};
pub use need::compute_need;
pub use safety::{SafetyVerdict, is_safe, replay_sequence};
pub use scenario::{Scenario, ScenarioRunner, Trial};
