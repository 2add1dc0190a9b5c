//! Background job scheduler and job implementations.

mod batch_match;
mod scheduler;

pub use batch_match::BatchMatchJob;
pub use scheduler::JobScheduler;
#[allow(unused_imports)] // Available to future jobs
pub use scheduler::{Job, JobFrequency};
