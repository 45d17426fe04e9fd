//! Flow composition
//!
//! Tasks are named, fixed sequences of performables. Their steps are decided
//! when the task is built and never change while it runs; a failing step
//! stops the task and surfaces wrapped with the task and step it happened in.

pub mod ensure;
pub mod strategies;
pub mod task;

pub use ensure::Ensure;
pub use strategies::RetryPolicy;
pub use task::{Task, TaskBuilder};
