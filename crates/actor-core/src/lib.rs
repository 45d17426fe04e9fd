//! Actor core
//!
//! The composition model behind every screenplay workflow:
//! - [`Actor`]: a named performer holding at most one [`Ability`] per kind
//! - [`Performable`]: anything an actor can attempt (interactions and tasks)
//! - [`Question`]: a side-effect-free read, checked against an [`Expectation`]
//! - [`Trace`]: the ordered narration of everything an actor attempted

pub mod ability;
pub mod actor;
pub mod errors;
pub mod performable;
pub mod question;
pub mod trace;

pub use ability::{Ability, AbilityRegistry};
pub use actor::Actor;
pub use errors::{FailureKind, ScreenplayError, StepFrame};
pub use performable::{AbilityNeed, Performable, StepKind};
pub use question::{Expectation, Question};
pub use screenplay_core_types::AbilityKind;
pub use trace::{Outcome, Trace, TraceEntry};
