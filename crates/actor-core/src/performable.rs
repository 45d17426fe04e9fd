use crate::actor::Actor;
use crate::errors::{ScreenplayError, StepFrame};
use async_trait::async_trait;
use screenplay_core_types::AbilityKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    Interaction,
    Task,
    Question,
}

/// Where inside a step an ability is first needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbilityNeed {
    /// Enclosing tasks, outermost first
    pub frames: Vec<StepFrame>,
    pub step: String,
}

impl AbilityNeed {
    pub fn at(step: impl Into<String>) -> Self {
        Self {
            frames: Vec::new(),
            step: step.into(),
        }
    }

    /// The same need seen from the task one level further out.
    pub fn within(mut self, task: impl Into<String>, index: usize, step: impl Into<String>) -> Self {
        self.frames.insert(
            0,
            StepFrame {
                task: task.into(),
                index,
                step: step.into(),
            },
        );
        self
    }
}

/// Something an actor can attempt.
///
/// Implementations must be stateless across runs: performing the same value
/// twice issues the same commands twice and never depends on an earlier run.
#[async_trait]
pub trait Performable: Send + Sync {
    /// Narration of the step, built from its own fields ("clicks on the login button").
    fn describe(&self) -> String;

    fn step_kind(&self) -> StepKind {
        StepKind::Interaction
    }

    /// Ability kinds that must be held before the step starts.
    ///
    /// Composite steps report the union of their children so nothing runs
    /// when any of them would fail on a missing ability.
    fn required_abilities(&self) -> Vec<AbilityKind> {
        Vec::new()
    }

    /// The first step, in execution order, that needs `kind`.
    ///
    /// Composite steps look through their children and report the path to it.
    fn first_need_of(&self, kind: &AbilityKind) -> Option<AbilityNeed> {
        self.required_abilities()
            .contains(kind)
            .then(|| AbilityNeed::at(self.describe()))
    }

    /// Carry out the step. Call [`Actor::perform`] rather than this directly
    /// so ability checks and tracing apply.
    async fn perform_as(&self, actor: &Actor) -> Result<(), ScreenplayError>;
}
