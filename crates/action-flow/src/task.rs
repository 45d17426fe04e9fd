//! Tasks and their builder

use actor_core::{AbilityKind, AbilityNeed, Actor, Performable, ScreenplayError, StepKind};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A named, fixed, ordered composition of performables.
#[derive(Clone)]
pub struct Task {
    name: String,
    description: String,
    steps: Vec<Arc<dyn Performable>>,
}

impl Task {
    pub fn named(name: impl Into<String>) -> TaskBuilder {
        TaskBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Arc<dyn Performable>] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Descriptions of the direct steps, in execution order.
    pub fn outline(&self) -> Vec<String> {
        self.steps.iter().map(|step| step.describe()).collect()
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("steps", &self.outline())
            .finish()
    }
}

#[async_trait]
impl Performable for Task {
    fn describe(&self) -> String {
        self.description.clone()
    }

    fn step_kind(&self) -> StepKind {
        StepKind::Task
    }

    fn required_abilities(&self) -> Vec<AbilityKind> {
        let mut kinds: Vec<AbilityKind> = Vec::new();
        for kind in self.steps.iter().flat_map(|step| step.required_abilities()) {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        kinds
    }

    fn first_need_of(&self, kind: &AbilityKind) -> Option<AbilityNeed> {
        self.steps.iter().enumerate().find_map(|(index, step)| {
            step.first_need_of(kind)
                .map(|need| need.within(&self.name, index, step.describe()))
        })
    }

    async fn perform_as(&self, actor: &Actor) -> Result<(), ScreenplayError> {
        debug!(actor = %actor, task = %self.name, steps = self.steps.len(), "Executing task");
        for (index, step) in self.steps.iter().enumerate() {
            actor
                .perform(step.as_ref())
                .await
                .map_err(|err| err.in_step(&self.name, index, step.describe()))?;
        }
        Ok(())
    }
}

/// Collects the steps and parameter checks of a [`Task`].
///
/// Parameter problems are gathered while building and reported together by
/// [`TaskBuilder::build`], so an invalid task never exists and never runs.
pub struct TaskBuilder {
    name: String,
    description: Option<String>,
    steps: Vec<Arc<dyn Performable>>,
    problems: Vec<String>,
}

impl TaskBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            steps: Vec::new(),
            problems: Vec::new(),
        }
    }

    /// Narration used in traces. Defaults to the task name.
    pub fn describe_as(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Record a parameter problem unless `holds`.
    pub fn require(mut self, holds: bool, problem: impl Into<String>) -> Self {
        if !holds {
            self.problems.push(problem.into());
        }
        self
    }

    pub fn then(mut self, step: impl Performable + 'static) -> Self {
        self.steps.push(Arc::new(step));
        self
    }

    pub fn then_shared(mut self, step: Arc<dyn Performable>) -> Self {
        self.steps.push(step);
        self
    }

    /// Add `step` only when `condition` holds. Decided now, not when the task runs.
    pub fn then_if(self, condition: bool, step: impl Performable + 'static) -> Self {
        if condition {
            self.then(step)
        } else {
            self
        }
    }

    pub fn build(self) -> Result<Task, ScreenplayError> {
        let mut problems = self.problems;
        if self.name.trim().is_empty() {
            problems.push("task name must not be empty".to_string());
        }
        if self.steps.is_empty() {
            problems.push("a task needs at least one step".to_string());
        }
        if !problems.is_empty() {
            return Err(ScreenplayError::invalid_parameters(
                self.name,
                problems.join("; "),
            ));
        }
        Ok(Task {
            description: self.description.unwrap_or_else(|| self.name.clone()),
            name: self.name,
            steps: self.steps,
        })
    }
}
