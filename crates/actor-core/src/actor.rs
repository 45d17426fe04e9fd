//! The performer

use crate::ability::{Ability, AbilityRegistry};
use crate::errors::ScreenplayError;
use crate::performable::{AbilityNeed, Performable, StepKind};
use crate::question::{Expectation, Question};
use crate::trace::{Trace, TraceRecorder};
use parking_lot::Mutex;
use screenplay_core_types::AbilityKind;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A named performer.
///
/// An actor owns its abilities, so granting or swapping one needs `&mut`.
/// Performing only needs `&self`: steps run one after another on the
/// caller's task, and the actor records each into its trace.
pub struct Actor {
    name: String,
    abilities: AbilityRegistry,
    notes: Mutex<HashMap<String, Arc<dyn Any + Send + Sync>>>,
    trace: Mutex<TraceRecorder>,
}

impl Actor {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            abilities: AbilityRegistry::new(),
            notes: Mutex::new(HashMap::new()),
            trace: Mutex::new(TraceRecorder::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assign_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Builder form of [`Actor::can`].
    pub fn who_can<A: Ability>(mut self, ability: A) -> Self {
        self.can(ability);
        self
    }

    /// Grant an ability, replacing any ability of the same kind.
    pub fn can<A: Ability>(&mut self, ability: A) -> &mut Self {
        let replaced = self.abilities.grant(ability);
        debug!(actor = %self.name, ability = A::NAME, replaced, "ability granted");
        self
    }

    /// Grant an ability instance that other actors may also hold.
    pub fn can_shared<A: Ability>(&mut self, ability: Arc<A>) -> &mut Self {
        let replaced = self.abilities.grant_shared(ability);
        debug!(actor = %self.name, ability = A::NAME, replaced, "shared ability granted");
        self
    }

    pub fn forget_ability<A: Ability>(&mut self) -> bool {
        self.abilities.revoke::<A>()
    }

    /// The held ability of kind `A`, or `MissingAbility`.
    pub fn ability_to<A: Ability>(&self) -> Result<Arc<A>, ScreenplayError> {
        self.abilities
            .resolve::<A>()
            .ok_or_else(|| self.missing(A::kind(), None))
    }

    pub fn has_ability(&self, kind: &AbilityKind) -> bool {
        self.abilities.contains(kind)
    }

    pub fn abilities(&self) -> &AbilityRegistry {
        &self.abilities
    }

    fn missing(&self, kind: AbilityKind, step: Option<String>) -> ScreenplayError {
        ScreenplayError::MissingAbility {
            actor: self.name.clone(),
            kind: kind.name().to_string(),
            step,
        }
    }

    /// Fail on the first ability the step tree needs but the actor lacks,
    /// wrapped in the frames of the tasks leading to the step that needs it.
    fn check_step(&self, step: &dyn Performable) -> Result<(), ScreenplayError> {
        let lacking = self.abilities.missing(&step.required_abilities());
        let Some(kind) = lacking.first().copied() else {
            return Ok(());
        };
        let need = step
            .first_need_of(&kind)
            .unwrap_or_else(|| AbilityNeed::at(step.describe()));
        let err = self.missing(kind, Some(need.step));
        Err(need
            .frames
            .into_iter()
            .rev()
            .fold(err, |err, frame| err.in_step(frame.task, frame.index, frame.step)))
    }

    /// Perform `steps` in order, stopping at the first failure.
    pub async fn attempts_to(&self, steps: &[&dyn Performable]) -> Result<(), ScreenplayError> {
        for step in steps {
            self.perform(*step).await?;
        }
        Ok(())
    }

    /// Perform a single step: check its abilities, run it, trace it.
    pub async fn perform(&self, step: &dyn Performable) -> Result<(), ScreenplayError> {
        let description = step.describe();
        let idx = self.trace.lock().open(step.step_kind(), description.clone());
        info!(actor = %self.name, step = %description, "attempting");

        let result = match self.check_step(step) {
            Ok(()) => step.perform_as(self).await,
            Err(err) => Err(err),
        };

        self.trace.lock().close(idx, result.as_ref().map(|_| ()));
        if let Err(err) = &result {
            warn!(actor = %self.name, step = %description, error = %err, "step failed");
        }
        result
    }

    /// Evaluate a question against this actor's abilities.
    pub async fn asks_for<Q: Question>(&self, question: &Q) -> Result<Q::Answer, ScreenplayError> {
        let description = question.describe();
        let idx = self
            .trace
            .lock()
            .open(StepKind::Question, format!("asks for {}", description));

        let lacking = self.abilities.missing(&question.required_abilities());
        let result = match lacking.first() {
            Some(kind) => Err(self.missing(*kind, Some(format!("asks for {}", description)))),
            None => question.answered_by(self).await,
        };

        self.trace.lock().close(idx, result.as_ref().map(|_| ()));
        if let Ok(answer) = &result {
            debug!(actor = %self.name, question = %description, answer = ?answer, "question answered");
        }
        result
    }

    /// Ask `question` and fail with `AssertionMismatch` unless `expectation` holds.
    pub async fn should_see_that<Q: Question>(
        &self,
        question: &Q,
        expectation: &Expectation<Q::Answer>,
    ) -> Result<(), ScreenplayError> {
        let answer = self.asks_for(question).await?;
        if expectation.is_met_by(&answer) {
            return Ok(());
        }
        Err(ScreenplayError::AssertionMismatch {
            actor: self.name.clone(),
            question: question.describe(),
            expected: expectation.describe().to_string(),
            actual: format!("{:?}", answer),
        })
    }

    /// Keep a value for later steps of this actor.
    pub fn remember<T: Any + Send + Sync>(&self, key: impl Into<String>, value: T) {
        self.notes.lock().insert(key.into(), Arc::new(value));
    }

    pub fn recall<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        let note = self.notes.lock().get(key).cloned()?;
        note.downcast::<T>().ok()
    }

    pub fn forget(&self, key: &str) -> bool {
        self.notes.lock().remove(key).is_some()
    }

    pub fn trace(&self) -> Trace {
        self.trace.lock().snapshot(&self.name)
    }

    pub fn clear_trace(&self) {
        self.trace.lock().clear();
    }
}

impl fmt::Debug for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actor")
            .field("name", &self.name)
            .field("abilities", &self.abilities.summaries())
            .finish()
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
