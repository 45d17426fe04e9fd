//! Error types for screenplay execution

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every way an actor's attempt can fail.
///
/// Failures raised inside a task arrive wrapped in [`ScreenplayError::StepFailed`]
/// frames, one per enclosing task. The wrapped error is never altered; use
/// [`ScreenplayError::kind`] or [`ScreenplayError::root_cause`] to look through
/// the frames.
#[derive(Debug, Error, Clone)]
pub enum ScreenplayError {
    /// The actor does not hold an ability a step requires
    #[error("{actor} does not have the ability to {kind}{}", needed_for(.step))]
    MissingAbility {
        actor: String,
        kind: String,
        /// The step that declared the ability, when known
        step: Option<String>,
    },

    /// A task factory rejected its parameters
    #[error("invalid parameters for task '{task}': {reason}")]
    InvalidTaskParameters { task: String, reason: String },

    /// The addressed element never appeared within the wait window
    #[error("{actor} could not find {target} within {waited_ms}ms while trying to {interaction}")]
    TargetNotFound {
        actor: String,
        interaction: String,
        target: String,
        waited_ms: u64,
    },

    /// The action did not complete within its bound
    #[error("{actor} timed out after {timeout_ms}ms while trying to {interaction} ({target})")]
    ActionTimeout {
        actor: String,
        interaction: String,
        target: String,
        timeout_ms: u64,
    },

    /// A question's answer did not meet the expectation
    #[error("{actor} expected {question} {expected}, but it was {actual}")]
    AssertionMismatch {
        actor: String,
        question: String,
        expected: String,
        actual: String,
    },

    /// The driver or client reported a failure that is neither a missing target nor a timeout
    #[error("{actor} failed to {interaction}: {reason}")]
    ActionFailed {
        actor: String,
        interaction: String,
        reason: String,
    },

    /// A step inside a task failed
    #[error("task '{task}' failed at step {} ({step}): {source}", .index + 1)]
    StepFailed {
        task: String,
        index: usize,
        step: String,
        #[source]
        source: Box<ScreenplayError>,
    },
}

fn needed_for(step: &Option<String>) -> String {
    match step {
        Some(step) => format!(", needed to perform '{}'", step),
        None => String::new(),
    }
}

/// Failure categories, independent of task nesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    MissingAbility,
    InvalidTaskParameters,
    TargetNotFound,
    ActionTimeout,
    AssertionMismatch,
    ActionFailed,
}

/// One level of task context around a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFrame {
    pub task: String,
    pub index: usize,
    pub step: String,
}

impl ScreenplayError {
    /// Wrap a child failure with the task and step it happened in.
    pub fn in_step(self, task: impl Into<String>, index: usize, step: impl Into<String>) -> Self {
        ScreenplayError::StepFailed {
            task: task.into(),
            index,
            step: step.into(),
            source: Box::new(self),
        }
    }

    /// The original failure, with all task frames removed.
    pub fn root_cause(&self) -> &ScreenplayError {
        let mut current = self;
        while let ScreenplayError::StepFailed { source, .. } = current {
            current = source.as_ref();
        }
        current
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ScreenplayError::MissingAbility { .. } => FailureKind::MissingAbility,
            ScreenplayError::InvalidTaskParameters { .. } => FailureKind::InvalidTaskParameters,
            ScreenplayError::TargetNotFound { .. } => FailureKind::TargetNotFound,
            ScreenplayError::ActionTimeout { .. } => FailureKind::ActionTimeout,
            ScreenplayError::AssertionMismatch { .. } => FailureKind::AssertionMismatch,
            ScreenplayError::ActionFailed { .. } => FailureKind::ActionFailed,
            ScreenplayError::StepFailed { source, .. } => source.kind(),
        }
    }

    /// Task frames from the outermost task inwards.
    pub fn frames(&self) -> Vec<StepFrame> {
        let mut frames = Vec::new();
        let mut current = self;
        while let ScreenplayError::StepFailed {
            task,
            index,
            step,
            source,
        } = current
        {
            frames.push(StepFrame {
                task: task.clone(),
                index: *index,
                step: step.clone(),
            });
            current = source.as_ref();
        }
        frames
    }

    pub fn invalid_parameters(task: impl Into<String>, reason: impl Into<String>) -> Self {
        ScreenplayError::InvalidTaskParameters {
            task: task.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing() -> ScreenplayError {
        ScreenplayError::MissingAbility {
            actor: "Anna".to_string(),
            kind: "call an API".to_string(),
            step: Some("gets /posts/1".to_string()),
        }
    }

    #[test]
    fn step_frames_preserve_the_root_cause() {
        let err = missing()
            .in_step("fetch post", 0, "gets /posts/1")
            .in_step("check feed", 2, "fetch post");

        assert_eq!(err.kind(), FailureKind::MissingAbility);
        assert!(matches!(
            err.root_cause(),
            ScreenplayError::MissingAbility { kind, .. } if kind == "call an API"
        ));

        let frames = err.frames();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].task, "check feed");
        assert_eq!(frames[1].step, "gets /posts/1");
    }

    #[test]
    fn display_names_actor_step_and_cause() {
        let err = missing().in_step("fetch post", 1, "gets /posts/1");
        assert_eq!(
            err.to_string(),
            "task 'fetch post' failed at step 2 (gets /posts/1): Anna does not have the ability to call an API, needed to perform 'gets /posts/1'"
        );

        let bare = ScreenplayError::MissingAbility {
            actor: "Anna".to_string(),
            kind: "browse the web".to_string(),
            step: None,
        };
        assert_eq!(bare.to_string(), "Anna does not have the ability to browse the web");
    }
}
