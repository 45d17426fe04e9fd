//! Ordered narration of an actor's attempts

use crate::errors::{FailureKind, ScreenplayError};
use crate::performable::StepKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Running,
    Succeeded,
    Failed { kind: FailureKind, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEntry {
    /// Nesting level; top-level steps are 0
    pub depth: usize,

    pub kind: StepKind,

    pub description: String,

    pub outcome: Outcome,

    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub started_at: DateTime<Utc>,

    pub latency_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Trace {
    pub actor: String,
    pub entries: Vec<TraceEntry>,
}

impl Trace {
    pub fn descriptions(&self) -> Vec<&str> {
        self.entries
            .iter()
            .map(|entry| entry.description.as_str())
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &TraceEntry> {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.outcome, Outcome::Failed { .. }))
    }

    /// Indented, one line per step.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            let indent = "  ".repeat(entry.depth);
            let status = match &entry.outcome {
                Outcome::Running => "running".to_string(),
                Outcome::Succeeded => format!("ok {}ms", entry.latency_ms),
                Outcome::Failed { kind, .. } => format!("FAILED {:?}", kind),
            };
            let _ = writeln!(
                out,
                "{}{} {} [{}]",
                indent, self.actor, entry.description, status
            );
        }
        out
    }
}

/// Collects entries while steps run; nested steps open while their parent is still running.
pub(crate) struct TraceRecorder {
    entries: Vec<TraceEntry>,
    clocks: Vec<Instant>,
    depth: usize,
}

impl TraceRecorder {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            clocks: Vec::new(),
            depth: 0,
        }
    }

    pub(crate) fn open(&mut self, kind: StepKind, description: String) -> usize {
        self.entries.push(TraceEntry {
            depth: self.depth,
            kind,
            description,
            outcome: Outcome::Running,
            started_at: Utc::now(),
            latency_ms: 0,
        });
        self.clocks.push(Instant::now());
        self.depth += 1;
        self.entries.len() - 1
    }

    pub(crate) fn close(&mut self, idx: usize, result: Result<(), &ScreenplayError>) {
        self.depth = self.depth.saturating_sub(1);
        let latency_ms = self.clocks[idx].elapsed().as_millis() as u64;
        let entry = &mut self.entries[idx];
        entry.latency_ms = latency_ms;
        entry.outcome = match result {
            Ok(()) => Outcome::Succeeded,
            Err(err) => Outcome::Failed {
                kind: err.kind(),
                message: err.root_cause().to_string(),
            },
        };
    }

    pub(crate) fn snapshot(&self, actor: &str) -> Trace {
        Trace {
            actor: actor.to_string(),
            entries: self.entries.clone(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.clocks.clear();
        self.depth = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_entries_render_indented() {
        let mut recorder = TraceRecorder::new();
        let task = recorder.open(StepKind::Task, "logs in".to_string());
        let step = recorder.open(StepKind::Interaction, "opens /".to_string());
        recorder.close(step, Ok(()));
        recorder.close(task, Ok(()));

        let trace = recorder.snapshot("Admin");
        assert_eq!(trace.entries[0].depth, 0);
        assert_eq!(trace.entries[1].depth, 1);
        let rendered = trace.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert!(lines[0].starts_with("Admin logs in [ok"));
        assert!(lines[1].starts_with("  Admin opens / [ok"));
    }

    #[test]
    fn failures_keep_the_root_message() {
        let mut recorder = TraceRecorder::new();
        let idx = recorder.open(StepKind::Interaction, "clicks".to_string());
        let err = ScreenplayError::ActionFailed {
            actor: "Anna".to_string(),
            interaction: "click".to_string(),
            reason: "boom".to_string(),
        }
        .in_step("task", 0, "clicks");
        recorder.close(idx, Err(&err));

        let trace = recorder.snapshot("Anna");
        assert_eq!(trace.failures().count(), 1);
        assert_eq!(
            trace.entries[0].outcome,
            Outcome::Failed {
                kind: FailureKind::ActionFailed,
                message: "Anna failed to click: boom".to_string(),
            }
        );
    }
}
