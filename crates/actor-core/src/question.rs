//! Questions and expectations

use crate::actor::Actor;
use crate::errors::ScreenplayError;
use async_trait::async_trait;
use screenplay_core_types::AbilityKind;
use std::fmt::Debug;

/// A side-effect-free read of system state.
#[async_trait]
pub trait Question: Send + Sync {
    type Answer: Debug + Send + Sync;

    /// Noun phrase for the value being read ("the text of the welcome banner").
    fn describe(&self) -> String;

    fn required_abilities(&self) -> Vec<AbilityKind> {
        Vec::new()
    }

    /// Read the answer. Must not change any resource the actor's abilities reach.
    async fn answered_by(&self, actor: &Actor) -> Result<Self::Answer, ScreenplayError>;
}

type Check<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// A described predicate over a question's answer.
pub struct Expectation<T> {
    description: String,
    check: Check<T>,
}

impl<T> Expectation<T> {
    pub fn new(
        description: impl Into<String>,
        check: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            description: description.into(),
            check: Box::new(check),
        }
    }

    pub fn describe(&self) -> &str {
        &self.description
    }

    pub fn is_met_by(&self, answer: &T) -> bool {
        (self.check)(answer)
    }
}

impl<T> Expectation<T>
where
    T: PartialEq + Debug + Send + Sync + 'static,
{
    pub fn equal_to(expected: T) -> Self {
        let description = format!("to equal {:?}", expected);
        Self::new(description, move |actual| *actual == expected)
    }

    pub fn not_equal_to(unexpected: T) -> Self {
        let description = format!("not to equal {:?}", unexpected);
        Self::new(description, move |actual| *actual != unexpected)
    }
}

impl Expectation<String> {
    pub fn containing(fragment: impl Into<String>) -> Self {
        let fragment = fragment.into();
        Self::new(format!("to contain {:?}", fragment), move |actual: &String| {
            actual.contains(fragment.as_str())
        })
    }

    pub fn starting_with(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self::new(format!("to start with {:?}", prefix), move |actual: &String| {
            actual.starts_with(prefix.as_str())
        })
    }

    pub fn not_empty() -> Self {
        Self::new("not to be empty", |actual: &String| !actual.is_empty())
    }
}

impl Expectation<bool> {
    pub fn is_true() -> Self {
        Self::new("to be true", |actual: &bool| *actual)
    }

    pub fn is_false() -> Self {
        Self::new("to be false", |actual: &bool| !*actual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_expectations_describe_the_expected_value() {
        let expectation = Expectation::equal_to(200u16);
        assert_eq!(expectation.describe(), "to equal 200");
        assert!(expectation.is_met_by(&200));
        assert!(!expectation.is_met_by(&404));
    }

    #[test]
    fn string_expectations() {
        let banner = "Welcome, admin".to_string();
        assert!(Expectation::containing("admin").is_met_by(&banner));
        assert!(Expectation::starting_with("Welcome").is_met_by(&banner));
        assert!(!Expectation::not_empty().is_met_by(&String::new()));
    }

    #[test]
    fn custom_predicates() {
        let expectation = Expectation::new("to be under 5", |n: &u32| *n < 5);
        assert!(expectation.is_met_by(&3));
        assert!(!expectation.is_met_by(&9));
    }
}
