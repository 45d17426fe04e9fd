use actor_core::{AbilityKind, Actor, Expectation, Performable, Question, ScreenplayError, StepKind};
use async_trait::async_trait;

/// A step that fails with `AssertionMismatch` unless a question's answer meets
/// an expectation. Lets tasks end with a check.
pub struct Ensure<Q: Question> {
    question: Q,
    expectation: Expectation<Q::Answer>,
}

impl<Q: Question> Ensure<Q> {
    pub fn that(question: Q, expectation: Expectation<Q::Answer>) -> Self {
        Self {
            question,
            expectation,
        }
    }
}

#[async_trait]
impl<Q: Question> Performable for Ensure<Q> {
    fn describe(&self) -> String {
        format!(
            "expects {} {}",
            self.question.describe(),
            self.expectation.describe()
        )
    }

    fn step_kind(&self) -> StepKind {
        StepKind::Question
    }

    fn required_abilities(&self) -> Vec<AbilityKind> {
        self.question.required_abilities()
    }

    async fn perform_as(&self, actor: &Actor) -> Result<(), ScreenplayError> {
        actor
            .should_see_that(&self.question, &self.expectation)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_core::FailureKind;

    struct Answer(&'static str);

    #[async_trait]
    impl Question for Answer {
        type Answer = String;

        fn describe(&self) -> String {
            "the greeting".to_string()
        }

        async fn answered_by(&self, _actor: &Actor) -> Result<String, ScreenplayError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn mismatches_carry_expected_and_actual() {
        let actor = Actor::named("Anna");
        let check = Ensure::that(Answer("hello"), Expectation::containing("bye"));
        assert_eq!(check.describe(), "expects the greeting to contain \"bye\"");

        let err = tokio_test::block_on(actor.attempts_to(&[&check])).unwrap_err();
        assert_eq!(err.kind(), FailureKind::AssertionMismatch);
        assert_eq!(
            err.to_string(),
            "Anna expected the greeting to contain \"bye\", but it was \"hello\""
        );

        let check = Ensure::that(Answer("hello"), Expectation::starting_with("he"));
        tokio_test::block_on(actor.attempts_to(&[&check])).unwrap();
    }
}
