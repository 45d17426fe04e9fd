use action_flow::{Ensure, Task};
use action_primitives::{Get, LastResponse};
use actor_core::{Expectation, ScreenplayError};

/// Fetch a resource and expect a successful status.
pub struct FetchResource;

impl FetchResource {
    pub const NAME: &'static str = "fetch a resource";

    pub fn at(path: &str) -> Result<Task, ScreenplayError> {
        Task::named(Self::NAME)
            .describe_as(format!("fetches {}", path))
            .require(path.starts_with('/'), "path must start with '/'")
            .then(Get::resource(path).with_header("Accept", "application/json"))
            .then(Ensure::that(
                LastResponse::status(),
                Expectation::new("to be a 2xx status", |status: &u16| {
                    (200..300).contains(status)
                }),
            ))
            .build()
    }
}
