//! REST interactions - One request per interaction

use crate::abilities::CallAnApi;
use crate::errors::Attempt;
use actor_core::{Ability, AbilityKind, Actor, Performable, ScreenplayError};
use api_client::{ApiRequest, Method};
use async_trait::async_trait;
use serde_json::Value;
use std::time::Instant;
use tracing::info;

/// Note under which the most recent response is kept.
pub const LAST_RESPONSE: &str = "last api response";

/// Send a request through the actor's API ability.
///
/// The response is remembered as the actor's last response whatever its
/// status; status checks are a question for the caller.
#[derive(Debug, Clone)]
pub struct SendRequest {
    request: ApiRequest,
}

impl SendRequest {
    pub fn new(request: ApiRequest) -> Self {
        Self { request }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.with_header(name, value);
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.with_query(name, value);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.request = self.request.with_body(body);
        self
    }

    pub fn request(&self) -> &ApiRequest {
        &self.request
    }
}

#[async_trait]
impl Performable for SendRequest {
    fn describe(&self) -> String {
        format!("sends {} {}", self.request.method, self.request.path)
    }

    fn required_abilities(&self) -> Vec<AbilityKind> {
        vec![CallAnApi::kind()]
    }

    async fn perform_as(&self, actor: &Actor) -> Result<(), ScreenplayError> {
        let start = Instant::now();
        let api = actor.ability_to::<CallAnApi>()?;
        let interaction = format!("send {} {}", self.request.method, self.request.path);
        let attempt = Attempt::new(actor, &interaction, api.base_url());

        info!(
            actor = %actor,
            method = %self.request.method,
            path = %self.request.path,
            "Executing api request"
        );
        let response = api
            .client()
            .send(api.base_url(), &self.request)
            .await
            .map_err(|err| attempt.api(err))?;

        info!(
            actor = %actor,
            status = response.status,
            latency_ms = start.elapsed().as_millis() as u64,
            "Api request completed"
        );
        actor.remember(LAST_RESPONSE, response);
        Ok(())
    }
}

pub struct Get;

impl Get {
    pub fn resource(path: impl Into<String>) -> SendRequest {
        SendRequest::new(ApiRequest::new(Method::Get, path))
    }
}

pub struct Post;

impl Post {
    pub fn to(path: impl Into<String>) -> SendRequest {
        SendRequest::new(ApiRequest::new(Method::Post, path))
    }
}

pub struct Put;

impl Put {
    pub fn to(path: impl Into<String>) -> SendRequest {
        SendRequest::new(ApiRequest::new(Method::Put, path))
    }
}

pub struct Patch;

impl Patch {
    pub fn to(path: impl Into<String>) -> SendRequest {
        SendRequest::new(ApiRequest::new(Method::Patch, path))
    }
}

pub struct Delete;

impl Delete {
    pub fn resource(path: impl Into<String>) -> SendRequest {
        SendRequest::new(ApiRequest::new(Method::Delete, path))
    }
}
