//! Request and response types

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: BTreeMap<String, String>,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: BTreeMap::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Header lookup, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Look up a value in the body by dotted field path.
    ///
    /// Segments are object keys or array indexes; `items[2]` and `items.2`
    /// are equivalent. An empty path returns the whole body.
    pub fn field(&self, path: &str) -> Option<&Value> {
        let mut current = &self.body;
        for segment in split_path(path) {
            current = match segment {
                PathSegment::Key(key) => match current {
                    Value::Object(map) => map.get(key)?,
                    Value::Array(items) => items.get(key.parse::<usize>().ok()?)?,
                    _ => return None,
                },
                PathSegment::Index(idx) => current.as_array()?.get(idx)?,
            };
        }
        Some(current)
    }
}

enum PathSegment<'a> {
    Key(&'a str),
    Index(usize),
}

fn split_path(path: &str) -> Vec<PathSegment<'_>> {
    let mut segments = Vec::new();
    for part in path.split('.').filter(|p| !p.is_empty()) {
        let (key, mut rest) = match part.find('[') {
            Some(pos) => (&part[..pos], &part[pos..]),
            None => (part, ""),
        };
        if !key.is_empty() {
            segments.push(PathSegment::Key(key));
        }
        while let Some(close) = rest.find(']') {
            if let Ok(idx) = rest[1..close].trim().parse::<usize>() {
                segments.push(PathSegment::Index(idx));
            }
            rest = &rest[close + 1..];
        }
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ApiResponse {
        ApiResponse::new(
            200,
            json!({
                "userId": 1,
                "title": "sunt aut facere",
                "tags": ["a", "b"],
                "comments": [{ "id": 7, "author": { "name": "Anna" } }]
            }),
        )
        .with_header("Content-Type", "application/json")
    }

    #[test]
    fn field_paths_walk_objects_and_arrays() {
        let response = sample();
        assert_eq!(response.field("userId"), Some(&json!(1)));
        assert_eq!(response.field("tags[1]"), Some(&json!("b")));
        assert_eq!(response.field("tags.0"), Some(&json!("a")));
        assert_eq!(
            response.field("comments[0].author.name"),
            Some(&json!("Anna"))
        );
        assert_eq!(response.field(""), Some(&response.body));
    }

    #[test]
    fn missing_paths_yield_none() {
        let response = sample();
        assert!(response.field("comments[3].id").is_none());
        assert!(response.field("title.length").is_none());
        assert!(response.field("nope").is_none());
    }

    #[test]
    fn headers_are_case_insensitive() {
        let response = sample();
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert!(response.is_success());
    }
}
