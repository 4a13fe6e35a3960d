//! Scripted in-process backend for driving features without a server.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use complexapp::api::{ApiError, HttpApi, Method};
use parking_lot::Mutex;
use serde_json::Value;

/// A captured request for assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// A scripted response.
#[derive(Debug, Clone)]
pub struct FakeResponse {
    pub result: Result<Value, ApiError>,
    pub delay_ms: u64,
}

impl FakeResponse {
    pub fn json(body: Value) -> Self {
        Self {
            result: Ok(body),
            delay_ms: 0,
        }
    }

    pub fn error(status: u16, message: &str) -> Self {
        Self {
            result: Err(ApiError::Status {
                status,
                message: message.to_string(),
            }),
            delay_ms: 0,
        }
    }

    pub fn network() -> Self {
        Self {
            result: Err(ApiError::Network("connection refused".to_string())),
            delay_ms: 0,
        }
    }

    pub fn delayed(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

type RouteKey = (Method, String);

#[derive(Default)]
pub struct FakeHttp {
    once: Mutex<HashMap<RouteKey, VecDeque<FakeResponse>>>,
    always: Mutex<HashMap<RouteKey, FakeResponse>>,
    log: Mutex<Vec<CapturedRequest>>,
}

impl FakeHttp {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Answer every request to `path` with `response`.
    pub fn route(&self, method: Method, path: &str, response: FakeResponse) {
        self.always
            .lock()
            .insert((method, path.to_string()), response);
    }

    /// Answer the next request to `path` with `response`, ahead of `route`.
    pub fn route_once(&self, method: Method, path: &str, response: FakeResponse) {
        self.once
            .lock()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(response);
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.log.lock().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<CapturedRequest> {
        self.log
            .lock()
            .iter()
            .filter(|request| request.path == path)
            .cloned()
            .collect()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests_to(path).len()
    }

    fn respond(&self, method: Method, path: &str) -> FakeResponse {
        let key = (method, path.to_string());
        if let Some(response) = self.once.lock().get_mut(&key).and_then(VecDeque::pop_front) {
            return response;
        }
        self.always
            .lock()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| FakeResponse::error(404, "no route"))
    }
}

#[async_trait]
impl HttpApi for FakeHttp {
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ApiError> {
        self.log.lock().push(CapturedRequest {
            method,
            path: path.to_string(),
            body,
        });
        let response = self.respond(method, path);
        if response.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(response.delay_ms)).await;
        }
        response.result
    }
}
