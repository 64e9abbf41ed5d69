#![allow(dead_code)]

use pdb_core::Target;
use pdb_terminus::{Connection, ConnectionPool, DeprecationNotifier, HttpResponse, PostRequest, TransportError};
use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
    time::Duration,
};

#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub target: Target,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub timeout: Option<Duration>,
}

impl RecordedPost {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

/// Pool that replays scripted responses and records every POST.
#[derive(Default)]
pub struct FakePool {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    connections: AtomicUsize,
    posts: Mutex<Vec<RecordedPost>>,
}

impl FakePool {
    pub fn replying(response: HttpResponse) -> Self {
        let pool = Self::default();
        pool.push(Ok(response));
        pool
    }

    pub fn failing(err: TransportError) -> Self {
        let pool = Self::default();
        pool.push(Err(err));
        pool
    }

    pub fn push(&self, reply: Result<HttpResponse, TransportError>) {
        self.responses.lock().unwrap().push_back(reply);
    }

    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    pub fn posts(&self) -> Vec<RecordedPost> {
        self.posts.lock().unwrap().clone()
    }
}

fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

struct FakeConnection<'a> {
    pool: &'a FakePool,
    target: Target,
}

impl Connection for FakeConnection<'_> {
    fn post(&self, request: &PostRequest<'_>) -> Result<HttpResponse, TransportError> {
        self.pool.posts.lock().unwrap().push(RecordedPost {
            target: self.target.clone(),
            path: request.path.to_string(),
            query: owned(request.query),
            headers: owned(request.headers),
            body: request.body.to_string(),
            timeout: request.timeout,
        });
        self.pool
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted response left")
    }
}

impl ConnectionPool for FakePool {
    fn connection(&self, target: &Target) -> Result<Box<dyn Connection + '_>, TransportError> {
        self.connections.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeConnection { pool: self, target: target.clone() }))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl DeprecationNotifier for RecordingNotifier {
    fn notify_deprecation(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

pub fn ok_response() -> HttpResponse {
    HttpResponse::new(200, r#"{"uuid": "a UUID"}"#)
}

pub fn target() -> Target {
    Target::new(false, "puppetdb.example.com", 8080)
}
