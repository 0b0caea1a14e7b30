#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use hotkey_route::{Reply, Request, Route, RouteError, RouteInfo, Traverser};
use hotkey_route_keysplit::{KeySplitOptions, KeySplitRoute};
use thiserror::Error;
use tokio::sync::{Mutex, Semaphore};

#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("replica unavailable: {0}")]
pub struct Unavailable(pub String);

impl RouteError for Unavailable {}

/// Replies with the key it received as the value. Fails for configured keys
/// and holds back configured keys until released.
#[derive(Debug)]
pub struct EchoRoute {
    keys: Mutex<Vec<String>>,
    failing: HashSet<String>,
    held: HashSet<String>,
    gate: Arc<Semaphore>,
}

impl EchoRoute {
    fn with(failing: &[&str], held: &[&str]) -> Self {
        Self {
            keys: Mutex::new(Vec::new()),
            failing: failing.iter().map(ToString::to_string).collect(),
            held: held.iter().map(ToString::to_string).collect(),
            gate: Arc::new(Semaphore::new(0)),
        }
    }

    pub fn new() -> Self {
        Self::with(&[], &[])
    }

    pub fn failing(keys: &[&str]) -> Self {
        Self::with(keys, &[])
    }

    pub fn holding(keys: &[&str]) -> Self {
        Self::with(&[], keys)
    }

    pub fn release(&self, permits: usize) {
        self.gate.add_permits(permits);
    }

    pub async fn keys(&self) -> Vec<String> {
        self.keys.lock().await.clone()
    }
}

impl RouteInfo for EchoRoute {
    fn route_name(&self) -> String {
        "echo".to_string()
    }
}

#[async_trait]
impl Route for EchoRoute {
    type Error = Unavailable;

    async fn route(&self, request: &Request) -> Result<Reply, Self::Error> {
        if self.held.contains(request.key()) {
            let _permit = self.gate.acquire().await;
        }

        self.keys.lock().await.push(request.key().to_string());

        if self.failing.contains(request.key()) {
            return Err(Unavailable(request.key().to_string()));
        }

        Ok(Reply::found(Bytes::from(request.key().to_string()), 0))
    }
}

/// Records every visit of a traversal.
#[derive(Debug, Default)]
pub struct Recorder {
    pub visits: Vec<(String, String)>,
}

impl Traverser for Recorder {
    fn visit(&mut self, route: &dyn RouteInfo, request: &Request) {
        self.visits
            .push((route.route_name(), request.key().to_string()));
    }
}

pub fn key_split<R: Route>(
    child: Arc<R>,
    replicas: usize,
    all_sync: bool,
    host_id: u64,
) -> KeySplitRoute<R> {
    KeySplitRoute::new(KeySplitOptions {
        child,
        replicas,
        all_sync,
        host_id,
        observer: None,
    })
    .unwrap()
}

pub fn sorted(mut keys: Vec<String>) -> Vec<String> {
    keys.sort();
    keys
}
