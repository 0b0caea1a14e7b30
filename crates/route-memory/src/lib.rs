//! In-memory (single node) implementation of a cache route for local
//! development and tests.
//!
//! Besides serving requests from a map, the route keeps a log of every
//! request it received so callers can check what a routing tree sent down.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;

pub use error::Error;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use hotkey_route::{Operation, Reply, ReplyResult, Request, Route, RouteInfo};
use tokio::sync::Mutex;
use tracing::trace;

#[derive(Clone, Debug)]
struct Entry {
    value: Bytes,
    flags: u64,
    exptime: u32,
    cas: u64,
}

#[derive(Debug, Default)]
struct State {
    entries: HashMap<String, Entry>,
    leases: HashMap<String, u64>,
    requests: Vec<Request>,
    next_token: u64,
}

impl State {
    const fn next_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    fn store(&mut self, request: &Request, value: Bytes) {
        let cas = self.next_token();
        self.entries.insert(
            request.key().to_string(),
            Entry {
                value,
                flags: request.flags(),
                exptime: request.exptime(),
                cas,
            },
        );
    }

    fn concat(&mut self, request: &Request, append: bool) -> Reply {
        let Some(entry) = self.entries.get(request.key()) else {
            return Reply::not_stored();
        };

        let mut value = BytesMut::with_capacity(entry.value.len() + request.value().len());
        if append {
            value.extend_from_slice(&entry.value);
            value.extend_from_slice(request.value());
        } else {
            value.extend_from_slice(request.value());
            value.extend_from_slice(&entry.value);
        }

        let cas = self.next_token();
        if let Some(entry) = self.entries.get_mut(request.key()) {
            entry.value = value.freeze();
            entry.cas = cas;
        }
        Reply::stored()
    }

    fn arithmetic(&mut self, request: &Request, increment: bool) -> Result<Reply, Error> {
        let Some(entry) = self.entries.get(request.key()) else {
            return Ok(Reply::not_found());
        };

        let current = std::str::from_utf8(&entry.value)
            .ok()
            .and_then(|value| value.trim().parse::<u64>().ok())
            .ok_or_else(|| Error::NotNumeric {
                key: request.key().to_string(),
            })?;

        // decr saturates at zero, incr wraps like memcached
        let counter = if increment {
            current.wrapping_add(request.delta())
        } else {
            current.saturating_sub(request.delta())
        };

        let cas = self.next_token();
        if let Some(entry) = self.entries.get_mut(request.key()) {
            entry.value = Bytes::from(counter.to_string());
            entry.cas = cas;
        }

        Ok(Reply {
            counter: Some(counter),
            ..Reply::stored()
        })
    }

    fn apply(&mut self, request: &Request) -> Result<Reply, Error> {
        let key = request.key();

        let reply = match request.operation() {
            Operation::Get => self
                .entries
                .get(key)
                .map_or_else(Reply::not_found, |entry| {
                    Reply::found(entry.value.clone(), entry.flags)
                }),
            Operation::Gets => self
                .entries
                .get(key)
                .map_or_else(Reply::not_found, |entry| {
                    Reply::found(entry.value.clone(), entry.flags).with_token(entry.cas)
                }),
            Operation::LeaseGet => {
                if let Some(entry) = self.entries.get(key) {
                    Reply::found(entry.value.clone(), entry.flags)
                } else {
                    let token = self.next_token();
                    self.leases.insert(key.to_string(), token);
                    Reply::not_found().with_token(token)
                }
            }
            Operation::LeaseSet => {
                if self.leases.get(key) == Some(&request.token()) {
                    self.leases.remove(key);
                    self.store(request, request.value().clone());
                    Reply::stored()
                } else {
                    Reply::not_stored()
                }
            }
            Operation::Set => {
                self.leases.remove(key);
                self.store(request, request.value().clone());
                Reply::stored()
            }
            Operation::Add => {
                if self.entries.contains_key(key) {
                    Reply::not_stored()
                } else {
                    self.store(request, request.value().clone());
                    Reply::stored()
                }
            }
            Operation::Replace => {
                if self.entries.contains_key(key) {
                    self.store(request, request.value().clone());
                    Reply::stored()
                } else {
                    Reply::not_stored()
                }
            }
            Operation::Append => self.concat(request, true),
            Operation::Prepend => self.concat(request, false),
            Operation::Cas => match self.entries.get(key) {
                None => Reply::not_found(),
                Some(entry) if entry.cas != request.token() => Reply::new(ReplyResult::Exists),
                Some(_) => {
                    self.store(request, request.value().clone());
                    Reply::stored()
                }
            },
            Operation::Delete => {
                // deleting also invalidates outstanding leases
                self.leases.remove(key);
                if self.entries.remove(key).is_some() {
                    Reply::deleted()
                } else {
                    Reply::not_found()
                }
            }
            Operation::Incr => self.arithmetic(request, true)?,
            Operation::Decr => self.arithmetic(request, false)?,
            Operation::Touch => match self.entries.get_mut(key) {
                Some(entry) => {
                    entry.exptime = request.exptime();
                    Reply::new(ReplyResult::Touched)
                }
                None => Reply::not_found(),
            },
        };

        Ok(reply)
    }
}

/// In-memory cache route.
///
/// Every received request is kept in a log until [`MemoryRoute::clear_requests`]
/// is called, so memory grows with traffic. Long running users should clear
/// the log periodically.
#[derive(Clone, Debug)]
pub struct MemoryRoute {
    name: String,
    state: Arc<Mutex<State>>,
}

impl MemoryRoute {
    /// Creates a new `MemoryRoute`.
    #[must_use]
    pub fn new() -> Self {
        Self::named("memory")
    }

    /// Creates a new `MemoryRoute` reporting `name` as its route name.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Every request received so far, in arrival order.
    pub async fn requests(&self) -> Vec<Request> {
        self.state.lock().await.requests.clone()
    }

    /// Keys of every request received so far, in arrival order.
    pub async fn keys(&self) -> Vec<String> {
        self.state
            .lock()
            .await
            .requests
            .iter()
            .map(|request| request.key().to_string())
            .collect()
    }

    /// Forgets the received requests. Stored values are kept.
    pub async fn clear_requests(&self) {
        self.state.lock().await.requests.clear();
    }

    /// Reads a stored value without going through `route`.
    pub async fn value(&self, key: &str) -> Option<Bytes> {
        self.state
            .lock()
            .await
            .entries
            .get(key)
            .map(|entry| entry.value.clone())
    }
}

impl Default for MemoryRoute {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteInfo for MemoryRoute {
    fn route_name(&self) -> String {
        format!("memory|name={}", self.name)
    }
}

#[async_trait]
impl Route for MemoryRoute {
    type Error = Error;

    async fn route(&self, request: &Request) -> Result<Reply, Self::Error> {
        trace!(operation = %request.operation(), key = request.key(), "memory route");

        let mut state = self.state.lock().await;
        state.requests.push(request.clone());
        state.apply(request)
    }
}
