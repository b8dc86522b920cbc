use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

// deterministic fingerprint identifying one cacheable fetch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn new(endpoint: &str, params: &[(&str, String)]) -> Self {
        let mut key = endpoint.to_string();
        for (i, (name, value)) in params.iter().enumerate() {
            key.push(if i == 0 { '?' } else { '&' });
            key.push_str(name);
            key.push('=');
            key.push_str(value);
        }
        QueryKey(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    // total attempts, the first one included
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, backoff: Duration) -> Self {
        RetryPolicy {
            max_attempts,
            backoff,
        }
    }

    pub const fn no_retry() -> Self {
        RetryPolicy::new(1, Duration::ZERO)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::new(3, Duration::from_millis(200))
    }
}

// what a view sees for one key: idle/loading before settle, then either
// data or an error message
#[derive(Debug, Clone, PartialEq)]
pub struct QueryState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub is_error: bool,
    pub error: Option<String>,
}

impl<T> QueryState<T> {
    pub fn loading() -> Self {
        QueryState {
            data: None,
            is_loading: true,
            is_error: false,
            error: None,
        }
    }

    pub fn success(data: T) -> Self {
        QueryState {
            data: Some(data),
            is_loading: false,
            is_error: false,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        QueryState {
            data: None,
            is_loading: false,
            is_error: true,
            error: Some(message.into()),
        }
    }
}

type Settled = std::result::Result<Value, String>;
type Slot = Arc<Mutex<Option<Settled>>>;

// process-scoped fetch cache, injected into views rather than ambient so
// each test can run against its own instance
#[derive(Default)]
pub struct QueryCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl QueryCache {
    pub fn new() -> Self {
        QueryCache::default()
    }

    fn slot(&self, key: &QueryKey) -> Slot {
        let mut slots = self.slots.lock().unwrap();
        slots.entry(key.as_str().to_string()).or_default().clone()
    }

    // at most one in-flight call per key: the first observer holds the slot
    // while fetching, later observers block on it and reuse the settled
    // result (success or error) until the key is invalidated
    pub fn fetch<T, F>(&self, key: &QueryKey, policy: &RetryPolicy, f: F) -> QueryState<T>
    where
        T: Serialize + DeserializeOwned,
        F: Fn() -> Result<T>,
    {
        let slot = self.slot(key);
        let mut settled = slot.lock().unwrap();
        if settled.is_none() {
            *settled = Some(run_with_retry(key, policy, f));
        }
        match settled.as_ref().unwrap() {
            Ok(value) => match serde_json::from_value(value.clone()) {
                Ok(data) => QueryState::success(data),
                Err(e) => QueryState::failure(e.to_string()),
            },
            Err(message) => QueryState::failure(message.clone()),
        }
    }

    // manual retry: invalidate, then fetch again
    pub fn invalidate(&self, key: &QueryKey) {
        let mut slots = self.slots.lock().unwrap();
        slots.remove(key.as_str());
    }

    pub fn is_settled(&self, key: &QueryKey) -> bool {
        let slots = self.slots.lock().unwrap();
        slots
            .get(key.as_str())
            .map_or(false, |slot| match slot.try_lock() {
                Ok(guard) => guard.is_some(),
                Err(_) => false,
            })
    }
}

fn run_with_retry<T, F>(key: &QueryKey, policy: &RetryPolicy, f: F) -> Settled
where
    T: Serialize,
    F: Fn() -> Result<T>,
{
    let attempts = policy.max_attempts.max(1);
    let mut last = String::new();
    for attempt in 1..=attempts {
        match f() {
            Ok(data) => return serde_json::to_value(data).map_err(|e| e.to_string()),
            Err(e) => {
                log::warn!("{}: attempt {}/{} failed: {}", key, attempt, attempts, e);
                last = e.to_string();
                if attempt < attempts && !policy.backoff.is_zero() {
                    thread::sleep(policy.backoff);
                }
            }
        }
    }
    Err(last)
}
