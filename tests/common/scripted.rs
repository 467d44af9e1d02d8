//! In-process gateway with scripted answers.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use hotel_admin::config::RequestContext;
use hotel_admin::gateway::{FetchError, FetchGateway, FetchRequest};

struct Scripted {
    result: Result<Value, FetchError>,
    delay: Duration,
}

/// Answers calls from a queue and records what was asked.
#[derive(Default)]
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<FetchRequest>>,
    calls: AtomicUsize,
}

impl ScriptedGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_ok(&self, body: Value) {
        self.push(Ok(body), 0);
    }

    pub fn push_err(&self, err: FetchError) {
        self.push(Err(err), 0);
    }

    pub fn push_delayed(&self, body: Value, delay_ms: u64) {
        self.push(Ok(body), delay_ms);
    }

    fn push(&self, result: Result<Value, FetchError>, delay_ms: u64) {
        self.responses.lock().push_back(Scripted {
            result,
            delay: Duration::from_millis(delay_ms),
        });
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().clone()
    }

    /// `page` query value of every request so far.
    pub fn pages(&self) -> Vec<String> {
        self.requests()
            .iter()
            .filter_map(|r| r.query_value("page").map(str::to_string))
            .collect()
    }
}

#[async_trait]
impl FetchGateway for ScriptedGateway {
    async fn fetch(&self, request: FetchRequest, _ctx: &RequestContext) -> Result<Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request);
        let next = self.responses.lock().pop_front();
        let Some(scripted) = next else {
            return Err(FetchError::Network("no scripted response".to_string()));
        };
        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }
        scripted.result
    }
}
