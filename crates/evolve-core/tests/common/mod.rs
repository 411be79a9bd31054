use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use evolve_core::{AdvisoryError, AdvisoryRequest, AdvisoryService, Engine, EngineBuilder};
use tempfile::TempDir;

/// Advisory service that replays queued replies and records every request.
#[derive(Clone, Default)]
pub struct ScriptedAdvisor {
    replies: Arc<Mutex<VecDeque<Option<String>>>>,
    pub requests: Arc<Mutex<Vec<AdvisoryRequest>>>,
}

impl ScriptedAdvisor {
    pub fn push(&self, raw: &str) {
        self.replies.lock().unwrap().push_back(Some(raw.to_string()));
    }

    /// Queues a network-style failure.
    pub fn push_failure(&self) {
        self.replies.lock().unwrap().push_back(None);
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl AdvisoryService for ScriptedAdvisor {
    async fn generate(&self, request: AdvisoryRequest) -> Result<String, AdvisoryError> {
        self.requests.lock().unwrap().push(request);
        match self.replies.lock().unwrap().pop_front() {
            Some(Some(raw)) => Ok(raw),
            Some(None) => Err(AdvisoryError::Api {
                status: 503,
                message: "unavailable".to_string(),
            }),
            None => Ok(r#"{"text": "Go on."}"#.to_string()),
        }
    }
}

/// Helper function to create a test engine
pub async fn create_test_engine() -> (TempDir, Engine, ScriptedAdvisor) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let advisor = ScriptedAdvisor::default();
    let engine = open_engine(&temp_dir, advisor.clone()).await;
    (temp_dir, engine, advisor)
}

/// Opens (or reopens) the engine stored in `temp_dir`.
pub async fn open_engine(temp_dir: &TempDir, advisor: ScriptedAdvisor) -> Engine {
    EngineBuilder::new()
        .with_database_path(Some(temp_dir.path().join("test.db")))
        .with_advisor(advisor)
        .build()
        .await
        .expect("Failed to create engine")
}

pub fn plan_card(kind: &str, titles: &[&str]) -> String {
    let tasks: Vec<serde_json::Value> = titles
        .iter()
        .map(|t| serde_json::json!({"title": t, "type": kind, "difficulty": "low"}))
        .collect();
    serde_json::json!({
        "text": "Here is your plan.",
        "card": {
            "type": "plan_preview_card",
            "data": {"plan": {
                "title": "Morning routine",
                "goalHypothesis": "Mornings set the tone",
                "phases": [{"name": "Week 1", "tasks": tasks}]
            }}
        }
    })
    .to_string()
}
