//! Test doubles for [`TextGenerator`].

use std::sync::{Arc, Mutex as StdMutex};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::generation::client::{Generated, GenerationError, RegenerateRequest, TextGenerator};
use crate::wizard::controller::WizardController;

/// Replies with fixed text and records every request.
#[derive(Default)]
pub struct StubGenerator {
    reply: String,
    bullets: Vec<String>,
    requests: StdMutex<Vec<RegenerateRequest>>,
}

impl StubGenerator {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            ..Default::default()
        }
    }

    pub fn with_bullets(reply: &str, bullets: &[&str]) -> Self {
        Self {
            reply: reply.to_string(),
            bullets: bullets.iter().map(|b| b.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn last_request(&self) -> Option<RegenerateRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, request: &RegenerateRequest) -> Result<Generated, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(Generated {
            text: self.reply.clone(),
            bullets: self.bullets.clone(),
        })
    }
}

/// Always fails as if the endpoint answered 500.
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _request: &RegenerateRequest) -> Result<Generated, GenerationError> {
        Err(GenerationError::Api {
            status: 500,
            message: "upstream down".to_string(),
        })
    }
}

/// Issues a newer request for `field` while the current one is in flight.
pub struct SupersedingGenerator {
    wizard: Arc<Mutex<WizardController>>,
    field: String,
    reply: String,
}

impl SupersedingGenerator {
    pub fn new(wizard: Arc<Mutex<WizardController>>, field: &str, reply: &str) -> Self {
        Self {
            wizard,
            field: field.to_string(),
            reply: reply.to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for SupersedingGenerator {
    async fn generate(&self, _request: &RegenerateRequest) -> Result<Generated, GenerationError> {
        self.wizard.lock().await.begin_generation(self.field.clone());
        Ok(Generated {
            text: self.reply.clone(),
            bullets: Vec::new(),
        })
    }
}
