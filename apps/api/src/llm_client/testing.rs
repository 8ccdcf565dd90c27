//! Scripted model provider for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{LlmError, ModelProvider, RenderedPrompt};

/// One scripted provider behaviour.
#[derive(Debug, Clone)]
pub enum Step {
    Reply(String),
    ApiError(u16),
    Empty,
    /// Sleeps before replying; pair with a paused tokio clock.
    Delayed(Duration, String),
}

/// Replays queued steps in order, then repeats `fallback` forever.
pub struct ScriptedProvider {
    steps: Mutex<VecDeque<Step>>,
    fallback: Step,
    calls: AtomicUsize,
    prompts: Mutex<Vec<RenderedPrompt>>,
}

impl ScriptedProvider {
    pub fn always(step: Step) -> Self {
        Self::sequence(Vec::new(), step)
    }

    pub fn sequence(steps: Vec<Step>, fallback: Step) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            fallback,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<RenderedPrompt> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.clone());
        let step = self
            .steps
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());

        match step {
            Step::Reply(text) => Ok(text),
            Step::ApiError(status) => Err(LlmError::Api {
                status,
                message: "scripted failure".to_string(),
            }),
            Step::Empty => Err(LlmError::EmptyContent),
            Step::Delayed(delay, text) => {
                tokio::time::sleep(delay).await;
                Ok(text)
            }
        }
    }
}
