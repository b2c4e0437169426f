use crate::copy::CopyFeedback;
use crate::error::{CopyError, WorkflowError};
use crate::job::{JobSlot, JobSnapshot, JobState};
use crate::traits::{Clipboard, StudioGateway};
use crate::util::lock;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use toonstudio_core::api::{JsonToToonRequest, ToonToJsonRequest};
use toonstudio_core::config::ClientConfig;
use toonstudio_core::error::GatewayError;
use toonstudio_core::metrics::ConversionMetrics;
use toonstudio_core::types::{ConversionOptions, Direction};

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionOutcome {
    pub direction: Direction,
    pub output: String,
    pub metrics: ConversionMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConversionInput {
    pub source_text: String,
    /// Only sent for `Direction::ToCompactFormat`.
    pub options: ConversionOptions,
}

pub type ConversionState = JobState<ConversionOutcome>;

/// One conversion panel: the current input plus a single conversion job.
pub struct ConversionWorkflow {
    direction: Direction,
    gateway: Arc<dyn StudioGateway>,
    input: Mutex<ConversionInput>,
    job: JobSlot<ConversionOutcome>,
    copied: CopyFeedback,
}

impl ConversionWorkflow {
    pub fn new(direction: Direction, gateway: Arc<dyn StudioGateway>, cfg: &ClientConfig) -> Self {
        Self {
            direction,
            gateway,
            input: Mutex::new(ConversionInput::default()),
            job: JobSlot::new(direction.label()),
            copied: CopyFeedback::new(cfg.copy_feedback()),
        }
    }

    pub fn forward(gateway: Arc<dyn StudioGateway>, cfg: &ClientConfig) -> Self {
        Self::new(Direction::ToCompactFormat, gateway, cfg)
    }

    pub fn reverse(gateway: Arc<dyn StudioGateway>, cfg: &ClientConfig) -> Self {
        Self::new(Direction::ToCanonicalJson, gateway, cfg)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_source_text(&self, text: impl Into<String>) {
        lock(&self.input).source_text = text.into();
    }

    pub fn set_options(&self, options: ConversionOptions) {
        lock(&self.input).options = options;
    }

    pub fn input(&self) -> ConversionInput {
        lock(&self.input).clone()
    }

    /// Converts the current input.
    ///
    /// Any previous result or error is cleared before the call goes out. If another
    /// trigger starts before this one settles, this response is dropped and the state
    /// returned is whatever the newer trigger has produced so far.
    pub async fn trigger(&self) -> ConversionState {
        let input = self.input();
        let generation = self.job.begin();

        let state = match self.convert(input).await {
            Ok(outcome) => JobState::Succeeded(outcome),
            Err(e) => {
                log::info!("{}: conversion failed: {e}", self.direction.label());
                JobState::Failed(WorkflowError::from(e))
            }
        };
        self.job.settle(generation, state);
        self.job.state()
    }

    async fn convert(&self, input: ConversionInput) -> Result<ConversionOutcome, GatewayError> {
        match self.direction {
            Direction::ToCompactFormat => {
                let req = JsonToToonRequest {
                    json_input: input.source_text,
                    indent: input.options.indent,
                    delimiter: input.options.delimiter,
                };
                let resp = self.gateway.json_to_toon(&req).await?;
                Ok(ConversionOutcome {
                    direction: self.direction,
                    metrics: ConversionMetrics::from(&resp),
                    output: resp.output,
                })
            }
            Direction::ToCanonicalJson => {
                let req = ToonToJsonRequest {
                    toon_input: input.source_text,
                };
                let resp = self.gateway.toon_to_json(&req).await?;
                Ok(ConversionOutcome {
                    direction: self.direction,
                    metrics: ConversionMetrics::from(&resp),
                    output: resp.output,
                })
            }
        }
    }

    pub fn state(&self) -> ConversionState {
        self.job.state()
    }

    pub fn snapshot(&self) -> JobSnapshot<ConversionOutcome> {
        self.job.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<JobSnapshot<ConversionOutcome>> {
        self.job.subscribe()
    }

    /// Copies the latest successful output. Leaves the job state untouched either way.
    pub async fn copy_output(&self, clipboard: &dyn Clipboard) -> Result<(), CopyError> {
        let output = match self.job.state() {
            JobState::Succeeded(outcome) => outcome.output,
            _ => return Err(CopyError::NothingToCopy),
        };

        clipboard.set_text(&output).await.map_err(|e| {
            log::warn!("{}: copy failed: {e:#}", self.direction.label());
            CopyError::Clipboard(e.to_string())
        })?;
        self.copied.mark();
        Ok(())
    }

    pub fn copied(&self) -> bool {
        self.copied.is_active()
    }
}
