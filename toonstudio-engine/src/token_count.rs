use crate::job::Generation;
use crate::traits::StudioGateway;
use crate::util::lock;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::AbortHandle;
use toonstudio_core::api::{CountRequest, CountResponse};
use toonstudio_core::error::GatewayError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenCountState {
    /// Bumped every time the quiet period elapses.
    pub generation: Generation,
    pub last_accepted_count: Option<u64>,
    /// True only while the request for the current generation is outstanding.
    pub is_counting: bool,
    /// Message of the most recent failed count for the current generation.
    pub last_error: Option<String>,
}

/// Live token count for a text field.
///
/// Edits restart a quiet-period timer; only the last edit of a burst reaches the service.
/// Responses are accepted only if no newer count has started since they were issued,
/// regardless of the order in which they arrive.
pub struct TokenCountSession {
    shared: Arc<Shared>,
}

struct Shared {
    gateway: Arc<dyn StudioGateway>,
    window: Duration,
    watched_text: Mutex<String>,
    timer: Mutex<Option<AbortHandle>>,
    state: watch::Sender<TokenCountState>,
}

impl TokenCountSession {
    pub fn new(gateway: Arc<dyn StudioGateway>, window: Duration) -> Self {
        let (state, _rx) = watch::channel(TokenCountState::default());
        Self {
            shared: Arc::new(Shared {
                gateway,
                window,
                watched_text: Mutex::new(String::new()),
                timer: Mutex::new(None),
                state,
            }),
        }
    }

    /// Records the latest text and (re)starts the quiet period.
    ///
    /// Must be called from within a tokio runtime.
    pub fn on_text_changed(&self, text: impl Into<String>) {
        let text = text.into();
        *lock(&self.shared.watched_text) = text.clone();

        let shared = Arc::clone(&self.shared);
        let timer = tokio::spawn(async move {
            tokio::time::sleep(shared.window).await;
            Shared::fire(&shared, text);
        });

        // Cancelling the timer never cancels a count that already went out: `fire`
        // hands the request to its own task.
        if let Some(prev) = lock(&self.shared.timer).replace(timer.abort_handle()) {
            prev.abort();
        }
    }

    pub fn watched_text(&self) -> String {
        lock(&self.shared.watched_text).clone()
    }

    pub fn window(&self) -> Duration {
        self.shared.window
    }

    pub fn state(&self) -> TokenCountState {
        self.shared.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<TokenCountState> {
        self.shared.state.subscribe()
    }
}

impl Drop for TokenCountSession {
    fn drop(&mut self) {
        if let Some(timer) = lock(&self.shared.timer).take() {
            timer.abort();
        }
    }
}

impl Shared {
    fn fire(shared: &Arc<Shared>, text: String) {
        if text.trim().is_empty() {
            // Nothing to measure. Still a new generation, so an older in-flight count
            // cannot overwrite the zero.
            shared.state.send_modify(|s| {
                s.generation += 1;
                s.last_accepted_count = Some(0);
                s.is_counting = false;
                s.last_error = None;
            });
            return;
        }

        let mut generation = 0;
        shared.state.send_modify(|s| {
            s.generation += 1;
            s.is_counting = true;
            s.last_error = None;
            generation = s.generation;
        });
        log::debug!("token count: requesting (generation {generation}, {} bytes)", text.len());

        let shared = Arc::clone(shared);
        tokio::spawn(async move {
            let res = shared.gateway.count_tokens(&CountRequest { text }).await;
            shared.settle(generation, res);
        });
    }

    fn settle(&self, generation: Generation, res: Result<CountResponse, GatewayError>) {
        match res {
            Ok(resp) => {
                let accepted = self.state.send_if_modified(|s| {
                    if s.generation != generation {
                        return false;
                    }
                    s.last_accepted_count = Some(resp.count);
                    s.is_counting = false;
                    true
                });
                if !accepted {
                    log::debug!("token count: discarding stale result (generation {generation})");
                }
            }
            Err(e) => {
                log::warn!("token count failed (generation {generation}): {e}");
                self.state.send_if_modified(|s| {
                    if s.generation != generation {
                        return false;
                    }
                    s.is_counting = false;
                    s.last_error = Some(e.to_string());
                    true
                });
            }
        }
    }
}
