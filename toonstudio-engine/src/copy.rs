use crate::job::Generation;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// Short-lived "copied" indicator shown after a successful copy.
///
/// Each `mark` restarts the window; an older reset timer cannot clear a newer mark.
pub struct CopyFeedback {
    ttl: Duration,
    state: Arc<watch::Sender<(Generation, bool)>>,
}

impl CopyFeedback {
    pub fn new(ttl: Duration) -> Self {
        let (tx, _rx) = watch::channel((0, false));
        Self {
            ttl,
            state: Arc::new(tx),
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn mark(&self) {
        let mut generation = 0;
        self.state.send_modify(|(g, active)| {
            *g += 1;
            *active = true;
            generation = *g;
        });

        let state = Arc::clone(&self.state);
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            state.send_if_modified(|(g, active)| {
                if *g == generation && *active {
                    *active = false;
                    true
                } else {
                    false
                }
            });
        });
    }

    pub fn is_active(&self) -> bool {
        self.state.borrow().1
    }

    pub fn subscribe(&self) -> watch::Receiver<(Generation, bool)> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn clears_after_ttl() {
        let fb = CopyFeedback::new(Duration::from_millis(2000));
        assert!(!fb.is_active());

        fb.mark();
        assert!(fb.is_active());

        tokio::time::sleep(Duration::from_millis(2100)).await;
        assert!(!fb.is_active());
    }

    #[tokio::test(start_paused = true)]
    async fn newer_mark_extends_window() {
        let fb = CopyFeedback::new(Duration::from_millis(2000));
        fb.mark();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        fb.mark();

        tokio::time::sleep(Duration::from_millis(1000)).await; // first timer expired
        assert!(fb.is_active());

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(!fb.is_active());
    }
}
