//! Process-wide warmup overlay state.
//!
//! The API client does not know about the UI; it calls whatever
//! `WarmupHandler` was registered with it. `WarmupContext` is the handler the
//! app registers, publishing `WarmupState` changes to subscribers.

use std::sync::Arc;

use tokio::sync::watch;
use trippy_core::WarmupState;

pub trait WarmupHandler: Send + Sync {
    fn show_warmup(&self);
    fn hide_warmup(&self);
    fn increment_check_count(&self);
}

#[derive(Debug, Clone)]
pub struct WarmupContext {
    state: Arc<watch::Sender<WarmupState>>,
}

impl Default for WarmupContext {
    fn default() -> Self {
        Self::new()
    }
}

impl WarmupContext {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(WarmupState::default());
        Self {
            state: Arc::new(tx),
        }
    }

    pub fn snapshot(&self) -> WarmupState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<WarmupState> {
        self.state.subscribe()
    }
}

impl WarmupHandler for WarmupContext {
    fn show_warmup(&self) {
        self.state.send_if_modified(|s| {
            let changed = !s.is_warming_up;
            s.show();
            changed
        });
    }

    fn hide_warmup(&self) {
        self.state.send_modify(WarmupState::hide);
    }

    fn increment_check_count(&self) {
        self.state.send_modify(WarmupState::increment);
    }
}
