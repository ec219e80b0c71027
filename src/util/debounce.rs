//! Debounce and supersession for search-as-you-type.
//!
//! Each keystroke bumps a generation counter; the async path sleeps for the
//! debounce window and only proceeds when its generation is still the
//! latest. A burst of inputs therefore produces exactly one network call,
//! for the final value. The previous in-flight request is cancelled through
//! an `AbortController` so it can never overwrite newer results.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use std::cell::Cell;
use std::rc::Rc;

/// Generation counter shared by all pending debounced tasks of one input.
#[derive(Clone, Debug, Default)]
pub struct Debouncer {
    generation: Rc<Cell<u64>>,
}

impl Debouncer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new input event, superseding every earlier one.
    /// Returns the token the caller must re-check after the delay.
    pub fn begin(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }

    /// Whether `token` is still the latest registered input.
    #[must_use]
    pub fn is_current(&self, token: u64) -> bool {
        self.generation.get() == token
    }
}

/// Wait out the debounce window; `true` means the caller's input survived
/// (no newer keystroke arrived) and the fetch should proceed.
#[cfg(feature = "hydrate")]
pub async fn settle(debouncer: &Debouncer, token: u64, delay_ms: u32) -> bool {
    gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(delay_ms))).await;
    debouncer.is_current(token)
}

/// Holder for the abort controller of the current in-flight search request.
#[derive(Clone, Default)]
pub struct RequestAbort {
    #[cfg(feature = "hydrate")]
    controller: Rc<std::cell::RefCell<Option<web_sys::AbortController>>>,
}

impl RequestAbort {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the previous request (if any) and hand out a signal for the
    /// next one.
    #[cfg(feature = "hydrate")]
    pub fn renew(&self) -> Option<web_sys::AbortSignal> {
        if let Some(prev) = self.controller.borrow_mut().take() {
            prev.abort();
        }
        let ctrl = web_sys::AbortController::new().ok()?;
        let signal = ctrl.signal();
        *self.controller.borrow_mut() = Some(ctrl);
        Some(signal)
    }
}
