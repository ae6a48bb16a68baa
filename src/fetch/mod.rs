//! Per-view fetch state machine.
//!
//! Each view owns one [`FetchSlot`]: a synchronous state the renderer
//! branches on (`Idle → Loading → {Ready | Failed}`, with `Failed → Loading`
//! on manual retry) plus an optional in-flight handle. The fetch itself runs
//! on a background thread and reports over a channel; the event loop polls.
//! Dropping the slot (tab switch, quit) drops the receiver, so a late result
//! is silently discarded.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::error::DataError;

/// Fetch progress as seen by a view.
#[derive(Debug)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(DataError),
}

/// Handle to one in-flight fetch.
pub struct FetchHandle<T> {
    rx: Receiver<Result<T, DataError>>,
}

impl<T: Send + 'static> FetchHandle<T> {
    /// Run `job` on a background thread. The send is best-effort: if the
    /// receiver is gone by the time the job finishes, the result is dropped.
    pub fn spawn<F>(job: F) -> Self
    where
        F: FnOnce() -> Result<T, DataError> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(job());
        });
        Self { rx }
    }

    fn try_take(&self) -> Option<Result<T, DataError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(DataError::Network(
                "fetch worker exited without a result".to_string(),
            ))),
        }
    }
}

/// One view's fetch state plus its in-flight handle.
pub struct FetchSlot<T> {
    state: FetchState<T>,
    inflight: Option<FetchHandle<T>>,
}

impl<T: Send + 'static> FetchSlot<T> {
    pub fn new() -> Self {
        Self {
            state: FetchState::Idle,
            inflight: None,
        }
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, FetchState::Idle)
    }

    /// Enter `Loading` and start `job` in the background. Any previous
    /// in-flight handle is dropped, discarding its eventual result.
    pub fn start<F>(&mut self, job: F)
    where
        F: FnOnce() -> Result<T, DataError> + Send + 'static,
    {
        self.state = FetchState::Loading;
        self.inflight = Some(FetchHandle::spawn(job));
    }

    /// Check the in-flight fetch, if any. Returns true when the state changed.
    pub fn poll(&mut self) -> bool {
        let Some(handle) = &self.inflight else {
            return false;
        };
        match handle.try_take() {
            Some(Ok(value)) => {
                self.state = FetchState::Ready(value);
                self.inflight = None;
                true
            }
            Some(Err(err)) => {
                self.state = FetchState::Failed(err);
                self.inflight = None;
                true
            }
            None => false,
        }
    }

    /// Back to `Idle`, dropping owned data and any in-flight handle.
    pub fn reset(&mut self) {
        self.state = FetchState::Idle;
        self.inflight = None;
    }
}

impl<T: Send + 'static> Default for FetchSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn poll_until_settled<T: Send + 'static>(slot: &mut FetchSlot<T>) {
        let deadline = Instant::now() + Duration::from_secs(2);
        while !slot.poll() {
            assert!(Instant::now() < deadline, "fetch did not settle in time");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn successful_fetch_moves_loading_to_ready() {
        let mut slot: FetchSlot<u64> = FetchSlot::new();
        assert!(slot.is_idle());

        slot.start(|| Ok(7));
        assert!(matches!(slot.state(), FetchState::Loading));

        poll_until_settled(&mut slot);
        match slot.state() {
            FetchState::Ready(value) => assert_eq!(*value, 7),
            other => panic!("expected Ready, got {other:?}"),
        }
    }

    #[test]
    fn transport_failure_moves_to_failed_and_retry_reenters_loading() {
        let mut slot: FetchSlot<u64> = FetchSlot::new();
        slot.start(|| Err(DataError::Network("connection refused".to_string())));
        poll_until_settled(&mut slot);
        assert!(matches!(slot.state(), FetchState::Failed(DataError::Network(_))));

        // Manual retry: Failed -> Loading. A permanently failing fetch lands
        // back in Failed, which is terminal until the next retry.
        slot.start(|| Err(DataError::Network("connection refused".to_string())));
        assert!(matches!(slot.state(), FetchState::Loading));
        poll_until_settled(&mut slot);
        assert!(matches!(slot.state(), FetchState::Failed(DataError::Network(_))));
    }

    #[test]
    fn reset_discards_a_late_result() {
        let mut slot: FetchSlot<u64> = FetchSlot::new();
        slot.start(|| {
            thread::sleep(Duration::from_millis(50));
            Ok(7)
        });
        slot.reset();
        assert!(slot.is_idle());

        // The worker finishes after the receiver is gone; its send fails
        // silently and the slot stays Idle.
        thread::sleep(Duration::from_millis(100));
        assert!(!slot.poll());
        assert!(slot.is_idle());
    }
}
