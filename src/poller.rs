//! Scheduled refreshes of the CO2 history.
//!
//! [`ChartPoller`] fetches from a [`HistorySource`] once at startup and then on
//! every interval tick. Every refresh is tagged with a sequence number taken
//! when it starts, so that a slow response cannot overwrite a newer one: see
//! [`App::apply`](crate::App::apply).

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::data::Series;
use crate::source::{FetchError, HistorySource};

/// Default time between refreshes.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(60);

/// The result of one refresh cycle.
#[derive(Debug)]
pub struct RefreshOutcome {
    /// Position of this refresh in start order, beginning at 1.
    pub seq: u64,
    pub result: Result<Series, FetchError>,
}

/// Periodically fetches the history from a source.
#[derive(Debug, Clone)]
pub struct ChartPoller {
    source: Arc<dyn HistorySource>,
    interval: Duration,
}

impl ChartPoller {
    pub fn new(source: Arc<dyn HistorySource>, interval: Duration) -> Self {
        Self { source, interval }
    }

    pub fn source(&self) -> &dyn HistorySource {
        self.source.as_ref()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run a single refresh outside the schedule.
    pub async fn refresh(&self) -> Result<Series, FetchError> {
        fetch_logged(self.source.as_ref(), 0).await
    }

    /// Start polling on the current tokio runtime.
    ///
    /// The first refresh starts immediately. Outcomes arrive on the returned
    /// receiver in completion order, which may differ from start order when a
    /// fetch outlives the interval.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn start(self) -> (PollerHandle, mpsc::UnboundedReceiver<RefreshOutcome>) {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        // Capacity 1 coalesces repeated manual requests into one refresh.
        let (trigger_tx, mut trigger_rx) = mpsc::channel::<()>(1);

        tracing::info!(
            source = self.source.description(),
            interval_secs = self.interval.as_secs_f64(),
            "starting history poller"
        );

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            // After a stall, refresh once and restart the schedule from there.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut next_seq: u64 = 0;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    Some(()) = trigger_rx.recv() => {
                        tracing::debug!("manual refresh requested");
                    }
                }

                if outcome_tx.is_closed() {
                    break;
                }

                next_seq += 1;
                let seq = next_seq;
                let source = self.source.clone();
                let outcome_tx = outcome_tx.clone();

                // Fetches run in their own tasks so a slow endpoint never
                // delays the schedule.
                tokio::spawn(async move {
                    let result = fetch_logged(source.as_ref(), seq).await;
                    let _ = outcome_tx.send(RefreshOutcome { seq, result });
                });
            }

            tracing::debug!("history poller stopped");
        });

        let handle = PollerHandle {
            task,
            trigger: trigger_tx,
        };
        (handle, outcome_rx)
    }
}

async fn fetch_logged(source: &dyn HistorySource, seq: u64) -> Result<Series, FetchError> {
    tracing::debug!(seq, source = source.description(), "fetching history");
    let result = source.fetch().await;
    match &result {
        Ok(series) => tracing::info!(seq, readings = series.len(), "history refreshed"),
        Err(e) => tracing::warn!(seq, error = %e, "history refresh failed"),
    }
    result
}

/// Controls a running [`ChartPoller`].
///
/// Dropping the handle stops polling.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
    trigger: mpsc::Sender<()>,
}

impl PollerHandle {
    /// Ask for a refresh before the next tick.
    ///
    /// Returns false if the poller has stopped. A request made while another
    /// is still pending is merged into it.
    pub fn refresh_now(&self) -> bool {
        match self.trigger.try_send(()) {
            Ok(()) | Err(mpsc::error::TrySendError::Full(())) => !self.task.is_finished(),
            Err(mpsc::error::TrySendError::Closed(())) => false,
        }
    }

    /// Stop scheduling refreshes. Fetches already in flight may still report.
    pub fn stop(&self) {
        self.task.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::time::Instant;

    /// Replays a fixed list of responses, then keeps returning the last one.
    #[derive(Debug)]
    pub(crate) struct ScriptedSource {
        responses: Mutex<VecDeque<Option<Vec<f64>>>>,
        last: Mutex<Option<Vec<f64>>>,
    }

    impl ScriptedSource {
        /// `None` entries produce a failed fetch.
        pub(crate) fn new(responses: Vec<Option<Vec<f64>>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                last: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl HistorySource for ScriptedSource {
        async fn fetch(&self) -> Result<Series, FetchError> {
            let next = self.responses.lock().unwrap().pop_front();
            let response = match next {
                Some(response) => {
                    *self.last.lock().unwrap() = response.clone();
                    response
                }
                None => self.last.lock().unwrap().clone(),
            };
            response.map(Series::new).ok_or(FetchError::Status(500))
        }

        fn description(&self) -> &str {
            "scripted"
        }
    }

    fn poller(responses: Vec<Option<Vec<f64>>>) -> ChartPoller {
        ChartPoller::new(Arc::new(ScriptedSource::new(responses)), DEFAULT_INTERVAL)
    }

    #[tokio::test]
    async fn test_single_refresh() {
        let poller = poller(vec![Some(vec![400.0, 405.0]), None]);
        assert_eq!(poller.interval(), DEFAULT_INTERVAL);
        assert_eq!(poller.source().description(), "scripted");

        let series = poller.refresh().await.unwrap();
        assert_eq!(series.readings(), &[400.0, 405.0]);
        assert!(matches!(poller.refresh().await, Err(FetchError::Status(500))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_refresh_is_immediate_then_every_interval() {
        let start = Instant::now();
        let (handle, mut rx) = poller(vec![Some(vec![400.0]), Some(vec![410.0, 400.0])]).start();

        let first = rx.recv().await.unwrap();
        assert_eq!(first.seq, 1);
        assert_eq!(first.result.unwrap().len(), 1);
        assert!(start.elapsed() < Duration::from_secs(1));

        let second = rx.recv().await.unwrap();
        assert_eq!(second.seq, 2);
        assert_eq!(second.result.unwrap().len(), 2);
        assert!(start.elapsed() >= DEFAULT_INTERVAL);

        assert!(handle.is_running());
        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_do_not_stop_polling() {
        let (handle, mut rx) = poller(vec![None, Some(vec![450.0])]).start();

        let first = rx.recv().await.unwrap();
        assert!(first.result.is_err());

        let second = rx.recv().await.unwrap();
        assert_eq!(second.seq, 2);
        assert!(second.result.is_ok());

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stall_does_not_replay_missed_ticks() {
        let (handle, mut rx) = poller(vec![Some(vec![400.0])]).start();
        assert_eq!(rx.recv().await.unwrap().seq, 1);

        tokio::time::advance(DEFAULT_INTERVAL * 5).await;
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }

        let mut caught_up = Vec::new();
        while let Ok(outcome) = rx.try_recv() {
            caught_up.push(outcome.seq);
        }
        assert_eq!(caught_up, vec![2]);

        // The schedule restarts from the catch-up refresh.
        let start = Instant::now();
        assert_eq!(rx.recv().await.unwrap().seq, 3);
        assert!(start.elapsed() >= DEFAULT_INTERVAL);

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_now_skips_the_wait() {
        let start = Instant::now();
        let (handle, mut rx) = poller(vec![Some(vec![400.0])]).start();
        assert_eq!(rx.recv().await.unwrap().seq, 1);

        assert!(handle.refresh_now());
        let manual = rx.recv().await.unwrap();
        assert_eq!(manual.seq, 2);
        assert!(start.elapsed() < DEFAULT_INTERVAL);

        handle.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_closes_the_outcome_channel() {
        let (handle, mut rx) = poller(vec![Some(vec![400.0])]).start();
        assert!(rx.recv().await.is_some());

        handle.stop();
        let drained = tokio::time::timeout(Duration::from_secs(600), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok());
        assert!(!handle.is_running());
        assert!(!handle.refresh_now());
    }
}
