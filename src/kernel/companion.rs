use serde::Serialize;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::analysis::Analyzer;
use super::random::{EntropySource, RandomSource};
use super::telemetry::{TelemetryEvent, TelemetryRecorder, TelemetrySnapshot};
use crate::audit::SessionLog;
use crate::config::CompanionConfig;
use crate::conversation::views::to_percent;
use crate::conversation::{Aggregator, ConversationEntry, RadarPoint, TimelinePoint};
use crate::engine::ToneVector;
use crate::error::{PipelineError, SessionLogError, SubmitError};
use crate::memory::{GraphMemory, Replayer, TokenNode};

const BROADCAST_CAPACITY: usize = 64;

/// Single-flight analysis pipeline.
///
/// `submit` claims the busy flag, spawns one task that waits out the
/// simulated latency, runs the `Analyzer` and appends the result to the
/// `Aggregator` and the token graph. Until that entry is appended every
/// other submission is rejected, so entries land in submission order. There
/// is no cancellation: an accepted submission always runs to completion.
///
/// Cloning is cheap; clones share the same pipeline.
#[derive(Clone)]
pub struct Companion {
    inner: Arc<Inner>,
}

struct Inner {
    config: CompanionConfig,
    session_id: Uuid,
    busy: AtomicBool,
    analyzer: Mutex<Analyzer>,
    aggregator: Mutex<Aggregator>,
    memory: Mutex<GraphMemory>,
    telemetry: Mutex<TelemetryRecorder>,
    session_log: Option<SessionLog>,
    entries_tx: broadcast::Sender<ConversationEntry>,
}

/// Consistent read of everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanionView {
    pub history: Vec<ConversationEntry>,
    pub current_tone: ToneVector,
    pub radar: Vec<RadarPoint>,
    pub timeline: Vec<TimelinePoint>,
    pub busy: bool,
}

impl Companion {
    /// Draws randomness from `config.seed` when set, OS entropy otherwise.
    pub fn new(config: CompanionConfig) -> Self {
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(EntropySource::seeded(seed)),
            None => Box::new(EntropySource::new()),
        };
        Self::with_random(config, rng)
    }

    pub fn with_random(config: CompanionConfig, rng: Box<dyn RandomSource>) -> Self {
        let session_id = Uuid::new_v4();
        let session_log = config.session_log.as_ref().and_then(|path| {
            match SessionLog::open(path.clone(), session_id) {
                Ok(log) => Some(log),
                Err(e) => {
                    warn!(
                        "Session log disabled, cannot open {}: {}",
                        path.display(),
                        e
                    );
                    None
                }
            }
        });
        let (entries_tx, _) = broadcast::channel(BROADCAST_CAPACITY);

        info!(
            %session_id,
            persona = %config.persona_name,
            mode = ?config.persona,
            latency_ms = config.processing_latency_ms,
            "Companion ready"
        );

        Self {
            inner: Arc::new(Inner {
                analyzer: Mutex::new(Analyzer::new(config.build_persona(), rng)),
                aggregator: Mutex::new(Aggregator::with_window(config.timeline_window)),
                memory: Mutex::new(GraphMemory::new()),
                telemetry: Mutex::new(TelemetryRecorder::new()),
                busy: AtomicBool::new(false),
                session_id,
                session_log,
                entries_tx,
                config,
            }),
        }
    }

    /// Starts analyzing `text`.
    ///
    /// Rejected (with no effect on history) when `text` is blank after
    /// trimming or another submission is still in flight. The returned
    /// `Submission` resolves to the appended entry.
    pub async fn submit(&self, text: &str) -> Result<Submission, SubmitError> {
        let input = text.trim();
        if input.is_empty() {
            return Err(self.reject(SubmitError::Empty).await);
        }
        if self
            .inner
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(self.reject(SubmitError::Busy).await);
        }
        let guard = BusyGuard(self.inner.clone());

        self.inner
            .telemetry
            .lock()
            .await
            .record(TelemetryEvent::SubmissionAccepted);
        debug!(input = %input, "Submission accepted");

        let inner = self.inner.clone();
        let input = input.to_string();
        let handle = tokio::spawn(async move { inner.process(input, guard).await });

        Ok(Submission { handle })
    }

    async fn reject(&self, err: SubmitError) -> SubmitError {
        debug!("Submission rejected: {}", err);
        self.inner
            .telemetry
            .lock()
            .await
            .record(TelemetryEvent::SubmissionRejected { reason: err.into() });
        err
    }

    pub fn is_busy(&self) -> bool {
        self.inner.busy.load(Ordering::Acquire)
    }

    pub fn session_id(&self) -> Uuid {
        self.inner.session_id
    }

    pub fn config(&self) -> &CompanionConfig {
        &self.inner.config
    }

    /// Receives every entry as it is appended.
    pub fn subscribe(&self) -> broadcast::Receiver<ConversationEntry> {
        self.inner.entries_tx.subscribe()
    }

    pub async fn history(&self) -> Vec<ConversationEntry> {
        self.inner.aggregator.lock().await.history().to_vec()
    }

    pub async fn recent(&self, n: usize) -> Vec<ConversationEntry> {
        self.inner.aggregator.lock().await.recent(n).to_vec()
    }

    pub async fn len(&self) -> usize {
        self.inner.aggregator.lock().await.len()
    }

    pub async fn current_tone(&self) -> ToneVector {
        self.inner.aggregator.lock().await.current_tone()
    }

    pub async fn radar(&self) -> Vec<RadarPoint> {
        self.inner.aggregator.lock().await.radar()
    }

    pub async fn timeline(&self) -> Vec<TimelinePoint> {
        self.inner.aggregator.lock().await.timeline()
    }

    pub async fn view(&self) -> CompanionView {
        let aggregator = self.inner.aggregator.lock().await;
        CompanionView {
            history: aggregator.history().to_vec(),
            current_tone: aggregator.current_tone(),
            radar: aggregator.radar(),
            timeline: aggregator.timeline(),
            busy: self.is_busy(),
        }
    }

    pub async fn telemetry(&self) -> TelemetrySnapshot {
        self.inner.telemetry.lock().await.snapshot()
    }

    /// Token nodes of the last `n` utterances, oldest first.
    pub async fn replay(&self, n: usize) -> Vec<Vec<TokenNode>> {
        Replayer::new(&*self.inner.memory.lock().await).replay(n)
    }

    /// Exports the whole history next to the session log. `None` when no
    /// session log is configured.
    pub async fn export_session(&self, label: &str) -> Result<Option<PathBuf>, SessionLogError> {
        let Some(log) = &self.inner.session_log else {
            return Ok(None);
        };
        let aggregator = self.inner.aggregator.lock().await;
        log.export(aggregator.history(), label).map(Some)
    }
}

impl Inner {
    async fn process(&self, input: String, guard: BusyGuard) -> ConversationEntry {
        let started = Instant::now();
        tokio::time::sleep(self.config.latency()).await;

        let analysis = self.analyzer.lock().await.analyze(&input);
        let entry = {
            let mut aggregator = self.aggregator.lock().await;
            let entry = aggregator.record(input, analysis);
            self.memory.lock().await.store_entry(&entry);
            if let Some(log) = &self.session_log {
                if let Err(e) = log.append(&entry) {
                    warn!(
                        "Session log write to {} failed: {}",
                        log.path().display(),
                        e
                    );
                }
            }
            // Cleared under the aggregator lock: readers never see the new
            // entry together with a set busy flag.
            drop(guard);
            entry
        };
        let latency_ms = started.elapsed().as_millis() as u64;

        info!(
            entry_id = %entry.id,
            dominant = %entry.tone.dominant_tone,
            intensity = entry.tone.intensity,
            tokens = entry.tokens.len(),
            latency_ms,
            "Entry recorded"
        );

        {
            let mut telemetry = self.telemetry.lock().await;
            telemetry.record(TelemetryEvent::AnalysisCompleted {
                entry_id: entry.id,
                dominant: entry.tone.dominant_tone,
                intensity_pct: to_percent(entry.tone.intensity),
                latency_ms,
            });
            for shift in &entry.shifts {
                telemetry.record(TelemetryEvent::FieldShiftDetected {
                    dimension: shift.dimension,
                    severity: shift.severity,
                });
            }
        }

        // No subscribers is fine.
        let _ = self.entries_tx.send(entry.clone());
        entry
    }
}

/// Releases the busy flag once the entry is recorded, or on panic.
struct BusyGuard(Arc<Inner>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.busy.store(false, Ordering::Release);
    }
}

/// Handle to an accepted submission. Awaiting it yields the entry that was
/// appended to history.
#[derive(Debug)]
pub struct Submission {
    handle: JoinHandle<ConversationEntry>,
}

impl Submission {
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Future for Submission {
    type Output = Result<ConversationEntry, PipelineError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle)
            .poll(cx)
            .map(|res| res.map_err(PipelineError::from))
    }
}

impl std::fmt::Debug for Companion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Companion")
            .field("session_id", &self.inner.session_id)
            .field("busy", &self.is_busy())
            .finish_non_exhaustive()
    }
}
