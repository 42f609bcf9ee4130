//! Per-service status monitor
//!
//! A [`StatusMonitor`] probes one service URL on a fixed period and classifies
//! each result into a [`ServiceStatus`]. Probes are HEAD requests whose
//! response is treated as opaque: any response at all means the service is
//! reachable, and only a transport failure or a timeout marks it offline.
//!
//! Probes for one service never overlap. The next tick is awaited only after
//! the current probe has completed or timed out, so status updates are
//! published in the order their probes were issued.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::Service;
use crate::io::HttpClient;

pub const DEFAULT_PROBE_PERIOD: Duration = Duration::from_millis(30_000);
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(5_000);

/// Liveness classification of a service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Loading,
    Online,
    Offline,
    Unknown,
}

impl StatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Loading => "loading",
            StatusKind::Online => "online",
            StatusKind::Offline => "offline",
            StatusKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusKind::Loading => write!(f, "Loading"),
            StatusKind::Online => write!(f, "Online"),
            StatusKind::Offline => write!(f, "Offline"),
            StatusKind::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Latest known status of one service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub name: String,
    pub status: StatusKind,
    /// Only set when online
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    /// Only set for online and offline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_checked_epoch_ms: Option<u64>,
}

impl ServiceStatus {
    pub fn loading(name: &str) -> Self {
        Self::without_probe(name, StatusKind::Loading)
    }

    pub fn unknown(name: &str) -> Self {
        Self::without_probe(name, StatusKind::Unknown)
    }

    fn without_probe(name: &str, status: StatusKind) -> Self {
        Self {
            name: name.to_string(),
            status,
            response_time_ms: None,
            last_checked_epoch_ms: None,
        }
    }

    /// Classify a probe outcome observed at `checked_at_ms`
    pub fn from_outcome(name: &str, outcome: &ProbeOutcome, checked_at_ms: u64) -> Self {
        match outcome {
            ProbeOutcome::Reachable { elapsed } => Self {
                name: name.to_string(),
                status: StatusKind::Online,
                response_time_ms: Some(elapsed.as_millis() as u64),
                last_checked_epoch_ms: Some(checked_at_ms),
            },
            ProbeOutcome::Failed { .. } | ProbeOutcome::TimedOut => Self {
                name: name.to_string(),
                status: StatusKind::Offline,
                response_time_ms: None,
                last_checked_epoch_ms: Some(checked_at_ms),
            },
        }
    }

    /// Card label, empty for services that are not monitored
    pub fn label(&self) -> String {
        match (self.status, self.response_time_ms) {
            (StatusKind::Online, Some(ms)) if ms > 0 => format!("ONLINE ({}ms)", ms),
            (StatusKind::Online, _) => "ONLINE".to_string(),
            (StatusKind::Offline, _) => "OFFLINE".to_string(),
            (StatusKind::Loading, _) => "CHECKING...".to_string(),
            (StatusKind::Unknown, _) => String::new(),
        }
    }
}

/// Result of a single reachability probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A response arrived, whatever its status code
    Reachable { elapsed: Duration },
    /// The request failed at the transport level
    Failed { reason: String },
    /// No response within the probe timeout; the request was cancelled
    TimedOut,
}

/// Timing of the probe loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorOptions {
    pub period: Duration,
    pub timeout: Duration,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            period: DEFAULT_PROBE_PERIOD,
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

/// Prober for a single service
pub struct StatusMonitor {
    service: Service,
    http: Arc<dyn HttpClient>,
    options: MonitorOptions,
}

impl fmt::Debug for StatusMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatusMonitor")
            .field("name", &self.service.name)
            .field("url", &self.service.url)
            .field("options", &self.options)
            .finish()
    }
}

impl StatusMonitor {
    pub fn new(service: Service, http: Arc<dyn HttpClient>, options: MonitorOptions) -> Self {
        Self {
            service,
            http,
            options,
        }
    }

    pub fn name(&self) -> &str {
        &self.service.name
    }

    /// Issue one HEAD probe, cancelling it after the configured timeout
    pub async fn probe(&self) -> ProbeOutcome {
        let started = Instant::now();
        match tokio::time::timeout(self.options.timeout, self.http.head(&self.service.url)).await {
            Ok(Ok(())) => ProbeOutcome::Reachable {
                elapsed: started.elapsed(),
            },
            Ok(Err(e)) => ProbeOutcome::Failed {
                reason: e.to_string(),
            },
            Err(_) => ProbeOutcome::TimedOut,
        }
    }

    /// Start monitoring and return the handle that owns the probe loop.
    ///
    /// When `ping_enabled` is false, the service opted out with `ping: false`
    /// or its URL is not an absolute http(s) URL, the status is `Unknown` for
    /// the handle's lifetime and no probe is ever issued. Must be called from
    /// within a tokio runtime.
    pub fn start(self, ping_enabled: bool) -> MonitorHandle {
        let cancel = CancellationToken::new();

        if !ping_enabled || !self.service.ping || !is_probeable(&self.service.url) {
            tracing::debug!("Monitoring disabled for '{}'", self.service.name);
            let (tx, rx) = watch::channel(ServiceStatus::unknown(&self.service.name));
            return MonitorHandle {
                status: rx,
                publisher: Arc::new(Mutex::new(Some(tx))),
                cancel,
                task: None,
            };
        }

        let (tx, rx) = watch::channel(ServiceStatus::loading(&self.service.name));
        let publisher = Arc::new(Mutex::new(Some(tx)));

        tracing::debug!(
            "Monitoring '{}' at {} every {:?}",
            self.service.name,
            self.service.url,
            self.options.period
        );

        let task = tokio::spawn(probe_loop(self, Arc::clone(&publisher), cancel.clone()));

        MonitorHandle {
            status: rx,
            publisher,
            cancel,
            task: Some(task),
        }
    }
}

/// Only absolute http(s) URLs can be probed; `#` and other relative links
/// have nothing to reach.
pub fn is_probeable(url: &str) -> bool {
    reqwest::Url::parse(url)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
        .unwrap_or(false)
}

type Publisher = Arc<Mutex<Option<watch::Sender<ServiceStatus>>>>;

/// Owner of a running monitor.
///
/// [`MonitorHandle::stop`] tears the monitor down. Dropping the handle stops it
/// as well.
#[derive(Debug)]
pub struct MonitorHandle {
    status: watch::Receiver<ServiceStatus>,
    publisher: Publisher,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl MonitorHandle {
    /// Latest status snapshot
    pub fn status(&self) -> ServiceStatus {
        self.status.borrow().clone()
    }

    /// Receiver notified on every status change
    pub fn subscribe(&self) -> watch::Receiver<ServiceStatus> {
        self.status.clone()
    }

    /// Stop the timer and discard any in-flight probe.
    ///
    /// Once this returns the status is frozen: a probe that completes later
    /// publishes nothing.
    pub fn stop(&self) {
        self.cancel.cancel();
        self.publisher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Stop and wait for the probe task to exit
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("Probe task for '{}' failed: {}", self.status().name, e);
            }
        }
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn probe_loop(monitor: StatusMonitor, publisher: Publisher, cancel: CancellationToken) {
    // interval() panics on a zero period
    let period = monitor.options.period.max(Duration::from_millis(1));
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            outcome = monitor.probe() => outcome,
        };

        let status = ServiceStatus::from_outcome(monitor.name(), &outcome, current_epoch_ms());
        match &outcome {
            ProbeOutcome::Failed { reason } => {
                tracing::debug!("Probe '{}' failed: {}", monitor.name(), reason)
            }
            ProbeOutcome::TimedOut => tracing::debug!(
                "Probe '{}' timed out after {:?}",
                monitor.name(),
                monitor.options.timeout
            ),
            ProbeOutcome::Reachable { elapsed } => {
                tracing::debug!("Probe '{}' reachable in {:?}", monitor.name(), elapsed)
            }
        }

        if !publish(&publisher, status) {
            break;
        }
    }

    tracing::debug!("Monitor for '{}' stopped", monitor.name());
}

/// Publish a status unless the handle has been stopped
fn publish(publisher: &Publisher, status: ServiceStatus) -> bool {
    let guard = publisher.lock().unwrap_or_else(PoisonError::into_inner);
    match guard.as_ref() {
        Some(tx) => {
            tx.send_replace(status);
            true
        }
        None => false,
    }
}

fn current_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
