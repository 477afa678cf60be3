//! Cache maintenance background daemon.
//!
//! Periodically calls [`GovernanceAuthorizationCache::expire_stale`] so that
//! stale decisions are released even when nobody looks them up again.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Notify, RwLock};
use tokio::time::{interval_at, Instant};
use tracing::{debug, info, warn};

use crate::domain::models::MaintenanceConfig;
use crate::services::governance_cache::GovernanceAuthorizationCache;

/// Longest interval the sweep timer is armed with.
pub const MAX_SWEEP_INTERVAL: Duration = Duration::from_secs(86_400);

/// Configuration for the maintenance daemon.
#[derive(Debug, Clone)]
pub struct MaintenanceDaemonConfig {
    /// Interval between sweeps.
    pub sweep_interval: Duration,
    /// Whether to sweep once on startup.
    pub run_on_startup: bool,
}

impl Default for MaintenanceDaemonConfig {
    fn default() -> Self {
        Self {
            sweep_interval: Duration::from_secs(30),
            run_on_startup: true,
        }
    }
}

impl MaintenanceDaemonConfig {
    /// Create config with custom interval.
    pub fn with_interval(interval: Duration) -> Self {
        Self {
            sweep_interval: interval,
            ..Default::default()
        }
    }

    /// Suggested interval for a TTL: half of it, at least one second.
    pub fn for_ttl(ttl: Duration) -> Self {
        Self::with_interval((ttl / 2).max(Duration::from_secs(1)))
    }
}

impl From<&MaintenanceConfig> for MaintenanceDaemonConfig {
    fn from(config: &MaintenanceConfig) -> Self {
        Self {
            sweep_interval: Duration::from_secs(config.interval_seconds.max(1)),
            run_on_startup: config.run_on_startup,
        }
    }
}

/// Event emitted by the maintenance daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaintenanceEvent {
    /// Daemon started.
    Started,
    /// Sweep finished.
    SweepCompleted {
        run_number: u64,
        expired: usize,
        size: usize,
    },
    /// Daemon stopped.
    Stopped { reason: StopReason },
}

/// Reason the daemon stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// Requested to stop.
    Requested,
    /// Event receiver dropped.
    ChannelClosed,
}

/// Status of the maintenance daemon.
#[derive(Debug, Clone, Default)]
pub struct DaemonStatus {
    /// Whether the daemon is running.
    pub running: bool,
    /// Total sweeps.
    pub total_runs: u64,
    /// Total entries expired across sweeps.
    pub total_expired: u64,
    /// Last sweep time.
    pub last_run: Option<Instant>,
}

/// Handle to control the maintenance daemon.
#[derive(Clone)]
pub struct DaemonHandle {
    stop_flag: Arc<AtomicBool>,
    stop_signal: Arc<Notify>,
    status: Arc<RwLock<DaemonStatus>>,
}

impl DaemonHandle {
    /// Request the daemon to stop.
    pub fn stop(&self) {
        self.stop_flag.store(true, Ordering::Release);
        self.stop_signal.notify_one();
    }

    /// Check if stop was requested.
    pub fn is_stop_requested(&self) -> bool {
        self.stop_flag.load(Ordering::Acquire)
    }

    /// Get current daemon status.
    pub async fn status(&self) -> DaemonStatus {
        self.status.read().await.clone()
    }
}

/// Background sweeper for a shared governance cache.
pub struct CacheMaintenanceDaemon {
    cache: Arc<GovernanceAuthorizationCache>,
    config: MaintenanceDaemonConfig,
    status: Arc<RwLock<DaemonStatus>>,
    stop_flag: Arc<AtomicBool>,
    stop_signal: Arc<Notify>,
}

impl CacheMaintenanceDaemon {
    /// Create a new maintenance daemon.
    pub fn new(cache: Arc<GovernanceAuthorizationCache>, config: MaintenanceDaemonConfig) -> Self {
        Self {
            cache,
            config,
            status: Arc::new(RwLock::new(DaemonStatus::default())),
            stop_flag: Arc::new(AtomicBool::new(false)),
            stop_signal: Arc::new(Notify::new()),
        }
    }

    /// Create with an interval derived from the cache TTL.
    pub fn with_defaults(cache: Arc<GovernanceAuthorizationCache>) -> Self {
        let config = MaintenanceDaemonConfig::for_ttl(cache.ttl());
        Self::new(cache, config)
    }

    /// Get a handle to control the daemon.
    pub fn handle(&self) -> DaemonHandle {
        DaemonHandle {
            stop_flag: self.stop_flag.clone(),
            stop_signal: self.stop_signal.clone(),
            status: self.status.clone(),
        }
    }

    /// Spawn the daemon, returning a channel for events.
    pub fn run(self) -> mpsc::Receiver<MaintenanceEvent> {
        let (tx, rx) = mpsc::channel(100);

        tokio::spawn(async move {
            self.run_loop(tx).await;
        });

        rx
    }

    /// Run the daemon on the current task with an existing sender.
    pub async fn run_with_sender(self, tx: mpsc::Sender<MaintenanceEvent>) {
        self.run_loop(tx).await;
    }

    /// Main daemon loop.
    async fn run_loop(self, tx: mpsc::Sender<MaintenanceEvent>) {
        self.status.write().await.running = true;
        info!(
            interval_ms = self.config.sweep_interval.as_millis() as u64,
            "cache maintenance daemon started"
        );

        let mut reason = StopReason::Requested;
        if tx.send(MaintenanceEvent::Started).await.is_err() {
            reason = StopReason::ChannelClosed;
        }

        if reason == StopReason::Requested
            && self.config.run_on_startup
            && !self.sweep(&tx).await
        {
            reason = StopReason::ChannelClosed;
        }

        let period = self.config.sweep_interval.min(MAX_SWEEP_INTERVAL);
        if period < self.config.sweep_interval {
            warn!(
                requested_secs = self.config.sweep_interval.as_secs(),
                max_secs = MAX_SWEEP_INTERVAL.as_secs(),
                "sweep interval capped"
            );
        }
        let start = Instant::now()
            .checked_add(period)
            .unwrap_or_else(Instant::now);
        let mut ticker = interval_at(start, period);

        while reason == StopReason::Requested && !self.stop_flag.load(Ordering::Acquire) {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.stop_flag.load(Ordering::Acquire) {
                        break;
                    }
                    if !self.sweep(&tx).await {
                        reason = StopReason::ChannelClosed;
                    }
                }
                () = self.stop_signal.notified() => {}
            }
        }

        self.status.write().await.running = false;
        info!(reason = ?reason, "cache maintenance daemon stopped");
        let _ = tx.send(MaintenanceEvent::Stopped { reason }).await;
    }

    /// Run one sweep and report it. Returns false if the receiver is gone.
    async fn sweep(&self, tx: &mpsc::Sender<MaintenanceEvent>) -> bool {
        let expired = self.cache.expire_stale();
        let size = self.cache.len();
        let run_number = self.record_sweep(expired).await;

        debug!(run_number, expired, size, "cache maintenance sweep completed");

        tx.send(MaintenanceEvent::SweepCompleted {
            run_number,
            expired,
            size,
        })
        .await
        .is_ok()
    }

    /// Sweep once (for testing or manual invocation).
    pub async fn run_once(&self) -> usize {
        let expired = self.cache.expire_stale();
        self.record_sweep(expired).await;
        expired
    }

    /// Update run counters and return the new run number.
    async fn record_sweep(&self, expired: usize) -> u64 {
        let mut status = self.status.write().await;
        status.total_runs += 1;
        status.total_expired += expired as u64;
        status.last_run = Some(Instant::now());
        status.total_runs
    }

    /// Get current status.
    pub async fn status(&self) -> DaemonStatus {
        self.status.read().await.clone()
    }

    /// Get configuration.
    pub fn config(&self) -> &MaintenanceDaemonConfig {
        &self.config
    }
}
