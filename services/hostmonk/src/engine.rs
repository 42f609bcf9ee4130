//! Engine: one status monitor per configured service

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use crate::config::DashboardConfig;
use crate::io::HttpClient;
use crate::monitor::{MonitorHandle, MonitorOptions, ServiceStatus, StatusMonitor};

/// Owns the monitor of every service in a config, in config order
#[derive(Debug)]
pub struct Engine {
    monitors: Vec<MonitorHandle>,
}

impl Engine {
    /// Start monitoring every service in `config`.
    ///
    /// Probes run every `settings.refresh_interval_ms`. Must be called from
    /// within a tokio runtime.
    pub fn start(config: &DashboardConfig, http: Arc<dyn HttpClient>) -> Self {
        let options = MonitorOptions {
            period: Duration::from_millis(config.settings.refresh_interval_ms),
            ..MonitorOptions::default()
        };
        Self::start_with_options(config, http, options)
    }

    pub fn start_with_options(
        config: &DashboardConfig,
        http: Arc<dyn HttpClient>,
        options: MonitorOptions,
    ) -> Self {
        let ping_enabled = config.settings.enable_ping;
        if !ping_enabled {
            tracing::info!("Status checks disabled by settings.enablePing");
        }

        let monitors = config
            .services
            .iter()
            .map(|service| {
                StatusMonitor::new(service.clone(), Arc::clone(&http), options).start(ping_enabled)
            })
            .collect::<Vec<_>>();

        tracing::info!(
            "Started {} monitors ({} probing)",
            monitors.len(),
            config
                .services
                .iter()
                .filter(|s| ping_enabled && s.ping)
                .count()
        );

        Self { monitors }
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Latest status of every service
    pub fn statuses(&self) -> Vec<ServiceStatus> {
        self.monitors.iter().map(MonitorHandle::status).collect()
    }

    /// One status receiver per service, for the rendering side
    pub fn subscribers(&self) -> Vec<watch::Receiver<ServiceStatus>> {
        self.monitors.iter().map(MonitorHandle::subscribe).collect()
    }

    /// Stop every monitor without waiting for their tasks
    pub fn stop_all(&self) {
        for monitor in &self.monitors {
            monitor.stop();
        }
    }

    /// Stop every monitor and wait for the probe tasks to exit
    pub async fn shutdown(self) {
        self.stop_all();
        for monitor in self.monitors {
            monitor.shutdown().await;
        }
        tracing::debug!("All monitors stopped");
    }
}
