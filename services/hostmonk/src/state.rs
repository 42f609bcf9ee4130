//! Shared state read by the dashboard

use std::sync::Arc;

use tokio::sync::{watch, RwLock};

use crate::config::DashboardConfig;
use crate::monitor::ServiceStatus;
use crate::theme::{find_theme, get_theme, Theme};

/// Config, status receivers and the selected theme
#[derive(Debug)]
pub struct SharedState {
    pub config: DashboardConfig,
    /// Aligned with `config.services`
    pub statuses: Vec<watch::Receiver<ServiceStatus>>,
    pub theme: RwLock<String>,
}

impl SharedState {
    pub fn new(config: DashboardConfig, statuses: Vec<watch::Receiver<ServiceStatus>>) -> Self {
        let theme = RwLock::new(config.theme.clone());
        Self {
            config,
            statuses,
            theme,
        }
    }

    /// Latest status of every service, in config order
    pub fn snapshot(&self) -> Vec<ServiceStatus> {
        self.config
            .services
            .iter()
            .enumerate()
            .map(|(i, service)| match self.statuses.get(i) {
                Some(rx) => rx.borrow().clone(),
                None => ServiceStatus::unknown(&service.name),
            })
            .collect()
    }

    /// The active theme, resolved with fallback
    pub async fn current_theme(&self) -> &'static Theme {
        get_theme(&self.theme.read().await)
    }

    /// Switch to a known theme. Unknown names leave the selection unchanged.
    pub async fn select_theme(&self, name: &str) -> Option<&'static Theme> {
        let theme = find_theme(name)?;
        *self.theme.write().await = theme.name.to_string();
        tracing::debug!("Theme switched to '{}'", theme.name);
        Some(theme)
    }
}

/// Thread-safe shared state handle
pub type StateHandle = Arc<SharedState>;

pub fn new_state_handle(
    config: DashboardConfig,
    statuses: Vec<watch::Receiver<ServiceStatus>>,
) -> StateHandle {
    Arc::new(SharedState::new(config, statuses))
}
