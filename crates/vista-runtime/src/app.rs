//! Application shell
//!
//! Ties the read-only app config to the session, the welcome view and the
//! compositor: the welcome screen starts the compositor, ending the session
//! stops it and re-enables the welcome screen.

use tokio::task::JoinHandle;
use tracing::{info, warn};
use vista_core::AppConfig;
use vista_tracks::LocalSession;

use crate::{
    Compositor, CompositorConfig, CompositorHandle, CompositorStats, RuntimeResult, WelcomeView,
};

pub struct App {
    config: AppConfig,
    session: LocalSession,
    welcome: WelcomeView,
    running: Option<(CompositorHandle, JoinHandle<CompositorStats>)>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let session = LocalSession::new("local").with_agent_name(config.agent_name.clone());
        let welcome = WelcomeView::new(&config);
        App {
            config,
            session,
            welcome,
            running: None,
        }
    }

    /// Load and validate a JSON config
    pub fn from_json(json: &str) -> RuntimeResult<Self> {
        Ok(App::new(AppConfig::from_json_str(json)?))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &LocalSession {
        &self.session
    }

    pub fn welcome(&self) -> &WelcomeView {
        &self.welcome
    }

    pub fn compositor(&self) -> Option<&CompositorHandle> {
        self.running.as_ref().map(|(handle, _)| handle)
    }

    /// Start button pressed. Spawns the compositor the first time; returns
    /// `None` while a session is already running.
    pub fn start(&mut self, config: &CompositorConfig) -> Option<CompositorHandle> {
        if !self.welcome.start() {
            return None;
        }
        let (handle, task) = Compositor::realtime(self.session.clone(), config).spawn(config);
        info!(company = %self.config.company_name, "session started");
        self.running = Some((handle.clone(), task));
        Some(handle)
    }

    /// End the session. Stops the compositor even while callers still hold
    /// handles to it, then re-enables the welcome screen.
    pub async fn stop(&mut self) -> Option<CompositorStats> {
        let (handle, task) = self.running.take()?;
        if handle.shutdown().await.is_err() {
            warn!("compositor already stopped");
        }
        drop(handle);
        let stats = task.await.ok();
        self.welcome.reset();
        info!("session ended");
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RuntimeError;
    use std::time::Duration;
    use vista_core::ConfigError;
    use vista_tracks::TrackSource;

    #[test]
    fn test_from_json_applies_defaults() {
        let app = App::from_json(r#"{"startButtonText": "Go", "agentName": "jarvis"}"#).unwrap();
        assert_eq!(app.welcome().start_button_text(), "Go");
        assert_eq!(app.config().company_name, "kawantechno");
        assert_eq!(app.config().agent_name.as_deref(), Some("jarvis"));
        assert!(app.compositor().is_none());
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            App::from_json(r#"{"startButtonText": ""}"#),
            Err(RuntimeError::Config(ConfigError::EmptyField(_)))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_and_stop() {
        let mut app = App::new(AppConfig::default());
        let config = CompositorConfig::default();
        let handle = app.start(&config).unwrap();
        assert!(app.welcome().is_disabled());
        assert!(app.start(&config).is_none());

        let session = app.session().clone();
        let (_, event) = session
            .publish(session.local_id(), TrackSource::Camera, false)
            .unwrap();
        handle.notify(event).await.unwrap();
        handle
            .subscribe()
            .wait_for(|c| c.overlay_visible)
            .await
            .unwrap();

        drop(handle);
        let stats = app.stop().await.unwrap();
        assert_eq!(stats.events_handled, 1);
        assert!(!app.welcome().is_disabled());
        assert!(app.stop().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_while_caller_holds_handle() {
        let mut app = App::new(AppConfig::default());
        let config = CompositorConfig::default();
        let handle = app.start(&config).unwrap();

        let stats = tokio::time::timeout(Duration::from_secs(2), app.stop())
            .await
            .expect("stop must not wait on outside handles");
        assert!(stats.is_some());
        assert!(!app.welcome().is_disabled());
        assert!(app.compositor().is_none());

        // The kept handle now sees a stopped compositor
        let session = app.session().clone();
        let (_, event) = session
            .publish(session.local_id(), TrackSource::Camera, false)
            .unwrap();
        assert!(matches!(
            handle.notify(event).await,
            Err(RuntimeError::CompositorStopped)
        ));

        // A fresh session can start again
        assert!(app.start(&config).is_some());
        app.stop().await.unwrap();
    }
}
