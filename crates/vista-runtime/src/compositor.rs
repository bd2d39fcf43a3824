//! Compositor - the single task that owns resolution and composition
//!
//! Session notifications are queued on an mpsc channel and handled one at a
//! time, so every recomputation is observed before the next begins. A frame
//! interval advances in-flight transitions. Every change is published on a
//! watch channel for the renderer.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use vista_core::{SignalSet, Viewport};
use vista_layout::{Composition, CompositionController, TransitionEvent};
use vista_time::Clock;
use vista_tracks::{MediaSession, SessionEvent, SignalWatcher};

use crate::{
    CompositorConfig, HudFrame, HudOverlay, HudSender, RuntimeError, RuntimeResult, TokioClock,
};

/// Compositor statistics
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompositorStats {
    pub events_handled: u64,
    /// Notifications that left the signal set unchanged
    pub events_unchanged: u64,
    pub frames_advanced: u64,
    pub transitions: u64,
}

/// Resolver, controller and clock, driven synchronously
pub struct Compositor<S, C> {
    watcher: SignalWatcher<S>,
    controller: CompositionController,
    clock: C,
    stats: CompositorStats,
}

impl<S: MediaSession, C: Clock> Compositor<S, C> {
    /// Create a compositor showing whatever the session holds right now
    pub fn new(session: S, clock: C, config: &CompositorConfig) -> Self {
        let watcher = SignalWatcher::new(session);
        let mut controller = CompositionController::with_config(config.layout);
        let events = controller.apply(watcher.current(), clock.now());
        Compositor {
            watcher,
            controller,
            clock,
            stats: CompositorStats {
                transitions: events.len() as u64,
                ..CompositorStats::default()
            },
        }
    }

    /// Re-resolve after a session change and recompute the layout
    pub fn handle_event(&mut self, event: &SessionEvent) -> Vec<TransitionEvent> {
        let update = self.watcher.notify(event);
        let now = self.clock.now();
        self.stats.events_handled += 1;
        let events = if update.changed {
            self.controller.apply(&update.signals, now)
        } else {
            self.stats.events_unchanged += 1;
            self.controller.advance(now)
        };
        self.stats.transitions += events.len() as u64;
        events
    }

    /// Advance in-flight transitions to the current frame time
    pub fn tick(&mut self) -> Vec<TransitionEvent> {
        let events = self.controller.advance(self.clock.now());
        self.stats.frames_advanced += 1;
        self.stats.transitions += events.len() as u64;
        events
    }

    pub fn composition(&self) -> Composition {
        self.controller.composition(self.clock.now())
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.controller.set_viewport(viewport);
    }

    pub fn signals(&self) -> &SignalSet {
        self.watcher.current()
    }

    pub fn controller(&self) -> &CompositionController {
        &self.controller
    }

    pub fn stats(&self) -> &CompositorStats {
        &self.stats
    }
}

impl<S: MediaSession> Compositor<S, TokioClock> {
    /// Compositor on tokio time, clamped to the config's `max_clock_step`
    pub fn realtime(session: S, config: &CompositorConfig) -> Self {
        Compositor::new(session, TokioClock::from_config(config), config)
    }
}

enum Command {
    Session(SessionEvent),
    Resize(Viewport),
    Shutdown,
}

/// Cloneable handle to a running compositor. The compositor stops on
/// [`shutdown`](CompositorHandle::shutdown) or once every handle is dropped.
#[derive(Clone)]
pub struct CompositorHandle {
    commands: mpsc::Sender<Command>,
    compositions: watch::Receiver<Composition>,
    hud: watch::Receiver<Option<HudFrame>>,
}

impl CompositorHandle {
    /// Queue a session change, waiting for room
    pub async fn notify(&self, event: SessionEvent) -> RuntimeResult<()> {
        self.commands
            .send(Command::Session(event))
            .await
            .map_err(|_| RuntimeError::CompositorStopped)
    }

    /// Queue a session change without waiting
    pub fn try_notify(&self, event: SessionEvent) -> RuntimeResult<()> {
        self.commands
            .try_send(Command::Session(event))
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => {
                    warn!("compositor queue full, session event dropped");
                    RuntimeError::QueueFull
                }
                mpsc::error::TrySendError::Closed(_) => RuntimeError::CompositorStopped,
            })
    }

    pub async fn resize(&self, viewport: Viewport) -> RuntimeResult<()> {
        self.commands
            .send(Command::Resize(viewport))
            .await
            .map_err(|_| RuntimeError::CompositorStopped)
    }

    /// Ask the compositor to stop. Queued commands ahead of it are still
    /// handled.
    pub async fn shutdown(&self) -> RuntimeResult<()> {
        self.commands
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::CompositorStopped)
    }

    /// Latest published composition
    pub fn composition(&self) -> Composition {
        self.compositions.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Composition> {
        self.compositions.clone()
    }

    /// HUD overlay frames; `None` while the overlay is hidden
    pub fn hud(&self) -> watch::Receiver<Option<HudFrame>> {
        self.hud.clone()
    }
}

impl<S, C> Compositor<S, C>
where
    S: MediaSession + Send + 'static,
    C: Clock + Send + 'static,
{
    /// Move the compositor onto its own task
    pub fn spawn(self, config: &CompositorConfig) -> (CompositorHandle, JoinHandle<CompositorStats>) {
        let (command_tx, command_rx) = mpsc::channel(config.event_buffer.max(1));
        let (composition_tx, composition_rx) = watch::channel(self.composition());
        let (hud_tx, hud_rx) = watch::channel(None);
        let task = tokio::spawn(self.run(
            command_rx,
            composition_tx,
            Arc::new(hud_tx),
            config.frame_interval,
            config.hud_utc_offset_secs,
        ));
        let handle = CompositorHandle {
            commands: command_tx,
            compositions: composition_rx,
            hud: hud_rx,
        };
        (handle, task)
    }

    async fn run(
        mut self,
        mut commands: mpsc::Receiver<Command>,
        compositions: watch::Sender<Composition>,
        hud_frames: HudSender,
        frame_interval: std::time::Duration,
        utc_offset_secs: i32,
    ) -> CompositorStats {
        info!(?frame_interval, "compositor started");
        let mut ticker = tokio::time::interval(frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut hud: Option<HudOverlay> = None;

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Session(event)) => {
                        self.handle_event(&event);
                    }
                    Some(Command::Resize(viewport)) => {
                        debug!(?viewport, "viewport resized");
                        self.set_viewport(viewport);
                    }
                    Some(Command::Shutdown) => {
                        debug!("shutdown requested");
                        break;
                    }
                    None => break,
                },
                _ = ticker.tick() => {
                    if !self.controller.is_animating() {
                        continue;
                    }
                    self.tick();
                }
            }

            self.sync_hud(&mut hud, &hud_frames, utc_offset_secs);
            let next = self.composition();
            compositions.send_if_modified(|current| {
                if *current == next {
                    false
                } else {
                    *current = next;
                    true
                }
            });
        }

        drop(hud);
        info!(stats = ?self.stats, "compositor stopped");
        self.stats
    }

    /// The overlay lives exactly as long as the camera fills the screen
    fn sync_hud(&self, hud: &mut Option<HudOverlay>, frames: &HudSender, utc_offset_secs: i32) {
        match (self.controller.overlay_visible(), hud.is_some()) {
            (true, false) => *hud = Some(HudOverlay::spawn(frames.clone(), utc_offset_secs)),
            (false, true) => *hud = None,
            _ => {}
        }
    }
}
