//! Spectator mode: watch the autoplay controller play an endless demo
//!
//! The spectator ticks on its own fixed cadence instead of following the
//! snake's speed, and restarts the game whenever a run ends.
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - 1-4: Speed control (1=slow, 2=normal, 3=fast, 4=very fast)
//! - M: Switch topology for the next run
//! - Q/Ctrl+C: Quit

use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use rand::Rng;
use std::time::Duration;
use tokio::time::{interval, Interval};
use tracing::info;

use super::terminal::{restore_terminal, setup_terminal, Tui};
use crate::game::{Action, GameMode, GameSession, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{HudInfo, Renderer, WATCH_CONTROLS};

/// Spectator playback speed settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpectatorSpeed {
    /// Twice the configured spectator tick
    Slow,
    /// The configured spectator tick
    Normal,
    /// Half the configured tick
    Fast,
    /// A fifth of the configured tick
    VeryFast,
}

impl SpectatorSpeed {
    fn from_key(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Slow),
            2 => Some(Self::Normal),
            3 => Some(Self::Fast),
            4 => Some(Self::VeryFast),
            _ => None,
        }
    }

    /// Tick interval for this speed given the configured base tick
    fn tick_interval(&self, base_ms: u64) -> Duration {
        let ms = match self {
            Self::Slow => base_ms * 2,
            Self::Normal => base_ms,
            Self::Fast => base_ms / 2,
            Self::VeryFast => base_ms / 5,
        };
        Duration::from_millis(ms.max(1))
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Slow => "Slow",
            Self::Normal => "Normal",
            Self::Fast => "Fast",
            Self::VeryFast => "Very Fast",
        }
    }
}

pub struct WatchMode<R = rand::rngs::StdRng> {
    session: GameSession<R>,
    renderer: Renderer,
    input_handler: InputHandler,
    metrics: GameMetrics,
    should_quit: bool,
    paused: bool,
    speed: SpectatorSpeed,
    /// Topology to use from the next restart on
    pending_mode: Option<GameMode>,
    runs_completed: u32,
    best_score: u32,
}

impl<R: Rng> WatchMode<R> {
    pub fn new(session: GameSession<R>) -> Self {
        Self {
            session,
            renderer: Renderer::new("Spectating", WATCH_CONTROLS),
            input_handler: InputHandler::new(),
            metrics: GameMetrics::new(),
            should_quit: false,
            paused: false,
            speed: SpectatorSpeed::Normal,
            pending_mode: None,
            runs_completed: 0,
            best_score: 0,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        let result = self.run_spectator_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;

        result
    }

    async fn run_spectator_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.tick_interval());

        // Render at 30 FPS
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer);
                    }
                }

                _ = tick_timer.tick() => {
                    if !self.paused {
                        self.step();
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        let hud = HudInfo {
                            metrics: &self.metrics,
                            high_score: self.best_score,
                            new_high_score: false,
                            banner: Some(self.banner()),
                        };
                        self.renderer.render(frame, self.session.state(), &hud);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn tick_interval(&self) -> Duration {
        let base = self.session.engine().config().spectator_tick_ms;
        self.speed.tick_interval(base)
    }

    fn banner(&self) -> String {
        let mut banner = format!(
            "Runs: {}    Playback: {}",
            self.runs_completed,
            self.speed.as_str()
        );
        if let Some(mode) = self.pending_mode {
            banner.push_str(&format!("    Next: {}", mode));
        }
        if self.paused {
            banner.push_str("    PAUSED");
        }
        banner
    }

    /// One spectator tick: restart a finished run, otherwise let the AI move
    fn step(&mut self) {
        if !self.session.state().is_playing() {
            if let Some(mode) = self.pending_mode.take() {
                self.session.apply(Action::SetMode(mode));
            }
            self.session.apply(Action::Start);
            self.metrics.on_game_start();
            return;
        }

        if let TickOutcome::GameOver { score, mode } = self.session.autoplay_tick() {
            self.metrics.on_game_over();
            self.runs_completed += 1;
            self.best_score = self.best_score.max(score);
            info!(
                score,
                %mode,
                runs = self.runs_completed,
                "Spectator run finished"
            );
        }
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                self.handle_key(key, tick_timer);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent, tick_timer: &mut Interval) {
        match self.input_handler.handle_key_event(key) {
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::GameAction(Action::TogglePause) => {
                self.paused = !self.paused;
                if self.paused {
                    self.metrics.on_pause();
                } else {
                    self.metrics.on_resume();
                }
            }
            KeyAction::Speed(level) => {
                if let Some(speed) = SpectatorSpeed::from_key(level) {
                    self.change_speed(speed, tick_timer);
                }
            }
            KeyAction::SwitchMode => {
                let active = self.session.state().mode;
                let next = self.pending_mode.unwrap_or(active).toggled();
                self.pending_mode = (next != active).then_some(next);
            }
            // Steering and starting belong to the autoplay controller here
            KeyAction::GameAction(_) | KeyAction::None => {}
        }
    }

    fn change_speed(&mut self, new_speed: SpectatorSpeed, tick_timer: &mut Interval) {
        self.speed = new_speed;
        *tick_timer = interval(self.tick_interval());
    }
}
