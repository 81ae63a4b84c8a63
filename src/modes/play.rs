use anyhow::{Context, Result};
use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use rand::Rng;
use std::time::Duration;
use tokio::time::{interval, interval_at, Instant};
use tracing::info;

use super::terminal::{restore_terminal, setup_terminal, Tui};
use crate::game::{Action, GameMode, GameSession, GameStatus, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{HudInfo, Renderer, PLAY_CONTROLS};
use crate::scoring::{GameResult, LocalScoreBoard, ScoreService};

/// Human play: keyboard input, a tick timer that follows the snake's speed,
/// and score submission when a run ends.
///
/// The tick timer keeps firing while idle, paused or after game over; those
/// ticks reach `move_snake` as no-ops, so the timer is only re-armed when a
/// run starts or the snake eats.
pub struct PlayMode<R = rand::rngs::StdRng, S = LocalScoreBoard> {
    session: GameSession<R>,
    scores: S,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    new_high_score: bool,
    rearm_tick: Option<Duration>,
}

impl<R: Rng, S: ScoreService> PlayMode<R, S> {
    pub fn new(session: GameSession<R>, scores: S) -> Self {
        Self {
            session,
            scores,
            metrics: GameMetrics::new(),
            renderer: Renderer::new("Snake", PLAY_CONTROLS),
            input_handler: InputHandler::new(),
            should_quit: false,
            new_high_score: false,
            rearm_tick: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = setup_terminal()?;

        let result = self.run_game_loop(&mut terminal).await;

        restore_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.tick_period());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    self.update_game();
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        let hud = HudInfo {
                            metrics: &self.metrics,
                            high_score: self.scores.high_score(),
                            new_high_score: self.new_high_score,
                            banner: None,
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

            if let Some(period) = self.rearm_tick.take() {
                tick_timer = interval_at(Instant::now() + period, period);
            }
        }

        Ok(())
    }

    fn tick_period(&self) -> Duration {
        Duration::from_millis(self.session.state().speed)
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind == KeyEventKind::Press {
                self.handle_key(key);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.input_handler.handle_key_event(key) {
            KeyAction::GameAction(action) => self.apply(action),
            KeyAction::SwitchMode => {
                let mode = self.session.state().mode.toggled();
                self.apply(Action::SetMode(mode));
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::Speed(_) | KeyAction::None => {}
        }
    }

    /// Forward a command to the session and keep the run clock in step with
    /// the status change it caused
    fn apply(&mut self, action: Action) {
        let before = self.session.state().status;
        self.session.apply(action);
        let after = self.session.state().status;

        match (before, after) {
            (GameStatus::Idle | GameStatus::GameOver, GameStatus::Playing) => {
                self.metrics.on_game_start();
                self.new_high_score = false;
                self.rearm_tick = Some(self.tick_period());
            }
            (GameStatus::Playing, GameStatus::Paused) => self.metrics.on_pause(),
            (GameStatus::Paused, GameStatus::Playing) => self.metrics.on_resume(),
            _ => {}
        }
    }

    fn update_game(&mut self) {
        match self.session.tick() {
            TickOutcome::Ate { speed, .. } => {
                self.rearm_tick = Some(Duration::from_millis(speed));
            }
            TickOutcome::GameOver { score, mode } => self.finish_run(score, mode),
            TickOutcome::Continued => {}
        }
    }

    fn finish_run(&mut self, score: u32, mode: GameMode) {
        let duration = self.metrics.on_game_over();
        let receipt = self.scores.submit_score(&GameResult {
            score,
            mode,
            duration,
        });
        self.new_high_score = receipt.new_high_score;

        if receipt.new_high_score {
            info!(score, "New high score");
        }
    }
}
