use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{GameState, GameStatus, Position};
use crate::metrics::GameMetrics;

/// Per-frame information that lives outside the game state
pub struct HudInfo<'a> {
    pub metrics: &'a GameMetrics,
    pub high_score: u32,
    /// Set once the scoring service confirmed the finished run as a new best
    pub new_high_score: bool,
    /// Extra driver text shown in the header, e.g. spectator playback speed
    pub banner: Option<String>,
}

/// Key hints shown in the footer, as (keys, description) pairs
pub type ControlHints = &'static [(&'static str, &'static str)];

pub const PLAY_CONTROLS: ControlHints = &[
    ("↑↓←→/WASD", "move"),
    ("Enter", "start"),
    ("Space/Esc", "pause"),
    ("M", "mode"),
    ("Q", "quit"),
];

pub const WATCH_CONTROLS: ControlHints = &[
    ("Space", "pause"),
    ("1-4", "speed"),
    ("M", "mode"),
    ("Q", "quit"),
];

pub struct Renderer {
    title: &'static str,
    controls: ControlHints,
}

impl Renderer {
    pub fn new(title: &'static str, controls: ControlHints) -> Self {
        Self { title, controls }
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, hud: &HudInfo) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(chunks[0], state, hud);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.status == GameStatus::GameOver {
            let game_over = self.render_game_over(game_area, state, hud);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(game_area, state);
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(state.grid_size);

        for y in 0..state.grid_size {
            let mut spans = Vec::with_capacity(state.grid_size);

            for x in 0..state.grid_size {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.head() {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.is_occupied_by_snake(pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == state.food {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let (title, border_color) = match state.status {
            GameStatus::Idle => (" Press Enter to start ".to_string(), Color::Gray),
            GameStatus::Paused => (format!(" {} (paused) ", self.title), Color::Yellow),
            _ => (format!(" {} ", self.title), Color::White),
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, _area: Rect, state: &GameState, hud: &HudInfo) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(hud.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Mode: ", label),
            Span::styled(state.mode.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{}ms", state.speed), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(hud.metrics.format_time(), value),
        ];

        if let Some(banner) = &hud.banner {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(banner.clone(), Style::default().fg(Color::Cyan)));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(&self, _area: Rect, state: &GameState, hud: &HudInfo) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                verdict(state.score),
                Style::default().fg(Color::Gray),
            )),
        ];

        if hud.new_high_score {
            text.push(Line::from(Span::styled(
                "New high score!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let mut spans = Vec::new();
        for (i, (keys, description)) in self.controls.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(*keys, Style::default().fg(Color::Cyan)));
            spans.push(Span::raw(format!(" {}", description)));
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

/// One-line comment on a final score
fn verdict(score: u32) -> &'static str {
    if score >= 200 {
        "Amazing run!"
    } else if score >= 100 {
        "Great job!"
    } else if score >= 50 {
        "Nice try!"
    } else {
        "Keep practicing!"
    }
}
