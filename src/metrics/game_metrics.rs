use std::time::{Duration, Instant};

/// Wall-clock timing of the current run, owned by the driver.
///
/// Paused time is excluded, and the clock freezes once the run ends so the
/// game-over screen keeps showing the final duration.
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    paused_at: Option<Instant>,
    paused_total: Duration,
    running: bool,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            paused_at: None,
            paused_total: Duration::ZERO,
            running: false,
        }
    }

    pub fn update(&mut self) {
        if self.running && self.paused_at.is_none() {
            self.elapsed_time = self.start_time.elapsed().saturating_sub(self.paused_total);
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.paused_at = None;
        self.paused_total = Duration::ZERO;
        self.running = true;
    }

    pub fn on_pause(&mut self) {
        self.update();
        if self.running && self.paused_at.is_none() {
            self.paused_at = Some(Instant::now());
        }
    }

    pub fn on_resume(&mut self) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += paused_at.elapsed();
        }
    }

    /// Stop the clock and return the active play time of the run
    pub fn on_game_over(&mut self) -> Duration {
        self.on_resume();
        self.update();
        self.running = false;
        self.elapsed_time
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
