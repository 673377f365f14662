use std::time::{Duration, Instant};

/// Tallies over a batch of evaluated games
#[derive(Debug, Clone)]
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
    pub wins: u32,
    /// Games cut off by the step cap
    pub timeouts: u32,
    total_score: u64,
    total_steps: u64,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
            wins: 0,
            timeouts: 0,
            total_score: 0,
            total_steps: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.start_time.elapsed();
    }

    /// Record one finished game
    pub fn on_game_over(&mut self, final_score: u32, steps: u64, won: bool, timed_out: bool) {
        self.games_played += 1;
        self.total_score += final_score as u64;
        self.total_steps += steps;
        if won {
            self.wins += 1;
        }
        if timed_out {
            self.timeouts += 1;
        }
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn average_score(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_score as f64 / self.games_played as f64
        }
    }

    pub fn average_steps(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.total_steps as f64 / self.games_played as f64
        }
    }

    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.wins as f64 / self.games_played as f64
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    pub fn format_summary(&self) -> String {
        format!(
            "Games: {} | Wins: {} ({:.1}%) | Avg score: {:.2} | High score: {} | Avg steps: {:.1} | Timeouts: {} | Time: {}",
            self.games_played,
            self.wins,
            self.win_rate() * 100.0,
            self.average_score(),
            self.high_score,
            self.average_steps(),
            self.timeouts,
            self.format_time(),
        )
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
