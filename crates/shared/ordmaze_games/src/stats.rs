use serde::{Deserialize, Serialize};

const RECENT_WINDOW: usize = 50;

/// Which direction of score counts as an improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreOrder {
    /// e.g. snake length.
    HigherIsBetter,
    /// e.g. steps to solve a maze.
    LowerIsBetter,
}

/// Per-session round counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameStats {
    pub rounds: u32,
    pub wins: u32,
    pub losses: u32,
    pub recent: Vec<bool>,
    pub last_score: Option<u32>,
    pub best_score: Option<u32>,
    order: ScoreOrder,
}

impl GameStats {
    pub fn new(order: ScoreOrder) -> Self {
        Self {
            rounds: 0,
            wins: 0,
            losses: 0,
            recent: Vec::with_capacity(RECENT_WINDOW),
            last_score: None,
            best_score: None,
            order,
        }
    }

    pub fn record_round(&mut self, won: bool, score: u32) {
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }

        self.recent.push(won);
        if self.recent.len() > RECENT_WINDOW {
            self.recent.remove(0);
        }

        self.rounds += 1;
        self.last_score = Some(score);
        self.best_score = Some(match (self.best_score, self.order) {
            (None, _) => score,
            (Some(b), ScoreOrder::HigherIsBetter) => b.max(score),
            (Some(b), ScoreOrder::LowerIsBetter) => b.min(score),
        });
    }

    pub fn win_rate(&self) -> f32 {
        if self.rounds == 0 {
            0.0
        } else {
            self.wins as f32 / self.rounds as f32
        }
    }

    pub fn recent_rate(&self) -> f32 {
        if self.recent.is_empty() {
            return 0.0;
        }
        let wins = self.recent.iter().filter(|&&w| w).count();
        wins as f32 / self.recent.len() as f32
    }
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new(ScoreOrder::HigherIsBetter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_score_follows_order() {
        let mut hi = GameStats::new(ScoreOrder::HigherIsBetter);
        hi.record_round(false, 5);
        hi.record_round(false, 9);
        hi.record_round(false, 7);
        assert_eq!(hi.best_score, Some(9));
        assert_eq!(hi.last_score, Some(7));

        let mut lo = GameStats::new(ScoreOrder::LowerIsBetter);
        lo.record_round(true, 40);
        lo.record_round(true, 22);
        lo.record_round(true, 31);
        assert_eq!(lo.best_score, Some(22));
    }

    #[test]
    fn rates_and_window() {
        let mut s = GameStats::default();
        assert_eq!(s.win_rate(), 0.0);
        for i in 0..(RECENT_WINDOW + 10) {
            s.record_round(i % 2 == 0, 1);
        }
        assert_eq!(s.recent.len(), RECENT_WINDOW);
        assert_eq!(s.rounds as usize, RECENT_WINDOW + 10);
        assert!((s.win_rate() - 0.5).abs() < 1e-6);
        assert!((s.recent_rate() - 0.5).abs() < 1e-6);
    }
}
