/// Display strings derived from the game counters.
///
/// The simulation signals which counters changed each tick; the loop
/// then asks the scoreboard to re-render only those strings.  Rendering
/// prints whatever was last prepared and never reads the stats itself.

use crate::entities::GameStats;

#[derive(Clone, Debug)]
pub struct Scoreboard {
    pub score_text: String,
    pub high_score_text: String,
    pub level_text: String,
}

impl Scoreboard {
    pub fn new(stats: &GameStats) -> Self {
        let mut scoreboard = Scoreboard {
            score_text: String::new(),
            high_score_text: String::new(),
            level_text: String::new(),
        };
        scoreboard.prep_score(stats);
        scoreboard.prep_high_score(stats);
        scoreboard.prep_level(stats);
        scoreboard
    }

    pub fn prep_score(&mut self, stats: &GameStats) {
        self.score_text = format!("Score:{:>7}", stats.score);
    }

    pub fn prep_high_score(&mut self, stats: &GameStats) {
        self.high_score_text = format!("Best:{:>7}", stats.high_score);
    }

    pub fn prep_level(&mut self, stats: &GameStats) {
        self.level_text = format!("Level {}", stats.level);
    }

    /// Re-render the best-score string once the score has caught up
    /// with it.
    pub fn check_high_score(&mut self, stats: &GameStats) {
        if stats.score >= stats.high_score {
            self.prep_high_score(stats);
        }
    }
}
