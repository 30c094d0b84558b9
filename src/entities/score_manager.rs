//! Score accrual, high score tracking, milestones and the score overlay.

use crate::canvas::{palette, Canvas, TextStyle};
use crate::constants::*;
use crate::events::GameEvent;
use crate::high_score::HighScoreStore;
use crate::world::{Entity, EntityKind, GameContext};
use std::any::Any;
use tracing::{info, warn};

pub struct ScoreManager {
    score: f64,
    high_score: u64,
    /// Highest `floor(score / 100)` already announced.
    last_milestone: u32,
    rate: f64,
    store: Box<dyn HighScoreStore>,
}

impl ScoreManager {
    pub fn new(store: Box<dyn HighScoreStore>, rate: f64) -> Self {
        let high_score = store.load();
        Self {
            score: 0.0,
            high_score,
            last_milestone: 0,
            rate,
            store,
        }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Whole points shown to the player.
    pub fn display_score(&self) -> u64 {
        self.score.floor() as u64
    }

    pub fn high_score(&self) -> u64 {
        self.high_score
    }

    pub fn last_milestone(&self) -> u32 {
        self.last_milestone
    }

    /// Zero the score. Milestones already announced this session stay
    /// announced.
    pub fn reset(&mut self) {
        self.score = 0.0;
    }

    fn check_milestone(&mut self, ctx: &mut GameContext) {
        let milestone = (self.score / MILESTONE_INTERVAL).floor() as u32;
        if milestone > self.last_milestone {
            self.last_milestone = milestone;
            ctx.emit(GameEvent::Milestone(milestone));
        }
    }

    fn check_high_score(&mut self, ctx: &mut GameContext) {
        let whole = self.display_score();
        if whole <= self.high_score {
            return;
        }
        self.high_score = whole;
        ctx.emit(GameEvent::NewHighScore(whole));
        if let Err(e) = self.store.save(whole) {
            warn!(error = %e, "failed to persist high score");
        }
    }

    fn draw_game_over(&self, canvas: &mut dyn Canvas) {
        let (w, h) = (canvas.width(), canvas.height());
        canvas.fill_rect(0.0, 0.0, w, h, palette::OVERLAY);

        let center = w / 2.0;
        canvas.fill_text(
            "Game Over!",
            center,
            180.0,
            TextStyle::new(48.0, palette::OVERLAY_TEXT).bold().centered(),
        );
        let body = TextStyle::new(24.0, palette::OVERLAY_TEXT).centered();
        canvas.fill_text(
            &format!("Your Score: {}", self.display_score()),
            center,
            220.0,
            body,
        );
        if self.display_score() >= self.high_score {
            canvas.fill_text(
                "New High Score!",
                center,
                250.0,
                TextStyle::new(24.0, palette::GOLD).centered(),
            );
        }
        canvas.fill_text("Press R to Restart", center, 300.0, body);
    }
}

impl Entity for ScoreManager {
    fn kind(&self) -> EntityKind {
        EntityKind::ScoreManager
    }

    fn update(&mut self, ctx: &mut GameContext) {
        if !ctx.running {
            return;
        }

        self.score += self.rate;
        self.check_milestone(ctx);
        self.check_high_score(ctx);

        ctx.score = self.score;
        ctx.high_score = self.high_score;
    }

    fn draw(&self, ctx: &GameContext, canvas: &mut dyn Canvas) {
        canvas.fill_rect(10.0, 10.0, 180.0, 100.0, palette::SCORE_PANEL);

        let text = TextStyle::new(20.0, palette::TEXT);
        canvas.fill_text(&format!("Score: {}", self.display_score()), 20.0, 30.0, text);
        canvas.fill_text(&format!("High Score: {}", self.high_score), 20.0, 60.0, text);
        canvas.fill_text(&format!("Speed: {:.1}", ctx.ground_speed), 20.0, 90.0, text);

        if !ctx.running {
            self.draw_game_over(canvas);
        }
    }

    fn on_restart(&mut self, ctx: &mut GameContext) {
        info!(final_score = self.display_score(), "score reset");
        self.reset();
        ctx.score = 0.0;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
