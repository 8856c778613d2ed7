//! The `chemquiz stats` command.

use std::fmt::Write as _;

use anyhow::Result;
use comfy_table::{Cell, Table};

use quiz_core::model::{AchievementId, PlayerProfile, ScoreBoard};
use services::Clock;

use crate::config::AppConfig;

pub async fn execute(config: &AppConfig) -> Result<()> {
    let services = config.build_services(Clock::default_clock()).await?;
    let profile = services.progress().profile().await;
    let board = services.scores().snapshot().await;

    println!("{}", profile_panel(&profile));
    println!("{}", score_table(&board));
    Ok(())
}

pub fn profile_panel(profile: &PlayerProfile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Level {}", profile.level());
    let _ = writeln!(
        out,
        "XP: {}/100 ({} total, next level at {})",
        profile.xp_into_level(),
        profile.xp(),
        profile.xp_for_next_level()
    );
    let _ = writeln!(out, "Total score: {}", profile.total_score());
    let _ = writeln!(out, "Games played: {}", profile.games_played());
    let _ = writeln!(out, "Accuracy: {}%", profile.accuracy());
    let _ = writeln!(out, "Best streak: {}", profile.best_streak());
    let _ = writeln!(out, "Achievements ([x] unlocked, [~] condition met but not recorded):");
    let pending = profile.pending_achievements();
    for id in AchievementId::ALL {
        let mark = if profile.has_achievement(id) {
            "x"
        } else if pending.contains(&id) {
            "~"
        } else {
            " "
        };
        let _ = writeln!(out, "  [{mark}] {}: {}", id.title(), id.description());
    }
    out
}

pub fn score_table(board: &ScoreBoard) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Category", "Correct", "Answered", "Accuracy", "Streak", "Best"]);
    for (category, score) in board.iter() {
        table.add_row(vec![
            Cell::new(category.title()),
            Cell::new(score.correct()),
            Cell::new(score.total()),
            Cell::new(format!("{}%", score.accuracy_percent())),
            Cell::new(score.streak()),
            Cell::new(score.best_streak()),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuizCategory;

    #[test]
    fn panel_marks_unlocked_achievements() {
        let profile =
            PlayerProfile::from_persisted(250, 250, 1, 75, 6, [AchievementId::Streak5]).unwrap();
        let panel = profile_panel(&profile);
        assert!(panel.contains("Level 3"));
        assert!(panel.contains("XP: 50/100 (250 total, next level at 300)"));
        assert!(panel.contains("[x] Hot Streak"));
        assert!(panel.contains("[~] First Victory"));
        assert!(panel.contains("[ ] Score Master"));
    }

    #[test]
    fn fresh_profile_has_nothing_earned() {
        let panel = profile_panel(&PlayerProfile::default());
        assert!(!panel.contains("[x]"));
        assert!(!panel.contains("[~]"));
    }

    #[test]
    fn table_has_a_row_per_category() {
        let mut board = ScoreBoard::new();
        board.record(QuizCategory::MassTransfer, true);
        board.record(QuizCategory::MassTransfer, false);
        let table = score_table(&board);
        assert_eq!(table.row_iter().count(), QuizCategory::ALL.len());
        assert!(table.to_string().contains("50%"));
    }
}
