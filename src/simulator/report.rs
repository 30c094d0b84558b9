//! Simulation report generation.

use serde::Serialize;
use std::collections::BTreeMap;

/// Stats for a single life.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub frames: u64,
    pub final_score: u64,
    /// False when the frame cap ended the life.
    pub collided: bool,
    pub jumps: u64,
    pub milestones: u32,
    /// Obstacles released, by type name.
    pub spawned: BTreeMap<String, u64>,
    /// Spawns of the same type as the one before.
    pub repeats: u64,
    /// Frames between consecutive spawns.
    pub spawn_gaps: Vec<u64>,
}

/// Aggregated results from a simulation.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub num_runs: u32,
    pub runs_crashed: u32,
    pub runs_cut_off: u32,

    pub avg_score: f64,
    pub best_score: u64,
    pub avg_frames: f64,
    pub high_score: u64,

    // Spawner analysis
    pub total_spawned: u64,
    pub spawn_share: BTreeMap<String, f64>,
    pub repeat_rate: f64,
    pub avg_spawn_gap: f64,
    pub min_spawn_gap: u64,
    pub max_spawn_gap: u64,

    pub runs: Vec<RunStats>,
}

impl SimReport {
    /// Build a report from completed runs and the final persisted high score.
    pub fn from_runs(runs: Vec<RunStats>, high_score: u64) -> Self {
        let num_runs = runs.len() as u32;
        let denom = num_runs.max(1) as f64;
        let runs_crashed = runs.iter().filter(|r| r.collided).count() as u32;

        let avg_score = runs.iter().map(|r| r.final_score as f64).sum::<f64>() / denom;
        let best_score = runs.iter().map(|r| r.final_score).max().unwrap_or(0);
        let avg_frames = runs.iter().map(|r| r.frames as f64).sum::<f64>() / denom;

        let mut kind_totals: BTreeMap<String, u64> = BTreeMap::new();
        for run in &runs {
            for (name, count) in &run.spawned {
                *kind_totals.entry(name.clone()).or_insert(0) += count;
            }
        }
        let total_spawned: u64 = kind_totals.values().sum();
        let spawn_share = kind_totals
            .into_iter()
            .map(|(name, count)| (name, count as f64 / total_spawned.max(1) as f64))
            .collect();

        let repeats: u64 = runs.iter().map(|r| r.repeats).sum();
        // The first spawn has nothing to repeat
        let repeat_rate = repeats as f64 / total_spawned.saturating_sub(1).max(1) as f64;

        // The first gap only measures from session start
        let gaps: Vec<u64> = runs
            .iter()
            .flat_map(|r| r.spawn_gaps.iter().copied())
            .skip(1)
            .collect();
        let avg_spawn_gap = gaps.iter().sum::<u64>() as f64 / gaps.len().max(1) as f64;
        let min_spawn_gap = gaps.iter().copied().min().unwrap_or(0);
        let max_spawn_gap = gaps.iter().copied().max().unwrap_or(0);

        Self {
            num_runs,
            runs_crashed,
            runs_cut_off: num_runs - runs_crashed,
            avg_score,
            best_score,
            avg_frames,
            high_score,
            total_spawned,
            spawn_share,
            repeat_rate,
            avg_spawn_gap,
            min_spawn_gap,
            max_spawn_gap,
            runs,
        }
    }

    /// Human-readable summary.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("═══ RESULTS ═══════════════════════════════════════════════════\n");
        out.push_str(&format!(
            "  Runs:           {} ({} crashed, {} cut off)\n",
            self.num_runs, self.runs_crashed, self.runs_cut_off
        ));
        out.push_str(&format!("  Avg score:      {:.1}\n", self.avg_score));
        out.push_str(&format!("  Best score:     {}\n", self.best_score));
        out.push_str(&format!("  High score:     {}\n", self.high_score));
        out.push_str(&format!("  Avg frames:     {:.0}\n", self.avg_frames));
        out.push('\n');
        out.push_str("═══ SPAWNER ═══════════════════════════════════════════════════\n");
        out.push_str(&format!("  Obstacles:      {}\n", self.total_spawned));
        for (name, share) in &self.spawn_share {
            out.push_str(&format!("    {:<14}{:>5.1}%\n", name, share * 100.0));
        }
        out.push_str(&format!(
            "  Repeat rate:    {:.1}%\n",
            self.repeat_rate * 100.0
        ));
        out.push_str(&format!(
            "  Spawn gap:      avg {:.1}, min {}, max {} frames\n",
            self.avg_spawn_gap, self.min_spawn_gap, self.max_spawn_gap
        ));
        out
    }

    /// Pretty-printed JSON of the whole report.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(score: u64, collided: bool, kinds: &[(&str, u64)], repeats: u64) -> RunStats {
        RunStats {
            frames: score * 5,
            final_score: score,
            collided,
            spawned: kinds.iter().map(|(k, n)| (k.to_string(), *n)).collect(),
            repeats,
            spawn_gaps: vec![45, 60, 90],
            ..Default::default()
        }
    }

    #[test]
    fn test_aggregates() {
        let report = SimReport::from_runs(
            vec![
                run(100, true, &[("bird", 3), ("small-cactus", 2)], 1),
                run(300, false, &[("bird", 1), ("large-cactus", 4)], 1),
            ],
            300,
        );
        assert_eq!(report.num_runs, 2);
        assert_eq!(report.runs_crashed, 1);
        assert_eq!(report.runs_cut_off, 1);
        assert!((report.avg_score - 200.0).abs() < 1e-9);
        assert_eq!(report.best_score, 300);
        assert_eq!(report.total_spawned, 10);
        assert!((report.spawn_share["bird"] - 0.4).abs() < 1e-9);
        assert!((report.repeat_rate - 2.0 / 9.0).abs() < 1e-9);
        assert_eq!(report.min_spawn_gap, 45);
        assert_eq!(report.max_spawn_gap, 90);
    }

    #[test]
    fn test_empty_report() {
        let report = SimReport::from_runs(Vec::new(), 0);
        assert_eq!(report.num_runs, 0);
        assert_eq!(report.total_spawned, 0);
        assert!((report.avg_score - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_text_and_json_output() {
        let report = SimReport::from_runs(vec![run(50, true, &[("bird", 2)], 0)], 50);
        assert!(report.to_text().contains("Best score:     50"));
        let json = report.to_json().unwrap();
        assert!(json.contains("\"best_score\": 50"));
    }
}
