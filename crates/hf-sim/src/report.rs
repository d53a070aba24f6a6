//! Simulation report output

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use hf_slot::JackpotTier;
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::stats::SessionStats;

/// Report of one simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimReport {
    /// Game name
    pub game: String,

    /// Timestamp (UTC)
    pub timestamp: String,

    /// Seed the run used; replaying it reproduces the numbers
    pub seed: u64,

    /// Stake per spin
    pub bet: u64,

    pub stats: SessionStats,

    pub duration_ms: u64,
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

impl SimReport {
    pub fn new(game: &str, seed: u64, bet: u64, stats: SessionStats, duration_ms: u64) -> Self {
        Self {
            game: game.to_string(),
            timestamp: timestamp_now(),
            seed,
            bet,
            stats,
            duration_ms,
        }
    }

    /// Spins per second over the whole run
    pub fn spins_per_sec(&self) -> f64 {
        if self.duration_ms == 0 {
            0.0
        } else {
            self.stats.total_spins as f64 * 1000.0 / self.duration_ms as f64
        }
    }

    /// Generate text report
    pub fn to_text(&self) -> String {
        let s = &self.stats;
        let title = format!("{} simulation", self.game);
        let mut out = String::new();

        let _ = writeln!(out, "{title}");
        let _ = writeln!(out, "{}\n", "=".repeat(title.len()));
        let _ = writeln!(out, "Timestamp: {}", self.timestamp);
        let _ = writeln!(out, "Seed:      {}", self.seed);
        let _ = writeln!(out, "Bet:       {}\n", self.bet);

        let _ = writeln!(
            out,
            "Spins:     {} ({:.0} spins/s)",
            s.total_spins,
            self.spins_per_sec()
        );
        let _ = writeln!(out, "Wagered:   {}", s.total_bet);
        let _ = writeln!(
            out,
            "Won:       {} (base {}, feature {})",
            s.total_win(),
            s.base_win,
            s.feature_win
        );
        let _ = writeln!(out, "RTP:       {:.2}% (base {:.2}%)", s.rtp(), s.base_rtp());
        let _ = writeln!(out, "Hit rate:  {:.2}%", s.hit_rate());
        match s.feature_frequency() {
            Some(freq) => {
                let _ = writeln!(
                    out,
                    "Features:  {} (1 in {:.1} spins)",
                    s.features_triggered, freq
                );
            }
            None => {
                let _ = writeln!(out, "Features:  0");
            }
        }
        let jackpots = JackpotTier::ALL
            .iter()
            .map(|&tier| format!("{} {}", tier.display_name(), s.jackpots.get(tier)))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "Jackpots:  {jackpots}");
        let _ = writeln!(out, "Top win:   {}", s.biggest_win);
        out
    }

    /// Generate JSON report
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Generate markdown report
    pub fn to_markdown(&self) -> String {
        let s = &self.stats;
        let mut out = String::new();

        let _ = writeln!(out, "# {} simulation\n", self.game);
        let _ = writeln!(out, "**Timestamp:** {}  ", self.timestamp);
        let _ = writeln!(out, "**Seed:** {}\n", self.seed);

        out.push_str("| Metric | Value |\n");
        out.push_str("|--------|-------|\n");
        let _ = writeln!(out, "| Spins | {} |", s.total_spins);
        let _ = writeln!(out, "| Bet | {} |", self.bet);
        let _ = writeln!(out, "| RTP | {:.2}% |", s.rtp());
        let _ = writeln!(out, "| Base RTP | {:.2}% |", s.base_rtp());
        let _ = writeln!(out, "| Hit Rate | {:.2}% |", s.hit_rate());
        let _ = writeln!(out, "| Features | {} |", s.features_triggered);
        let _ = writeln!(out, "| Jackpots | {} |", s.jackpots.total());
        let _ = writeln!(out, "| Top Win | {} |", s.biggest_win);
        let _ = writeln!(out, "| Duration | {} ms |", self.duration_ms);
        out
    }

    /// Save report to file
    pub fn save<P: AsRef<Path>>(&self, path: P, format: ReportFormat) -> Result<()> {
        let content = match format {
            ReportFormat::Text => self.to_text(),
            ReportFormat::Json => self.to_json()?,
            ReportFormat::Markdown => self.to_markdown(),
        };
        fs::write(path, content)?;
        Ok(())
    }
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SSZ`
fn timestamp_now() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let (year, month, day) = civil_from_days(secs / 86_400);
    let time_of_day = secs % 86_400;

    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
        year,
        month,
        day,
        time_of_day / 3600,
        (time_of_day % 3600) / 60,
        time_of_day % 60
    )
}

/// Days since 1970-01-01 to a (year, month, day) date
fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z % 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);
    (year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::JackpotCounts;

    fn make_report() -> SimReport {
        let stats = SessionStats {
            total_spins: 1_000,
            total_bet: 1_000,
            base_win: 700,
            feature_win: 250,
            wins: 300,
            features_triggered: 4,
            feature_ticks: 30,
            jackpots: JackpotCounts {
                mini: 1,
                ..Default::default()
            },
            biggest_win: 120,
        };
        SimReport::new("Three Pigs", 42, 1, stats, 500)
    }

    #[test]
    fn test_text_report() {
        let text = make_report().to_text();
        assert!(text.starts_with("Three Pigs simulation"));
        assert!(text.contains("RTP:       95.00% (base 70.00%)"));
        assert!(text.contains("Hit rate:  30.00%"));
        assert!(text.contains("1 in 250.0 spins"));
        assert!(text.contains("Jackpots:  Mini 1, Minor 0, Major 0"));
    }

    #[test]
    fn test_json_report() {
        let report = make_report();
        let json = report.to_json().unwrap();
        let parsed: SimReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.stats, report.stats);
        assert_eq!(parsed.seed, 42);
    }

    #[test]
    fn test_markdown_report() {
        let md = make_report().to_markdown();
        assert!(md.contains("| RTP | 95.00% |"));
        assert!(md.contains("| Jackpots | 1 |"));
    }

    #[test]
    fn test_spins_per_sec() {
        assert_eq!(make_report().spins_per_sec(), 2_000.0);
    }

    #[test]
    fn test_civil_from_days() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
        assert_eq!(civil_from_days(11_016), (2000, 2, 29));
        assert_eq!(civil_from_days(20_454), (2026, 1, 1));
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp_now();
        assert_eq!(ts.len(), 20);
        assert!(ts.ends_with('Z'));
    }
}
