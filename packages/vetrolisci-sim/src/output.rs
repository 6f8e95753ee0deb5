//! JSON-lines results and the end-of-run summary.

use std::io::Write;

use serde::Serialize;
use vetrolisci::domain::PLAYERS;

use crate::simulator::GameResult;

pub struct OutputWriter<W: Write> {
    out: W,
}

impl<W: Write> OutputWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_game(&mut self, result: &GameResult) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string(result)?;
        writeln!(self.out, "{json}")?;
        Ok(())
    }

    pub fn write_summary(&mut self, summary: &Summary) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string(&serde_json::json!({ "summary": summary }))?;
        writeln!(self.out, "{json}")?;
        self.out.flush()?;
        Ok(())
    }
}

#[derive(Debug, Default, Serialize)]
pub struct Summary {
    pub games: u32,
    pub errors: u32,
    pub wins: [u32; PLAYERS],
    pub draws: u32,
    pub mean_scores: [f64; PLAYERS],
}

impl Summary {
    pub fn from_results(results: &[GameResult], errors: u32) -> Self {
        let mut summary = Summary {
            games: results.len() as u32,
            errors,
            ..Default::default()
        };
        if results.is_empty() {
            return summary;
        }

        let mut totals = [0i64; PLAYERS];
        for result in results {
            match result.winner {
                Some(seat) => summary.wins[usize::from(seat)] += 1,
                None => summary.draws += 1,
            }
            for (total, score) in totals.iter_mut().zip(result.final_scores) {
                *total += i64::from(score);
            }
        }
        for (mean, total) in summary.mean_scores.iter_mut().zip(totals) {
            *mean = total as f64 / results.len() as f64;
        }
        summary
    }
}
