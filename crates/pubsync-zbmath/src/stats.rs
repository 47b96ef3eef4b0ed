//! Run summary reporting

use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use crate::import::{ImportOutcome, WriteDecision};

/// Counts for one import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub created: usize,
    pub refreshed: usize,
    pub skipped: usize,
    pub failed: usize,
    /// Citation files produced
    pub citations: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: ImportOutcome) {
        match outcome.decision {
            WriteDecision::Create => self.created += 1,
            WriteDecision::Refresh => self.refreshed += 1,
            WriteDecision::Skip => self.skipped += 1,
        }
        if outcome.citation {
            self.citations += 1;
        }
    }

    pub fn total(&self) -> usize {
        self.created + self.refreshed + self.skipped + self.failed
    }

    /// One-line summary for log output.
    pub fn log(&self) {
        log::info!(
            "processed {} documents: {} created, {} refreshed, {} skipped, {} failed, {} citations",
            self.total(),
            self.created,
            self.refreshed,
            self.skipped,
            self.failed,
            self.citations
        );
    }

    /// Table rendering for terminal display.
    pub fn print(&self) {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                Cell::new("Outcome").fg(Color::Cyan),
                Cell::new("Documents").fg(Color::Cyan),
            ]);
        table.add_row(vec!["Created", &self.created.to_string()]);
        table.add_row(vec!["Refreshed", &self.refreshed.to_string()]);
        table.add_row(vec!["Skipped", &self.skipped.to_string()]);
        table.add_row(vec!["Failed", &self.failed.to_string()]);
        table.add_row(vec!["Citations", &self.citations.to_string()]);
        eprintln!("\n{table}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_counts_by_decision() {
        let mut summary = RunSummary::default();
        summary.record(ImportOutcome {
            decision: WriteDecision::Create,
            citation: true,
        });
        summary.record(ImportOutcome {
            decision: WriteDecision::Skip,
            citation: false,
        });
        summary.record(ImportOutcome {
            decision: WriteDecision::Refresh,
            citation: false,
        });
        assert_eq!(summary.created, 1);
        assert_eq!(summary.refreshed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.citations, 1);
        assert_eq!(summary.total(), 3);
    }
}
