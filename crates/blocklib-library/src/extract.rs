//! Batch extraction of generated pages into the library.

use std::collections::BTreeMap;

use blocklib_core::model::{Block, EntrySource};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::admission::Admission;
use crate::store::LibraryStore;

/// Totals for one extraction run. `extracted + skipped` equals the number of
/// blocks seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub extracted: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
    /// Count per decision label (`admitted`, `duplicate_exact`,
    /// `duplicate_similar`, `malformed`, `error`).
    pub decisions: BTreeMap<String, usize>,
}

impl ExtractionSummary {
    pub fn total(&self) -> usize {
        self.extracted + self.skipped
    }

    fn tally(&mut self, label: &str) {
        *self.decisions.entry(label.to_string()).or_default() += 1;
    }
}

impl<S: LibraryStore> Admission<S> {
    /// Run every block through admission. Never aborts on a single block.
    pub fn extract_all(&self, blocks: &[Value], source: EntrySource) -> ExtractionSummary {
        let mut summary = ExtractionSummary::default();

        for raw in blocks {
            let block = match Block::from_value(raw) {
                Ok(b) => b,
                Err(e) => {
                    debug!(error = %e, "skipping malformed block");
                    summary.skipped += 1;
                    summary.tally("malformed");
                    continue;
                }
            };

            match self.admit_if_novel(&block, source) {
                Ok(decision) => {
                    if decision.admitted() {
                        summary.extracted += 1;
                    } else {
                        summary.skipped += 1;
                    }
                    summary.tally(decision.label());
                }
                Err(e) => {
                    summary.skipped += 1;
                    summary.errors.push(format!("{}: {e}", block.identifier()));
                    summary.tally("error");
                }
            }
        }

        info!(
            extracted = summary.extracted,
            skipped = summary.skipped,
            errors = summary.errors.len(),
            "extraction finished"
        );
        summary
    }

    /// Extract from a JSON array of pages, each with a `blocks` array.
    ///
    /// Anything other than an array yields a single `Invalid pages array`
    /// error and no work.
    pub fn extract_from_pages(&self, pages: &Value, source: EntrySource) -> ExtractionSummary {
        let Some(pages) = pages.as_array() else {
            return ExtractionSummary {
                errors: vec!["Invalid pages array".to_string()],
                ..ExtractionSummary::default()
            };
        };

        let blocks: Vec<Value> = pages
            .iter()
            .filter_map(|p| p.get("blocks").and_then(Value::as_array))
            .flatten()
            .cloned()
            .collect();
        self.extract_all(&blocks, source)
    }
}
