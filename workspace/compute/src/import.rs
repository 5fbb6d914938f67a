use common::{ImportSummary, TsRange};
use std::collections::HashSet;
use tracing::{debug, error, info, instrument, warn};

use crate::api::{endpoints, PowercastApi, UploadFile};

/// Endpoint for an import category, or an empty string when the category is
/// unknown (no request must be sent then).
pub fn import_endpoint(category: &str) -> &'static str {
    match category {
        "load" => endpoints::IMPORT_LOAD,
        "weather" => endpoints::IMPORT_WEATHER,
        "holidays" => endpoints::IMPORT_HOLIDAYS,
        _ => "",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Imported(ImportSummary),
    Failed(String),
}

/// Result of importing one file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportResult {
    pub category: String,
    pub file: String,
    pub outcome: ImportOutcome,
}

/// Identity of a result in the log.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportKey {
    pub category: String,
    pub file: String,
    pub range_from: Option<String>,
    pub range_to: Option<String>,
    pub ok: bool,
}

impl ImportResult {
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, ImportOutcome::Imported(_))
    }

    /// Range reported by the backend, if any.
    pub fn range(&self) -> Option<&TsRange> {
        match &self.outcome {
            ImportOutcome::Imported(summary) => summary.ts_range.as_ref(),
            ImportOutcome::Failed(_) => None,
        }
    }

    pub fn key(&self) -> ImportKey {
        let range = self.range();
        ImportKey {
            category: self.category.clone(),
            file: self.file.clone(),
            range_from: range.and_then(|r| r.from.clone()),
            range_to: range.and_then(|r| r.to.clone()),
            ok: self.is_ok(),
        }
    }

    /// One line of the result list.
    pub fn describe(&self) -> String {
        match &self.outcome {
            ImportOutcome::Imported(summary) => {
                let rows = summary
                    .row_count()
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| "-".to_string());
                let mut line = format!("{} → OK • rows: {}", self.file, rows);
                if let Some(range) = &summary.ts_range {
                    line.push_str(&format!(
                        " • range: {} → {}",
                        range.from.as_deref().unwrap_or("-"),
                        range.to.as_deref().unwrap_or("-")
                    ));
                }
                let keys = summary.keys();
                if !keys.is_empty() {
                    line.push_str(&format!(" • {}", keys.join(", ")));
                }
                line
            }
            ImportOutcome::Failed(message) => format!("{} → ERROR: {}", self.file, message),
        }
    }
}

/// Running log of import results, newest first, without duplicates.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImportLog {
    entries: Vec<ImportResult>,
}

impl ImportLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ImportResult] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Adds a batch given in upload order.
    ///
    /// The batch goes on top with its last upload first. When two entries
    /// share a key only the one nearest the top, i.e. the most recent, stays.
    pub fn record_batch(&mut self, batch: Vec<ImportResult>) {
        let mut seen = HashSet::new();
        let combined = batch.into_iter().rev().chain(self.entries.drain(..));
        let entries: Vec<ImportResult> = combined.filter(|r| seen.insert(r.key())).collect();
        self.entries = entries;
    }
}

/// Uploads `files` one at a time to the endpoint of `category`.
///
/// A failing file does not stop the batch. Nothing is sent for an empty
/// selection or an unknown category.
#[instrument(skip(api, files), fields(files = files.len()))]
pub async fn import_batch<A>(api: &A, category: &str, files: &[UploadFile]) -> Vec<ImportResult>
where
    A: PowercastApi + ?Sized,
{
    if files.is_empty() {
        debug!("No files selected, nothing to import");
        return Vec::new();
    }
    let endpoint = import_endpoint(category);
    if endpoint.is_empty() {
        warn!("Unknown import category '{}', skipping {} files", category, files.len());
        return Vec::new();
    }

    let mut results = Vec::with_capacity(files.len());
    for file in files {
        debug!("Importing {} ({} bytes) to {}", file.name, file.bytes.len(), endpoint);
        let outcome = match api.import_file(endpoint, file).await {
            Ok(summary) => {
                info!("Imported {}: {:?} rows", file.name, summary.row_count());
                ImportOutcome::Imported(summary)
            }
            Err(e) => {
                error!("Import of {} failed: {}", file.name, e);
                ImportOutcome::Failed(e.to_string())
            }
        };
        results.push(ImportResult {
            category: category.to_string(),
            file: file.name.clone(),
            outcome,
        });
    }
    results
}
