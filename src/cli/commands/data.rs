use anyhow::{Context, Result};
use common::DataKind;
use compute::coverage::{columns, row_cells};
use compute::{
    check_health, import_batch, load_coverage, upload_selected, ImportLog, PowercastApi,
    UploadFile, UploadOutcome,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Loads files from disk, named by their file name only.
pub async fn read_files(paths: &[PathBuf]) -> Result<Vec<UploadFile>> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let name = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        debug!("Read {} ({} bytes)", name, bytes.len());
        files.push(UploadFile::new(name, bytes));
    }
    Ok(files)
}

pub async fn health<A: PowercastApi + ?Sized>(api: &A) -> Result<()> {
    let line = check_health(api).await?;
    println!("{}", line);
    Ok(())
}

pub async fn upload<A: PowercastApi + ?Sized>(api: &A, paths: &[PathBuf]) -> Result<()> {
    let files = read_files(paths).await?;
    let outcome = upload_selected(api, &files).await?;
    if outcome == UploadOutcome::NoFiles {
        warn!("Upload called without files");
    }
    println!("{}", outcome.message());
    Ok(())
}

/// Imports the files and prints the result log, newest first.
pub async fn import<A: PowercastApi + ?Sized>(api: &A, category: &str, paths: &[PathBuf]) -> Result<()> {
    if compute::import_endpoint(category).is_empty() {
        anyhow::bail!("Unknown import category '{}' (expected load, weather or holidays)", category);
    }
    let files = read_files(paths).await?;
    let results = import_batch(api, category, &files).await;
    let failed = results.iter().filter(|r| !r.is_ok()).count();

    let mut log = ImportLog::new();
    log.record_batch(results);
    for entry in log.entries() {
        println!("{}", entry.describe());
    }
    info!("Imported {} files, {} failed", files.len(), failed);

    if failed > 0 {
        anyhow::bail!("{} of {} imports failed", failed, files.len());
    }
    Ok(())
}

pub async fn coverage<A: PowercastApi + ?Sized>(api: &A, kind: DataKind) -> Result<()> {
    let view = load_coverage(api, kind).await?;

    for (label, line) in view.summary_lines() {
        println!("{}: {}", label, line);
    }
    println!();

    if view.rows.is_empty() {
        println!("no data");
        return Ok(());
    }
    println!("{}", columns(kind).join("\t"));
    for row in &view.rows {
        println!("{}", row_cells(row).join("\t"));
    }
    Ok(())
}
