//! Raw dataset download

use crate::{ExtractError, Result};
use sha1::{Digest, Sha1};
use sstubs_core::DatasetVariant;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// Fetch the raw JSON file for `variant` into `raw_dir`
///
/// An existing file is kept unless `force` is set. The body must be a JSON
/// array with the variant's SHA-1; nothing is written otherwise.
#[instrument(skip(raw_dir))]
pub async fn download_raw(
    variant: DatasetVariant,
    raw_dir: &Path,
    force: bool,
) -> Result<PathBuf> {
    let path = raw_dir.join(variant.raw_file_name());
    if path.exists() && !force {
        info!("Raw data already present at {}", path.display());
        return Ok(path);
    }

    tokio::fs::create_dir_all(raw_dir).await?;

    info!("Downloading {} dataset from {}", variant, variant.url());
    let response = reqwest::get(variant.url()).await?.error_for_status()?;
    let body = response.bytes().await?;
    debug!("Received {} bytes", body.len());

    check_body(variant, &body)?;

    tokio::fs::write(&path, &body).await?;
    info!("Saved raw data to {}", path.display());
    Ok(path)
}

fn check_body(variant: DatasetVariant, body: &[u8]) -> Result<()> {
    if body.iter().find(|b| !b.is_ascii_whitespace()) != Some(&b'[') {
        return Err(ExtractError::Download(format!(
            "{} did not return a JSON array",
            variant.url()
        )));
    }

    let actual = sha1_hex(body);
    if actual != variant.sha1sum() {
        return Err(ExtractError::Download(format!(
            "checksum mismatch for {}: expected {}, got {}",
            variant.raw_file_name(),
            variant.sha1sum(),
            actual
        )));
    }
    Ok(())
}

fn sha1_hex(body: &[u8]) -> String {
    format!("{:x}", Sha1::digest(body))
}
