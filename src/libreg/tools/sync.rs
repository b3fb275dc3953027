use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info, instrument};
use url::Url;

use crate::libreg::tools::error::{Result, ToolError};
use crate::libreg::tools::io::csv_write;
use crate::libreg::tools::io::excel_read;
use crate::libreg::tools::io::hash_store::{HashStore, content_digest};
use crate::libreg::tools::io::http::Fetch;
use crate::libreg::tools::io::page;
use crate::libreg::tools::model::{SyncOutcome, SyncReport};

/// Page of the Ministry of Culture listing registered libraries.
pub const DEFAULT_PAGE_URL: &str = "https://mk.gov.cz/evidence-knihoven-adresar-knihoven-evidovanych-ministerstvem-kultury-a-souvisejici-informace-cs-341";
pub const DEFAULT_DATA_DIR: &str = "libraries-data";
pub const DEFAULT_EXTENSION: &str = ".xlsx";
pub const DEFAULT_HASH_FILE: &str = "last_hash.txt";

/// Parameters of a synchronisation run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Page that links to the spreadsheet.
    pub page_url: Url,
    /// Directory holding the spreadsheet, its CSV export and the hash record.
    pub data_dir: PathBuf,
    /// Suffix identifying spreadsheet links, e.g. `.xlsx`.
    pub extension: String,
    pub hash_file_name: String,
    /// Network timeout; `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl SyncConfig {
    pub fn new(page_url: Url, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            page_url,
            data_dir: data_dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            hash_file_name: DEFAULT_HASH_FILE.to_string(),
            timeout: None,
        }
    }

    pub fn hash_store(&self) -> HashStore {
        HashStore::new(self.data_dir.join(&self.hash_file_name))
    }
}

impl Default for SyncConfig {
    /// The Ministry of Culture register mirrored into `libraries-data`.
    fn default() -> Self {
        let page_url = Url::parse(DEFAULT_PAGE_URL).expect("DEFAULT_PAGE_URL is a valid URL");
        Self::new(page_url, DEFAULT_DATA_DIR)
    }
}

/// Mirrors the spreadsheet linked from the configured page.
///
/// The download is compared against the stored digest first; an identical
/// file ends the run without touching the data directory. Otherwise the raw
/// file is written, then the digest, then the first sheet is exported as CSV
/// next to it.
#[instrument(
    level = "info",
    skip_all,
    fields(page = %config.page_url, data_dir = %config.data_dir.display())
)]
pub fn sync_spreadsheet<F: Fetch>(config: &SyncConfig, fetcher: &F) -> Result<SyncOutcome> {
    let html = fetcher.fetch(&config.page_url)?;
    let html = String::from_utf8_lossy(&html);

    let href = page::find_spreadsheet_link(&html, &config.extension)?.ok_or_else(|| {
        ToolError::NoSpreadsheetLink {
            page: config.page_url.to_string(),
            extension: config.extension.clone(),
        }
    })?;
    let url = page::resolve_link(&config.page_url, &href)?;
    info!(url = %url, "spreadsheet link found");

    let bytes = fetcher.fetch(&url)?;
    let digest = content_digest(&bytes);
    debug!(bytes = bytes.len(), digest = %digest, "spreadsheet downloaded");

    let store = config.hash_store();
    if store.read()?.as_deref() == Some(digest.as_str()) {
        info!("spreadsheet unchanged since last run");
        return Ok(SyncOutcome::Unchanged {
            url: url.to_string(),
            digest,
        });
    }

    fs::create_dir_all(&config.data_dir)?;
    let file_path = config.data_dir.join(page::file_name(&url)?);
    fs::write(&file_path, &bytes)?;
    store.write(&digest)?;
    info!(path = %file_path.display(), "new spreadsheet saved");

    let defined_names = excel_read::defined_names(&file_path)?;
    let table = excel_read::read_first_sheet(&file_path)?;
    let csv_path = file_path.with_extension("csv");
    csv_write::write_csv(&csv_path, &table)?;
    info!(path = %csv_path.display(), rows = table.row_count(), "CSV exported");

    Ok(SyncOutcome::Updated(SyncReport {
        url: url.to_string(),
        digest,
        file_path,
        csv_path,
        defined_names,
        rows: table.row_count(),
    }))
}
