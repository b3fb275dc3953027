use std::path::PathBuf;

/// A sheet loaded into memory as rendered cell text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetTable {
    pub sheet_name: String,
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    /// Number of rows, header row included.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Workbook-level named reference such as `Tabulka1` → `List1!$A$1:$K$900`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinedName {
    pub name: String,
    pub formula: String,
}

/// Details of a run that persisted a new spreadsheet version.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    /// Absolute URL the spreadsheet was downloaded from.
    pub url: String,
    /// Hex encoded SHA-256 of the downloaded bytes.
    pub digest: String,
    pub file_path: PathBuf,
    pub csv_path: PathBuf,
    pub defined_names: Vec<DefinedName>,
    /// Rows written to the CSV file.
    pub rows: usize,
}

/// Result of a single synchronisation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SyncOutcome {
    /// The remote file matches the stored hash; nothing was written.
    Unchanged { url: String, digest: String },
    /// A new version was saved and converted.
    Updated(SyncReport),
}

impl SyncOutcome {
    pub fn url(&self) -> &str {
        match self {
            SyncOutcome::Unchanged { url, .. } => url,
            SyncOutcome::Updated(report) => &report.url,
        }
    }
}
