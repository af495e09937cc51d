//! Spreadsheet import: parse the first sheet, bulk-insert every row.

use std::path::Path;
use std::sync::Arc;

use crate::error::{ImportError, ImportResult, SpreadsheetError};
use crate::parser::{parse_bytes, ParseResult};
use crate::service::ContactStore;
use crate::status::{Operation, StatusEvent, StatusReporter};

use super::{BusyFlag, ListingComponent};

pub const NO_FILE_MESSAGE: &str = "Select a file to import.";

/// A file chosen by the user.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { name, bytes })
    }
}

/// Imports spreadsheets into the contacts table.
///
/// Headers are not checked against any schema: whatever columns the first row
/// names are sent as-is. The insert is one request, so the whole batch
/// succeeds or the whole import reports one error.
pub struct ImportComponent {
    store: Arc<dyn ContactStore>,
    reporter: Arc<StatusReporter>,
    listing: Arc<ListingComponent>,
    busy: BusyFlag,
}

impl ImportComponent {
    pub fn new(
        store: Arc<dyn ContactStore>,
        reporter: Arc<StatusReporter>,
        listing: Arc<ListingComponent>,
    ) -> Self {
        Self {
            store,
            reporter,
            listing,
            busy: BusyFlag::default(),
        }
    }

    /// Import the selected file and refresh the listing on success.
    ///
    /// An empty sheet still issues the (empty) insert request.
    pub async fn import_file(&self, file: Option<SelectedFile>) -> StatusEvent {
        let result = {
            let _busy = self.busy.enter();
            self.run(file).await
        };

        let event = match &result {
            Ok(count) => StatusEvent::success(
                Operation::Import,
                format!("Contacts imported ({}).", count),
            ),
            Err(ImportError::NoFile) => StatusEvent::warning(Operation::Import, NO_FILE_MESSAGE),
            Err(err) => StatusEvent::error(Operation::Import, format!("Import failed. {}", err)),
        };
        self.reporter.report(event.clone());

        if result.is_ok() {
            self.listing.refresh().await;
        }
        event
    }

    async fn run(&self, file: Option<SelectedFile>) -> ImportResult<usize> {
        let file = file.ok_or(ImportError::NoFile)?;
        let parsed = parse_off_thread(file.bytes).await?;

        self.store.insert_many(&parsed.records).await?;
        Ok(parsed.records.len())
    }

    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }
}

/// Workbook decoding is CPU work; keep it off the async workers.
async fn parse_off_thread(bytes: Vec<u8>) -> Result<ParseResult, SpreadsheetError> {
    tokio::task::spawn_blocking(move || parse_bytes(&bytes))
        .await
        .map_err(|e| SpreadsheetError::Io(std::io::Error::other(e)))?
}
