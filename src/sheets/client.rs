use super::{RangeSelector, SheetSource, SpreadsheetRef};
use crate::config::{GoogleConfig, SheetConfig};
use crate::error::{AppError, Result};
use crate::sheets::auth::create_and_verify_authenticator;
use crate::sheets::grid::{RowGrid, to_row_grid};
use async_trait::async_trait;
use google_drive3::api::DriveHub;
use google_sheets4::api::{Scope, Sheets};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use tracing::{debug, instrument};

// Read-only access to spreadsheet values
const READ_SCOPE: Scope = Scope::SpreadsheetReadonly;

// Read-only access to Drive metadata, for finding a spreadsheet by name
const LOOKUP_SCOPE: google_drive3::api::Scope = google_drive3::api::Scope::MetadataReadonly;

pub struct SheetsClient {
    hub: Sheets<HttpsConnector<HttpConnector>>,
    spreadsheet_id: String,
}

impl SheetsClient {
    /// Create a new SheetsClient with authenticated access
    #[instrument(name = "Authenticating to Google Sheets", skip_all)]
    pub async fn new(config: &GoogleConfig, sheet: &SheetConfig) -> Result<Self> {
        let spreadsheet = sheet.spreadsheet()?;

        // Finding a spreadsheet by name takes a Drive metadata search, so
        // request that grant up front together with the read scope
        let mut scopes = vec![READ_SCOPE.as_ref().to_string()];
        if matches!(spreadsheet, SpreadsheetRef::Name(_)) {
            scopes.push(LOOKUP_SCOPE.as_ref().to_string());
        }
        let auth = create_and_verify_authenticator(config, &scopes).await?;

        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()
            .unwrap()
            .https_or_http()
            .enable_http1()
            .build();

        let client = Client::builder(hyper_util::rt::TokioExecutor::new()).build(connector);

        let spreadsheet_id = match spreadsheet {
            SpreadsheetRef::Id(id) => id,
            SpreadsheetRef::Name(name) => {
                let drive = DriveHub::new(client.clone(), auth.clone());
                Self::search_spreadsheet_by_name(&drive, &name)
                    .await?
                    .ok_or_else(|| {
                        AppError::Sheets(format!("No spreadsheet named '{}' found", name))
                    })?
            }
        };
        debug!(%spreadsheet_id, "Resolved spreadsheet");

        Ok(Self {
            hub: Sheets::new(client, auth),
            spreadsheet_id,
        })
    }

    #[instrument(name = "Finding spreadsheet by name", skip(drive))]
    async fn search_spreadsheet_by_name(
        drive: &DriveHub<HttpsConnector<HttpConnector>>,
        name: &str,
    ) -> Result<Option<String>> {
        let query = format!(
            "name='{}' and mimeType='application/vnd.google-apps.spreadsheet' and trashed=false",
            escape_query_term(name)
        );

        let (_, file_list) = drive
            .files()
            .list()
            .q(&query)
            .spaces("drive")
            .page_size(1)
            .add_scope(LOOKUP_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to search spreadsheet: {}", e)))?;

        let spreadsheet_id = file_list
            .files
            .and_then(|files| files.into_iter().next())
            .map(|file| file.id.unwrap_or_default());

        Ok(spreadsheet_id)
    }

    /// Title of the leftmost sheet, used when no explicit range is configured
    async fn first_sheet_title(&self) -> Result<String> {
        let (_, spreadsheet) = self
            .hub
            .spreadsheets()
            .get(&self.spreadsheet_id)
            .include_grid_data(false)
            .add_scope(READ_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to get spreadsheet: {}", e)))?;

        spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|sheet| sheet.properties)
            .and_then(|props| props.title)
            .ok_or_else(|| AppError::Sheets("Spreadsheet has no sheets".to_string()))
    }
}

#[async_trait]
impl SheetSource for SheetsClient {
    #[instrument(name = "Fetching sheet values", skip_all)]
    async fn read(&self, selector: &RangeSelector) -> Result<RowGrid> {
        let range = match selector {
            RangeSelector::Explicit(range) => range.clone(),
            RangeSelector::FirstSheet => quote_sheet_title(&self.first_sheet_title().await?),
        };

        let (_, response) = self
            .hub
            .spreadsheets()
            .values_get(&self.spreadsheet_id, &range)
            .add_scope(READ_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to read range '{}': {}", range, e)))?;

        // Values are Option<Vec<Vec<serde_json::Value>>>; absent means the
        // range holds no values
        let grid = to_row_grid(response.values.unwrap_or_default());
        debug!(rows = grid.len(), "Fetched sheet values");

        Ok(grid)
    }
}

/// Quote a sheet title as an A1 range covering the whole sheet. Bare titles
/// with spaces or leading digits are rejected by the API; embedded quotes
/// double inside the quoted form.
fn quote_sheet_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Escape a value for single-quoted interpolation into a Drive query.
fn escape_query_term(term: &str) -> String {
    term.replace('\\', "\\\\").replace('\'', "\\'")
}
