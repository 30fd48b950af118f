//! Remote calibration sheets
//!
//! Downloads a CSV export and parses it into a [`Dataset`] ready for
//! `aquai_schemas::calibrate`.

use std::time::Duration;

use aquai_schemas::Dataset;

use crate::http::{HttpConfig, HttpConnector};
use crate::ConnectorError;

/// Fetch and parse a CSV sheet from `url`
pub async fn fetch_dataset(url: &str, timeout: Duration) -> Result<Dataset, ConnectorError> {
    let http = HttpConnector::new(HttpConfig::new(url).timeout(timeout))?;
    let body = http.get_text("").await?;
    let dataset = Dataset::from_csv_reader(body.as_bytes())?;
    log::info!("fetched {} rows from {url}", dataset.len());
    Ok(dataset)
}
