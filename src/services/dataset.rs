use crate::models::BusinessRecord;
use chrono::{DateTime, Utc};
use moka::future::Cache;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

const SNAPSHOT_KEY: &str = "dataset";

/// Errors that can occur when loading the dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("dataset source returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("dataset contained no usable records")]
    Empty,
}

/// Why a parsed record was rejected at ingestion
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record has no usable name")]
    MissingName,

    #[error("record is missing coordinates")]
    MissingCoordinates,

    #[error("record has non-finite coordinates")]
    InvalidCoordinates,
}

/// One line of the raw line-delimited dataset, before validation
#[derive(Debug, Deserialize)]
struct RawBusinessRecord {
    business_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    postal_code: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    stars: Option<f64>,
    #[serde(default)]
    categories: Option<String>,
    #[serde(default)]
    attributes: Option<HashMap<String, serde_json::Value>>,
}

impl TryFrom<RawBusinessRecord> for BusinessRecord {
    type Error = RecordError;

    fn try_from(raw: RawBusinessRecord) -> Result<Self, Self::Error> {
        let name = raw
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or(RecordError::MissingName)?;

        let (Some(latitude), Some(longitude)) = (raw.latitude, raw.longitude) else {
            return Err(RecordError::MissingCoordinates);
        };

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(RecordError::InvalidCoordinates);
        }

        Ok(Self {
            business_id: raw.business_id,
            name,
            address: raw.address.unwrap_or_default(),
            city: raw.city.unwrap_or_default(),
            state: raw.state.unwrap_or_default(),
            postal_code: raw.postal_code.unwrap_or_default(),
            latitude,
            longitude,
            stars: raw.stars,
            categories: raw.categories,
            attributes: raw.attributes,
        })
    }
}

/// Counters from one ingestion pass
#[derive(Debug, Default, Clone, Copy)]
pub struct IngestStats {
    /// Non-empty input lines seen
    pub lines: usize,
    /// Records that made it into the snapshot
    pub loaded: usize,
    /// Lines that were not valid JSON
    pub malformed: usize,
    /// Valid JSON that failed record validation (name/coordinates)
    pub rejected: usize,
}

/// An immutable, fully parsed view of the dataset
///
/// Queries in flight keep their `Arc` alive, so a refresh never mutates what
/// a reader is scanning; the cache just swaps in a new snapshot.
#[derive(Debug)]
pub struct DatasetSnapshot {
    pub records: Vec<BusinessRecord>,
    pub fetched_at: DateTime<Utc>,
    pub stats: IngestStats,
}

/// Parse a line-delimited JSON dataset into validated records
///
/// Malformed lines and records that fail validation are counted and logged,
/// never fatal. Records keep their input order; the proximity filter's tie
/// breaking depends on it.
pub fn parse_dataset(raw: &str) -> (Vec<BusinessRecord>, IngestStats) {
    let mut records = Vec::new();
    let mut stats = IngestStats::default();

    for (index, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        stats.lines += 1;

        match serde_json::from_str::<RawBusinessRecord>(line) {
            Ok(raw_record) => match BusinessRecord::try_from(raw_record) {
                Ok(record) => records.push(record),
                Err(e) => {
                    stats.rejected += 1;
                    tracing::debug!("Dropping record on line {}: {}", index + 1, e);
                }
            },
            Err(e) => {
                stats.malformed += 1;
                tracing::debug!("Error parsing line {}: {}", index + 1, e);
            }
        }
    }

    stats.loaded = records.len();
    (records, stats)
}

/// Dataset ingestion service
///
/// Downloads the line-delimited dataset from the configured source and keeps
/// the parsed snapshot behind a TTL cache, so the upstream is hit at most
/// once per TTL window regardless of query volume.
pub struct DatasetService {
    source_url: String,
    client: Client,
    cache: Cache<&'static str, Arc<DatasetSnapshot>>,
}

impl DatasetService {
    /// Create a new dataset service
    pub fn new(source_url: String, ttl_secs: u64, request_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(request_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            source_url,
            client,
            cache,
        }
    }

    /// Current dataset snapshot, fetching from the source on a cold or
    /// expired cache
    pub async fn snapshot(&self) -> Result<Arc<DatasetSnapshot>, DatasetError> {
        if let Some(snapshot) = self.cache.get(SNAPSHOT_KEY).await {
            tracing::trace!("Dataset snapshot cache hit");
            return Ok(snapshot);
        }

        let snapshot = Arc::new(self.fetch().await?);
        self.cache.insert(SNAPSHOT_KEY, snapshot.clone()).await;
        Ok(snapshot)
    }

    /// The cached snapshot, if one is live; never triggers a fetch
    pub async fn cached_snapshot(&self) -> Option<Arc<DatasetSnapshot>> {
        self.cache.get(SNAPSHOT_KEY).await
    }

    async fn fetch(&self) -> Result<DatasetSnapshot, DatasetError> {
        tracing::info!("Fetching dataset from {}", self.source_url);

        let response = self.client.get(&self.source_url).send().await?;

        if !response.status().is_success() {
            return Err(DatasetError::Status(response.status()));
        }

        let body = response.text().await?;
        let (records, stats) = parse_dataset(&body);

        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        tracing::info!(
            "Dataset loaded: {} records from {} lines ({} malformed, {} rejected)",
            stats.loaded,
            stats.lines,
            stats.malformed,
            stats.rejected
        );

        Ok(DatasetSnapshot {
            records,
            fetched_at: Utc::now(),
            stats,
        })
    }
}
