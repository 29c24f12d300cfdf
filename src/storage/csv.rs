use super::review::Review;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};
use uuid::Uuid;

/// One row of the seed file. `ReviewId` may be absent or blank.
#[derive(Debug, Deserialize)]
struct SeedRecord {
    #[serde(rename = "ReviewId", default)]
    review_id: Option<String>,
    #[serde(rename = "ReviewBody")]
    review_body: String,
    #[serde(rename = "Location")]
    location: String,
    #[serde(rename = "Timestamp")]
    timestamp: String,
}

impl From<SeedRecord> for Review {
    fn from(record: SeedRecord) -> Self {
        let review_id = record
            .review_id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        Review {
            review_id,
            review_body: record.review_body,
            location: record.location,
            timestamp: record.timestamp,
        }
    }
}

/// Load seed reviews from a CSV file. A missing file yields an empty set.
pub fn load_reviews(path: &Path) -> Result<Vec<Review>> {
    if !path.exists() {
        warn!("Seed file {:?} not found, starting with no reviews", path);
        return Ok(Vec::new());
    }

    let file = std::fs::File::open(path).with_context(|| format!("Failed to open {:?}", path))?;
    let reviews = read_reviews(file).with_context(|| format!("Failed to parse {:?}", path))?;

    info!(count = reviews.len(), "Loaded seed reviews from {:?}", path);
    Ok(reviews)
}

pub fn read_reviews<R: Read>(reader: R) -> Result<Vec<Review>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .trim(::csv::Trim::Headers)
        .from_reader(reader);

    reader
        .deserialize::<SeedRecord>()
        .enumerate()
        .map(|(i, row)| {
            row.map(Review::from)
                .with_context(|| format!("Invalid review on data row {}", i + 1))
        })
        .collect()
}
