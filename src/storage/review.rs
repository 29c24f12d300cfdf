use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Format of `Review::timestamp`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of the date bounds in a query
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A customer review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(rename = "ReviewId")]
    pub review_id: String,
    #[serde(rename = "ReviewBody")]
    pub review_body: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

impl Review {
    /// Create a new review stamped with a fresh id and the current local time
    pub fn new(review_body: String, location: String) -> Self {
        Self {
            review_id: Uuid::new_v4().to_string(),
            review_body,
            location,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn parsed_timestamp(&self) -> Result<NaiveDateTime, TimestampError> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).map_err(|_| {
            TimestampError {
                review_id: self.review_id.clone(),
                value: self.timestamp.clone(),
            }
        })
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("review {review_id} has malformed timestamp {value:?}")]
pub struct TimestampError {
    pub review_id: String,
    pub value: String,
}

/// Selection criteria for a review query. `None` matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewFilter {
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ReviewFilter {
    /// Check a single review. Timestamps are only parsed when a date bound is set.
    pub fn matches(&self, review: &Review) -> Result<bool, TimestampError> {
        if let Some(location) = &self.location {
            if review.location != *location {
                return Ok(false);
            }
        }

        if self.start_date.is_none() && self.end_date.is_none() {
            return Ok(true);
        }

        let timestamp = review.parsed_timestamp()?;

        if let Some(start) = self.start_date {
            if timestamp < start.and_time(NaiveTime::MIN) {
                return Ok(false);
            }
        }

        // Compared against midnight, so later times on the end day fall outside.
        if let Some(end) = self.end_date {
            if timestamp > end.and_time(NaiveTime::MIN) {
                return Ok(false);
            }
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(location: &str, timestamp: &str) -> Review {
        Review {
            review_id: "r1".to_string(),
            review_body: "fine".to_string(),
            location: location.to_string(),
            timestamp: timestamp.to_string(),
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn new_review_has_id_and_formatted_timestamp() {
        let r = Review::new("Great!".into(), "Denver, Colorado".into());

        assert!(Uuid::parse_str(&r.review_id).is_ok());
        assert!(r.parsed_timestamp().is_ok());
        assert_eq!(r.timestamp.len(), "2024-01-01 00:00:00".len());
    }

    #[test]
    fn serializes_with_column_names() {
        let json = serde_json::to_value(review("Fresno, California", "2021-01-01 10:00:00")).unwrap();

        assert_eq!(json["ReviewId"], "r1");
        assert_eq!(json["ReviewBody"], "fine");
        assert_eq!(json["Location"], "Fresno, California");
        assert_eq!(json["Timestamp"], "2021-01-01 10:00:00");
    }

    #[test]
    fn empty_filter_matches_anything() {
        let filter = ReviewFilter::default();
        assert!(filter.matches(&review("Anywhere", "not a timestamp")).unwrap());
    }

    #[test]
    fn location_is_exact_and_case_sensitive() {
        let filter = ReviewFilter {
            location: Some("San Diego, California".into()),
            ..Default::default()
        };

        assert!(filter.matches(&review("San Diego, California", "2021-01-01 10:00:00")).unwrap());
        assert!(!filter.matches(&review("san diego, california", "2021-01-01 10:00:00")).unwrap());
        assert!(!filter.matches(&review("San Diego", "2021-01-01 10:00:00")).unwrap());
    }

    #[test]
    fn start_date_is_inclusive_from_midnight() {
        let filter = ReviewFilter {
            start_date: Some(date("2021-03-10")),
            ..Default::default()
        };

        assert!(filter.matches(&review("X", "2021-03-10 00:00:00")).unwrap());
        assert!(filter.matches(&review("X", "2021-03-11 08:30:00")).unwrap());
        assert!(!filter.matches(&review("X", "2021-03-09 23:59:59")).unwrap());
    }

    #[test]
    fn end_date_stops_at_midnight() {
        let filter = ReviewFilter {
            end_date: Some(date("2021-03-10")),
            ..Default::default()
        };

        assert!(filter.matches(&review("X", "2021-03-09 23:59:59")).unwrap());
        assert!(filter.matches(&review("X", "2021-03-10 00:00:00")).unwrap());
        assert!(!filter.matches(&review("X", "2021-03-10 00:00:01")).unwrap());
    }

    #[test]
    fn malformed_timestamp_is_reported_when_dates_are_set() {
        let filter = ReviewFilter {
            start_date: Some(date("2021-03-10")),
            ..Default::default()
        };

        let err = filter.matches(&review("X", "10/03/2021")).unwrap_err();
        assert_eq!(err.review_id, "r1");
        assert_eq!(err.value, "10/03/2021");
    }

    #[test]
    fn location_mismatch_short_circuits_timestamp_parsing() {
        let filter = ReviewFilter {
            location: Some("Tucson, Arizona".into()),
            end_date: Some(date("2021-03-10")),
            ..Default::default()
        };

        assert!(!filter.matches(&review("Phoenix, Arizona", "garbage")).unwrap());
    }
}
