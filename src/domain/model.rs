use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// One photo as returned by `flickr.photos.search` with the
/// `url_z,date_taken,owner_name` extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: String,
    /// Empty when the provider has no 640px size for the photo.
    #[serde(rename(deserialize = "url_z"), default)]
    pub url: String,
    #[serde(rename(deserialize = "datetaken"))]
    pub date_taken: String,
    #[serde(rename(deserialize = "ownername"))]
    pub owner_name: String,
    #[serde(default)]
    pub title: String,
}

/// Capture day of a photo, formatted `YYYYMMDD`. Orders chronologically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(String);

impl DateKey {
    /// Normalizes a provider timestamp, discarding the time of day.
    pub fn parse(date_taken: &str) -> Result<Self, chrono::ParseError> {
        let value = date_taken.trim();
        let date = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
            .map(|dt| dt.date())
            .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
            .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.date_naive()))?;
        Ok(Self::from(date))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        DateKey(date.format("%Y%m%d").to_string())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// At most one photo per capture day.
#[derive(Debug, Clone, Default)]
pub struct YearPhotoSet {
    photos: BTreeMap<DateKey, PhotoRecord>,
}

impl YearPhotoSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `photo` under `key`, returning the photo it replaced.
    pub fn insert(&mut self, key: DateKey, photo: PhotoRecord) -> Option<PhotoRecord> {
        self.photos.insert(key, photo)
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn get(&self, key: &DateKey) -> Option<&PhotoRecord> {
        self.photos.get(key)
    }

    /// Newest day first.
    pub fn into_photos(self) -> Vec<PhotoRecord> {
        self.photos.into_values().rev().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub year: String,
    pub user_id: String,
}

impl SearchQuery {
    pub fn new(year: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            user_id: user_id.into(),
        }
    }

    pub fn tag(&self) -> String {
        format!("365:{}", self.year)
    }
}
