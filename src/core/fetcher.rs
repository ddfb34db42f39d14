use crate::core::{ConfigProvider, PhotoRecord, PhotoSource, SearchQuery};
use crate::utils::error::{PageError, Result};
use reqwest::blocking::Client;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.flickr.com/services/rest";

const SEARCH_METHOD: &str = "flickr.photos.search";
// 640px image, capture date and owner.
const SEARCH_EXTRAS: &str = "url_z,date_taken,owner_name";
// One per day of a leap year.
const PER_PAGE: &str = "366";

#[derive(Debug, Deserialize)]
struct PhotoPage {
    #[serde(default)]
    pages: Option<u32>,
    photo: Vec<PhotoRecord>,
}

/// Photo search against the Flickr REST API.
pub struct FlickrSource<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> FlickrSource<C> {
    pub fn new(config: C) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn with_client(config: C, client: Client) -> Self {
        Self { config, client }
    }

    pub fn search_params(&self, query: &SearchQuery) -> Vec<(&'static str, String)> {
        vec![
            ("api_key", self.config.api_key().to_string()),
            ("user_id", query.user_id.clone()),
            ("format", "json".to_string()),
            ("nojsoncallback", "1".to_string()),
            ("extras", SEARCH_EXTRAS.to_string()),
            ("method", SEARCH_METHOD.to_string()),
            ("per_page", PER_PAGE.to_string()),
            ("sort", "date-taken-desc".to_string()),
            ("tags", query.tag()),
        ]
    }

    fn search_url(&self, query: &SearchQuery) -> Result<Url> {
        Url::parse_with_params(self.config.api_endpoint(), self.search_params(query)).map_err(
            |e| PageError::InvalidConfigValueError {
                field: "api_endpoint".to_string(),
                value: self.config.api_endpoint().to_string(),
                reason: e.to_string(),
            },
        )
    }
}

impl<C: ConfigProvider> PhotoSource for FlickrSource<C> {
    fn fetch(&self, query: &SearchQuery) -> Result<Vec<PhotoRecord>> {
        let url = self.search_url(query)?;

        // The query string carries the API key, so only the endpoint is logged.
        tracing::debug!(
            "Searching {} for user {} tagged {}",
            self.config.api_endpoint(),
            query.user_id,
            query.tag()
        );
        let response = self.client.get(url).send()?;
        let status = response.status();
        let body = response.text()?;

        tracing::debug!("API response status: {}", status);

        let photos = parse_search_response(status.as_u16(), &body).inspect_err(|e| {
            tracing::error!("{}", e);
            tracing::error!("API response: {}", status);
            tracing::error!("API body: {}", body);
        })?;

        if photos.is_empty() {
            tracing::error!("No photos returned.");
            tracing::error!("API response: {}", status);
            tracing::error!("API body: {}", body);
            return Err(PageError::EmptyResultError { tag: query.tag() });
        }

        tracing::info!("API returned {} photos tagged {}", photos.len(), query.tag());
        Ok(photos)
    }
}

/// Validates the shape of a search response and extracts its photo list.
pub fn parse_search_response(status: u16, body: &str) -> Result<Vec<PhotoRecord>> {
    if !(200..300).contains(&status) {
        return Err(PageError::protocol(format!("HTTP status {}", status)));
    }

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| PageError::protocol(format!("body is not JSON: {}", e)))?;

    let object = value
        .as_object()
        .ok_or_else(|| PageError::protocol("body is not a JSON object"))?;

    if object.get("stat").and_then(|s| s.as_str()) == Some("fail") {
        let code = object
            .get("code")
            .map(|c| c.to_string())
            .unwrap_or_else(|| "?".to_string());
        let message = object
            .get("message")
            .and_then(|m| m.as_str())
            .unwrap_or("no message");
        return Err(PageError::protocol(format!(
            "API error {}: {}",
            code, message
        )));
    }

    let page = object
        .get("photos")
        .filter(|photos| photos.get("photo").is_some())
        .ok_or_else(|| PageError::protocol("missing photos.photo field"))?;

    let page = PhotoPage::deserialize(page)
        .map_err(|e| PageError::protocol(format!("malformed photo list: {}", e)))?;

    for photo in page.photo.iter().filter(|p| p.url.is_empty()) {
        tracing::warn!("Photo {} has no 640px image, its url is empty", photo.id);
    }

    if let Some(pages) = page.pages.filter(|&p| p > 1) {
        tracing::warn!(
            "API reports {} pages of results, only the first page is used",
            pages
        );
    }

    Ok(page.photo)
}
