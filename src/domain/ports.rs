use crate::domain::model::{PhotoRecord, SearchQuery};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn api_endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
}

/// Where the photos of one year come from.
pub trait PhotoSource {
    fn fetch(&self, query: &SearchQuery) -> Result<Vec<PhotoRecord>>;
}
