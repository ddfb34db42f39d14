pub mod fetcher;
pub mod page_creator;
pub mod renderer;
pub mod sorter;

pub use crate::domain::model::{DateKey, PhotoRecord, SearchQuery, YearPhotoSet};
pub use crate::domain::ports::{ConfigProvider, PhotoSource, Storage};
pub use crate::utils::error::Result;
