pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::{
    fetcher::FlickrSource,
    page_creator::PageCreator,
    renderer::{render, TemplateRef},
    sorter::group_and_sort,
};
pub use crate::domain::model::{DateKey, PhotoRecord, SearchQuery, YearPhotoSet};
pub use crate::utils::error::{PageError, Result};
