use crate::core::renderer::{self, TemplateRef};
use crate::core::sorter::group_and_sort;
use crate::core::{PhotoSource, SearchQuery};
use crate::utils::error::Result;
use std::path::Path;

pub struct PageCreator<S: PhotoSource> {
    source: S,
}

impl<S: PhotoSource> PageCreator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Builds the year page for `user_id` from the `list.html` template in
    /// `template_dir`.
    pub fn update(&self, year: &str, user_id: &str, template_dir: &Path) -> Result<String> {
        self.update_with_template(year, user_id, &TemplateRef::directory(template_dir))
    }

    pub fn update_with_template(
        &self,
        year: &str,
        user_id: &str,
        template: &TemplateRef,
    ) -> Result<String> {
        tracing::info!("Building {} page for user {}", year, user_id);

        // Fetch
        let query = SearchQuery::new(year, user_id);
        let photos = self.source.fetch(&query)?;

        // Sort
        let photos = group_and_sort(photos)?;

        // Render
        tracing::info!("Rendering {} photos with {}", photos.len(), template);
        renderer::render(year, &photos, template)
    }
}
