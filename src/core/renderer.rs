use crate::core::PhotoRecord;
use crate::utils::error::{PageError, Result};
use std::path::{Path, PathBuf};
use tera::{Context, Tera};

/// File name of the listing template inside a template directory.
pub const LIST_TEMPLATE: &str = "list.html";

#[derive(Debug, Clone)]
pub enum TemplateRef {
    /// Directory holding `list.html`.
    Directory(PathBuf),
    /// Template source held in memory.
    Inline(String),
}

impl TemplateRef {
    pub fn directory(path: impl AsRef<Path>) -> Self {
        TemplateRef::Directory(path.as_ref().to_path_buf())
    }

    fn load(&self) -> Result<Tera> {
        let mut tera = Tera::default();
        let loaded = match self {
            TemplateRef::Directory(dir) => {
                let path = dir.join(LIST_TEMPLATE);
                tracing::debug!("Loading template {}", path.display());
                tera.add_template_file(&path, Some(LIST_TEMPLATE))
            }
            TemplateRef::Inline(source) => tera.add_raw_template(LIST_TEMPLATE, source),
        };
        loaded.map_err(|source| PageError::RenderError {
            template: self.to_string(),
            source,
        })?;
        Ok(tera)
    }
}

impl std::fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateRef::Directory(dir) => write!(f, "{}", dir.join(LIST_TEMPLATE).display()),
            TemplateRef::Inline(_) => write!(f, "inline {}", LIST_TEMPLATE),
        }
    }
}

/// Renders the year page. The template sees exactly two variables, `year`
/// and `photos`; on failure no output is returned.
pub fn render(year: &str, photos: &[PhotoRecord], template: &TemplateRef) -> Result<String> {
    let tera = template.load()?;

    let mut context = Context::new();
    context.insert("year", year);
    context.insert("photos", photos);

    let html = tera
        .render(LIST_TEMPLATE, &context)
        .map_err(|source| PageError::RenderError {
            template: template.to_string(),
            source,
        })?;

    tracing::debug!("Rendered {} bytes of HTML", html.len());
    Ok(html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const LIST: &str = r#"<h1>{{ year }}</h1>
<ul>
{% for photo in photos %}  <li><img src="{{ photo.url | safe }}" alt="{{ photo.title }}"> {{ photo.owner_name }}</li>
{% endfor %}</ul>
"#;

    fn photo(id: &str, date_taken: &str) -> PhotoRecord {
        PhotoRecord {
            id: id.to_string(),
            url: format!("https://live.staticflickr.com/65535/{}_z.jpg", id),
            date_taken: date_taken.to_string(),
            owner_name: "Rob".to_string(),
            title: format!("Photo {}", id),
        }
    }

    #[test]
    fn test_render_includes_year_and_every_url() {
        let photos = vec![
            photo("2", "2023-03-01 18:00:00"),
            photo("3", "2023-01-15 09:00:00"),
        ];

        let html = render("2023", &photos, &TemplateRef::Inline(LIST.to_string())).unwrap();

        assert!(html.contains("<h1>2023</h1>"));
        assert!(html.contains("https://live.staticflickr.com/65535/2_z.jpg"));
        assert!(html.contains("https://live.staticflickr.com/65535/3_z.jpg"));
        assert!(
            html.find("2_z.jpg").unwrap() < html.find("3_z.jpg").unwrap(),
            "photos keep their order"
        );
    }

    #[test]
    fn test_render_from_directory() {
        let dir = TempDir::new().unwrap();
        let mut file = std::fs::File::create(dir.path().join(LIST_TEMPLATE)).unwrap();
        file.write_all(LIST.as_bytes()).unwrap();

        let html = render(
            "2022",
            &[photo("9", "2022-07-04 12:00:00")],
            &TemplateRef::directory(dir.path()),
        )
        .unwrap();

        assert!(html.contains("<h1>2022</h1>"));
        assert!(html.contains("9_z.jpg"));
    }

    #[test]
    fn test_only_year_and_photos_are_bound() {
        let template = "{% if api_key is defined %}leak{% endif %}{{ photos | length }}";
        let html = render(
            "2023",
            &[photo("1", "2023-01-01 00:00:00")],
            &TemplateRef::Inline(template.to_string()),
        )
        .unwrap();
        assert_eq!(html, "1");
    }

    #[test]
    fn test_html_is_escaped() {
        let mut p = photo("1", "2023-01-01 00:00:00");
        p.title = "<script>".to_string();
        let html = render(
            "2023",
            &[p],
            &TemplateRef::Inline("{{ photos.0.title }}".to_string()),
        )
        .unwrap();
        assert_eq!(html, "&lt;script&gt;");
    }

    #[test]
    fn test_evaluation_failure_is_render_error() {
        let template = "before {{ photos.0.missing_field }} after";
        let result = render(
            "2023",
            &[photo("1", "2023-01-01 00:00:00")],
            &TemplateRef::Inline(template.to_string()),
        );
        assert!(matches!(result, Err(PageError::RenderError { .. })));
    }

    #[test]
    fn test_syntax_error_is_render_error() {
        let result = render("2023", &[], &TemplateRef::Inline("{% for %}".to_string()));
        assert!(matches!(result, Err(PageError::RenderError { .. })));
    }

    #[test]
    fn test_missing_template_file_is_render_error() {
        let dir = TempDir::new().unwrap();
        let result = render("2023", &[], &TemplateRef::directory(dir.path()));
        match result {
            Err(PageError::RenderError { template, .. }) => {
                assert!(template.ends_with(LIST_TEMPLATE))
            }
            other => panic!("expected RenderError, got {:?}", other),
        }
    }
}
