use crate::core::fetcher::DEFAULT_API_ENDPOINT;
use crate::core::ConfigProvider;
use crate::utils::error::{PageError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub flickr: FlickrConfig,
    pub page: PageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlickrConfig {
    pub api_key: String,
    pub endpoint: Option<String>,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub template_dir: String,
    pub output_path: String,
    pub years: Vec<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PageError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PageError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PageError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn user_id(&self) -> &str {
        &self.flickr.user_id
    }

    pub fn template_dir(&self) -> &Path {
        Path::new(&self.page.template_dir)
    }

    pub fn output_path(&self) -> &str {
        &self.page.output_path
    }

    pub fn years(&self) -> &[String] {
        &self.page.years
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        self.flickr.endpoint.as_deref().unwrap_or(DEFAULT_API_ENDPOINT)
    }

    fn api_key(&self) -> &str {
        &self.flickr.api_key
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if self.flickr.api_key.starts_with("${") {
            return Err(PageError::MissingConfigError {
                field: format!("flickr.api_key (environment {})", self.flickr.api_key),
            });
        }
        validation::validate_non_empty_string("flickr.api_key", &self.flickr.api_key)?;
        validation::validate_non_empty_string("flickr.user_id", &self.flickr.user_id)?;
        validation::validate_url("flickr.endpoint", self.api_endpoint())?;
        validation::validate_path("page.template_dir", &self.page.template_dir)?;
        validation::validate_path("page.output_path", &self.page.output_path)?;

        if self.page.years.is_empty() {
            return Err(PageError::MissingConfigError {
                field: "page.years".to_string(),
            });
        }
        for year in &self.page.years {
            validation::validate_year("page.years", year)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC: &str = r#"
[flickr]
api_key = "abc123"
user_id = "12345@N00"

[page]
template_dir = "./templates"
output_path = "./public"
years = ["2022", "2023"]
"#;

    #[test]
    fn test_parse_basic_toml_config() {
        let config = TomlConfig::from_toml_str(BASIC).unwrap();

        assert_eq!(config.api_key(), "abc123");
        assert_eq!(config.api_endpoint(), DEFAULT_API_ENDPOINT);
        assert_eq!(config.user_id(), "12345@N00");
        assert_eq!(config.years(), ["2022", "2023"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PROJECT365_TEST_API_KEY", "from-env");

        let toml_content = r#"
[flickr]
api_key = "${PROJECT365_TEST_API_KEY}"
endpoint = "http://localhost:9999/services/rest"
user_id = "12345"

[page]
template_dir = "./templates"
output_path = "./public"
years = ["2023"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), "from-env");
        assert_eq!(config.api_endpoint(), "http://localhost:9999/services/rest");

        std::env::remove_var("PROJECT365_TEST_API_KEY");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = BASIC.replace("abc123", "${PROJECT365_TEST_UNSET_KEY}");

        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(PageError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str(&BASIC.replace("\"2022\"", "\"22\"")).unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(&BASIC.replace("[\"2022\", \"2023\"]", "[]")).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let result = TomlConfig::from_toml_str("[flickr\napi_key = ");
        assert!(matches!(result, Err(PageError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), "./public");
        assert_eq!(config.template_dir(), Path::new("./templates"));
    }
}
