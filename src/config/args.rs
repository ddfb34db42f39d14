use crate::core::fetcher::DEFAULT_API_ENDPOINT;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "project365")]
#[command(about = "Builds the HTML page of a year of 365 project photos")]
pub struct CliConfig {
    /// Year to build, matched against the 365:<year> tag
    #[arg(long)]
    pub year: String,

    /// Flickr user id (NSID) whose photos are searched
    #[arg(long)]
    pub user_id: String,

    /// Directory containing the list.html template
    #[arg(long, default_value = "./templates")]
    pub template_dir: String,

    #[arg(long, env = "FLICKR_API_KEY", hide_env_values = true)]
    pub api_key: String,

    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// File name of the page, defaults to <year>.html
    #[arg(long)]
    pub output_file: Option<String>,

    /// Print the page instead of writing it
    #[arg(long)]
    pub stdout: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliConfig {
    pub fn output_file(&self) -> String {
        self.output_file
            .clone()
            .unwrap_or_else(|| format!("{}.html", self.year))
    }
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_year("year", &self.year)?;
        validation::validate_non_empty_string("user_id", &self.user_id)?;
        validation::validate_non_empty_string("api_key", &self.api_key)?;
        validation::validate_url("api_endpoint", &self.api_endpoint)?;
        validation::validate_path("template_dir", &self.template_dir)?;
        if !self.stdout {
            validation::validate_path("output_path", &self.output_path)?;
            validation::validate_path("output_file", &self.output_file())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliConfig {
        let mut argv = vec!["project365", "--api-key", "test-key"];
        argv.extend_from_slice(args);
        CliConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["--year", "2023", "--user-id", "12345"]);

        assert_eq!(config.api_endpoint(), DEFAULT_API_ENDPOINT);
        assert_eq!(config.template_dir, "./templates");
        assert_eq!(config.output_file(), "2023.html");
        assert!(!config.stdout);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_file_override() {
        let config = parse(&[
            "--year",
            "2023",
            "--user-id",
            "12345",
            "--output-file",
            "index.html",
        ]);
        assert_eq!(config.output_file(), "index.html");
    }

    #[test]
    fn test_invalid_year_fails_validation() {
        let config = parse(&["--year", "last", "--user-id", "12345"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_year_is_required() {
        let result = CliConfig::try_parse_from(["project365", "--api-key", "k", "--user-id", "1"]);
        assert!(result.is_err());
    }
}
