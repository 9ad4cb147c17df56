//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::TabulaConfig;
use crate::config::secret::secret_string;
use crate::domain::errors::TabulaError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into TabulaConfig
/// 4. Applies environment variable overrides (TABULA_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use tabula::config::loader::load_config;
///
/// let config = load_config("tabula.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<TabulaConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(TabulaError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        TabulaError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: TabulaConfig = toml::from_str(&contents)
        .map_err(|e| TabulaError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        TabulaError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("static regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(TabulaError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the TABULA_* prefix
///
/// Environment variables follow the pattern: TABULA_<SECTION>_<KEY>
/// For example: TABULA_REPOSITORY_BASE_URL, TABULA_EXPORT_OUTPUT_PATH
fn apply_env_overrides(config: &mut TabulaConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("TABULA_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Repository overrides
    if let Ok(val) = std::env::var("TABULA_REPOSITORY_BASE_URL") {
        config.repository.base_url = val;
    }
    if let Ok(val) = std::env::var("TABULA_REPOSITORY_TOKEN") {
        config.repository.token = Some(secret_string(val));
    }
    if let Ok(val) = std::env::var("TABULA_REPOSITORY_TLS_VERIFY") {
        config.repository.tls_verify = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("TABULA_REPOSITORY_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.repository.timeout_seconds = secs;
        }
    }

    // Query overrides
    if let Ok(val) = std::env::var("TABULA_REPOSITORY_QUERY_PROGRAM") {
        config.repository.query.program = val;
    }
    if let Ok(val) = std::env::var("TABULA_REPOSITORY_QUERY_COHORT_IDS") {
        config.repository.query.cohort_ids =
            val.split(',').map(|s| s.trim().to_string()).collect();
    }
    if let Ok(val) = std::env::var("TABULA_REPOSITORY_QUERY_PAGE_SIZE") {
        if let Ok(size) = val.parse() {
            config.repository.query.page_size = size;
        }
    }

    // Export overrides
    if let Ok(val) = std::env::var("TABULA_EXPORT_OUTPUT_PATH") {
        config.export.output_path = val;
    }
    if let Ok(val) = std::env::var("TABULA_EXPORT_TAG_COLUMN") {
        config.export.tag_column = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("TABULA_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("TABULA_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("TABULA_TEST_VAR", "test_value");
        let input = "token = \"${TABULA_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "token = \"test_value\"\n");
        std::env::remove_var("TABULA_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("TABULA_MISSING_VAR");
        let input = "token = \"${TABULA_MISSING_VAR}\"";
        let result = substitute_env_vars(input);
        assert!(result.is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("TABULA_COMMENTED_VAR");
        let input = "# token = \"${TABULA_COMMENTED_VAR}\"\nprogram = \"TCGA\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${TABULA_COMMENTED_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "info"

[repository]
base_url = "https://api.gdc.cancer.gov"

[repository.query]
program = "TCGA"

[export]
output_path = "out/clinical.tsv"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_ok());

        let config = result.unwrap();
        assert_eq!(config.repository.base_url, "https://api.gdc.cancer.gov");
        assert_eq!(config.repository.query.program, "TCGA");
        assert_eq!(config.export.output_path, "out/clinical.tsv");
        assert_eq!(config.export.tag_column, "disease");
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"not = valid = toml").unwrap();
        temp_file.flush().unwrap();

        let result = load_config(temp_file.path());
        assert!(result.is_err());
    }
}
