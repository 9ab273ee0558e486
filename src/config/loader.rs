//! Configuration loader with TOML parsing and environment variable substitution
//!
//! Backend configuration is an in-process value; this loader is a convenience
//! for services that keep it in a TOML file next to the rest of their
//! deployment configuration.

use super::schema::BackendConfig;
use crate::domain::errors::PolystoreError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads a backend configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`BackendConfig`]
/// 4. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - A referenced environment variable is not set
/// - TOML parsing fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use polystore::config::load_config;
///
/// let config = load_config("polystore.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<BackendConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(PolystoreError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        PolystoreError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let config: BackendConfig = toml::from_str(&contents)
        .map_err(|e| PolystoreError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    config.validate().map_err(|e| {
        PolystoreError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid env var pattern");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        // Skip comment lines - don't process env vars in comments
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
        return Err(PolystoreError::Configuration(format!(
            "Missing environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_known_var() {
        std::env::set_var("POLYSTORE_TEST_REGION", "eu-west-1");
        let input = "region = \"${POLYSTORE_TEST_REGION}\"";
        let output = substitute_env_vars(input).unwrap();
        assert_eq!(output.trim_end(), "region = \"eu-west-1\"");
        std::env::remove_var("POLYSTORE_TEST_REGION");
    }

    #[test]
    fn test_missing_var_is_an_error() {
        let input = "region = \"${POLYSTORE_TEST_UNSET_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("POLYSTORE_TEST_UNSET_VAR"));
    }

    #[test]
    fn test_comment_lines_are_untouched() {
        let input = "# uses ${POLYSTORE_TEST_UNSET_VAR}\nenvironment = \"dev\"";
        let output = substitute_env_vars(input).unwrap();
        assert!(output.contains("${POLYSTORE_TEST_UNSET_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config("/nonexistent/polystore.toml").unwrap_err();
        assert!(matches!(err, PolystoreError::Configuration(_)));
    }
}
