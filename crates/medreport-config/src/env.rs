use regex::{Captures, Regex};
use std::env;

use crate::ConfigError;

/// Interpolate environment variables in a string.
/// Replaces `${VAR_NAME}` with the value of the environment variable.
/// Every unset variable is reported in a single `MissingEnvVars` error.
pub fn interpolate_env(input: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
        .map_err(|e| ConfigError::InvalidConfig(e.to_string()))?;

    let mut missing = Vec::new();
    let result = re.replace_all(input, |caps: &Captures| match env::var(&caps[1]) {
        Ok(value) => value,
        Err(_) => {
            if !missing.iter().any(|m: &String| m == &caps[1]) {
                missing.push(caps[1].to_string());
            }
            String::new()
        }
    });

    if !missing.is_empty() {
        return Err(ConfigError::MissingEnvVars(missing));
    }

    Ok(result.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_env() {
        env::set_var("MEDREPORT_TEST_HOST", "0.0.0.0");
        env::set_var("MEDREPORT_TEST_PORT", "8080");

        let input = "host: ${MEDREPORT_TEST_HOST}\nport: ${MEDREPORT_TEST_PORT}";
        let result = interpolate_env(input).unwrap();
        assert_eq!(result, "host: 0.0.0.0\nport: 8080");
    }

    #[test]
    fn test_interpolate_env_missing() {
        let input = "dir: ${MISSING_VAR_12345}";
        match interpolate_env(input) {
            Err(ConfigError::MissingEnvVars(vars)) => {
                assert_eq!(vars, vec!["MISSING_VAR_12345"]);
            }
            other => panic!("Expected MissingEnvVars error, got {:?}", other),
        }
    }

    #[test]
    fn test_interpolate_env_multiple_missing_reported_once() {
        let input = "${MISSING_ONE_12345} ${MISSING_TWO_12345} ${MISSING_ONE_12345}";
        match interpolate_env(input) {
            Err(ConfigError::MissingEnvVars(vars)) => {
                assert_eq!(vars, vec!["MISSING_ONE_12345", "MISSING_TWO_12345"]);
            }
            other => panic!("Expected MissingEnvVars error, got {:?}", other),
        }
    }

    #[test]
    fn test_interpolate_env_no_vars() {
        let input = "no variables here";
        assert_eq!(interpolate_env(input).unwrap(), "no variables here");
        assert_eq!(interpolate_env("").unwrap(), "");
    }

    #[test]
    fn test_interpolate_env_repeated_and_adjacent() {
        env::set_var("MEDREPORT_VAR_A", "hello");
        env::set_var("MEDREPORT_VAR_B", "world");
        let input = "${MEDREPORT_VAR_A}${MEDREPORT_VAR_B} ${MEDREPORT_VAR_A}";
        assert_eq!(interpolate_env(input).unwrap(), "helloworld hello");
    }

    #[test]
    fn test_interpolate_env_partial_syntax_not_matched() {
        assert_eq!(
            interpolate_env("not a $VAR variable").unwrap(),
            "not a $VAR variable"
        );
        assert_eq!(
            interpolate_env("not a ${VAR variable").unwrap(),
            "not a ${VAR variable"
        );
    }

    #[test]
    fn test_interpolate_env_special_chars_in_value() {
        env::set_var("MEDREPORT_SPECIAL", "value with $pecial ch@rs!");
        let input = "${MEDREPORT_SPECIAL}";
        assert_eq!(interpolate_env(input).unwrap(), "value with $pecial ch@rs!");
    }
}
