use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an environment variable, returning a structured error if it's missing.
///
/// A variable that is set but blank counts as missing, since vendor tokens and
/// URLs are never meaningfully empty.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_env_var(name: &str) -> Result<String, MissingEnvVarError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(MissingEnvVarError(name.to_string())),
    }
}

/// Like [`get_env_var`], but for settings that have a fallback.
pub fn get_optional_env_var(name: &str) -> Option<String> {
    get_env_var(name).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_variable_names_itself_in_the_error() {
        let err = get_env_var("SHARED_UTILS_TEST_SURELY_UNSET_VAR").unwrap_err();
        assert_eq!(err.0, "SHARED_UTILS_TEST_SURELY_UNSET_VAR");
        assert_eq!(
            err.to_string(),
            "Missing environment variable: SHARED_UTILS_TEST_SURELY_UNSET_VAR"
        );
    }

    #[test]
    fn optional_variable_is_none_when_unset() {
        assert!(get_optional_env_var("SHARED_UTILS_TEST_SURELY_UNSET_VAR").is_none());
    }
}
