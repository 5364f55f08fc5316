//! Environment variable expansion for configuration strings.
//!
//! - `${VAR}` expands to the value of VAR and errors if it is unset
//! - `${VAR:-default}` falls back to `default` when VAR is unset

use crate::ConfigError;

/// Expand `${...}` references in a configuration value.
///
/// A value without `${` is returned unchanged, bare `$VAR` included. Once a
/// value contains `${`, bare `$VAR` references in it are expanded too.
/// `field` names the config key in error messages.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        std::env::var(var).map(Some).map_err(|_| LookupError {
            var_name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Variable that could not be resolved.
struct LookupError {
    var_name: String,
}

/// Expand an optional value in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(raw) = value.as_deref() {
        *value = Some(expand_env(raw, field)?);
    }
    Ok(())
}
