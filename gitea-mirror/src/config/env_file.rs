//! `KEY=VALUE` file parsing.

use super::ConfigError;
use std::collections::HashMap;

/// Parses the contents of a `KEY=VALUE` configuration file.
///
/// Blank lines and lines starting with `#` are skipped. Every other line is
/// split at its first `=`, so values may themselves contain `=`. Keys and
/// values are trimmed. Later duplicates overwrite earlier ones.
///
/// # Errors
///
/// Returns [`ConfigError::MalformedLine`] for a line without a separator.
pub(crate) fn parse_env_file(
    contents: &str,
    path: &str,
) -> Result<HashMap<String, String>, ConfigError> {
    let mut values = HashMap::new();

    for (index, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(ConfigError::MalformedLine {
                path: path.to_string(),
                line_number: index + 1,
                line: line.to_string(),
            });
        };

        values.insert(key.trim().to_string(), value.trim().to_string());
    }

    Ok(values)
}
