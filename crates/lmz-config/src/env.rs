use std::sync::OnceLock;

use regex::{Captures, Regex};
use thiserror::Error;

/// Failure to expand a `{{ env.VAR }}` placeholder
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    #[error("line {line}: environment variable not found: `{name}`")]
    Missing { name: String, line: usize },

    #[error("line {line}: only variables scoped with 'env.' are supported: `{key}`")]
    UnsupportedScope { key: String, line: usize },
}

fn placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // 1: dotted key, 2: optional fallback inside default("...")
    RE.get_or_init(|| {
        Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
    })
}

/// Expand `{{ env.VAR }}` placeholders in raw config text
///
/// `{{ env.VAR | default("fallback") }}` substitutes the fallback when the
/// variable is unset. Lines whose first non-blank character is `#` are
/// copied unchanged so commented-out settings never require their
/// variables.
pub fn expand_env(input: &str) -> Result<String, EnvError> {
    let mut output = String::with_capacity(input.len());

    for (index, line) in input.split_inclusive('\n').enumerate() {
        if line.trim_start().starts_with('#') {
            output.push_str(line);
            continue;
        }

        let mut last_end = 0;
        for captures in placeholder().captures_iter(line) {
            let whole = captures.get(0).expect("group 0 always matches");
            output.push_str(&line[last_end..whole.start()]);
            output.push_str(&resolve(&captures, index + 1)?);
            last_end = whole.end();
        }
        output.push_str(&line[last_end..]);
    }

    Ok(output)
}

fn resolve(captures: &Captures<'_>, line: usize) -> Result<String, EnvError> {
    let key = &captures[1];
    let fallback = captures.get(2).map(|m| m.as_str());

    let Some(name) = key.strip_prefix("env.").filter(|name| !name.is_empty() && !name.contains('.')) else {
        return Err(EnvError::UnsupportedScope {
            key: key.to_owned(),
            line,
        });
    };

    match (std::env::var(name), fallback) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(fallback)) => Ok(fallback.to_owned()),
        (Err(_), None) => Err(EnvError::Missing {
            name: name.to_owned(),
            line,
        }),
    }
}
