use crate::utils::error::{PopulateError, Result};
use std::fmt;
use std::str::FromStr;

/// A compiled CSS selector, matched by `scraper` against the tree.
#[derive(Debug, Clone)]
pub struct Selector {
    source: String,
    compiled: scraper::Selector,
}

impl Selector {
    /// `[name="value"]`, with the value quoted for CSS.
    pub fn attribute(name: &str, value: &str) -> Result<Self> {
        let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
        format!("[{}=\"{}\"]", name, escaped).parse()
    }

    pub(super) fn compiled(&self) -> &scraper::Selector {
        &self.compiled
    }
}

impl PartialEq for Selector {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Selector {}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Selector {
    type Err = PopulateError;

    fn from_str(input: &str) -> Result<Self> {
        let source = input.trim();
        let compiled =
            scraper::Selector::parse(source).map_err(|e| PopulateError::InvalidSelector {
                selector: input.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            source: source.to_string(),
            compiled,
        })
    }
}
