//! Loading rule sets from TOML documents.
//!
//! A rules document holds an array of `rule` tables,
//! each with a `before` and an `after` template:
//!
//! ```toml
//! [[rule]]
//! before = "f($1$, $2$)"
//! after = "f($2$, $1$)"
//!
//! [[rule]]
//! before = "errors.New($1$)"
//! after = "fmt.Errorf($1$)"
//! ```
//!
//! Rules are applied in the order they appear in the document.

use serde::Deserialize;

use crate::{Rule, RuleSet};

/// Parse a rule set from TOML data.
pub fn from_slice(data: &[u8]) -> Result<RuleSet, Error> {
	from_str(std::str::from_utf8(data)?)
}

/// Parse a rule set from a TOML string.
///
/// All templates are compiled while parsing,
/// so an invalid template is reported here and not when the rules are applied.
pub fn from_str(data: &str) -> Result<RuleSet, Error> {
	let document: Document = toml::from_str(data)?;
	let rules: RuleSet = document
		.rule
		.into_iter()
		.enumerate()
		.map(|(index, rule)| {
			Rule::new(&rule.before, &rule.after).map_err(|error| Error::Rule(InvalidRule { index, error }))
		})
		.collect::<Result<_, _>>()?;
	tracing::debug!(rules = rules.rules().len(), "loaded rewrite rules");
	Ok(rules)
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Document {
	#[serde(default)]
	rule: Vec<RuleSource>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleSource {
	before: String,
	after: String,
}

/// Error for loading a rule set from TOML.
#[derive(Debug)]
pub enum Error {
	/// The input contains invalid UTF-8.
	InvalidUtf8(std::str::Utf8Error),

	/// An error occurred while parsing TOML.
	Toml(toml::de::Error),

	/// A rule in the document has an invalid template.
	Rule(InvalidRule),
}

/// A rule in the document has an invalid template.
#[derive(Debug)]
pub struct InvalidRule {
	/// The position of the rule in the document, starting at zero.
	pub index: usize,

	/// The error reported for the rule.
	pub error: crate::Error,
}

impl From<std::str::Utf8Error> for Error {
	#[inline]
	fn from(other: std::str::Utf8Error) -> Self {
		Self::InvalidUtf8(other)
	}
}

impl From<toml::de::Error> for Error {
	#[inline]
	fn from(other: toml::de::Error) -> Self {
		Self::Toml(other)
	}
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::InvalidUtf8(e) => std::fmt::Display::fmt(e, f),
			Self::Toml(e) => std::fmt::Display::fmt(e, f),
			Self::Rule(e) => write!(f, "Invalid rule {}: {}", e.index, e.error),
		}
	}
}
