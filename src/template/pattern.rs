use regex::Regex;

use super::{Part, Template};
use crate::error::PatternCompileError;
use crate::matcher::{self, Match};

/// The wildcard that every argument slot is replaced with.
///
/// It does not match line breaks, so a match never spans multiple lines.
pub(crate) const WILDCARD: &str = "(.*)";

/// A before template compiled into a searchable expression.
#[derive(Clone)]
pub struct Pattern {
	/// The expression used to search for occurrences.
	regex: Regex,

	/// The same expression, anchored at both ends.
	///
	/// Used to check that a corrected match boundary still covers a full occurrence.
	exact: Regex,

	/// The literal text between argument slots.
	///
	/// Always contains one more entry than `arguments`, empty chunks included.
	chunks: Vec<String>,

	/// The argument labels, in template order.
	arguments: Vec<u32>,
}

impl std::fmt::Debug for Pattern {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Pattern").field(&self.regex.as_str()).finish()
	}
}

impl Pattern {
	/// Compile a template into a pattern.
	///
	/// Literal text is escaped so it only ever matches itself.
	/// Each argument slot becomes a greedy wildcard group,
	/// and the whole expression is wrapped in one outer group spanning the full occurrence.
	pub(crate) fn compile(template: &Template) -> Result<Self, PatternCompileError> {
		let mut body = String::with_capacity(template.source().len() * 2);
		let mut chunks = vec![String::new()];
		let mut arguments = Vec::new();
		for part in template.parts() {
			match part {
				Part::Literal(text) => {
					body.push_str(&regex::escape(text));
					// Chunks always has at least one entry.
					if let Some(chunk) = chunks.last_mut() {
						chunk.push_str(text);
					}
				},
				Part::Argument(index) => {
					body.push_str(WILDCARD);
					chunks.push(String::new());
					arguments.push(*index);
				},
			}
		}

		let expression = format!("({body})");
		let regex = Regex::new(&expression).map_err(|e| PatternCompileError::new(&expression, e))?;
		let exact = format!(r"\A{expression}\z");
		let exact = Regex::new(&exact).map_err(|e| PatternCompileError::new(&exact, e))?;
		Ok(Self {
			regex,
			exact,
			chunks,
			arguments,
		})
	}

	/// Get the expression text.
	#[inline]
	pub fn as_str(&self) -> &str {
		self.regex.as_str()
	}

	/// Find all non-overlapping occurrences of the pattern in the source text.
	///
	/// Matches are returned in ascending order of position.
	#[inline]
	pub fn find<'s>(&self, source: &'s str) -> Vec<Match<'s>> {
		matcher::find(source, self)
	}

	/// Check if the whole text is exactly one occurrence of the pattern.
	#[inline]
	pub fn matches_exactly(&self, text: &str) -> bool {
		self.exact.is_match(text)
	}

	/// Find the first raw occurrence at or after `start`, without boundary correction.
	pub(crate) fn find_raw_at(&self, source: &str, start: usize) -> Option<std::ops::Range<usize>> {
		let captures = self.regex.captures_at(source, start)?;
		captures.get(1).map(|m| m.range())
	}

	/// The literal chunks between the argument slots.
	#[inline]
	pub(crate) fn chunks(&self) -> &[String] {
		&self.chunks
	}

	/// The text of the final literal chunk after its last closing parenthesis.
	///
	/// Empty if the final chunk has no closing parenthesis.
	pub(crate) fn closing_tail(&self) -> &str {
		let last = self.chunks.last().map(String::as_str).unwrap_or_default();
		match memchr::memrchr(b')', last.as_bytes()) {
			Some(i) => &last[i + 1..],
			None => "",
		}
	}

	/// The argument labels in template order.
	#[inline]
	pub(crate) fn arguments(&self) -> &[u32] {
		&self.arguments
	}
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use crate::error::TemplateRole;
	use assert2::{assert, let_assert};

	fn compile(source: &str) -> Pattern {
		let_assert!(Ok(template) = Template::parse(source, TemplateRole::Before));
		let_assert!(Ok(pattern) = template.pattern());
		pattern
	}

	#[test]
	fn test_expression() {
		assert!(compile("f($1$, $2$)").as_str() == r"(f\((.*), (.*)\))");
		assert!(compile("$1$.Close()").as_str() == r"((.*)\.Close\(\))");
		assert!(compile("a[$1$]").as_str() == r"(a\[(.*)\])");
	}

	#[test]
	fn test_chunks() {
		let pattern = compile("f($1$, $2$)");
		assert!(pattern.chunks() == ["f(", ", ", ")"]);
		assert!(pattern.arguments() == [1, 2]);

		let pattern = compile("$3$$1$");
		assert!(pattern.chunks() == ["", "", ""]);
		assert!(pattern.arguments() == [3, 1]);
	}

	#[test]
	fn test_closing_tail() {
		assert!(compile("f($1$);").closing_tail() == ";");
		assert!(compile("f($1$).Err()").closing_tail() == "");
		assert!(compile("f($1$), $2$").closing_tail() == "");
		assert!(compile("f($1$)  // x").closing_tail() == "  // x");
	}

	#[test]
	fn test_compile_error() {
		let source = "$1$".repeat(250_000);
		let_assert!(Ok(template) = Template::parse(&source, TemplateRole::Before));
		let_assert!(Err(e) = template.pattern());
		assert!(e.to_string().starts_with("Failed to compile pattern \"((.*)(.*)"));
		assert!(!e.message.is_empty());
		let_assert!(crate::Error::PatternCompile(_) = crate::Error::from(e));
	}

	#[test]
	fn test_matches_exactly() {
		let pattern = compile("g($1$)");
		assert!(pattern.matches_exactly("g(h(1,2))"));
		assert!(pattern.matches_exactly("g()"));
		assert!(!pattern.matches_exactly("g(a) + 1"));
		assert!(!pattern.matches_exactly("x = g(a)"));
	}

	#[test]
	fn test_find_raw_is_greedy() {
		let pattern = compile("g($1$)");
		assert!(pattern.find_raw_at("x = g(a) + g(b)", 0) == Some(4..15));
		assert!(pattern.find_raw_at("g(a)\ng(b)", 1) == Some(5..9));
		assert!(pattern.find_raw_at("g(a", 0) == None);
	}
}
