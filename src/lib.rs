//! Textual find-and-rewrite of call-like patterns.
//!
//! A rewrite is described by two templates: a before template to search for,
//! and an after template that each occurrence is rewritten into.
//! Templates are literal text with numbered placeholders such as `$1$` and `$2$`.
//!
//! # Features
//!
//! * Reorder arguments: `f($1$, $2$)` to `f($2$, $1$)`.
//! * Drop arguments: `f($1$, $2$)` to `f($2$)`.
//! * Duplicate arguments or insert new text: `f($1$, $2$)` to `f($2$, "x", $1$)`.
//! * Nested calls in arguments are captured whole: `g($1$)` matches `g(h(1, 2))` with `h(1, 2)` as argument.
//! * Compile a [`Rule`] once and apply it to many texts, or chain rules in a [`RuleSet`].
//! * Load rule sets from TOML (optional, requires the `toml` feature).
//!
//! Matching is purely textual and confined to a single line.
//! The output is not guaranteed to be well-formed code in any language,
//! so you will typically run a formatter over the result.
//!
//! # Examples
//!
//! The [`rewrite()`][rewrite] function performs a single rewrite on a `&str`.
//!
//! ```
//! # fn main() -> Result<(), rewrite_pattern::Error> {
//! let source = "let x = max(a, b);\nlet y = max(f(c), d);\n";
//! let rewritten = rewrite_pattern::rewrite(source, "max($1$, $2$)", "max($2$, $1$)")?;
//! assert_eq!(rewritten, "let x = max(b, a);\nlet y = max(d, f(c));\n");
//! # Ok(())
//! # }
//! ```
//!
//! A [`Rule`] can be compiled once and applied to many texts.
//!
//! ```
//! # fn main() -> Result<(), rewrite_pattern::Error> {
//! let rule = rewrite_pattern::Rule::new("errors.Wrap($1$, $2$)", "fmt.Errorf($2$ + \": %w\", $1$)")?;
//! assert_eq!(
//!   rule.apply("return errors.Wrap(err, \"open\")")?,
//!   "return fmt.Errorf(\"open\" + \": %w\", err)",
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Invalid templates are reported with the position of the problem.
//!
//! ```
//! let template = "f($1$, $99999999999$)";
//! let error = rewrite_pattern::rewrite("f(a, b)", template, "f($1$)").unwrap_err();
//! let rewrite_pattern::Error::Template(error) = error else { panic!() };
//! assert_eq!(error.source_highlighting(template), concat!(
//!   "  f($1$, $99999999999$)\n",
//!   "          ^^^^^^^^^^^\n",
//! ));
//! ```
#![warn(missing_docs, missing_debug_implementations)]
#![cfg_attr(feature = "doc-cfg", feature(doc_cfg))]

pub mod error;
pub use error::Error;

pub mod matcher;
pub use matcher::{Match, MatchPart};

mod rewriter;
pub use rewriter::rewrite_parts;

mod rule;
pub use rule::{Rule, RuleSet};

mod template;
pub use template::{Part, Pattern, Template};

pub mod features;

/// Rewrite all occurrences of a before template in the source text.
///
/// Each occurrence of `before` is replaced by `after`,
/// with the placeholders of `after` replaced by the text captured for the placeholder with the same label in `before`.
/// Text outside of the occurrences is copied unchanged.
///
/// Templates consist of literal text and placeholders of the form `$N$`, where `N` is a decimal label.
/// Both templates must contain at least one placeholder.
///
/// Either every occurrence is rewritten, or an error is returned.
pub fn rewrite(source: &str, before: &str, after: &str) -> Result<String, Error> {
	Rule::new(before, after)?.apply(source)
}

#[cfg(test)]
mod test {
	use assert2::{assert, check, let_assert};
	use super::*;
	use crate::error::{TemplateError, TemplateRole};

	#[test]
	fn test_rewrite() {
		check!(let Ok("f(b, a)") = rewrite("f(a, b)", "f($1$, $2$)", "f($2$, $1$)").as_deref());
		check!(let Ok("f(b)") = rewrite("f(a, b)", "f($1$, $2$)", "f($2$)").as_deref());
		check!(let Ok("f(b, \"x\", a)") = rewrite("f(a, b)", "f($1$, $2$)", "f($2$, \"x\", $1$)").as_deref());
		check!(let Ok("g(h(1,2))") = rewrite("g(h(1,2))", "g($1$)", "g($1$)").as_deref());
		check!(let Ok("k(h(1,2))") = rewrite("g(h(1,2))", "g($1$)", "k($1$)").as_deref());
	}

	#[test]
	fn test_labels_are_not_positions() {
		check!(let Ok("f(b, a)") = rewrite("f(a, b)", "f($7$, $3$)", "f($3$, $7$)").as_deref());
	}

	#[test]
	fn test_dollar_in_source_and_templates() {
		check!(let Ok("$x.load()") = rewrite("$x.get()", "$1$.get()", "$1$.load()").as_deref());
		check!(let Ok("cost($ 5)") = rewrite("price(5)", "price($1$)", "cost($ $1$)").as_deref());
	}

	#[test]
	#[rustfmt::skip]
	fn test_no_placeholder() {
		let source = "f(a, b)";
		let_assert!(Err(Error::Template(e)) = rewrite(source, "f(a, b)", "f($1$)"));
		assert!(e.role() == TemplateRole::Before);
		assert!(e.to_string() == "No placeholder in before template");
		assert!(e.source_highlighting("f(a, b)") == concat!(
			"  f(a, b)\n",
			"  ^^^^^^^\n",
		));

		let_assert!(Err(Error::Template(TemplateError::NoPlaceholder(e))) = rewrite(source, "f($1$, $2$)", "g()"));
		assert!(e.role == TemplateRole::After);
	}

	#[test]
	fn test_rewrite_count() {
		let_assert!(Err(e) = rewrite("f(a)", "f($1$)", "f($1$, $1$)"));
		assert!(e.to_string() == "After template has more parts than before template: 5 > 3");
	}
}
