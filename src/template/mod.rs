use crate::error::{PatternCompileError, TemplateError, TemplateRole};

mod parse;
mod pattern;

pub use pattern::Pattern;

/// A parsed rewrite template.
///
/// A template is literal text interspersed with placeholders of the form `$N$`,
/// where `N` is a decimal argument label such as `$1$` or `$12$`.
/// The label identifies the argument across the before and after template of a rule,
/// it is not a positional counter.
///
/// Every template contains at least one placeholder.
#[derive(Clone)]
pub struct Template {
	source: String,
	role: TemplateRole,
	parts: Vec<Part>,
}

/// One piece of a parsed template.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Part {
	/// Literal text, used verbatim.
	///
	/// Literal parts are never empty.
	Literal(String),

	/// An argument slot with the label written in the template.
	Argument(u32),
}

impl std::fmt::Debug for Template {
	#[inline]
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Template").field(&self.source).finish()
	}
}

impl Template {
	/// Parse a template.
	///
	/// The `role` is only used to report which template is invalid.
	///
	/// A `$` that does not start a valid placeholder is kept as literal text.
	/// Parsing fails if the template contains no placeholder at all.
	pub fn parse(source: &str, role: TemplateRole) -> Result<Self, TemplateError> {
		let parts = parse::parse_parts(source, role)?;
		Ok(Self {
			source: source.to_owned(),
			role,
			parts,
		})
	}

	/// Get the original source of the template.
	#[inline]
	pub fn source(&self) -> &str {
		&self.source
	}

	/// Get the role the template was parsed for.
	#[inline]
	pub fn role(&self) -> TemplateRole {
		self.role
	}

	/// Get the parts of the template in order.
	#[inline]
	pub fn parts(&self) -> &[Part] {
		&self.parts
	}

	/// Get the distinct argument labels in order of first appearance.
	pub fn arguments(&self) -> Vec<u32> {
		let mut arguments = Vec::new();
		for part in &self.parts {
			if let Part::Argument(index) = part {
				if !arguments.contains(index) {
					arguments.push(*index);
				}
			}
		}
		arguments
	}

	/// Compile the template into a [`Pattern`] that can be searched for in source text.
	pub fn pattern(&self) -> Result<Pattern, PatternCompileError> {
		Pattern::compile(self)
	}
}
