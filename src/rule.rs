use crate::error::{Error, TemplateRole};
use crate::matcher::Match;
use crate::rewriter::rewrite_parts;
use crate::template::{Pattern, Template};

/// A compiled rewrite rule: a before template to search for and an after template to rewrite into.
///
/// You can compile the rule once and call [`Self::apply()`] on many source texts.
/// This is more efficient than calling [`rewrite()`][crate::rewrite] for each text.
#[derive(Debug, Clone)]
pub struct Rule {
	before: Template,
	after: Template,
	pattern: Pattern,
}

impl Rule {
	/// Compile a rule from a before and after template.
	///
	/// Fails if either template has no placeholder,
	/// or if the before template can not be compiled into a pattern.
	pub fn new(before: &str, after: &str) -> Result<Self, Error> {
		let before = Template::parse(before, TemplateRole::Before)?;
		let pattern = before.pattern()?;
		let after = Template::parse(after, TemplateRole::After)?;
		Ok(Self { before, after, pattern })
	}

	/// Get the before template.
	#[inline]
	pub fn before(&self) -> &Template {
		&self.before
	}

	/// Get the after template.
	#[inline]
	pub fn after(&self) -> &Template {
		&self.after
	}

	/// Get the compiled pattern of the before template.
	#[inline]
	pub fn pattern(&self) -> &Pattern {
		&self.pattern
	}

	/// Find all occurrences of the before template in the source text.
	#[inline]
	pub fn find<'s>(&self, source: &'s str) -> Vec<Match<'s>> {
		self.pattern.find(source)
	}

	/// Rewrite all occurrences of the before template in the source text.
	///
	/// Text outside of the occurrences is copied unchanged.
	/// Rewritten text is never searched again, so a rule that produces its own before template
	/// is applied only once per occurrence.
	///
	/// Either all occurrences are rewritten, or an error is returned.
	pub fn apply(&self, source: &str) -> Result<String, Error> {
		let matches = self.find(source);
		tracing::debug!(
			before = self.before.source(),
			after = self.after.source(),
			matches = matches.len(),
			"applying rewrite rule"
		);
		splice(source, &matches, |m, output| {
			rewrite_parts(m.parts(), self.after.parts(), output)?;
			Ok(())
		})
	}
}

/// Copy the source text, replacing each match with the output of `replace`.
fn splice<F>(source: &str, matches: &[Match], mut replace: F) -> Result<String, Error>
where
	F: FnMut(&Match, &mut String) -> Result<(), Error>,
{
	let mut output = String::with_capacity(source.len() + source.len() / 8);
	let mut finger = 0;
	for m in matches {
		output.push_str(&source[finger..m.start]);
		replace(m, &mut output)?;
		finger = m.end;
	}
	output.push_str(&source[finger..]);
	Ok(output)
}

/// An ordered list of rules, applied one after the other.
///
/// Each rule is applied to the output of the previous rule.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
	rules: Vec<Rule>,
}

impl RuleSet {
	/// Create an empty rule set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a rule at the end of the set.
	pub fn push(&mut self, rule: Rule) {
		self.rules.push(rule);
	}

	/// Get the rules in order of application.
	#[inline]
	pub fn rules(&self) -> &[Rule] {
		&self.rules
	}

	/// Apply all rules in order.
	///
	/// If any rule fails, the error is returned and no output is produced.
	pub fn apply(&self, source: &str) -> Result<String, Error> {
		let mut output = source.to_owned();
		for rule in &self.rules {
			output = rule.apply(&output)?;
		}
		Ok(output)
	}
}

impl From<Vec<Rule>> for RuleSet {
	fn from(rules: Vec<Rule>) -> Self {
		Self { rules }
	}
}

impl FromIterator<Rule> for RuleSet {
	fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
		Self {
			rules: iter.into_iter().collect(),
		}
	}
}
