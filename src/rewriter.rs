use crate::error::RewriteCountError;
use crate::matcher::MatchPart;
use crate::template::Part;

/// Build the replacement text for one occurrence.
///
/// Literal parts of the after template are copied verbatim.
/// Argument parts are replaced by the text captured for the argument with the same label,
/// or by nothing if the before template has no such argument.
///
/// This covers reordering, dropping and duplicating arguments,
/// and inserting new text anywhere around them.
///
/// Fails without writing anything if the after template has more parts than the occurrence.
pub fn rewrite_parts(before: &[MatchPart], after: &[Part], output: &mut String) -> Result<(), RewriteCountError> {
	if after.len() > before.len() {
		return Err(RewriteCountError {
			before: before.len(),
			after: after.len(),
		});
	}

	for part in after {
		match part {
			Part::Literal(text) => output.push_str(text),
			Part::Argument(index) => output.push_str(lookup(before, *index)),
		}
	}
	Ok(())
}

fn lookup<'s>(before: &[MatchPart<'s>], index: u32) -> &'s str {
	before
		.iter()
		.find_map(|part| match *part {
			MatchPart::Argument { index: i, text } if i == index => Some(text),
			_ => None,
		})
		.unwrap_or("")
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use assert2::{assert, let_assert};

	fn before() -> Vec<MatchPart<'static>> {
		vec![
			MatchPart::Literal("f("),
			MatchPart::Argument { index: 1, text: "a" },
			MatchPart::Literal(", "),
			MatchPart::Argument { index: 2, text: "b" },
			MatchPart::Literal(")"),
		]
	}

	fn rewrite(after: &[Part]) -> Result<String, RewriteCountError> {
		let mut output = String::new();
		rewrite_parts(&before(), after, &mut output)?;
		Ok(output)
	}

	fn literal(text: &str) -> Part {
		Part::Literal(text.into())
	}

	#[test]
	fn test_reorder() {
		let_assert!(Ok(output) = rewrite(&[literal("f("), Part::Argument(2), literal(", "), Part::Argument(1), literal(")")]));
		assert!(output == "f(b, a)");
	}

	#[test]
	fn test_duplicate_and_drop() {
		let_assert!(Ok(output) = rewrite(&[literal("g("), Part::Argument(2), literal(", "), Part::Argument(2), literal(")")]));
		assert!(output == "g(b, b)");
	}

	#[test]
	fn test_unknown_argument_is_empty() {
		let_assert!(Ok(output) = rewrite(&[literal("f("), Part::Argument(7), literal(")")]));
		assert!(output == "f()");
	}

	#[test]
	fn test_too_many_parts() {
		let after = [
			literal("f("), Part::Argument(1), literal(", "), Part::Argument(2), literal(", "), Part::Argument(1), literal(")"),
		];
		let mut output = String::from("kept");
		let_assert!(Err(e) = rewrite_parts(&before(), &after, &mut output));
		assert!(e == RewriteCountError { before: 5, after: 7 });
		assert!(output == "kept");
	}
}
