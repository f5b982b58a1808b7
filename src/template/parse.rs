use super::Part;
use crate::error::{self, TemplateError, TemplateRole};

/// Split a template into literal and argument parts.
pub(super) fn parse_parts(source: &str, role: TemplateRole) -> Result<Vec<Part>, TemplateError> {
	let bytes = source.as_bytes();
	let mut parts = Vec::with_capacity(3);
	let mut literal_start = 0;
	let mut finger = 0;
	while finger < bytes.len() {
		let dollar = match memchr::memchr(b'$', &bytes[finger..]) {
			Some(x) => finger + x,
			None => break,
		};

		// Anything that is not `$digits$` is literal text, including the dollar sign itself.
		let Some((index, end)) = parse_placeholder(source, dollar, role)? else {
			finger = dollar + 1;
			continue;
		};

		if dollar != literal_start {
			parts.push(Part::Literal(source[literal_start..dollar].to_owned()));
		}
		parts.push(Part::Argument(index));
		literal_start = end;
		finger = end;
	}

	if literal_start != bytes.len() {
		parts.push(Part::Literal(source[literal_start..].to_owned()));
	}

	if !parts.iter().any(|part| matches!(part, Part::Argument(_))) {
		return Err(error::NoPlaceholder { role, len: source.len() }.into());
	}

	Ok(parts)
}

/// Parse a placeholder starting at the dollar sign at `finger`.
///
/// Returns the argument label and the index of the byte after the closing dollar sign,
/// or `None` if there is no placeholder at the given position.
fn parse_placeholder(source: &str, finger: usize, role: TemplateRole) -> Result<Option<(u32, usize)>, TemplateError> {
	let bytes = source.as_bytes();
	let digits_start = finger + 1;
	let digits_end = match bytes[digits_start..].iter().position(|c| !c.is_ascii_digit()) {
		Some(x) => digits_start + x,
		None => return Ok(None),
	};
	if digits_end == digits_start || bytes[digits_end] != b'$' {
		return Ok(None);
	}

	let index = source[digits_start..digits_end]
		.parse()
		.map_err(|_| error::InvalidArgumentIndex {
			role,
			position: digits_start,
			len: digits_end - digits_start,
		})?;
	Ok(Some((index, digits_end + 1)))
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
	use super::*;
	use assert2::{assert, check, let_assert};

	fn literal(text: &str) -> Part {
		Part::Literal(text.into())
	}

	#[test]
	fn test_parse_parts() {
		check!(let Ok([_, Part::Argument(1), _]) = parse_parts("f($1$)", TemplateRole::Before).as_deref());
		check!(parse_parts("f($1$, $2$)", TemplateRole::Before).unwrap() == [
			literal("f("),
			Part::Argument(1),
			literal(", "),
			Part::Argument(2),
			literal(")"),
		]);
		check!(parse_parts("$12$.Close()", TemplateRole::Before).unwrap() == [
			Part::Argument(12),
			literal(".Close()"),
		]);
		check!(parse_parts("$1$$2$", TemplateRole::Before).unwrap() == [
			Part::Argument(1),
			Part::Argument(2),
		]);
	}

	#[test]
	fn test_stray_dollars_are_literal() {
		check!(parse_parts("$x + $1$ + $", TemplateRole::After).unwrap() == [
			literal("$x + "),
			Part::Argument(1),
			literal(" + $"),
		]);
		check!(parse_parts("$$1$ $2", TemplateRole::After).unwrap() == [
			literal("$"),
			Part::Argument(1),
			literal(" $2"),
		]);
		check!(parse_parts("❤$1$❤", TemplateRole::After).unwrap() == [
			literal("❤"),
			Part::Argument(1),
			literal("❤"),
		]);
	}

	#[test]
	fn test_no_placeholder() {
		let_assert!(Err(TemplateError::NoPlaceholder(e)) = parse_parts("f(a, b)", TemplateRole::After));
		assert!(e.role == TemplateRole::After);
		assert!(e.len == 7);

		check!(let Err(TemplateError::NoPlaceholder(_)) = parse_parts("", TemplateRole::Before));
		check!(let Err(TemplateError::NoPlaceholder(_)) = parse_parts("$$ $a$ $1", TemplateRole::Before));
	}

	#[test]
	#[rustfmt::skip]
	fn test_invalid_argument_index() {
		let source = "f($99999999999$)";
		let_assert!(Err(e) = parse_parts(source, TemplateRole::Before));
		assert!(e.to_string() == "Argument index too large in before template");
		assert!(e.source_highlighting(source) == concat!(
			"  f($99999999999$)\n",
			"     ^^^^^^^^^^^\n",
		));
	}
}
