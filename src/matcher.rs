//! Locating occurrences of a before template in source text.
//!
//! The argument wildcard knows nothing about nesting,
//! so every raw match is pulled back to a parenthesis-balanced end before it is split into parts.

use crate::template::Pattern;

/// One occurrence of a before template in source text.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Match<'s> {
	/// The byte offset of the first byte of the occurrence.
	pub start: usize,

	/// The byte offset one past the last byte of the occurrence.
	pub end: usize,

	text: &'s str,
	parts: Vec<MatchPart<'s>>,
}

/// One piece of a matched occurrence.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MatchPart<'s> {
	/// Literal text of the before template.
	Literal(&'s str),

	/// The text captured for an argument slot.
	Argument {
		/// The label of the argument in the template.
		index: u32,

		/// The captured text.
		text: &'s str,
	},
}

impl<'s> Match<'s> {
	/// Get the matched text.
	#[inline]
	pub fn text(&self) -> &'s str {
		self.text
	}

	/// Get the parts of the occurrence in order.
	#[inline]
	pub fn parts(&self) -> &[MatchPart<'s>] {
		&self.parts
	}

	/// Get the text captured for the first argument slot with the given label.
	pub fn argument(&self, index: u32) -> Option<&'s str> {
		self.parts.iter().find_map(|part| match *part {
			MatchPart::Argument { index: i, text } if i == index => Some(text),
			_ => None,
		})
	}

	/// Get the byte range of the occurrence in the source text.
	#[inline]
	pub fn range(&self) -> std::ops::Range<usize> {
		self.start..self.end
	}
}

/// Find all non-overlapping occurrences of a pattern, left to right.
///
/// Scanning resumes at the corrected end of each match.
pub fn find<'s>(source: &'s str, pattern: &Pattern) -> Vec<Match<'s>> {
	let mut matches = Vec::new();
	let mut finger = 0;
	let mut last_end = None;
	while finger <= source.len() {
		let Some(raw) = pattern.find_raw_at(source, finger) else {
			break;
		};

		// An empty match right after the previous match is not a new occurrence.
		if raw.is_empty() && last_end == Some(raw.start) {
			match next_char_boundary(source, raw.start) {
				Some(next) => {
					finger = next;
					continue;
				},
				None => break,
			}
		}

		let start = raw.start;
		let region = &source[raw];
		let len = correct_double_bracket(region, pattern);
		let len = correct_greedy_overmatch(&region[..len], pattern);
		let end = start + len;
		let text = &source[start..end];

		matches.push(Match {
			start,
			end,
			text,
			parts: build_parts(text, pattern),
		});
		last_end = Some(end);

		finger = if end > start {
			end
		} else {
			match next_char_boundary(source, end) {
				Some(next) => next,
				None => break,
			}
		};
	}
	matches
}

/// Pull the end back to the first closing parenthesis that balances the region.
///
/// The greedy wildcard runs on to the last matching closing literal on the line,
/// swallowing any following occurrences and the text between them.
/// If the parentheses of the region balance out before its end,
/// and the region up to that point plus the text the template has after its last closing parenthesis
/// is still a full occurrence, the match ends there.
///
/// Returns the new length of the region.
fn correct_double_bracket(region: &str, pattern: &Pattern) -> usize {
	let bytes = region.as_bytes();
	if memchr::memchr(b'(', bytes).is_none() {
		return region.len();
	}

	let tail = pattern.closing_tail().len();
	let mut depth = 0isize;
	for i in memchr::memchr2_iter(b'(', b')', bytes) {
		if bytes[i] == b'(' {
			depth += 1;
			continue;
		}
		depth -= 1;
		if depth != 0 {
			continue;
		}
		for end in i + 1..=(i + 1 + tail).min(region.len()) {
			if end < region.len() && region.is_char_boundary(end) && pattern.matches_exactly(&region[..end]) {
				tracing::trace!(from = region.len(), to = end, "corrected double bracket match");
				return end;
			}
		}
	}
	region.len()
}

/// Drop closing parentheses that belong to the surrounding text.
///
/// While the region has more closing than opening parentheses,
/// the end is moved back to the last closing parenthesis,
/// as long as the region remains a full occurrence.
///
/// Returns the new length of the region.
fn correct_greedy_overmatch(region: &str, pattern: &Pattern) -> usize {
	let bytes = region.as_bytes();
	let mut opening = memchr::memchr_iter(b'(', bytes).count();
	let mut closing = memchr::memchr_iter(b')', bytes).count();
	let mut end = region.len();
	while closing > opening {
		let Some(last) = memchr::memrchr(b')', &bytes[..end]) else {
			break;
		};
		if !pattern.matches_exactly(&region[..last]) {
			break;
		}
		tracing::trace!(from = end, to = last, "corrected greedy overmatch");
		// Everything dropped holds exactly one closing parenthesis, the one at `last`.
		opening -= memchr::memchr_iter(b'(', &bytes[last..end]).count();
		closing -= 1;
		end = last;
	}
	end
}

/// Split a matched occurrence into literal and argument parts.
///
/// Each literal chunk of the template is stripped from the front of the remaining text,
/// and the text before the next chunk is captured as the argument.
/// The next chunk is searched for by its first occurrence,
/// except for the final chunk which is searched for by its last occurrence.
/// That way an argument that itself ends in the closing literal,
/// like a nested call, is captured whole.
fn build_parts<'s>(text: &'s str, pattern: &Pattern) -> Vec<MatchPart<'s>> {
	let chunks = pattern.chunks();
	let arguments = pattern.arguments();
	let mut parts = Vec::with_capacity(chunks.len() + arguments.len());
	let mut rest = text;

	for (i, &index) in arguments.iter().enumerate() {
		rest = strip_literal(rest, &chunks[i], &mut parts);

		let next = chunks[i + 1].as_bytes();
		let is_last = i + 2 == chunks.len();
		let found = if is_last {
			memchr::memmem::rfind(rest.as_bytes(), next)
		} else {
			memchr::memmem::find(rest.as_bytes(), next)
		};
		let at = found.unwrap_or(rest.len());

		parts.push(MatchPart::Argument {
			index,
			text: &rest[..at],
		});
		rest = &rest[at..];
	}

	if let Some(last) = chunks.last() {
		strip_literal(rest, last, &mut parts);
	}
	parts
}

/// Strip a literal chunk from the front of the text, recording it as a literal part.
fn strip_literal<'s>(text: &'s str, chunk: &str, parts: &mut Vec<MatchPart<'s>>) -> &'s str {
	if chunk.is_empty() || !text.starts_with(chunk) {
		return text;
	}
	let (literal, rest) = text.split_at(chunk.len());
	parts.push(MatchPart::Literal(literal));
	rest
}

fn next_char_boundary(source: &str, position: usize) -> Option<usize> {
	source[position..].chars().next().map(|c| position + c.len_utf8())
}
