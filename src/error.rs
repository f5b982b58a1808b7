//! Module containing error details.

/// An error that can occur while compiling templates or rewriting source text.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum Error {
	/// The before or after template is invalid.
	Template(TemplateError),

	/// The before template could not be compiled into a pattern.
	PatternCompile(PatternCompileError),

	/// The after template has more parts than the before template.
	RewriteCount(RewriteCountError),
}

impl From<TemplateError> for Error {
	fn from(other: TemplateError) -> Self {
		Self::Template(other)
	}
}

impl From<NoPlaceholder> for Error {
	fn from(other: NoPlaceholder) -> Self {
		Self::Template(other.into())
	}
}

impl From<InvalidArgumentIndex> for Error {
	fn from(other: InvalidArgumentIndex) -> Self {
		Self::Template(other.into())
	}
}

impl From<PatternCompileError> for Error {
	fn from(other: PatternCompileError) -> Self {
		Self::PatternCompile(other)
	}
}

impl From<RewriteCountError> for Error {
	fn from(other: RewriteCountError) -> Self {
		Self::RewriteCount(other)
	}
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Template(e) => e.fmt(f),
			Self::PatternCompile(e) => e.fmt(f),
			Self::RewriteCount(e) => e.fmt(f),
		}
	}
}

/// Which side of a rule a template belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TemplateRole {
	/// The template that is searched for in the source text.
	Before,

	/// The template that matches are rewritten into.
	After,
}

impl std::fmt::Display for TemplateRole {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::Before => f.write_str("before"),
			Self::After => f.write_str("after"),
		}
	}
}

/// A template could not be decomposed into parts.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub enum TemplateError {
	/// The template does not contain a single `$N$` placeholder.
	NoPlaceholder(NoPlaceholder),

	/// A placeholder label does not fit in an argument index.
	InvalidArgumentIndex(InvalidArgumentIndex),
}

impl From<NoPlaceholder> for TemplateError {
	fn from(other: NoPlaceholder) -> Self {
		Self::NoPlaceholder(other)
	}
}

impl From<InvalidArgumentIndex> for TemplateError {
	fn from(other: InvalidArgumentIndex) -> Self {
		Self::InvalidArgumentIndex(other)
	}
}

impl std::error::Error for TemplateError {}

impl std::fmt::Display for TemplateError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Self::NoPlaceholder(e) => e.fmt(f),
			Self::InvalidArgumentIndex(e) => e.fmt(f),
		}
	}
}

/// The template does not contain a single `$N$` placeholder.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct NoPlaceholder {
	/// The template that is missing a placeholder.
	pub role: TemplateRole,

	/// The length of the template in bytes.
	pub len: usize,
}

impl std::error::Error for NoPlaceholder {}

impl std::fmt::Display for NoPlaceholder {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "No placeholder in {} template", self.role)
	}
}

/// A placeholder label does not fit in an argument index.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct InvalidArgumentIndex {
	/// The template that contains the placeholder.
	pub role: TemplateRole,

	/// The byte offset within the template where the error occurs.
	///
	/// This points to the first digit of the label.
	pub position: usize,

	/// The length of the label in bytes.
	pub len: usize,
}

impl std::error::Error for InvalidArgumentIndex {}

impl std::fmt::Display for InvalidArgumentIndex {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Argument index too large in {} template", self.role)
	}
}

/// The escaped before template could not be compiled into a regular expression.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct PatternCompileError {
	/// The expression that failed to compile.
	pub pattern: String,

	/// The message reported by the regular expression compiler.
	pub message: String,
}

impl PatternCompileError {
	pub(crate) fn new(pattern: &str, error: regex::Error) -> Self {
		Self {
			pattern: pattern.to_owned(),
			message: error.to_string(),
		}
	}
}

impl std::error::Error for PatternCompileError {}

impl std::fmt::Display for PatternCompileError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(f, "Failed to compile pattern {:?}: {}", self.pattern, self.message)
	}
}

/// The after template has more parts than the before template.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(Eq, PartialEq))]
pub struct RewriteCountError {
	/// The number of parts in the before template.
	pub before: usize,

	/// The number of parts in the after template.
	pub after: usize,
}

impl std::error::Error for RewriteCountError {}

impl std::fmt::Display for RewriteCountError {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		write!(
			f,
			"After template has more parts than before template: {} > {}",
			self.after, self.before
		)
	}
}

impl TemplateError {
	/// Get the template that failed to parse.
	pub fn role(&self) -> TemplateRole {
		match self {
			Self::NoPlaceholder(e) => e.role,
			Self::InvalidArgumentIndex(e) => e.role,
		}
	}

	/// Get the range in the template that contains the error.
	///
	/// A missing placeholder covers the whole template.
	pub fn source_range(&self) -> std::ops::Range<usize> {
		let (start, len) = match &self {
			Self::NoPlaceholder(e) => (0, e.len),
			Self::InvalidArgumentIndex(e) => (e.position, e.len),
		};
		std::ops::Range {
			start,
			end: start + len,
		}
	}

	/// Get the line of the template that contains the error.
	///
	/// # Panics
	/// May panic if the source text is not the template that contains the error.
	pub fn source_line<'a>(&self, source: &'a str) -> &'a str {
		let position = self.source_range().start;
		let start = line_start(source, position);
		let end = line_end(source, position);
		&source[start..end]
	}

	/// Write source highlighting for the error location.
	///
	/// The highlighting ends with a newline.
	///
	/// Note: this function doesn't print anything if the source line exceeds 60 characters in width.
	/// For more control over this behaviour, consider using [`Self::source_range()`] and [`Self::source_line()`] instead.
	pub fn write_source_highlighting(&self, f: &mut impl std::fmt::Write, source: &str) -> std::fmt::Result {
		use unicode_width::UnicodeWidthStr;

		let range = self.source_range();
		let start = line_start(source, range.start);
		let line = self.source_line(source);
		if line.width() > 60 {
			return Ok(());
		}
		let end = range.end.min(start + line.len());
		write!(f, "  {}\n  ", line)?;
		write_underline(f, line, range.start - start..end - start)?;
		writeln!(f)
	}

	/// Get source highlighting for the error location as a string.
	///
	/// The highlighting ends with a newline.
	pub fn source_highlighting(&self, source: &str) -> String {
		let mut output = String::new();
		self.write_source_highlighting(&mut output, source).unwrap();
		output
	}
}

fn line_start(source: &str, position: usize) -> usize {
	match source.as_bytes()[..position].iter().rposition(|&c| c == b'\n' || c == b'\r') {
		Some(line_end) => line_end + 1,
		None => 0,
	}
}

fn line_end(source: &str, position: usize) -> usize {
	match source.as_bytes()[position..].iter().position(|&c| c == b'\n' || c == b'\r') {
		Some(line_end) => position + line_end,
		None => source.len(),
	}
}

fn write_underline(f: &mut impl std::fmt::Write, line: &str, range: std::ops::Range<usize>) -> std::fmt::Result {
	use unicode_width::UnicodeWidthStr;
	let spaces = line[..range.start].width();
	let carets = line[range].width();
	write!(f, "{}", " ".repeat(spaces))?;
	write!(f, "{}", "^".repeat(carets))?;
	Ok(())
}
