use std::fmt;

/// A single symbol stored in the trie.
///
/// Real input characters are wrapped in `Char`. The two sentinels mark the
/// start and the end of a training line and live in the same structure as
/// ordinary characters, so a line boundary is learned like any other
/// transition.
///
/// Because the sentinels are dedicated variants, no input character can ever
/// be mistaken for one.
///
/// ## Ordering
/// The derived ordering is `Start < Char(..) < End`, characters being ordered
/// by code point. This is the enumeration order used when sampling children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Symbol {
	/// Padding placed before the content of a line.
	Start,
	/// A character of the training text.
	Char(char),
	/// Padding placed after the content of a line.
	End,
}

impl Symbol {
	/// Returns the wrapped character, or `None` for a sentinel.
	pub fn as_char(&self) -> Option<char> {
		match self {
			Symbol::Char(c) => Some(*c),
			_ => None,
		}
	}
}

impl From<char> for Symbol {
	fn from(c: char) -> Self {
		Symbol::Char(c)
	}
}

impl fmt::Display for Symbol {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Symbol::Start => f.write_str("<START>"),
			Symbol::End => f.write_str("<END>"),
			// Keep tabs and newlines on one line
			Symbol::Char(c) if c.is_control() => write!(f, "{}", c.escape_default()),
			Symbol::Char(c) => write!(f, "{}", c),
		}
	}
}
