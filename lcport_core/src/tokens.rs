use std::fmt::Display;

/// A location inside a document. `line` and `column` are 1-indexed, `offset`
/// is the 0-indexed byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
	pub line: usize,
	pub column: usize,
	pub offset: usize,
}

impl Default for Point {
	fn default() -> Self {
		Self {
			line: 1,
			column: 1,
			offset: 0,
		}
	}
}

impl Point {
	pub fn new(line: usize, column: usize, offset: usize) -> Self {
		Self {
			line,
			column,
			offset,
		}
	}

	/// Move the point past `text`, counting characters rather than bytes for
	/// the column.
	pub fn advance_str(&mut self, text: &str) {
		for ch in text.chars() {
			if ch == '\n' {
				self.line += 1;
				self.column = 1;
			} else {
				self.column += 1;
			}
		}

		self.offset += text.len();
	}
}

/// The start and end of a token in the source document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
	pub start: Point,
	pub end: Point,
}

impl Position {
	pub fn new(
		start_line: usize,
		start_column: usize,
		start_offset: usize,
		end_line: usize,
		end_column: usize,
		end_offset: usize,
	) -> Self {
		Self {
			start: Point::new(start_line, start_column, start_offset),
			end: Point::new(end_line, end_column, end_offset),
		}
	}
}

/// Languages a language-switch block can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
	English,
	Japanese,
}

impl Language {
	pub fn from_code(code: &str) -> Option<Self> {
		match code {
			"en" => Some(Self::English),
			"ja" => Some(Self::Japanese),
			_ => None,
		}
	}

	pub fn code(self) -> &'static str {
		match self {
			Self::English => "en",
			Self::Japanese => "ja",
		}
	}
}

/// The tag families understood by the statement template language, plus the
/// text between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
	/// Text without newlines or tags.
	Text(String),
	/// `\n`
	Newline,
	/// `@{lang.en}` or `@{lang.ja}`
	LanguageOpen(Language),
	/// `@{lang.end}`
	LanguageEnd,
	/// `@{param.NAME}`
	Param(String),
	/// `@{example.NAME}`
	Example(String),
	/// `@{keyword.NAME}`
	Keyword(String),
	/// Any other tag-shaped text, including an unterminated `@{`.
	Unknown(String),
}

impl Token {
	pub fn is_newline(&self) -> bool {
		matches!(self, Token::Newline)
	}
}

impl Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Token::Text(text) => write!(f, "{text}"),
			Token::Newline => writeln!(f),
			Token::LanguageOpen(language) => write!(f, "@{{lang.{}}}", language.code()),
			Token::LanguageEnd => write!(f, "@{{lang.end}}"),
			Token::Param(name) => write!(f, "@{{param.{name}}}"),
			Token::Example(name) => write!(f, "@{{example.{name}}}"),
			Token::Keyword(name) => write!(f, "@{{keyword.{name}}}"),
			Token::Unknown(raw) => write!(f, "{raw}"),
		}
	}
}

/// A token together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
	pub token: Token,
	pub position: Position,
}
