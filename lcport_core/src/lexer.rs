use std::ops::Range;

use logos::Logos;

use crate::tokens::Language;
use crate::tokens::Point;
use crate::tokens::Position;
use crate::tokens::SpannedToken;
use crate::tokens::Token;

/// Raw tokens produced by logos for flat tokenization of a statement.
#[derive(Logos, Debug, PartialEq)]
enum RawToken {
	#[regex(r"@\{[^}]*\}")]
	Tag,
	#[token("@{")]
	UnterminatedTag,
	#[token("@")]
	At,
	#[token("\n")]
	Newline,
	#[regex(r"[^@\n]+")]
	Text,
}

/// Walks the logos token stream, classifying tags by family and merging
/// adjacent text.
struct TokenWalker<'a> {
	/// The source text being tokenized.
	source: &'a str,
	/// The collected raw tokens and their byte spans.
	raw_tokens: Vec<(Result<RawToken, ()>, Range<usize>)>,
	/// Current index into `raw_tokens`.
	cursor: usize,
	/// Location of the next raw token.
	position: Point,
	/// Collected tokens.
	tokens: Vec<SpannedToken>,
}

impl<'a> TokenWalker<'a> {
	fn new(source: &'a str, start: Point) -> Self {
		let raw_tokens: Vec<_> = RawToken::lexer(source).spanned().collect();

		Self {
			source,
			raw_tokens,
			cursor: 0,
			position: start,
			tokens: vec![],
		}
	}

	fn current_slice(&self) -> &'a str {
		let (_, span) = &self.raw_tokens[self.cursor];
		&self.source[span.clone()]
	}

	fn push_token(&mut self, token: Token) {
		let slice = self.current_slice();
		let start = self.position;
		self.position.advance_str(slice);
		self.cursor += 1;

		let end = self.position;

		if let Token::Text(text) = &token {
			if let Some(SpannedToken {
				token: Token::Text(previous),
				position,
			}) = self.tokens.last_mut()
			{
				previous.push_str(text);
				position.end = end;
				return;
			}
		}

		self.tokens.push(SpannedToken {
			token,
			position: Position { start, end },
		});
	}

	fn process(&mut self) {
		while self.cursor < self.raw_tokens.len() {
			let slice = self.current_slice();
			let (result, _) = &self.raw_tokens[self.cursor];

			let token = match result {
				Ok(RawToken::Tag) => classify_tag(slice),
				Ok(RawToken::UnterminatedTag) => Token::Unknown(slice.to_string()),
				Ok(RawToken::Newline) => Token::Newline,
				// Unrecognized bytes are kept as plain text.
				Ok(RawToken::At | RawToken::Text) | Err(()) => Token::Text(slice.to_string()),
			};

			self.push_token(token);
		}
	}
}

/// Sort a complete `@{family.payload}` tag into its family. Anything that does
/// not fit one of the known families is returned as [`Token::Unknown`].
fn classify_tag(raw: &str) -> Token {
	let inner = &raw[2..raw.len() - 1];
	let unknown = || Token::Unknown(raw.to_string());

	let Some((family, payload)) = inner.split_once('.') else {
		return unknown();
	};

	if payload.is_empty() || payload.chars().any(char::is_whitespace) {
		return unknown();
	}

	match family {
		"lang" if payload == "end" => Token::LanguageEnd,
		"lang" => Language::from_code(payload).map_or_else(unknown, Token::LanguageOpen),
		"param" => Token::Param(payload.to_string()),
		"example" => Token::Example(payload.to_string()),
		"keyword" => Token::Keyword(payload.to_string()),
		_ => unknown(),
	}
}

/// Split `content` into text, newlines and tags. `start` is the location of
/// the first byte of `content` in its enclosing document.
pub fn tokenize(content: &str, start: Point) -> Vec<SpannedToken> {
	let mut walker = TokenWalker::new(content, start);
	walker.process();
	walker.tokens
}
