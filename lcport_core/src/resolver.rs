use std::collections::BTreeMap;

use derive_more::Deref;
use derive_more::DerefMut;
use serde::Deserialize;
use serde::Serialize;

use crate::LcportError;
use crate::LcportResult;
use crate::format::format_param;
use crate::lexer::tokenize;
use crate::tokens::Language;
use crate::tokens::Point;
use crate::tokens::SpannedToken;
use crate::tokens::Token;

/// Named numeric values a statement can reference with `@{param.NAME}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ParamTable(
	#[deref]
	#[deref_mut]
	BTreeMap<String, u64>,
);

impl ParamTable {
	pub fn new() -> Self {
		Self::default()
	}
}

impl<K: Into<String>> FromIterator<(K, u64)> for ParamTable {
	fn from_iter<T: IntoIterator<Item = (K, u64)>>(iter: T) -> Self {
		Self(iter.into_iter().map(|(key, value)| (key.into(), value)).collect())
	}
}

/// Resolve language blocks and parameter placeholders in `content`.
///
/// Only the English segment of each language block is kept. Any tag that is
/// not a language marker or a parameter is rejected with
/// [`LcportError::UnresolvedTag`].
pub fn resolve(content: &str, params: &ParamTable) -> LcportResult<String> {
	resolve_at(content, params, Point::default())
}

/// Like [`resolve`], with error locations reported relative to `start`.
pub fn resolve_at(content: &str, params: &ParamTable, start: Point) -> LcportResult<String> {
	let tokens = tokenize(content, start);
	let mut output = String::with_capacity(content.len());
	resolve_tokens(&tokens, params, &mut output)?;

	Ok(output)
}

/// Collect the names of every `@{example.NAME}` tag in order of appearance
/// and return them with the tags removed from the text.
pub fn extract_samples(content: &str) -> LcportResult<(Vec<String>, String)> {
	extract_samples_at(content, Point::default())
}

/// Like [`extract_samples`], with error locations reported relative to `start`.
pub fn extract_samples_at(content: &str, start: Point) -> LcportResult<(Vec<String>, String)> {
	let tokens = tokenize(content, start);
	let mut names = vec![];
	let mut output = String::with_capacity(content.len());

	for spanned in &tokens {
		match &spanned.token {
			Token::Text(text) => output.push_str(text),
			Token::Newline => output.push('\n'),
			Token::Example(name) => names.push(name.clone()),
			Token::LanguageOpen(_)
			| Token::LanguageEnd
			| Token::Param(_)
			| Token::Keyword(_)
			| Token::Unknown(_) => return Err(unresolved(spanned)),
		}
	}

	Ok((names, output))
}

fn resolve_tokens(
	tokens: &[SpannedToken],
	params: &ParamTable,
	output: &mut String,
) -> LcportResult<()> {
	let mut cursor = 0;

	while cursor < tokens.len() {
		let spanned = &tokens[cursor];

		match &spanned.token {
			Token::Text(text) => output.push_str(text),
			Token::Newline => output.push('\n'),
			Token::Param(name) => {
				let value = params.get(name).ok_or_else(|| {
					LcportError::MissingParameter {
						name: name.clone(),
						line: spanned.position.start.line,
					}
				})?;
				output.push_str(&format_param(*value));
			}
			Token::LanguageOpen(_) => {
				let block = LanguageBlock::collect(tokens, cursor)?;
				resolve_tokens(&tokens[block.english.clone()], params, output)?;
				cursor = block.end;
				continue;
			}
			Token::LanguageEnd | Token::Example(_) | Token::Keyword(_) | Token::Unknown(_) => {
				return Err(unresolved(spanned));
			}
		}

		cursor += 1;
	}

	Ok(())
}

/// A `@{lang.*}` ... `@{lang.end}` region of a token slice.
struct LanguageBlock {
	/// Token range of the English segment, excluding its marker.
	english: std::ops::Range<usize>,
	/// Index just past the `@{lang.end}` marker.
	end: usize,
}

impl LanguageBlock {
	/// The number of segments every language block must declare.
	const SEGMENTS: usize = 2;

	/// Collect the block whose opening marker sits at `tokens[start]`.
	fn collect(tokens: &[SpannedToken], start: usize) -> LcportResult<Self> {
		let line = tokens[start].position.start.line;
		let malformed = |reason: String| LcportError::MalformedLanguageBlock { line, reason };

		let mut segments: Vec<(Language, usize)> = vec![];
		let mut cursor = start;

		let end = loop {
			let Some(spanned) = tokens.get(cursor) else {
				return Err(malformed("missing `@{lang.end}`".to_string()));
			};

			match &spanned.token {
				Token::LanguageOpen(language) => {
					ensure_own_line(tokens, cursor)?;

					if segments.iter().any(|(seen, _)| seen == language) {
						return Err(malformed(format!(
							"language `{}` is declared twice",
							language.code()
						)));
					}

					segments.push((*language, cursor));
				}
				Token::LanguageEnd => {
					ensure_own_line(tokens, cursor)?;
					break cursor;
				}
				_ => {}
			}

			cursor += 1;
		};

		if segments.len() != Self::SEGMENTS {
			return Err(malformed(format!(
				"expected {} language segments, found {}",
				Self::SEGMENTS,
				segments.len()
			)));
		}

		let english = segments
			.iter()
			.enumerate()
			.find(|(_, (language, _))| *language == Language::English)
			.map(|(index, (_, marker))| {
				let segment_end = segments.get(index + 1).map_or(end, |(_, next)| *next);
				(marker + 1)..segment_end
			})
			.ok_or_else(|| malformed("no `@{lang.en}` segment".to_string()))?;

		Ok(Self {
			english,
			end: end + 1,
		})
	}
}

/// Language markers must occupy a line of their own.
fn ensure_own_line(tokens: &[SpannedToken], index: usize) -> LcportResult<()> {
	let starts_line = index == 0 || tokens[index - 1].token.is_newline();
	let ends_line = ends_line_at(tokens, index + 1);

	if starts_line && ends_line {
		Ok(())
	} else {
		Err(unresolved(&tokens[index]))
	}
}

/// Whether `index` is the end of the input, a newline, or the `\r` of a
/// CRLF line ending.
fn ends_line_at(tokens: &[SpannedToken], index: usize) -> bool {
	match tokens.get(index).map(|spanned| &spanned.token) {
		None | Some(Token::Newline) => true,
		Some(Token::Text(text)) if text == "\r" => {
			tokens.get(index + 1).is_none_or(|next| next.token.is_newline())
		}
		Some(_) => false,
	}
}

fn unresolved(spanned: &SpannedToken) -> LcportError {
	LcportError::UnresolvedTag {
		tag: spanned.token.to_string(),
		line: spanned.position.start.line,
		column: spanned.position.start.column,
	}
}
