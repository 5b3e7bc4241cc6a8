use std::fmt::Display;

use derive_more::Deref;
use serde::Deserialize;
use serde::Serialize;

use crate::LcportError;
use crate::LcportResult;
use crate::tokens::Point;

/// The section headings a statement may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Heading {
	Statement,
	Constraints,
	Input,
	Output,
	Sample,
}

impl Heading {
	pub const ALL: [Heading; 5] = [
		Heading::Statement,
		Heading::Constraints,
		Heading::Input,
		Heading::Output,
		Heading::Sample,
	];

	pub fn keyword(self) -> &'static str {
		match self {
			Self::Statement => "statement",
			Self::Constraints => "constraints",
			Self::Input => "input",
			Self::Output => "output",
			Self::Sample => "sample",
		}
	}

	pub fn from_keyword(keyword: &str) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|heading| heading.keyword() == keyword)
	}

	/// The exact line that introduces this section, e.g.
	/// `## @{keyword.input}`.
	pub fn marker(self) -> String {
		format!("## @{{keyword.{}}}", self.keyword())
	}

	/// Input and output sections hold format descriptions that are usually
	/// wrapped in a code fence.
	pub fn is_format_section(self) -> bool {
		matches!(self, Self::Input | Self::Output)
	}
}

impl Display for Heading {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.keyword())
	}
}

/// One heading and the text up to the next heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
	pub heading: Heading,
	pub body: String,
	/// 1-indexed line of the heading marker.
	pub line: usize,
	/// Where `body` starts in the document.
	pub start: Point,
}

/// Sections in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct Sections(Vec<Section>);

impl Sections {
	pub fn get(&self, heading: Heading) -> Option<&Section> {
		self.0.iter().find(|section| section.heading == heading)
	}

	pub fn headings(&self) -> impl Iterator<Item = Heading> + '_ {
		self.0.iter().map(|section| section.heading)
	}
}

impl IntoIterator for Sections {
	type IntoIter = std::vec::IntoIter<Section>;
	type Item = Section;

	fn into_iter(self) -> Self::IntoIter {
		self.0.into_iter()
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SplitOptions {
	/// Keep the last body of a repeated heading instead of failing.
	pub allow_duplicate_headings: bool,
}

/// Split a statement into its sections. Text before the first heading is
/// dropped.
pub fn split(document: &str) -> LcportResult<Sections> {
	split_with_options(document, SplitOptions::default())
}

pub fn split_with_options(document: &str, options: SplitOptions) -> LcportResult<Sections> {
	let mut sections: Vec<Section> = vec![];
	let mut current: Option<Section> = None;
	let mut point = Point::default();

	for line in document.split_inclusive('\n') {
		let line_number = point.line;
		point.advance_str(line);

		let Some(marker) = heading_marker(line) else {
			if let Some(section) = current.as_mut() {
				section.body.push_str(line);
			}
			continue;
		};

		let heading = parse_marker(marker).ok_or_else(|| LcportError::MalformedHeading {
			heading: marker.to_string(),
			line: line_number,
		})?;

		if let Some(section) = current.take() {
			push_section(&mut sections, section, options)?;
		}

		current = Some(Section {
			heading,
			body: String::new(),
			line: line_number,
			start: point,
		});
	}

	if let Some(section) = current {
		push_section(&mut sections, section, options)?;
	}

	Ok(Sections(sections))
}

fn push_section(
	sections: &mut Vec<Section>,
	section: Section,
	options: SplitOptions,
) -> LcportResult<()> {
	let Some(index) = sections
		.iter()
		.position(|existing| existing.heading == section.heading)
	else {
		sections.push(section);
		return Ok(());
	};

	if !options.allow_duplicate_headings {
		return Err(LcportError::DuplicateHeading {
			heading: section.heading.marker(),
			line: section.line,
		});
	}

	tracing::warn!(heading = %section.heading, "duplicate heading, keeping the last one");
	sections[index] = section;

	Ok(())
}

/// Return the marker text when `line` is heading-shaped: one or more `#`, a
/// single space and a `@{...}` tag filling the rest of the line.
fn heading_marker(line: &str) -> Option<&str> {
	let marker = line.trim_end_matches(['\n', '\r']);
	let rest = marker.trim_start_matches('#');

	if rest.len() == marker.len() {
		return None;
	}

	let tag = rest.strip_prefix(' ')?;

	if tag.starts_with("@{") && tag.ends_with('}') {
		Some(marker)
	} else {
		None
	}
}

/// Only `## @{keyword.NAME}` with a known `NAME` is a valid marker.
fn parse_marker(marker: &str) -> Option<Heading> {
	let keyword = marker
		.strip_prefix("## @{keyword.")?
		.strip_suffix('}')?;

	Heading::from_keyword(keyword)
}
