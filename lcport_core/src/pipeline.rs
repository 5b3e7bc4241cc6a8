use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::LcportResult;
use crate::postprocess::fix_superscript;
use crate::postprocess::unwrap_code_fence;
use crate::resolver::ParamTable;
use crate::resolver::extract_samples_at;
use crate::resolver::resolve_at;
use crate::sections::Heading;
use crate::sections::Section;
use crate::sections::SplitOptions;
use crate::sections::split_with_options;

/// External form field names for each rendered heading.
///
/// ```toml
/// [fields]
/// statement = "problem[description]"
/// constraints = "problem[hint]"
/// input = "problem[input]"
/// output = "problem[output]"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldNames {
	pub statement: String,
	pub constraints: String,
	pub input: String,
	pub output: String,
}

impl Default for FieldNames {
	fn default() -> Self {
		Self {
			statement: "problem[description]".to_string(),
			constraints: "problem[hint]".to_string(),
			input: "problem[input]".to_string(),
			output: "problem[output]".to_string(),
		}
	}
}

impl FieldNames {
	/// The field name for `heading`. The sample section has no field of its
	/// own.
	pub fn get(&self, heading: Heading) -> Option<&str> {
		match heading {
			Heading::Statement => Some(&self.statement),
			Heading::Constraints => Some(&self.constraints),
			Heading::Input => Some(&self.input),
			Heading::Output => Some(&self.output),
			Heading::Sample => None,
		}
	}
}

/// Where the files behind `@{example.NAME}` live relative to a problem
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SampleLayout {
	pub input_dir: PathBuf,
	pub output_dir: PathBuf,
	pub input_extension: String,
	pub output_extension: String,
}

impl Default for SampleLayout {
	fn default() -> Self {
		Self {
			input_dir: PathBuf::from("in"),
			output_dir: PathBuf::from("out"),
			input_extension: "in".to_string(),
			output_extension: "out".to_string(),
		}
	}
}

impl SampleLayout {
	/// `<root>/in/<name>.in` and `<root>/out/<name>.out` with the default
	/// layout.
	pub fn locate(&self, root: &Path, name: &str) -> SamplePair {
		SamplePair {
			name: name.to_string(),
			input: root
				.join(&self.input_dir)
				.join(format!("{name}.{}", self.input_extension)),
			output: root
				.join(&self.output_dir)
				.join(format!("{name}.{}", self.output_extension)),
		}
	}
}

/// The input and output files of one sample or test case.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SamplePair {
	pub name: String,
	pub input: PathBuf,
	pub output: PathBuf,
}

/// A finished field value, ready to submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedField {
	pub heading: Heading,
	/// The external field name from [`FieldNames`].
	pub name: String,
	pub value: String,
}

/// Result of rendering a statement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RenderedStatement {
	/// Fields in document order.
	pub fields: Vec<RenderedField>,
	/// Samples in document order.
	pub samples: Vec<SamplePair>,
}

impl RenderedStatement {
	pub fn field(&self, heading: Heading) -> Option<&RenderedField> {
		self.fields.iter().find(|field| field.heading == heading)
	}

	/// External field name to value.
	pub fn field_map(&self) -> BTreeMap<&str, &str> {
		self.fields
			.iter()
			.map(|field| (field.name.as_str(), field.value.as_str()))
			.collect()
	}
}

/// Everything about rendering that comes from configuration rather than from
/// the problem itself.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
	pub fields: FieldNames,
	pub samples: SampleLayout,
	pub split: SplitOptions,
}

/// Convert a statement into submission fields and sample file locations.
///
/// The conversion is all or nothing: the first unresolvable tag, malformed
/// block or missing parameter aborts it.
pub fn render(
	document: &str,
	params: &ParamTable,
	problem_root: &Path,
	options: &RenderOptions,
) -> LcportResult<RenderedStatement> {
	let sections = split_with_options(document, options.split)?;
	tracing::debug!(
		headings = ?sections.headings().collect::<Vec<_>>(),
		"split statement"
	);

	let mut rendered = RenderedStatement::default();

	for section in sections {
		if section.heading == Heading::Sample {
			let (names, _) = extract_samples_at(&section.body, section.start)?;
			tracing::debug!(count = names.len(), "resolved samples");

			rendered.samples.extend(
				names
					.iter()
					.map(|name| options.samples.locate(problem_root, name)),
			);
			continue;
		}

		let name = options.fields.get(section.heading).unwrap_or_default();
		let value = render_section(&section, params)?;
		tracing::debug!(heading = %section.heading, len = value.len(), "rendered section");

		rendered.fields.push(RenderedField {
			heading: section.heading,
			name: name.to_string(),
			value,
		});
	}

	Ok(rendered)
}

/// Resolve tags in one section body and normalize it for submission.
pub fn render_section(section: &Section, params: &ParamTable) -> LcportResult<String> {
	let mut text = resolve_at(&section.body, params, section.start)?;

	if section.heading.is_format_section() {
		text = unwrap_code_fence(&text);
	}

	// Trim first: `str::trim` would also strip a leading separator.
	Ok(fix_superscript(text.trim()))
}
