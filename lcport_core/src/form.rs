use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

use crate::LcportResult;
use crate::config::LcportConfig;
use crate::pipeline::RenderedStatement;
use crate::problem::Problem;
use crate::problem::read_utf8;

/// Field holding the link back to the upstream problem.
pub const SOURCE_FIELD: &str = "problem[source]";
/// Field holding the judge-side problem name.
pub const NAME_FIELD: &str = "problem[name]";
/// Field holding the comma separated tag list.
pub const TAG_LIST_FIELD: &str = "problem[tag_list]";

/// The key/value payload of the judge's problem edit form, in submission
/// order. Serializes as a map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
	entries: Vec<(String, String)>,
}

impl SubmissionForm {
	pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.entries.push((key.into(), value.into()));
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(existing, _)| existing == key)
			.map(|(_, value)| value.as_str())
	}

	pub fn entries(&self) -> &[(String, String)] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl Serialize for SubmissionForm {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.entries.len()))?;

		for (key, value) in &self.entries {
			map.serialize_entry(key, value)?;
		}

		map.end()
	}
}

/// The field keys for sample `index`.
pub fn sample_fields(index: usize) -> (String, String) {
	(
		format!("problem[sample_testdata_attributes][{index}][input]"),
		format!("problem[sample_testdata_attributes][{index}][output]"),
	)
}

/// Assemble the edit form for `problem`: the rendered fields, the source
/// link, the judge-side name, the tag list and the contents of every sample
/// file.
pub fn build_form(
	problem: &Problem,
	rendered: &RenderedStatement,
	config: &LcportConfig,
) -> LcportResult<SubmissionForm> {
	let mut form = SubmissionForm::default();

	for field in &rendered.fields {
		form.push(&field.name, &field.value);
	}

	form.push(SOURCE_FIELD, config.source_link(&problem.name));

	for (index, sample) in rendered.samples.iter().enumerate() {
		let (input_key, output_key) = sample_fields(index);
		form.push(input_key, read_utf8(&sample.input)?);
		form.push(output_key, read_utf8(&sample.output)?);
	}

	form.push(
		NAME_FIELD,
		config.problem_name(&problem.name, &problem.info.title),
	);
	form.push(TAG_LIST_FIELD, &config.tag_list);

	Ok(form)
}
