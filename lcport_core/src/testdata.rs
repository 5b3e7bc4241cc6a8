use std::collections::BTreeMap;
use std::path::Path;

use crate::LcportError;
use crate::LcportResult;
use crate::pipeline::SampleLayout;
use crate::pipeline::SamplePair;

/// Pair input and output file names by stem (`a.in` with `a.out`). Every stem
/// must appear on both sides. Pairs are sorted by stem.
pub fn pair_testdata<I, O>(inputs: I, outputs: O) -> LcportResult<Vec<(String, String, String)>>
where
	I: IntoIterator,
	I::Item: AsRef<str>,
	O: IntoIterator,
	O::Item: AsRef<str>,
{
	let inputs = by_stem(inputs);
	let mut outputs = by_stem(outputs);
	let mut pairs = Vec::with_capacity(inputs.len());

	for (stem, input) in inputs {
		let Some(output) = outputs.remove(&stem) else {
			return Err(LcportError::SampleMismatch {
				name: stem,
				missing: "output".to_string(),
			});
		};

		pairs.push((stem, input, output));
	}

	if let Some(stem) = outputs.into_keys().next() {
		return Err(LcportError::SampleMismatch {
			name: stem,
			missing: "input".to_string(),
		});
	}

	Ok(pairs)
}

/// List the testdata directories of a problem and pair their files.
pub fn collect_testdata(problem_dir: &Path, layout: &SampleLayout) -> LcportResult<Vec<SamplePair>> {
	let input_dir = problem_dir.join(&layout.input_dir);
	let output_dir = problem_dir.join(&layout.output_dir);
	let inputs = list_files(&input_dir)?;
	let outputs = list_files(&output_dir)?;

	let pairs = pair_testdata(inputs, outputs)?;
	tracing::debug!(count = pairs.len(), dir = %problem_dir.display(), "paired testdata");

	Ok(pairs
		.into_iter()
		.map(|(name, input, output)| {
			SamplePair {
				name,
				input: input_dir.join(input),
				output: output_dir.join(output),
			}
		})
		.collect())
}

fn by_stem<I>(files: I) -> BTreeMap<String, String>
where
	I: IntoIterator,
	I::Item: AsRef<str>,
{
	files
		.into_iter()
		.map(|file| {
			let file = file.as_ref();
			let stem = Path::new(file)
				.file_stem()
				.map_or_else(|| file.to_string(), |stem| stem.to_string_lossy().into_owned());
			(stem, file.to_string())
		})
		.collect()
}

fn list_files(dir: &Path) -> LcportResult<Vec<String>> {
	let mut files = vec![];

	for entry in std::fs::read_dir(dir)? {
		let entry = entry?;

		if entry.file_type()?.is_file() {
			files.push(entry.file_name().to_string_lossy().into_owned());
		}
	}

	Ok(files)
}
