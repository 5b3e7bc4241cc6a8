use std::path::Path;
use std::path::PathBuf;

use ignore::WalkBuilder;
use serde::Deserialize;

use crate::LcportError;
use crate::LcportResult;
use crate::pipeline::RenderOptions;
use crate::pipeline::RenderedStatement;
use crate::pipeline::render;
use crate::resolver::ParamTable;

/// The statement file inside a problem directory.
pub const TASK_FILE: &str = "task.md";
/// The metadata file inside a problem directory.
pub const INFO_FILE: &str = "info.toml";

/// The parts of `info.toml` needed to render a statement.
///
/// ```toml
/// title = "A + B"
///
/// [params]
/// A_AND_B_MAX = 1_000_000_000
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct ProblemInfo {
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub params: ParamTable,
}

impl ProblemInfo {
	pub fn load(dir: &Path) -> LcportResult<Self> {
		let path = dir.join(INFO_FILE);
		let content = read_utf8(&path)?;

		toml::from_str(&content).map_err(|e| LcportError::ProblemInfoParse {
			path: path.display().to_string(),
			reason: e.to_string(),
		})
	}
}

/// A problem directory with its statement and metadata loaded.
#[derive(Debug, Clone)]
pub struct Problem {
	/// Directory name, which is also the upstream problem name.
	pub name: String,
	pub dir: PathBuf,
	pub info: ProblemInfo,
	/// Contents of `task.md`.
	pub document: String,
}

impl Problem {
	pub fn load(dir: &Path) -> LcportResult<Self> {
		let name = dir
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default();
		let info = ProblemInfo::load(dir)?;
		let document = read_utf8(&dir.join(TASK_FILE))?;

		Ok(Self {
			name,
			dir: dir.to_path_buf(),
			info,
			document,
		})
	}

	pub fn render(&self, options: &RenderOptions) -> LcportResult<RenderedStatement> {
		tracing::info!(problem = %self.name, "rendering statement");
		render(&self.document, &self.info.params, &self.dir, options)
	}
}

/// Find the directory of the problem called `name` below `root`. Problems
/// are grouped in category directories, so the whole tree is searched for a
/// directory with that name that contains an `info.toml`. Hidden directories
/// are skipped.
pub fn find_problem_dir(root: &Path, name: &str) -> LcportResult<PathBuf> {
	let walker = WalkBuilder::new(root)
		.hidden(true)
		.git_ignore(false)
		.git_global(false)
		.git_exclude(false)
		.ignore(false)
		.parents(false)
		.sort_by_file_name(|a, b| a.cmp(b))
		.build();

	for entry in walker {
		let entry = match entry {
			Ok(entry) => entry,
			Err(error) => {
				tracing::warn!(%error, "skipping unreadable entry");
				continue;
			}
		};

		let is_dir = entry.file_type().is_some_and(|kind| kind.is_dir());

		if is_dir && entry.file_name() == name && entry.path().join(INFO_FILE).is_file() {
			tracing::debug!(path = %entry.path().display(), "found problem");
			return Ok(entry.into_path());
		}
	}

	Err(LcportError::ProblemNotFound {
		name: name.to_string(),
		root: root.display().to_string(),
	})
}

/// Read a file and reject content that is not UTF-8.
pub fn read_utf8(path: &Path) -> LcportResult<String> {
	let bytes = std::fs::read(path)?;

	String::from_utf8(bytes).map_err(|e| LcportError::InvalidUtf8 {
		path: path.display().to_string(),
		reason: e.to_string(),
	})
}
