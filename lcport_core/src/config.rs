use std::path::Path;
use std::path::PathBuf;

use globset::Glob;
use serde::Deserialize;

use crate::LcportError;
use crate::LcportResult;
use crate::pipeline::FieldNames;
use crate::pipeline::RenderOptions;
use crate::pipeline::SampleLayout;
use crate::sections::SplitOptions;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["lcport.toml", ".lcport.toml", ".config/lcport.toml"];

/// Directory holding the upstream problem tree when the config does not name
/// one.
pub const DEFAULT_PROBLEMS_ROOT: &str = "library-checker-problems";

/// One problem to export and the judge problem it is written to.
///
/// ```toml
/// [[problems]]
/// name = "aplusb"
/// tioj_problem_id = 1001
/// ```
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ProblemEntry {
	/// Directory name of the problem in the upstream tree.
	pub name: String,
	/// Id of the problem on the judge.
	pub tioj_problem_id: u64,
}

/// Configuration loaded from an `lcport.toml` file.
///
/// ```toml
/// problems_root = "library-checker-problems"
/// problem_name = "{title}"
/// tag_list = "library checker"
/// source_url = "https://judge.yosupo.jp/problem/{name}"
/// allow_duplicate_headings = false
///
/// [fields]
/// statement = "problem[description]"
///
/// [samples]
/// input_dir = "in"
/// output_dir = "out"
///
/// [[problems]]
/// name = "aplusb"
/// tioj_problem_id = 1001
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct LcportConfig {
	/// Root of the upstream problem tree, relative to the config file.
	#[serde(default = "default_problems_root")]
	pub problems_root: PathBuf,
	/// Template for the judge problem name. `{title}` is replaced by the
	/// title from `info.toml` and `{name}` by the problem directory name.
	#[serde(default = "default_problem_name")]
	pub problem_name: String,
	/// Tags attached to every exported problem.
	#[serde(default)]
	pub tag_list: String,
	/// Link to the upstream problem. `{name}` is replaced by the problem
	/// directory name.
	#[serde(default = "default_source_url")]
	pub source_url: String,
	/// Keep the last of repeated section headings instead of failing.
	#[serde(default)]
	pub allow_duplicate_headings: bool,
	#[serde(default)]
	pub fields: FieldNames,
	#[serde(default)]
	pub samples: SampleLayout,
	#[serde(default)]
	pub problems: Vec<ProblemEntry>,
}

impl Default for LcportConfig {
	fn default() -> Self {
		Self {
			problems_root: default_problems_root(),
			problem_name: default_problem_name(),
			tag_list: String::new(),
			source_url: default_source_url(),
			allow_duplicate_headings: false,
			fields: FieldNames::default(),
			samples: SampleLayout::default(),
			problems: Vec::new(),
		}
	}
}

fn default_problems_root() -> PathBuf {
	PathBuf::from(DEFAULT_PROBLEMS_ROOT)
}

fn default_problem_name() -> String {
	"{title}".to_string()
}

fn default_source_url() -> String {
	"https://judge.yosupo.jp/problem/{name}".to_string()
}

impl LcportConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if the file does not exist.
	pub fn load(root: &Path) -> LcportResult<Option<LcportConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		tracing::debug!(path = %config_path.display(), "loading config");
		let content = std::fs::read_to_string(&config_path)?;
		let config = Self::from_toml_str(&content)?;

		Ok(Some(config))
	}

	/// Like [`LcportConfig::load`], falling back to the defaults when no
	/// config file exists.
	pub fn load_or_default(root: &Path) -> LcportResult<LcportConfig> {
		Ok(Self::load(root)?.unwrap_or_default())
	}

	pub fn from_toml_str(content: &str) -> LcportResult<LcportConfig> {
		toml::from_str(content).map_err(|e| LcportError::ConfigParse(e.to_string()))
	}

	/// The render settings this config describes.
	pub fn render_options(&self) -> RenderOptions {
		RenderOptions {
			fields: self.fields.clone(),
			samples: self.samples.clone(),
			split: SplitOptions {
				allow_duplicate_headings: self.allow_duplicate_headings,
			},
		}
	}

	/// The judge-side name of a problem.
	pub fn problem_name(&self, name: &str, title: &str) -> String {
		self.problem_name
			.replace("{title}", title)
			.replace("{name}", name)
	}

	/// A markdown link back to the upstream problem.
	pub fn source_link(&self, name: &str) -> String {
		let url = self.source_url.replace("{name}", name);
		format!("[library checker: {name}]({url})")
	}

	/// Problems whose name matches the glob `filter`, or every problem when no
	/// filter is given. Config order is kept.
	pub fn select_problems(&self, filter: Option<&str>) -> LcportResult<Vec<&ProblemEntry>> {
		let Some(pattern) = filter else {
			return Ok(self.problems.iter().collect());
		};

		let matcher = Glob::new(pattern)
			.map_err(|e| LcportError::InvalidFilter {
				pattern: pattern.to_string(),
				reason: e.to_string(),
			})?
			.compile_matcher();

		Ok(self
			.problems
			.iter()
			.filter(|problem| matcher.is_match(&problem.name))
			.collect())
	}
}
