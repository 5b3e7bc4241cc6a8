use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum LcportError {
	#[error(transparent)]
	#[diagnostic(code(lcport::io_error))]
	Io(#[from] std::io::Error),

	#[error("unrecognized section heading `{heading}` on line {line}")]
	#[diagnostic(
		code(lcport::malformed_heading),
		help(
			"this markdown document requires manual conversion; supported headings are `## \
			 @{{keyword.statement}}`, `## @{{keyword.constraints}}`, `## @{{keyword.input}}`, \
			 `## @{{keyword.output}}` and `## @{{keyword.sample}}`"
		)
	)]
	MalformedHeading { heading: String, line: usize },

	#[error("section heading `{heading}` appears more than once (again on line {line})")]
	#[diagnostic(
		code(lcport::duplicate_heading),
		help("merge the duplicated sections or pass `--allow-duplicate-headings` to keep the last one")
	)]
	DuplicateHeading { heading: String, line: usize },

	#[error("malformed language block starting on line {line}: {reason}")]
	#[diagnostic(
		code(lcport::malformed_language_block),
		help(
			"a language block is `@{{lang.en}}`, `@{{lang.ja}}` and `@{{lang.end}}`, each on its \
			 own line"
		)
	)]
	MalformedLanguageBlock { line: usize, reason: String },

	#[error("unresolved tag `{tag}` at line {line}, column {column}")]
	#[diagnostic(
		code(lcport::unresolved_tag),
		help("this markdown document requires manual conversion")
	)]
	UnresolvedTag {
		tag: String,
		line: usize,
		column: usize,
	},

	#[error("parameter `{name}` used on line {line} is not defined")]
	#[diagnostic(
		code(lcport::missing_parameter),
		help("add `{name}` to the `[params]` table of the problem's info.toml")
	)]
	MissingParameter { name: String, line: usize },

	#[error("testdata `{name}` has no matching {missing} file")]
	#[diagnostic(
		code(lcport::sample_mismatch),
		help("every `in/<name>.in` needs an `out/<name>.out` and vice versa")
	)]
	SampleMismatch { name: String, missing: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(lcport::config_parse),
		help("check that lcport.toml is valid TOML with a `[[problems]]` list")
	)]
	ConfigParse(String),

	#[error("failed to parse `{path}`: {reason}")]
	#[diagnostic(
		code(lcport::problem_info),
		help("parameters in `[params]` must be non-negative integers")
	)]
	ProblemInfoParse { path: String, reason: String },

	#[error("cannot find problem `{name}` under `{root}`")]
	#[diagnostic(
		code(lcport::problem_not_found),
		help("problem directories are found by name and must contain an info.toml")
	)]
	ProblemNotFound { name: String, root: String },

	#[error("`{path}` is not valid UTF-8: {reason}")]
	#[diagnostic(code(lcport::invalid_utf8))]
	InvalidUtf8 { path: String, reason: String },

	#[error("invalid problem filter `{pattern}`: {reason}")]
	#[diagnostic(code(lcport::invalid_filter))]
	InvalidFilter { pattern: String, reason: String },
}

pub type LcportResult<T> = Result<T, LcportError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
