use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Port Library Checker problem statements to TIOJ problem forms.",
	long_about = "lcport reads the bilingual, tag-annotated `task.md` statements of the Library \
	              Checker problem tree and turns them into the plain-text fields of a TIOJ \
	              problem form, together with the sample input/output files.\n\nQuick start:\n  \
	              lcport render graph/shortest_path   Print the fields of one problem\n  lcport \
	              export --dry-run               List what would be exported\n  lcport export \
	              --out forms             Write one JSON form per configured problem"
)]
pub struct LcportCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory, where `lcport.toml` lives.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,

	/// Keep the last of repeated section headings instead of failing.
	#[arg(long, global = true, default_value_t = false)]
	pub allow_duplicate_headings: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Render the statement of a single problem.
	///
	/// Reads `task.md` and `info.toml` from the problem directory, resolves
	/// language blocks and parameters and prints every form field followed
	/// by the sample file pairs. Relative paths are resolved against the
	/// project root.
	Render {
		/// The problem directory, e.g. `library-checker-problems/sample/aplusb`.
		problem: PathBuf,

		/// Output format. Use `text` for human-readable output or `json` for
		/// the complete submission form.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// Export every configured problem as a submission form.
	///
	/// Looks up each `[[problems]]` entry from `lcport.toml` in the problems
	/// tree, renders it and writes `<out>/<tioj_problem_id>.json`. The list of
	/// problems is shown first and must be confirmed unless `--yes` is given.
	Export {
		/// Directory the forms are written to, relative to the project root.
		#[arg(long, default_value = "forms")]
		out: PathBuf,

		/// Only export problems whose name matches this glob.
		#[arg(long)]
		filter: Option<String>,

		/// Render every problem and report what would be written without
		/// touching the disk.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Skip the confirmation prompt.
		#[arg(long, short, default_value_t = false)]
		yes: bool,
	},
	/// List the paired testdata files of a problem.
	///
	/// Every file in `in/` must have a counterpart with the same stem in
	/// `out/` and vice versa.
	Testdata {
		/// The problem directory.
		problem: PathBuf,
	},
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
