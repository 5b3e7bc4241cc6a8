use std::io::BufRead;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use lcport_cli::Commands;
use lcport_cli::LcportCli;
use lcport_cli::OutputFormat;
use lcport_core::LcportConfig;
use lcport_core::ProblemEntry;
use lcport_core::form::SubmissionForm;
use lcport_core::form::build_form;
use lcport_core::problem::Problem;
use lcport_core::problem::find_problem_dir;
use lcport_core::testdata::collect_testdata;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "LCPORT_LOG";

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,dimmed) => {
		if color_enabled() {
			format!("{}", $text.dimmed())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = LcportCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		Some(Commands::Render { problem, format }) => run_render(&args, problem, *format),
		Some(Commands::Export {
			out,
			filter,
			dry_run,
			yes,
		}) => {
			let options = ExportOptions {
				out,
				filter: filter.as_deref(),
				dry_run: *dry_run,
				yes: *yes,
			};
			run_export(&args, &options, confirm_on_stdin)
		}
		Some(Commands::Testdata { problem }) => run_testdata(&args, problem),
		None => {
			eprintln!("No subcommand specified. Run `lcport --help` for usage.");
			process::exit(1);
		}
	};

	match result {
		Ok(Outcome::Done) => {}
		Ok(Outcome::Declined) => {
			eprintln!("Export cancelled.");
			process::exit(1);
		}
		Err(e) => {
			// Try to render through miette for rich diagnostics with help text
			// and error codes.
			match e.downcast::<lcport_core::LcportError>() {
				Ok(lcport_err) => {
					let report: miette::Report = (*lcport_err).into();
					eprintln!("{report:?}");
				}
				Err(e) => {
					eprintln!("{} {e}", colored!("error:", red));
				}
			}
			process::exit(2);
		}
	}
}

type CliResult = Result<Outcome, Box<dyn std::error::Error>>;

/// How a successful command ended.
enum Outcome {
	Done,
	/// The user answered "no" at the confirmation prompt.
	Declined,
}

/// Log to stderr. `--verbose` forces `debug`, otherwise the filter comes from
/// `LCPORT_LOG` and defaults to `info`.
fn init_tracing(verbose: bool, use_color: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
	};

	tracing_subscriber::registry()
		.with(filter)
		.with(
			tracing_subscriber::fmt::layer()
				.with_writer(std::io::stderr)
				.with_ansi(use_color)
				.with_target(false),
		)
		.init();
}

fn resolve_root(args: &LcportCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Load the project config and apply the command line overrides.
fn load_config(args: &LcportCli, root: &Path) -> Result<LcportConfig, Box<dyn std::error::Error>> {
	let mut config = LcportConfig::load_or_default(root)?;

	if args.allow_duplicate_headings {
		config.allow_duplicate_headings = true;
	}

	Ok(config)
}

fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}

fn print_section(title: &str) {
	println!();
	println!("{}", colored!(title, bold));
}

fn run_render(args: &LcportCli, problem: &Path, format: OutputFormat) -> CliResult {
	let root = resolve_root(args);
	let config = load_config(args, &root)?;
	let dir = root.join(problem);

	let problem = Problem::load(&dir)?;
	let rendered = problem.render(&config.render_options())?;

	match format {
		OutputFormat::Json => {
			let form = build_form(&problem, &rendered, &config)?;
			println!("{}", serde_json::to_string_pretty(&form)?);
		}
		OutputFormat::Text => {
			println!(
				"{} {}",
				colored!(problem.info.title.as_str(), bold),
				colored!(format!("({})", problem.name), dimmed)
			);

			for field in &rendered.fields {
				print_section(&format!("{} [{}]", field.heading, field.name));
				println!("{}", field.value);
			}

			print_section("samples");
			if rendered.samples.is_empty() {
				println!("  (none)");
			}
			for sample in &rendered.samples {
				println!(
					"  {:<16} {}  {}",
					sample.name,
					make_relative(&sample.input, &dir),
					make_relative(&sample.output, &dir)
				);
			}
		}
	}

	Ok(Outcome::Done)
}

struct ExportOptions<'a> {
	out: &'a Path,
	filter: Option<&'a str>,
	dry_run: bool,
	yes: bool,
}

/// Render every selected problem and write its form. `confirm` is asked once
/// with the selected problems before anything is written.
fn run_export<F>(args: &LcportCli, options: &ExportOptions<'_>, confirm: F) -> CliResult
where
	F: FnOnce(&[&ProblemEntry]) -> std::io::Result<bool>,
{
	let root = resolve_root(args);
	let config = load_config(args, &root)?;
	let problems = config.select_problems(options.filter)?;

	if problems.is_empty() {
		println!("No problems to export.");
		return Ok(Outcome::Done);
	}

	print_section(&format!("{} problem(s) selected", problems.len()));
	for entry in &problems {
		println!("  {:<32} -> {}", entry.name, entry.tioj_problem_id);
	}

	if !options.dry_run && !options.yes && !confirm(&problems)? {
		return Ok(Outcome::Declined);
	}

	let problems_root = root.join(&config.problems_root);
	let out_dir = root.join(options.out);
	let render_options = config.render_options();

	// Every problem is rendered before the first form is written.
	let mut forms = Vec::with_capacity(problems.len());
	for entry in &problems {
		let dir = find_problem_dir(&problems_root, &entry.name)?;
		let problem = Problem::load(&dir)?;
		let rendered = problem.render(&render_options)?;
		let form = build_form(&problem, &rendered, &config)?;
		forms.push((out_dir.join(format!("{}.json", entry.tioj_problem_id)), form));
	}

	println!();
	if options.dry_run {
		for (path, _) in &forms {
			println!("  would write {}", make_relative(path, &root));
		}
		println!("\nDry run: {} form(s) would be written.", forms.len());
		return Ok(Outcome::Done);
	}

	// Forms are staged next to their destination and only renamed into
	// place once every one of them is on disk.
	std::fs::create_dir_all(&out_dir)?;
	let staged = stage_forms(&forms)?;

	for ((path, form), staging) in forms.iter().zip(&staged) {
		std::fs::rename(staging, path)?;
		tracing::debug!(path = %path.display(), fields = form.len(), "wrote form");
		println!(
			"  {} {}",
			colored!("wrote", green),
			make_relative(path, &root)
		);
	}

	println!("\nExported {} problem(s).", forms.len());

	Ok(Outcome::Done)
}

/// Write each form to `<id>.json.tmp`. When one write fails every staged file
/// is removed again.
fn stage_forms(
	forms: &[(PathBuf, SubmissionForm)],
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
	let mut staged = Vec::with_capacity(forms.len());

	for (path, form) in forms {
		let staging = path.with_extension("json.tmp");

		if let Err(e) = write_form(&staging, form) {
			std::fs::remove_file(&staging).ok();
			for written in &staged {
				std::fs::remove_file(written).ok();
			}
			return Err(e);
		}

		staged.push(staging);
	}

	Ok(staged)
}

fn write_form(path: &Path, form: &SubmissionForm) -> Result<(), Box<dyn std::error::Error>> {
	let json = serde_json::to_string_pretty(form)?;
	std::fs::write(path, format!("{json}\n"))?;

	Ok(())
}

/// Ask on stdin whether to continue until the answer is yes or no. End of
/// input declines.
fn confirm_on_stdin(problems: &[&ProblemEntry]) -> std::io::Result<bool> {
	let mut stdin = std::io::stdin().lock();

	loop {
		print!("\nExport {} problem(s)? [y/n] ", problems.len());
		std::io::stdout().flush()?;

		let mut answer = String::new();
		if stdin.read_line(&mut answer)? == 0 {
			return Ok(false);
		}

		match answer.trim().to_ascii_lowercase().as_str() {
			"y" | "yes" => return Ok(true),
			"n" | "no" => return Ok(false),
			_ => {}
		}
	}
}

fn run_testdata(args: &LcportCli, problem: &Path) -> CliResult {
	let root = resolve_root(args);
	let config = load_config(args, &root)?;
	let dir = root.join(problem);
	let pairs = collect_testdata(&dir, &config.samples)?;

	for pair in &pairs {
		println!(
			"{:<24} {}  {}",
			pair.name,
			make_relative(&pair.input, &dir),
			make_relative(&pair.output, &dir)
		);
	}

	if args.verbose {
		eprintln!("{} test case(s)", pairs.len());
	}

	Ok(Outcome::Done)
}
