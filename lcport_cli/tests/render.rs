mod common;

use common::APLUSB_INFO;
use common::APLUSB_TASK;
use lcport_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;
use rstest::rstest;
use similar_asserts::assert_eq;

const APLUSB_DIR: &str = "library-checker-problems/sample/aplusb";

#[test]
fn render_prints_every_field() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_problem(tmp.path(), "sample", "aplusb", APLUSB_TASK, APLUSB_INFO)?;

	let output = common::lcport_cmd()
		.arg("render")
		.arg(APLUSB_DIR)
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	let stdout = String::from_utf8(output.stdout)?;
	insta::with_settings!({ filters => vec![("\u{a0}", "<nbsp>")] }, {
		insta::assert_snapshot!(stdout, @r"
A + B (aplusb)

statement [problem[description]]
Print $A + B$.

constraints [problem[hint]]
- $0 \leq A, B \leq 10<nbsp>^{9}$

input [problem[input]]
$A$ $B$

output [problem[output]]
$A + B$

samples
  example_00       in/example_00.in  out/example_00.out
");
	});

	Ok(())
}

#[test]
fn render_json_prints_submission_form() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_problem(tmp.path(), "sample", "aplusb", APLUSB_TASK, APLUSB_INFO)?;

	let output = common::lcport_cmd()
		.arg("render")
		.arg(APLUSB_DIR)
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	let form: serde_json::Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(form["problem[description]"], "Print $A + B$.");
	assert_eq!(form["problem[input]"], "$A$ $B$");
	assert_eq!(form["problem[name]"], "A + B");
	assert_eq!(
		form["problem[source]"],
		"[library checker: aplusb](https://judge.yosupo.jp/problem/aplusb)"
	);
	assert_eq!(form["problem[sample_testdata_attributes][0][input]"], "1 1\n");
	assert_eq!(form["problem[sample_testdata_attributes][0][output]"], "2\n");

	Ok(())
}

#[test]
fn render_uses_configured_field_names() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_problem(tmp.path(), "sample", "aplusb", APLUSB_TASK, APLUSB_INFO)?;
	std::fs::write(
		tmp.path().join(".lcport.toml"),
		"[fields]\nconstraints = \"problem[constraints]\"\n",
	)?;

	common::lcport_cmd()
		.arg("render")
		.arg(APLUSB_DIR)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("constraints [problem[constraints]]"));

	Ok(())
}

#[rstest]
#[case::missing_parameter("## @{keyword.statement}\n@{param.M}\n", "missing_parameter")]
#[case::unresolved_tag("## @{keyword.statement}\n@{foo.bar}\n", "unresolved_tag")]
#[case::unknown_heading("## @{keyword.notes}\n", "malformed_heading")]
#[case::duplicate_heading(
	"## @{keyword.input}\na\n## @{keyword.input}\nb\n",
	"duplicate_heading"
)]
#[case::malformed_language_block(
	"## @{keyword.statement}\n@{lang.en}\nHi\n@{lang.end}\n",
	"malformed_language_block"
)]
fn render_reports_statement_errors(#[case] task: &str, #[case] code: &str) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_problem(tmp.path(), "sample", "aplusb", task, APLUSB_INFO)?;

	common::lcport_cmd()
		.arg("render")
		.arg(APLUSB_DIR)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stdout(predicates::str::is_empty())
		.stderr(predicates::str::contains(code));

	Ok(())
}

#[test]
fn render_allows_duplicate_headings_with_flag() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_problem(
		tmp.path(),
		"sample",
		"aplusb",
		"## @{keyword.input}\nfirst\n## @{keyword.input}\nsecond\n",
		APLUSB_INFO,
	)?;

	common::lcport_cmd()
		.arg("render")
		.arg(APLUSB_DIR)
		.arg("--allow-duplicate-headings")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("second"))
		.stdout(predicates::str::contains("first").not());

	Ok(())
}

#[test]
fn render_rejects_missing_problem() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::lcport_cmd()
		.arg("render")
		.arg("nowhere")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2);

	Ok(())
}

#[test]
fn no_subcommand_prints_usage_hint() {
	common::lcport_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("lcport --help"));
}
