mod common;

use common::APLUSB_INFO;
use common::APLUSB_TASK;
use lcport_core::AnyEmptyResult;
use similar_asserts::assert_eq;

#[test]
fn testdata_lists_paired_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let dir = common::write_problem(tmp.path(), "sample", "aplusb", APLUSB_TASK, APLUSB_INFO)?;
	std::fs::write(dir.join("in").join("random_00.in"), "3 4\n")?;
	std::fs::write(dir.join("out").join("random_00.out"), "7\n")?;

	let output = common::lcport_cmd()
		.arg("testdata")
		.arg("library-checker-problems/sample/aplusb")
		.arg("--path")
		.arg(tmp.path())
		.output()?;

	assert!(output.status.success());
	assert_eq!(
		String::from_utf8(output.stdout)?,
		"example_00               in/example_00.in  out/example_00.out\nrandom_00                \
		 in/random_00.in  out/random_00.out\n"
	);

	Ok(())
}

#[test]
fn testdata_reports_unpaired_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let dir = common::write_problem(tmp.path(), "sample", "aplusb", APLUSB_TASK, APLUSB_INFO)?;
	std::fs::write(dir.join("in").join("max_00.in"), "1 1\n")?;

	common::lcport_cmd()
		.arg("testdata")
		.arg("library-checker-problems/sample/aplusb")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("sample_mismatch"))
		.stderr(predicates::str::contains("max_00"));

	Ok(())
}
