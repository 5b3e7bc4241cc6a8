#![allow(dead_code)]

use std::path::Path;
use std::path::PathBuf;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub const APLUSB_TASK: &str = r"## @{keyword.statement}

@{lang.en}
Print $A + B$.
@{lang.ja}
$A + B$ を出力してください。
@{lang.end}

## @{keyword.constraints}

- $0 \leq A, B \leq @{param.A_AND_B_MAX}$

## @{keyword.input}

~~~
$A$ $B$
~~~

## @{keyword.output}

~~~
$A + B$
~~~

## @{keyword.sample}

@{example.example_00}
";

pub const APLUSB_INFO: &str = r#"title = "A + B"

[params]
A_AND_B_MAX = 1_000_000_000
"#;

pub fn lcport_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("lcport"));
	cmd.env("NO_COLOR", "1").env("LCPORT_LOG", "off");
	cmd
}

/// Create `<root>/library-checker-problems/<category>/<name>` with one sample.
pub fn write_problem(
	root: &Path,
	category: &str,
	name: &str,
	task: &str,
	info: &str,
) -> std::io::Result<PathBuf> {
	let dir = root
		.join("library-checker-problems")
		.join(category)
		.join(name);
	std::fs::create_dir_all(dir.join("in"))?;
	std::fs::create_dir_all(dir.join("out"))?;
	std::fs::write(dir.join("task.md"), task)?;
	std::fs::write(dir.join("info.toml"), info)?;
	std::fs::write(dir.join("in").join("example_00.in"), "1 1\n")?;
	std::fs::write(dir.join("out").join("example_00.out"), "2\n")?;

	Ok(dir)
}

/// Write an `lcport.toml` exporting `aplusb` and `many_aplusb`.
pub fn write_config(root: &Path) -> std::io::Result<()> {
	std::fs::write(
		root.join("lcport.toml"),
		r#"tag_list = "library checker"

[[problems]]
name = "aplusb"
tioj_problem_id = 1001

[[problems]]
name = "many_aplusb"
tioj_problem_id = 1002
"#,
	)
}
