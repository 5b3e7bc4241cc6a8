use std::path::Path;
use std::path::PathBuf;

use crate::LcportResult;
use crate::ParamTable;
use crate::tokens::Token;

/// A complete statement in the upstream layout.
pub const SUM_TASK: &str = r"# Sum

Some notes that precede the first heading.

## @{keyword.statement}

@{lang.en}
Given $N$ integers $a_0, \ldots, a_{N-1}$. Print their sum.
@{lang.ja}
長さ $N$ の数列が与えられます。総和を出力してください。
@{lang.end}

## @{keyword.constraints}

- $1 \leq N \leq @{param.N_MAX}$
- $0 \leq a_i \leq @{param.A_MAX}$

## @{keyword.input}

~~~
$N$
$a_0$ $a_1$ $\ldots$ $a_{N-1}$
~~~

## @{keyword.output}

```
$S$
```

## @{keyword.sample}

@{example.example_00}

@{example.example_01}
";

pub const SUM_INFO: &str = r#"title = "Sum of Array"
timelimit = 5.0

[[tests]]
name = "example.in"
number = 2

[params]
N_MAX = 500_000
A_MAX = 1_000_000_000
"#;

pub fn sum_params() -> ParamTable {
	[("N_MAX", 500_000), ("A_MAX", 1_000_000_000)]
		.into_iter()
		.collect()
}

/// Create `<root>/<category>/<name>` with a statement, an `info.toml` and the
/// given sample files.
pub fn write_problem(
	root: &Path,
	category: &str,
	name: &str,
	task: &str,
	info: &str,
	samples: &[(&str, &str, &str)],
) -> LcportResult<PathBuf> {
	let dir = root.join(category).join(name);
	std::fs::create_dir_all(dir.join("in"))?;
	std::fs::create_dir_all(dir.join("out"))?;
	std::fs::write(dir.join("task.md"), task)?;
	std::fs::write(dir.join("info.toml"), info)?;

	for (sample, input, output) in samples {
		std::fs::write(dir.join("in").join(format!("{sample}.in")), input)?;
		std::fs::write(dir.join("out").join(format!("{sample}.out")), output)?;
	}

	Ok(dir)
}

/// Token kinds without positions.
pub fn token_kinds(content: &str) -> Vec<Token> {
	crate::lexer::tokenize(content, crate::tokens::Point::default())
		.into_iter()
		.map(|spanned| spanned.token)
		.collect()
}

/// Evaluate the output of [`crate::format_param`] back into a number.
pub fn evaluate_param(expression: &str) -> Option<u64> {
	if let Some((mantissa, power)) = expression.split_once(" \\times ") {
		let mantissa: u64 = mantissa.parse().ok()?;
		return mantissa.checked_mul(evaluate_param(power)?);
	}

	if let Some(exponent) = expression
		.strip_prefix("10^{")
		.and_then(|rest| rest.strip_suffix('}'))
	{
		return 10u64.checked_pow(exponent.parse().ok()?);
	}

	if let Some(exponent) = expression
		.strip_prefix("2^{")
		.and_then(|rest| rest.strip_suffix('}'))
	{
		return 2u64.checked_pow(exponent.parse().ok()?);
	}

	expression.parse().ok()
}
