/// Inserted before every `^` by [`fix_superscript`]: U+00A0 NO-BREAK SPACE.
pub const SUPERSCRIPT_SEPARATOR: char = '\u{a0}';

/// Remove the delimiter lines of every fenced code block (```` ``` ```` or
/// `~~~`, optionally indented) and keep the fenced content. An unclosed fence
/// is left untouched.
pub fn unwrap_code_fence(text: &str) -> String {
	let mut output = String::with_capacity(text.len());
	let mut open: Option<(Fence, &str)> = None;
	let mut fenced = String::new();

	for line in text.split_inclusive('\n') {
		match open {
			None => {
				if let Some(fence) = Fence::parse(line) {
					open = Some((fence, line));
					fenced.clear();
				} else {
					output.push_str(line);
				}
			}
			Some((fence, _)) if fence.is_closed_by(line) => {
				// The newline before the closing delimiter belongs to the
				// fence, the one after it to the surrounding text.
				let content = fenced.strip_suffix('\n').unwrap_or(&fenced);
				let content = content.strip_suffix('\r').unwrap_or(content);
				output.push_str(content);

				if line.ends_with('\n') {
					output.push('\n');
				}

				open = None;
			}
			Some(_) => fenced.push_str(line),
		}
	}

	if let Some((_, opening)) = open {
		output.push_str(opening);
		output.push_str(&fenced);
	}

	output
}

/// Insert [`SUPERSCRIPT_SEPARATOR`] before every caret so the judge's
/// markdown renderer does not treat `^` as a superscript marker.
///
/// The separator is inserted unconditionally: applying this twice yields two
/// separators.
pub fn fix_superscript(text: &str) -> String {
	let mut output = String::with_capacity(text.len() + text.matches('^').count());

	for ch in text.chars() {
		if ch == '^' {
			output.push(SUPERSCRIPT_SEPARATOR);
		}
		output.push(ch);
	}

	output
}

#[derive(Debug, Clone, Copy)]
struct Fence {
	marker: char,
	width: usize,
}

impl Fence {
	fn parse(line: &str) -> Option<Self> {
		let trimmed = line.trim_start();
		let marker = trimmed.chars().next().filter(|ch| matches!(ch, '`' | '~'))?;
		let width = trimmed.chars().take_while(|ch| *ch == marker).count();

		(width >= 3).then_some(Self { marker, width })
	}

	fn is_closed_by(self, line: &str) -> bool {
		let trimmed = line.trim();
		let width = trimmed.chars().count();

		width >= self.width && trimmed.chars().all(|ch| ch == self.marker)
	}
}
