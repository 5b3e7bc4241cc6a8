//! `lcport_core` converts Library Checker problem statements into the plain
//! text fields of a TIOJ problem form.
//!
//! A statement (`task.md`) is markdown with four families of `@{...}` tags:
//!
//! - `@{lang.en}`, `@{lang.ja}`, `@{lang.end}` switch between the English and
//!   Japanese version of a paragraph. Only English is kept.
//! - `@{param.NAME}` is replaced by a value from the `[params]` table of
//!   `info.toml`, formatted by [`format_param`] (`10^{5}`, `2^{10}`, ...).
//! - `@{keyword.NAME}` only appears in section headings such as
//!   `## @{keyword.input}`.
//! - `@{example.NAME}` names a sample whose files are `in/NAME.in` and
//!   `out/NAME.out`.
//!
//! Anything else is rejected: a statement either converts completely or the
//! conversion fails with an [`LcportError`].
//!
//! ## Processing Pipeline
//!
//! ```text
//! task.md
//!   → Section splitter (headings → ordered sections)
//!   → Lexer (text, newlines and tags per section)
//!   → Resolver (language blocks, parameters; every other tag is an error)
//!   → Post-processor (unwrap code fences, separate carets)
//!   → RenderedStatement (form fields + sample file pairs)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use lcport_core::RenderOptions;
//! use lcport_core::problem::Problem;
//!
//! let problem = Problem::load(Path::new("graph/shortest_path")).unwrap();
//! let rendered = problem.render(&RenderOptions::default()).unwrap();
//!
//! for (field, value) in rendered.field_map() {
//! 	println!("{field}: {value}");
//! }
//! ```

pub use config::*;
pub use error::*;
pub use format::*;
pub use pipeline::*;
pub use postprocess::*;
pub use resolver::*;
pub use sections::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
pub mod form;
mod format;
pub(crate) mod lexer;
mod pipeline;
mod postprocess;
pub mod problem;
mod resolver;
mod sections;
pub mod testdata;
pub mod tokens;

#[cfg(test)]
mod __fixtures;
