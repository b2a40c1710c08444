//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! Rule-table driven syntax highlighting.
//!
//! `highlex` highlights source text with a declarative grammar: a
//! [`Language`] made of keyword vocabularies and an ordered list of pattern
//! rules. Grammars are plain `static` data; [`Highlighter::new`] compiles one
//! into anchored matchers, and [`Highlighter::highlight`] produces a
//! [`Highlight`] tree that can be walked, flattened into tokens or rendered
//! as HTML.
//!
//! Key components:
//! - `grammar`: rule descriptors ([`Single`], [`Groups`], [`Nested`]) and
//!   classification [`Scope`]s
//! - `base`: shared rules grammars build on (comments, quoted strings,
//!   identifier patterns)
//! - `highlighter`: compiler and scanner
//! - `tree`, `html`: highlight results and HTML rendering
//! - `registry`: lookup by language name or alias, auto-detection
//!
//! # Example
//!
//! ```rust
//! use highlex::{Contained, Highlighter, Keywords, Language, Rule, Scope, base};
//!
//! static MINI: Language = Language {
//!     name: "Mini",
//!     aliases: &[],
//!     keywords: Keywords {
//!         pattern: base::IDENT_RE,
//!         keyword: &["if", "else"],
//!         ..Keywords::EMPTY
//!     },
//!     illegal: None,
//!     contains: &[
//!         Contained::Rule(Rule::Nested(base::C_BLOCK_COMMENT)),
//!         Contained::Rule(Rule::Nested(base::QUOTE_STRING)),
//!     ],
//! };
//!
//! let hl = Highlighter::new(&MINI).unwrap();
//! let out = hl.highlight(r#"if x /* no */ "yes" else"#).unwrap();
//! let scopes: Vec<_> = out.regions().iter().map(|r| r.scope).collect();
//! assert_eq!(
//!     scopes,
//!     [Scope::Keyword, Scope::Comment, Scope::String, Scope::Keyword]
//! );
//! assert_eq!(out.to_plain(), r#"if x /* no */ "yes" else"#);
//! ```

pub mod base;
mod cursor;
mod error;
mod grammar;
mod highlighter;
mod html;
mod registry;
mod tree;

pub use cursor::{Position, SourceCursor, Span};
pub use error::HighlexError;
pub use grammar::{Contained, Fence, Groups, Keywords, Language, Nested, Rule, Scope, Single};
pub use highlighter::{HighlightOptions, Highlighter};
pub use html::escape_into;
pub use registry::Registry;
pub use tree::{Highlight, HighlightStats, Node, Region, Scoped, Token};
