//! Copyright (c) 2005–2025 IKH Software, Inc.
//!
//! Released under the terms of the GNU Lesser General Public License, version 3.0
//! or (at your option) any later version (LGPL-3.0-or-later).
//!
//! Syntax highlighting grammar for the Jacy language.
//!
//! The grammar itself is static data ([`LANGUAGE`]); [`highlighter()`]
//! compiles it once on first use and hands out a shared reference that can
//! be used from any thread.
//!
//! # Example
//!
//! ```rust
//! use highlex::Scope;
//!
//! let out = jacy_grammar::highlight("func main() { let x = 0x1F_u32; }").unwrap();
//! let regions: Vec<_> = out.regions().iter().map(|r| (r.scope, r.text)).collect();
//! assert_eq!(
//!     regions,
//!     [
//!         (Scope::Keyword, "func"),
//!         (Scope::TitleFunction, "main"),
//!         (Scope::Keyword, "let"),
//!         (Scope::Variable, "x"),
//!         (Scope::Operator, "="),
//!         (Scope::Number, "0x1F_u32"),
//!     ]
//! );
//! ```

pub mod jacy;

pub use jacy::{BUILTINS, KEYWORDS, LANGUAGE, LITERALS, NUMBER_SUFFIX, OPERATORS, TYPES};

use highlex::{HighlexError, Highlight, Highlighter, Registry};
use once_cell::sync::Lazy;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JacyError {
    /// The grammar table failed to compile.
    #[error("Jacy grammar is broken: {0}")]
    Grammar(&'static HighlexError),

    #[error(transparent)]
    Highlight(#[from] HighlexError),
}

static HIGHLIGHTER: Lazy<Result<Highlighter, HighlexError>> = Lazy::new(|| {
    let hl = Highlighter::new(&LANGUAGE);
    if let Err(e) = &hl {
        log::error!("cannot compile {:?}: {}", LANGUAGE.name, e);
    }
    hl
});

/// The compiled Jacy grammar, built on first use.
pub fn highlighter() -> Result<&'static Highlighter, &'static HighlexError> {
    HIGHLIGHTER.as_ref()
}

/// Highlight `source` as Jacy.
pub fn highlight(source: &str) -> Result<Highlight<'_>, JacyError> {
    let hl = highlighter().map_err(JacyError::Grammar)?;
    Ok(hl.highlight(source)?)
}

/// A registry holding every language this crate provides.
pub fn registry() -> Result<Registry<'static>, JacyError> {
    let mut registry = Registry::new();
    registry.register(highlighter().map_err(JacyError::Grammar)?);
    Ok(registry)
}
