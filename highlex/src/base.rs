//! Pre-built rules shared by grammars.
//!
//! Grammars import these by reference and override individual fields with
//! struct-update syntax instead of redefining them.

use crate::grammar::{Contained, Nested, Rule, Scope, Single};

/// [`IDENT_RE`] as a literal, for building patterns with `concat!`.
///
/// ```rust
/// const PATH: &str = concat!(highlex::ident_re!(), "::");
/// assert_eq!(PATH, "[a-zA-Z][a-zA-Z0-9_]*::");
/// ```
#[macro_export]
macro_rules! ident_re {
    () => {
        r"[a-zA-Z][a-zA-Z0-9_]*"
    };
}

/// [`UNDERSCORE_IDENT_RE`] as a literal.
#[macro_export]
macro_rules! underscore_ident_re {
    () => {
        r"[a-zA-Z_][a-zA-Z0-9_]*"
    };
}

/// Identifier: a letter followed by letters, digits or underscores.
pub const IDENT_RE: &str = ident_re!();

/// Identifier that may also start with an underscore.
pub const UNDERSCORE_IDENT_RE: &str = underscore_ident_re!();

/// A backslash and whatever character follows it.
pub const BACKSLASH_ESCAPE: Single = Single {
    begin: r"\\[\s\S]",
    relevance: 0,
    ..Single::DEFAULT
};

/// `TODO:`-style markers inside comments.
pub const DOCTAG: Single = Single {
    scope: Some(Scope::Doctag),
    begin: r"\b(?:TODO|FIXME|NOTE|BUG|OPTIMIZE|HACK|XXX):",
    relevance: 0,
    ..Single::DEFAULT
};

/// Rule list every comment starts from.
pub const COMMENT_CONTAINS: &[Contained] = &[Contained::Rule(Rule::Single(DOCTAG))];

/// `// ...` up to (not including) the end of the line.
pub const C_LINE_COMMENT: Nested = Nested {
    scope: Some(Scope::Comment),
    begin: "//",
    end: "(?m:$)",
    contains: COMMENT_CONTAINS,
    ..Nested::DEFAULT
};

/// `/* ... */` without nesting.
pub const C_BLOCK_COMMENT: Nested = Nested {
    scope: Some(Scope::Comment),
    begin: r"/\*",
    end: r"\*/",
    contains: COMMENT_CONTAINS,
    ..Nested::DEFAULT
};

/// Single-line double-quoted string with backslash escapes.
pub const QUOTE_STRING: Nested = Nested {
    scope: Some(Scope::String),
    begin: "\"",
    end: "\"",
    contains: &[Contained::Rule(Rule::Single(BACKSLASH_ESCAPE))],
    illegal: Some(r"\n"),
    ..Nested::DEFAULT
};
