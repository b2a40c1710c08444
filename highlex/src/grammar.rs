//! Grammar descriptors.
//!
//! A [`Language`] is plain data: every field is a `'static` slice or string,
//! so a whole grammar can live in a `static` and be composed at compile time
//! with struct-update syntax:
//!
//! ```rust
//! use highlex::{Nested, Scope, base};
//!
//! const BYTE_STRING: Nested = Nested {
//!     begin: r#"b?""#,
//!     illegal: None,
//!     ..base::QUOTE_STRING
//! };
//! assert_eq!(BYTE_STRING.scope, Some(Scope::String));
//! assert_eq!(BYTE_STRING.end, "\"");
//! ```
//!
//! Descriptors are turned into matchers by
//! [`Highlighter::new`](crate::Highlighter::new).

use std::fmt;

/// Classification label attached to a highlighted span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    Keyword,
    Type,
    Literal,
    BuiltIn,
    Operator,
    Comment,
    Doctag,
    String,
    Number,
    Symbol,
    Meta,
    TitleFunction,
    TitleFunctionInvoke,
    TitleClass,
    Variable,
    Punctuation,
}

impl Scope {
    /// Dotted scope name, e.g. `title.function.invoke`.
    pub const fn name(self) -> &'static str {
        match self {
            Scope::Keyword => "keyword",
            Scope::Type => "type",
            Scope::Literal => "literal",
            Scope::BuiltIn => "built_in",
            Scope::Operator => "operator",
            Scope::Comment => "comment",
            Scope::Doctag => "doctag",
            Scope::String => "string",
            Scope::Number => "number",
            Scope::Symbol => "symbol",
            Scope::Meta => "meta",
            Scope::TitleFunction => "title.function",
            Scope::TitleFunctionInvoke => "title.function.invoke",
            Scope::TitleClass => "title.class",
            Scope::Variable => "variable",
            Scope::Punctuation => "punctuation",
        }
    }

    /// CSS classes for HTML output.
    ///
    /// The first component gets the `hljs-` prefix, each following one is
    /// suffixed with one more underscore than the previous:
    ///
    /// ```rust
    /// # use highlex::Scope;
    /// assert_eq!(Scope::Keyword.css_class(), "hljs-keyword");
    /// assert_eq!(
    ///     Scope::TitleFunctionInvoke.css_class(),
    ///     "hljs-title function_ invoke__"
    /// );
    /// ```
    pub fn css_class(self) -> std::string::String {
        let mut parts = self.name().split('.');
        let mut out = std::string::String::from("hljs-");
        out.push_str(parts.next().unwrap_or_default());
        for (i, part) in parts.enumerate() {
            out.push(' ');
            out.push_str(part);
            out.extend(std::iter::repeat_n('_', i + 1));
        }
        out
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Word classification table.
///
/// Plain text inside a rule (or at the language top level) is split into
/// candidate words with `pattern`; a word listed in one of the vocabularies
/// is emitted with the matching scope. When a word appears in more than one
/// vocabulary the first one in field order wins. `operator` entries are
/// additionally matched as literal spellings (longest first), so symbolic
/// operators such as `<<=` are classified too.
#[derive(Debug, Clone, Copy)]
pub struct Keywords {
    pub pattern: &'static str,
    pub types: &'static [&'static str],
    pub keyword: &'static [&'static str],
    pub literal: &'static [&'static str],
    pub built_in: &'static [&'static str],
    pub operator: &'static [&'static str],
}

impl Keywords {
    pub const EMPTY: Keywords = Keywords {
        pattern: r"[a-zA-Z0-9_]+",
        types: &[],
        keyword: &[],
        literal: &[],
        built_in: &[],
        operator: &[],
    };

    /// Vocabularies in precedence order, paired with their scope.
    pub fn vocabularies(&self) -> [(Scope, &'static [&'static str]); 5] {
        [
            (Scope::Type, self.types),
            (Scope::Keyword, self.keyword),
            (Scope::Literal, self.literal),
            (Scope::BuiltIn, self.built_in),
            (Scope::Operator, self.operator),
        ]
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// End boundary for a rule whose opener captures a fence, such as raw
/// strings: `r##"` must be closed by `"##` that is not followed by another
/// `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fence {
    /// Capture group of the `begin` pattern holding the fence characters.
    pub group: usize,
    /// Closing delimiter that precedes the repeated fence.
    pub close: char,
    /// The fence character; the closer must not be followed by it.
    pub mark: char,
}

/// A rule whose whole match receives one classification.
#[derive(Debug, Clone, Copy)]
pub struct Single {
    pub scope: Option<Scope>,
    pub begin: &'static str,
    /// Zero-width lookahead that must match right after `begin`.
    pub followed_by: Option<&'static str>,
    /// The matched text must not equal any of these words.
    pub excluded: &'static [&'static str],
    pub fence: Option<Fence>,
    /// Keyword table applied to the matched text.
    pub keywords: Option<Keywords>,
    pub relevance: u32,
}

impl Single {
    pub const DEFAULT: Single = Single {
        scope: None,
        begin: "",
        followed_by: None,
        excluded: &[],
        fence: None,
        keywords: None,
        relevance: 1,
    };
}

/// A sequence of patterns matched as one unit; each part (1-based) may be
/// classified on its own.
#[derive(Debug, Clone, Copy)]
pub struct Groups {
    pub parts: &'static [&'static str],
    pub scopes: &'static [(usize, Scope)],
    pub relevance: u32,
}

impl Groups {
    pub const DEFAULT: Groups = Groups {
        parts: &[],
        scopes: &[],
        relevance: 1,
    };
}

/// A container opened by `begin` and closed by `end`, scanned with its own
/// rule list.
#[derive(Debug, Clone, Copy)]
pub struct Nested {
    /// Name other rules can refer to with [`Contained::Ref`].
    pub name: Option<&'static str>,
    pub scope: Option<Scope>,
    pub begin: &'static str,
    pub end: &'static str,
    pub contains: &'static [Contained],
    pub illegal: Option<&'static str>,
    pub keywords: Option<Keywords>,
    pub relevance: u32,
}

impl Nested {
    pub const DEFAULT: Nested = Nested {
        name: None,
        scope: None,
        begin: "",
        end: "",
        contains: &[],
        illegal: None,
        keywords: None,
        relevance: 1,
    };
}

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    Single(Single),
    Groups(Groups),
    Nested(Nested),
}

/// An entry of a rule list.
#[derive(Debug, Clone, Copy)]
pub enum Contained {
    Rule(Rule),
    /// The nested rule with this name.
    Ref(&'static str),
    /// The nested rule whose list this entry is in.
    SelfRef,
}

/// Complete grammar of one language.
#[derive(Debug, Clone, Copy)]
pub struct Language {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub keywords: Keywords,
    /// Sequence that aborts highlighting when found outside of any rule.
    pub illegal: Option<&'static str>,
    pub contains: &'static [Contained],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_names() {
        assert_eq!(Scope::BuiltIn.to_string(), "built_in");
        assert_eq!(Scope::TitleFunctionInvoke.to_string(), "title.function.invoke");
        assert_eq!(Scope::Doctag.name(), "doctag");
    }

    #[test]
    fn css_classes() {
        assert_eq!(Scope::BuiltIn.css_class(), "hljs-built_in");
        assert_eq!(Scope::TitleClass.css_class(), "hljs-title class_");
        assert_eq!(
            Scope::TitleFunctionInvoke.css_class(),
            "hljs-title function_ invoke__"
        );
    }

    #[test]
    fn vocabulary_order() {
        let kw = Keywords {
            keyword: &["true"],
            literal: &["true"],
            ..Keywords::EMPTY
        };
        let order: Vec<Scope> = kw.vocabularies().iter().map(|(s, _)| *s).collect();
        assert_eq!(
            order,
            [
                Scope::Type,
                Scope::Keyword,
                Scope::Literal,
                Scope::BuiltIn,
                Scope::Operator,
            ]
        );
    }

    #[test]
    fn struct_update_overrides() {
        const R: Single = Single {
            scope: Some(Scope::Number),
            begin: r"\d+",
            relevance: 0,
            ..Single::DEFAULT
        };
        assert!(R.fence.is_none());
        assert!(R.excluded.is_empty());
        assert_eq!(R.relevance, 0);
    }
}
