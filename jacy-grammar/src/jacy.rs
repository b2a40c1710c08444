//! # Jacy grammar table
//!
//! The complete lexical description of Jacy as a [`Language`]: keyword,
//! type, literal, built-in and operator vocabularies plus the ordered rule
//! list. At every scan position the rules are tried top to bottom and the
//! first match wins, so order matters: the `for NAME in` rule must come
//! before the generic `KEYWORD NAME` declaration rule, and the character
//! literal before the lifetime symbol.
//!
//! All of it is `const` data; nothing is computed at run time apart from
//! compiling the patterns (see [`crate::highlighter`]).

use highlex::{Contained, Fence, Groups, Keywords, Language, Nested, Rule, Scope, Single, base};

/// Optional typed suffix accepted after any numeric literal.
macro_rules! number_suffix {
    () => {
        r"([ui](8|16|32|64|128)?|f(32|64))?"
    };
}

pub const NUMBER_SUFFIX: &str = number_suffix!();

pub const KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "else", "enum", "false", "func", "for", "if", "impl", "in",
    "let", "loop", "match", "mod", "move", "mut", "party", "priv", "pub", "ref", "return", "self",
    "Self", "static", "struct", "super", "trait", "true", "type", "use", "where", "while",
];

pub const LITERALS: &[&str] = &["true", "false", "Some", "None", "Ok", "Err"];

/// Names shown as built-ins, at the top level and in `path::` prefixes.
pub const BUILTINS: &[&str] = &[];

pub const TYPES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "int", "u8", "u16", "u32", "u64", "u128", "uint", "f32",
    "f64", "str", "char", "bool", "Option", "Result", "String", "Vec",
];

/// Operator spellings. Matched literally, longest first.
pub const OPERATORS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "**=", "<<=", ">>=", "&=", "|=", "^=", "+", "-", "*", "/",
    "%", "**", "not", "or", "and", "<<", ">>", "&", "|", "^", "~", "==", "!=", "<", ">", "<=", ">=",
    "<=>", "===", "!==", "..", "..=", ".", "::", "...", "|>", "$", "@",
];

/// Nests: `/* a /* b */ c */` is a single comment.
const BLOCK_COMMENT: Nested = Nested {
    name: Some("block_comment"),
    contains: &[
        Contained::SelfRef,
        Contained::Rule(Rule::Single(base::DOCTAG)),
    ],
    ..base::C_BLOCK_COMMENT
};

/// `"..."` and `b"..."`; may span lines.
const STRING: Nested = Nested {
    begin: r#"b?""#,
    illegal: None,
    ..base::QUOTE_STRING
};

/// `r"..."`, `br#"..."#`: closed by a quote and the same number of `#`.
const RAW_STRING: Single = Single {
    scope: Some(Scope::String),
    begin: r#"b?r(#*)""#,
    fence: Some(Fence {
        group: 1,
        close: '"',
        mark: '#',
    }),
    ..Single::DEFAULT
};

const CHAR: Single = Single {
    scope: Some(Scope::String),
    begin: r"b?'\\?(x[a-zA-Z0-9_]{2}|u[a-zA-Z0-9_]{4}|U[a-zA-Z0-9_]{8}|.)'",
    ..Single::DEFAULT
};

const LIFETIME: Single = Single {
    scope: Some(Scope::Symbol),
    begin: r"'[a-zA-Z_][a-zA-Z0-9_]*",
    ..Single::DEFAULT
};

const NUMBER: Single = Single {
    scope: Some(Scope::Number),
    relevance: 0,
    ..Single::DEFAULT
};

const BINARY: Single = Single {
    begin: concat!(r"\b0b([01_]+)", number_suffix!()),
    ..NUMBER
};

const OCTAL: Single = Single {
    begin: concat!(r"\b0o([0-7_]+)", number_suffix!()),
    ..NUMBER
};

const HEX: Single = Single {
    begin: concat!(r"\b0x([A-Fa-f0-9_]+)", number_suffix!()),
    ..NUMBER
};

const DECIMAL: Single = Single {
    begin: concat!(
        r"\b([0-9][0-9_]*(\.[0-9_]+)?([eE][+-]?[0-9_]+)?)",
        number_suffix!()
    ),
    ..NUMBER
};

const FUNCTION: Groups = Groups {
    parts: &[r"\bfunc", r"\s+", base::UNDERSCORE_IDENT_RE],
    scopes: &[(1, Scope::Keyword), (3, Scope::TitleFunction)],
    ..Groups::DEFAULT
};

/// `#[...]` and `#![...]`.
const ATTRIBUTE: Nested = Nested {
    scope: Some(Scope::Meta),
    begin: r"#!?\[",
    end: r"\]",
    contains: &[Contained::Rule(Rule::Nested(Nested {
        scope: Some(Scope::String),
        begin: "\"",
        end: "\"",
        ..Nested::DEFAULT
    }))],
    ..Nested::DEFAULT
};

const LET: Groups = Groups {
    parts: &[r"\blet", r"\s+", r"(?:mut\s+)?", base::UNDERSCORE_IDENT_RE],
    scopes: &[(1, Scope::Keyword), (3, Scope::Keyword), (4, Scope::Variable)],
    ..Groups::DEFAULT
};

/// Must precede [`DECLARATION`], which also starts with `for`.
const FOR_IN: Groups = Groups {
    parts: &[
        r"\bfor",
        r"\s+",
        base::UNDERSCORE_IDENT_RE,
        r"\s+",
        r"in\b",
    ],
    scopes: &[(1, Scope::Keyword), (3, Scope::Variable), (5, Scope::Keyword)],
    ..Groups::DEFAULT
};

const TYPE_ALIAS: Groups = Groups {
    parts: &[r"\btype", r"\s+", base::UNDERSCORE_IDENT_RE],
    scopes: &[(1, Scope::Keyword), (3, Scope::TitleClass)],
    ..Groups::DEFAULT
};

const DECLARATION: Groups = Groups {
    parts: &[
        r"\b(?:trait|enum|struct|union|impl|for|mod)",
        r"\s+",
        base::UNDERSCORE_IDENT_RE,
    ],
    scopes: &[(1, Scope::Keyword), (3, Scope::TitleClass)],
    ..Groups::DEFAULT
};

/// `name::` prefixes, classified with their own small vocabulary.
const PATH: Single = Single {
    begin: concat!(highlex::ident_re!(), "::"),
    keywords: Some(Keywords {
        keyword: &["Self"],
        built_in: BUILTINS,
        operator: &["::"],
        ..Keywords::EMPTY
    }),
    ..Single::DEFAULT
};

const ARROW: Single = Single {
    scope: Some(Scope::Punctuation),
    begin: "->",
    ..Single::DEFAULT
};

/// `name(` and `name!(`; the parenthesis is only looked at.
const FUNCTION_INVOKE: Single = Single {
    scope: Some(Scope::TitleFunctionInvoke),
    begin: concat!(r"\b", highlex::ident_re!(), "!?"),
    followed_by: Some(r"\s*\("),
    excluded: KEYWORDS,
    relevance: 0,
    ..Single::DEFAULT
};

pub static LANGUAGE: Language = Language {
    name: "Jacy",
    aliases: &["jc"],
    keywords: Keywords {
        pattern: concat!(highlex::ident_re!(), "!?"),
        types: TYPES,
        keyword: KEYWORDS,
        literal: LITERALS,
        built_in: BUILTINS,
        operator: OPERATORS,
    },
    illegal: Some("</"),
    contains: &[
        Contained::Rule(Rule::Nested(base::C_LINE_COMMENT)),
        Contained::Rule(Rule::Nested(BLOCK_COMMENT)),
        Contained::Rule(Rule::Nested(STRING)),
        Contained::Rule(Rule::Single(RAW_STRING)),
        Contained::Rule(Rule::Single(CHAR)),
        Contained::Rule(Rule::Single(LIFETIME)),
        Contained::Rule(Rule::Single(BINARY)),
        Contained::Rule(Rule::Single(OCTAL)),
        Contained::Rule(Rule::Single(HEX)),
        Contained::Rule(Rule::Single(DECIMAL)),
        Contained::Rule(Rule::Groups(FUNCTION)),
        Contained::Rule(Rule::Nested(ATTRIBUTE)),
        Contained::Rule(Rule::Groups(LET)),
        Contained::Rule(Rule::Groups(FOR_IN)),
        Contained::Rule(Rule::Groups(TYPE_ALIAS)),
        Contained::Rule(Rule::Groups(DECLARATION)),
        Contained::Rule(Rule::Single(PATH)),
        Contained::Rule(Rule::Single(ARROW)),
        Contained::Rule(Rule::Single(FUNCTION_INVOKE)),
    ],
};
