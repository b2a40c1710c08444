//! Error type shared by the rule compiler, the scanner and the registry.
//!
//! Compilation failures ([`HighlexError::Pattern`], [`HighlexError::UnknownRule`],
//! [`HighlexError::DuplicateRule`], [`HighlexError::SelfOutsideRule`]) mean the
//! grammar itself is broken. [`HighlexError::Illegal`] is raised while
//! scanning when the source contains a sequence the grammar marks as
//! illegal; callers usually fall back to plain, unhighlighted text.

use crate::Span;
use smartstring::alias::String;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HighlexError {
    /// A rule pattern failed to compile.
    #[error("invalid pattern {pattern:?} in {context}: {source}")]
    Pattern {
        /// Which rule (and which of its patterns) the pattern belongs to.
        context: String,
        /// The pattern text as handed to the regex engine.
        pattern: String,
        #[source]
        source: Box<regex_automata::meta::BuildError>,
    },

    /// A `Contained::Ref` names a rule that is not defined anywhere in the
    /// language.
    #[error("unknown rule reference {0:?}")]
    UnknownRule(String),

    /// Two nested rules share a name.
    #[error("duplicate rule name {0:?}")]
    DuplicateRule(String),

    /// `Contained::SelfRef` used directly in a language's top-level list.
    #[error("self reference outside of a nested rule")]
    SelfOutsideRule,

    /// The source contains a sequence the active rule marks as illegal.
    #[error("illegal sequence {lexeme:?} at {span}")]
    Illegal {
        lexeme: String,
        /// Byte offset of the illegal sequence.
        offset: usize,
        span: Span,
    },

    /// No registered language has the requested name or alias.
    #[error("unknown language {0:?}")]
    UnknownLanguage(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span;

    fn _assert_error_trait_obj(e: &dyn std::error::Error) -> &dyn std::error::Error {
        e
    }

    #[test]
    fn illegal_display_mentions_lexeme_and_span() {
        let err = HighlexError::Illegal {
            lexeme: "</".into(),
            offset: 7,
            span: span!(1, 2, 1, 4).unwrap(),
        };
        let _ = _assert_error_trait_obj(&err);
        let msg = err.to_string();
        assert!(msg.contains("\"</\""));
        assert!(msg.contains("1:2-1:4"));
    }

    #[test]
    fn pattern_error_keeps_source() {
        let source = regex_automata::meta::Regex::new("(").unwrap_err();
        let err = HighlexError::Pattern {
            context: "rule #3 begin".into(),
            pattern: "(".into(),
            source: Box::new(source),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("rule #3 begin"));
    }

    fn _assert_send_sync_static<T: Send + Sync + 'static>() {}
    #[test]
    fn highlex_error_is_send_sync_static() {
        _assert_send_sync_static::<HighlexError>();
    }
}
