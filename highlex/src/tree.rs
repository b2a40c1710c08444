//! Highlight results.
//!
//! Scanning produces a tree: [`Node::Scoped`] spans may contain further
//! scoped spans (a string inside an attribute, a comment inside a comment).
//! Leaves are [`Node::Text`] ranges, and together they cover the source
//! exactly once, in order.

use crate::cursor::{SourceCursor, Span};
use crate::grammar::Scope;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Unclassified text, as a byte range of the source.
    Text(Range<usize>),
    Scoped(Scoped),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoped {
    pub scope: Scope,
    pub range: Range<usize>,
    pub children: Vec<Node>,
}

/// Counters collected while scanning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightStats {
    /// Rules that matched (begin matches, not ends).
    pub rule_matches: usize,
    /// Words classified through a keyword table, operators included.
    pub keyword_hits: usize,
    /// Characters that matched no rule and went to a plain-text buffer.
    pub plain_chars: usize,
}

/// A leaf of the tree with its innermost scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'s> {
    pub scope: Option<Scope>,
    pub text: &'s str,
    pub range: Range<usize>,
    pub span: Span,
}

/// A scoped node, flattened in pre-order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region<'s> {
    pub scope: Scope,
    pub text: &'s str,
    pub range: Range<usize>,
    pub span: Span,
    /// Number of scoped ancestors.
    pub depth: usize,
}

/// Result of highlighting one source text.
#[derive(Debug, Clone)]
pub struct Highlight<'s> {
    pub(crate) language: &'static str,
    pub(crate) source: &'s str,
    pub(crate) nodes: Vec<Node>,
    pub(crate) relevance: u32,
    pub(crate) stats: HighlightStats,
}

impl<'s> Highlight<'s> {
    pub fn language(&self) -> &'static str {
        self.language
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Top-level nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Sum of the relevance of matched rules and classified words.
    pub fn relevance(&self) -> u32 {
        self.relevance
    }

    pub fn stats(&self) -> &HighlightStats {
        &self.stats
    }

    /// Leaves in source order, each tagged with its innermost scope.
    pub fn tokens(&self) -> Vec<Token<'s>> {
        fn walk<'s>(
            nodes: &[Node],
            scope: Option<Scope>,
            source: &'s str,
            cursor: &mut SourceCursor<'s>,
            out: &mut Vec<Token<'s>>,
        ) {
            for node in nodes {
                match node {
                    Node::Text(range) => out.push(Token {
                        scope,
                        text: &source[range.clone()],
                        range: range.clone(),
                        span: cursor.span(range.start, range.end),
                    }),
                    Node::Scoped(s) => walk(&s.children, Some(s.scope), source, cursor, out),
                }
            }
        }

        let mut cursor = SourceCursor::new(self.source);
        let mut out = Vec::new();
        walk(&self.nodes, None, self.source, &mut cursor, &mut out);
        out
    }

    /// Every scoped node in pre-order.
    pub fn regions(&self) -> Vec<Region<'s>> {
        fn walk<'s>(
            nodes: &[Node],
            depth: usize,
            source: &'s str,
            cursor: &mut SourceCursor<'s>,
            out: &mut Vec<Region<'s>>,
        ) {
            for node in nodes {
                if let Node::Scoped(s) = node {
                    out.push(Region {
                        scope: s.scope,
                        text: &source[s.range.clone()],
                        range: s.range.clone(),
                        span: cursor.span(s.range.start, s.range.end),
                        depth,
                    });
                    walk(&s.children, depth + 1, source, cursor, out);
                }
            }
        }

        let mut cursor = SourceCursor::new(self.source);
        let mut out = Vec::new();
        walk(&self.nodes, 0, self.source, &mut cursor, &mut out);
        out
    }

    /// Concatenation of all leaves; always equal to the source.
    pub fn to_plain(&self) -> String {
        self.tokens().into_iter().map(|t| t.text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span;

    fn sample() -> Highlight<'static> {
        // "/* x */ ab"
        Highlight {
            language: "test",
            source: "/* x */ ab",
            nodes: vec![
                Node::Scoped(Scoped {
                    scope: Scope::Comment,
                    range: 0..7,
                    children: vec![Node::Text(0..7)],
                }),
                Node::Text(7..8),
                Node::Scoped(Scoped {
                    scope: Scope::Keyword,
                    range: 8..10,
                    children: vec![Node::Text(8..10)],
                }),
            ],
            relevance: 1,
            stats: HighlightStats::default(),
        }
    }

    #[test]
    fn tokens_carry_innermost_scope() {
        let hl = sample();
        let toks = hl.tokens();
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[0].scope, Some(Scope::Comment));
        assert_eq!(toks[1].scope, None);
        assert_eq!(toks[2].text, "ab");
        assert_eq!(Some(toks[2].span), span!(0, 8, 0, 10));
    }

    #[test]
    fn regions_and_plain() {
        let hl = sample();
        let regions = hl.regions();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].text, "/* x */");
        assert_eq!(regions[1].depth, 0);
        assert_eq!(hl.to_plain(), hl.source());
        assert_eq!(hl.nodes()[1], Node::Text(7..8));
    }
}
