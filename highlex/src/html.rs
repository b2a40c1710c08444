//! HTML output.

use crate::tree::{Highlight, Node};
use std::fmt::Write;

/// Append `text` with `& < > " '` escaped.
pub fn escape_into(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
}

impl Highlight<'_> {
    /// Render as HTML: every scoped node becomes a `<span>` carrying the
    /// scope's CSS classes, text is escaped.
    ///
    /// ```rust
    /// use highlex::{Contained, Highlighter, Keywords, Language, Rule, base};
    ///
    /// const LANG: Language = Language {
    ///     name: "Strings",
    ///     aliases: &[],
    ///     keywords: Keywords::EMPTY,
    ///     illegal: None,
    ///     contains: &[Contained::Rule(Rule::Nested(base::QUOTE_STRING))],
    /// };
    /// let hl = Highlighter::new(&LANG).unwrap();
    /// let html = hl.highlight(r#"a < "b""#).unwrap().to_html();
    /// assert_eq!(html, r#"a &lt; <span class="hljs-string">&quot;b&quot;</span>"#);
    /// ```
    pub fn to_html(&self) -> String {
        fn walk(nodes: &[Node], source: &str, out: &mut String) {
            for node in nodes {
                match node {
                    Node::Text(range) => escape_into(out, &source[range.clone()]),
                    Node::Scoped(s) => {
                        let _ = write!(out, "<span class=\"{}\">", s.scope.css_class());
                        walk(&s.children, source, out);
                        out.push_str("</span>");
                    }
                }
            }
        }

        let mut out = String::with_capacity(self.source.len() * 2);
        walk(&self.nodes, self.source, &mut out);
        out
    }
}
