//! Rule compiler and scanner.
//!
//! [`Highlighter::new`] turns a [`Language`] descriptor into anchored
//! matchers once; [`Highlighter::highlight`] then walks a source text and
//! builds a [`Highlight`] tree.
//!
//! Scanning keeps a stack of frames: the language itself at the bottom and
//! one frame per open [`Nested`](crate::Nested) rule. At every position the
//! top frame tries, in order:
//!
//! 1. its contained rules, in declaration order (first match wins);
//! 2. its `end` pattern;
//! 3. its `illegal` pattern;
//!
//! and otherwise adds one character to its plain-text buffer. Buffers are
//! classified with the frame's keyword table when they are flushed.

use crate::cursor::SourceCursor;
use crate::error::HighlexError;
use crate::grammar::{Contained, Fence, Keywords, Language, Rule, Scope};
use crate::tree::{Highlight, HighlightStats, Node, Scoped};
use indexmap::IndexMap;
use regex_automata::{Anchored, Input, PatternID, meta::Regex};
use smartstring::alias::String;
use std::collections::HashMap;
use std::ops::Range;

/// Words that say little about which language a text is written in.
const COMMON_KEYWORDS: &[&str] = &[
    "of", "and", "for", "in", "not", "or", "if", "then", "parent", "list", "value",
];

/// Scanner settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightOptions {
    /// Treat illegal sequences as plain text instead of failing.
    pub ignore_illegals: bool,
}

fn compile(pattern: &str, context: impl FnOnce() -> String) -> Result<Regex, HighlexError> {
    Regex::new(pattern).map_err(|e| HighlexError::Pattern {
        context: context(),
        pattern: pattern.into(),
        source: Box::new(e),
    })
}

/// End of the anchored match of `re` at `pos`, searching no further than `end`.
#[inline]
fn match_at(re: &Regex, source: &str, pos: usize, end: usize) -> Option<usize> {
    let input = Input::new(source).range(pos..end).anchored(Anchored::Yes);
    re.search(&input).map(|m| m.end())
}

#[derive(Debug)]
struct KeywordTable {
    pattern: Regex,
    words: IndexMap<&'static str, Scope>,
    operators: Option<Regex>,
}

impl KeywordTable {
    fn compile(keywords: &Keywords, owner: &str) -> Result<Self, HighlexError> {
        let pattern = compile(keywords.pattern, || format!("{owner} keyword pattern").into())?;

        let mut words = IndexMap::new();
        for (scope, list) in keywords.vocabularies() {
            for word in list {
                words.entry(*word).or_insert(scope);
            }
        }

        let operators = if keywords.operator.is_empty() {
            None
        } else {
            let mut spellings = keywords.operator.to_vec();
            // Stable: equal lengths keep their declared order.
            spellings.sort_by(|a, b| b.len().cmp(&a.len()));
            let alternation = spellings
                .iter()
                .map(|op| regex::escape(op))
                .collect::<Vec<_>>()
                .join("|");
            Some(compile(&alternation, || {
                format!("{owner} operator vocabulary").into()
            })?)
        };

        Ok(Self {
            pattern,
            words,
            operators,
        })
    }
}

#[derive(Debug)]
enum CompiledRule {
    Single {
        scope: Option<Scope>,
        begin: Regex,
        followed_by: Option<Regex>,
        excluded: &'static [&'static str],
        fence: Option<Fence>,
        keywords: Option<KeywordTable>,
        relevance: u32,
    },
    Groups {
        begin: Regex,
        /// Capture group index of each part.
        groups: Vec<usize>,
        /// Scope of each part.
        scopes: Vec<Option<Scope>>,
        relevance: u32,
    },
    Nested {
        scope: Option<Scope>,
        begin: Regex,
        end: Regex,
        contains: Vec<usize>,
        illegal: Option<Regex>,
        keywords: Option<KeywordTable>,
        relevance: u32,
    },
}

impl CompiledRule {
    fn relevance(&self) -> u32 {
        match self {
            CompiledRule::Single { relevance, .. }
            | CompiledRule::Groups { relevance, .. }
            | CompiledRule::Nested { relevance, .. } => *relevance,
        }
    }
}

enum Slot {
    Rule(usize),
    Named(&'static str),
    Owner(usize),
}

/// Two-pass compiler: allocate every rule definition (collecting names),
/// then compile patterns and resolve references to indices.
struct Compiler {
    defs: Vec<&'static Rule>,
    slots: Vec<Vec<Slot>>,
    names: HashMap<&'static str, usize>,
}

impl Compiler {
    fn new() -> Self {
        Self {
            defs: Vec::new(),
            slots: Vec::new(),
            names: HashMap::new(),
        }
    }

    fn allocate(&mut self, rule: &'static Rule) -> Result<usize, HighlexError> {
        let index = self.defs.len();
        self.defs.push(rule);
        self.slots.push(Vec::new());
        if let Rule::Nested(nested) = rule {
            if let Some(name) = nested.name {
                if self.names.insert(name, index).is_some() {
                    return Err(HighlexError::DuplicateRule(name.into()));
                }
            }
            let slots = self.allocate_list(nested.contains, Some(index))?;
            self.slots[index] = slots;
        }
        Ok(index)
    }

    fn allocate_list(
        &mut self,
        list: &'static [Contained],
        owner: Option<usize>,
    ) -> Result<Vec<Slot>, HighlexError> {
        let mut slots = Vec::with_capacity(list.len());
        for entry in list {
            slots.push(match entry {
                Contained::Rule(rule) => Slot::Rule(self.allocate(rule)?),
                Contained::Ref(name) => Slot::Named(*name),
                Contained::SelfRef => Slot::Owner(owner.ok_or(HighlexError::SelfOutsideRule)?),
            });
        }
        Ok(slots)
    }

    fn resolve(&self, slots: &[Slot]) -> Result<Vec<usize>, HighlexError> {
        slots
            .iter()
            .map(|slot| match slot {
                Slot::Rule(index) | Slot::Owner(index) => Ok(*index),
                Slot::Named(name) => self
                    .names
                    .get(name)
                    .copied()
                    .ok_or_else(|| HighlexError::UnknownRule((*name).into())),
            })
            .collect()
    }

    fn compile_rule(&self, index: usize) -> Result<CompiledRule, HighlexError> {
        let owner = format!("rule #{index}");
        let context = |what: &str| -> String { format!("{owner} {what}").into() };
        Ok(match self.defs[index] {
            Rule::Single(single) => CompiledRule::Single {
                scope: single.scope,
                begin: compile(single.begin, || context("begin"))?,
                followed_by: single
                    .followed_by
                    .map(|p| compile(p, || context("lookahead")))
                    .transpose()?,
                excluded: single.excluded,
                fence: single.fence,
                keywords: single
                    .keywords
                    .as_ref()
                    .map(|kw| KeywordTable::compile(kw, &owner))
                    .transpose()?,
                relevance: single.relevance,
            },
            Rule::Groups(groups) => {
                let pattern: std::string::String = groups
                    .parts
                    .iter()
                    .enumerate()
                    .map(|(i, part)| format!("(?P<p{}>{})", i + 1, part))
                    .collect();
                let begin = compile(&pattern, || context("groups"))?;
                let info = begin.group_info();
                let group_indices = (1..=groups.parts.len())
                    .map(|i| {
                        info.to_index(PatternID::ZERO, &format!("p{i}"))
                            .unwrap_or_default()
                    })
                    .collect();
                let scopes = (1..=groups.parts.len())
                    .map(|i| {
                        groups
                            .scopes
                            .iter()
                            .find(|(part, _)| *part == i)
                            .map(|(_, scope)| *scope)
                    })
                    .collect();
                CompiledRule::Groups {
                    begin,
                    groups: group_indices,
                    scopes,
                    relevance: groups.relevance,
                }
            }
            Rule::Nested(nested) => CompiledRule::Nested {
                scope: nested.scope,
                begin: compile(nested.begin, || context("begin"))?,
                end: compile(nested.end, || context("end"))?,
                contains: self.resolve(&self.slots[index])?,
                illegal: nested
                    .illegal
                    .map(|p| compile(p, || context("illegal")))
                    .transpose()?,
                keywords: nested
                    .keywords
                    .as_ref()
                    .map(|kw| KeywordTable::compile(kw, &owner))
                    .transpose()?,
                relevance: nested.relevance,
            },
        })
    }
}

/// A compiled [`Language`].
///
/// Immutable after construction and safe to share between threads.
///
/// ```rust
/// use highlex::{Contained, Highlighter, Keywords, Language, Rule, Scope, base};
///
/// static TINY: Language = Language {
///     name: "Tiny",
///     aliases: &["tn"],
///     keywords: Keywords {
///         pattern: base::IDENT_RE,
///         keyword: &["let"],
///         operator: &["=", "=="],
///         ..Keywords::EMPTY
///     },
///     illegal: None,
///     contains: &[Contained::Rule(Rule::Nested(base::C_LINE_COMMENT))],
/// };
///
/// let hl = Highlighter::new(&TINY).unwrap();
/// let out = hl.highlight("let x == 1 // done").unwrap();
/// let scopes: Vec<_> = out.regions().iter().map(|r| (r.scope, r.text)).collect();
/// assert_eq!(
///     scopes,
///     [(Scope::Keyword, "let"), (Scope::Operator, "=="), (Scope::Comment, "// done")]
/// );
/// ```
#[derive(Debug)]
pub struct Highlighter {
    name: &'static str,
    aliases: &'static [&'static str],
    rules: Vec<CompiledRule>,
    root: Vec<usize>,
    keywords: KeywordTable,
    illegal: Option<Regex>,
    options: HighlightOptions,
}

impl Highlighter {
    pub fn new(language: &Language) -> Result<Self, HighlexError> {
        let mut compiler = Compiler::new();
        let root_slots = compiler.allocate_list(language.contains, None)?;
        let root = compiler.resolve(&root_slots)?;
        let rules = (0..compiler.defs.len())
            .map(|index| compiler.compile_rule(index))
            .collect::<Result<Vec<_>, _>>()?;
        let keywords = KeywordTable::compile(&language.keywords, language.name)?;
        let illegal = language
            .illegal
            .map(|p| compile(p, || format!("{} illegal marker", language.name).into()))
            .transpose()?;

        log::debug!(
            "compiled language {:?}: {} rules ({} top level), {} keywords",
            language.name,
            rules.len(),
            root.len(),
            keywords.words.len()
        );

        Ok(Self {
            name: language.name,
            aliases: language.aliases,
            rules,
            root,
            keywords,
            illegal,
            options: HighlightOptions::default(),
        })
    }

    pub fn with_options(mut self, options: HighlightOptions) -> Self {
        self.options = options;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    /// Highlight `source`.
    ///
    /// Fails only with [`HighlexError::Illegal`], and only when
    /// [`HighlightOptions::ignore_illegals`] is off.
    pub fn highlight<'s>(&self, source: &'s str) -> Result<Highlight<'s>, HighlexError> {
        Scanner::new(self, source).run()
    }

    fn contains_of(&self, rule: Option<usize>) -> &[usize] {
        match rule {
            None => &self.root,
            Some(index) => match &self.rules[index] {
                CompiledRule::Nested { contains, .. } => contains,
                _ => &[],
            },
        }
    }

    fn keywords_of(&self, rule: Option<usize>) -> Option<&KeywordTable> {
        match rule {
            None => Some(&self.keywords),
            Some(index) => match &self.rules[index] {
                CompiledRule::Nested { keywords, .. } => keywords.as_ref(),
                _ => None,
            },
        }
    }

    fn illegal_of(&self, rule: Option<usize>) -> Option<&Regex> {
        match rule {
            None => self.illegal.as_ref(),
            Some(index) => match &self.rules[index] {
                CompiledRule::Nested { illegal, .. } => illegal.as_ref(),
                _ => None,
            },
        }
    }

    fn end_of(&self, rule: Option<usize>) -> Option<&Regex> {
        match rule.map(|index| &self.rules[index]) {
            Some(CompiledRule::Nested { end, .. }) => Some(end),
            _ => None,
        }
    }
}

struct Frame {
    /// `None` for the language frame.
    rule: Option<usize>,
    scope: Option<Scope>,
    start: usize,
    /// Start of the text not yet classified.
    buffer: usize,
    children: Vec<Node>,
}

impl Frame {
    fn new(rule: Option<usize>, scope: Option<Scope>, start: usize) -> Self {
        Self {
            rule,
            scope,
            start,
            buffer: start,
            children: Vec::new(),
        }
    }
}

struct RuleMatch {
    rule: usize,
    end: usize,
    /// Range of every part of a `Groups` rule.
    parts: Vec<Range<usize>>,
}

/// Append `node`, merging adjacent text and dropping empty text.
fn push_node(children: &mut Vec<Node>, node: Node) {
    if let Node::Text(range) = &node {
        if range.is_empty() {
            return;
        }
        if let Some(Node::Text(prev)) = children.last_mut() {
            if prev.end == range.start {
                prev.end = range.end;
                return;
            }
        }
    }
    children.push(node);
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn leaf(scope: Scope, range: Range<usize>) -> Node {
    Node::Scoped(Scoped {
        scope,
        range: range.clone(),
        children: vec![Node::Text(range)],
    })
}

struct Scanner<'h, 's> {
    hl: &'h Highlighter,
    source: &'s str,
    pos: usize,
    stack: Vec<Frame>,
    relevance: u32,
    stats: HighlightStats,
}

impl<'h, 's> Scanner<'h, 's> {
    fn new(hl: &'h Highlighter, source: &'s str) -> Self {
        Self {
            hl,
            source,
            pos: 0,
            stack: vec![Frame::new(None, None, 0)],
            relevance: 0,
            stats: HighlightStats::default(),
        }
    }

    fn top(&self) -> &Frame {
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Frame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn run(mut self) -> Result<Highlight<'s>, HighlexError> {
        let len = self.source.len();
        while self.pos < len {
            if let Some(m) = self.try_contained() {
                self.apply(m);
                continue;
            }
            if self.try_end() {
                continue;
            }
            self.check_illegal()?;
            let step = self.source[self.pos..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.pos += step;
            self.stats.plain_chars += 1;
        }

        self.flush();
        while self.stack.len() > 1 {
            self.pop();
        }
        let root = self.stack.pop().map(|f| f.children).unwrap_or_default();

        Ok(Highlight {
            language: self.hl.name,
            source: self.source,
            nodes: root,
            relevance: self.relevance,
            stats: self.stats,
        })
    }

    fn try_contained(&self) -> Option<RuleMatch> {
        let hl = self.hl;
        hl.contains_of(self.top().rule)
            .iter()
            .find_map(|&index| self.match_rule(index))
    }

    fn match_rule(&self, index: usize) -> Option<RuleMatch> {
        let (source, pos, len) = (self.source, self.pos, self.source.len());
        match &self.hl.rules[index] {
            CompiledRule::Single {
                begin,
                followed_by,
                excluded,
                fence,
                ..
            } => {
                let end = match fence {
                    None => match_at(begin, source, pos, len)?,
                    Some(fence) => self.match_fenced(begin, fence)?,
                };
                let text = &source[pos..end];
                if end == pos || excluded.iter().any(|word| *word == text) {
                    return None;
                }
                if let Some(lookahead) = followed_by {
                    match_at(lookahead, source, end, len)?;
                }
                Some(RuleMatch {
                    rule: index,
                    end,
                    parts: Vec::new(),
                })
            }
            CompiledRule::Groups { begin, groups, .. } => {
                let mut caps = begin.create_captures();
                let input = Input::new(source).range(pos..len).anchored(Anchored::Yes);
                begin.search_captures(&input, &mut caps);
                let end = caps.get_match()?.end();
                if end == pos {
                    return None;
                }
                let parts = groups
                    .iter()
                    .map(|&g| caps.get_group(g).map_or(0..0, |span| span.range()))
                    .collect();
                Some(RuleMatch {
                    rule: index,
                    end,
                    parts,
                })
            }
            CompiledRule::Nested { begin, .. } => {
                let end = match_at(begin, source, pos, len)?;
                (end > pos).then(|| RuleMatch {
                    rule: index,
                    end,
                    parts: Vec::new(),
                })
            }
        }
    }

    /// Match the opener, then find the first closer carrying the same fence
    /// that is not followed by one more fence mark.
    fn match_fenced(&self, begin: &Regex, fence: &Fence) -> Option<usize> {
        let source = self.source;
        let mut caps = begin.create_captures();
        let input = Input::new(source)
            .range(self.pos..source.len())
            .anchored(Anchored::Yes);
        begin.search_captures(&input, &mut caps);
        let opener_end = caps.get_match()?.end();
        let marks = caps
            .get_group(fence.group)
            .map_or("", |span| &source[span.range()]);

        let mut closer = std::string::String::with_capacity(marks.len() + 1);
        closer.push(fence.close);
        closer.push_str(marks);

        let mut from = opener_end;
        while let Some(at) = source[from..].find(&closer) {
            let after = from + at + closer.len();
            if !source[after..].starts_with(fence.mark) {
                return Some(after);
            }
            from += at + fence.close.len_utf8();
        }
        None
    }

    fn apply(&mut self, m: RuleMatch) {
        self.flush();
        let hl = self.hl;
        let rule = &hl.rules[m.rule];
        let range = self.pos..m.end;
        self.relevance += rule.relevance();
        self.stats.rule_matches += 1;
        log::trace!(
            "MATCHED: rule #{}, depth {}, range {:?}, text {:?}",
            m.rule,
            self.stack.len() - 1,
            range,
            &self.source[range.clone()]
        );

        match rule {
            CompiledRule::Single {
                scope, keywords, ..
            } => {
                let children = match keywords {
                    Some(kw) => self.classify(kw, range.clone()),
                    None => vec![Node::Text(range.clone())],
                };
                let frame = self.top_mut();
                match scope {
                    Some(scope) => push_node(
                        &mut frame.children,
                        Node::Scoped(Scoped {
                            scope: *scope,
                            range,
                            children,
                        }),
                    ),
                    None => children
                        .into_iter()
                        .for_each(|node| push_node(&mut frame.children, node)),
                }
                self.advance_to(m.end);
            }
            CompiledRule::Groups { scopes, .. } => {
                let parent_keywords = hl.keywords_of(self.top().rule);
                let mut cursor = range.start;
                for (part, scope) in m.parts.into_iter().zip(scopes) {
                    if part.is_empty() {
                        continue;
                    }
                    let mut nodes = vec![Node::Text(cursor..part.start)];
                    match (scope, parent_keywords) {
                        (Some(scope), _) => nodes.push(leaf(*scope, part.clone())),
                        (None, Some(kw)) => nodes.extend(self.classify(kw, part.clone())),
                        (None, None) => nodes.push(Node::Text(part.clone())),
                    }
                    cursor = part.end;
                    let frame = self.top_mut();
                    nodes
                        .into_iter()
                        .for_each(|node| push_node(&mut frame.children, node));
                }
                push_node(&mut self.top_mut().children, Node::Text(cursor..m.end));
                self.advance_to(m.end);
            }
            CompiledRule::Nested { scope, .. } => {
                log::trace!("PUSH: rule #{}, scope {:?}", m.rule, scope);
                // The begin lexeme belongs to the new frame's buffer.
                self.stack.push(Frame::new(Some(m.rule), *scope, self.pos));
                self.pos = m.end;
            }
        }
    }

    fn advance_to(&mut self, end: usize) {
        self.pos = end;
        self.top_mut().buffer = end;
    }

    fn try_end(&mut self) -> bool {
        let hl = self.hl;
        let Some(end) = hl.end_of(self.top().rule) else {
            return false;
        };
        match match_at(end, self.source, self.pos, self.source.len()) {
            Some(end) => {
                self.pos = end;
                self.flush();
                self.pop();
                true
            }
            None => false,
        }
    }

    fn check_illegal(&self) -> Result<(), HighlexError> {
        if self.hl.options.ignore_illegals {
            return Ok(());
        }
        let Some(illegal) = self.hl.illegal_of(self.top().rule) else {
            return Ok(());
        };
        match match_at(illegal, self.source, self.pos, self.source.len()) {
            Some(end) if end > self.pos => {
                let span = SourceCursor::new(self.source).span(self.pos, end);
                log::debug!("ILLEGAL: {:?} at {}", &self.source[self.pos..end], span);
                Err(HighlexError::Illegal {
                    lexeme: self.source[self.pos..end].into(),
                    offset: self.pos,
                    span,
                })
            }
            _ => Ok(()),
        }
    }

    /// Classify the top frame's pending text.
    fn flush(&mut self) {
        let range = self.top().buffer..self.pos;
        if range.is_empty() {
            return;
        }
        let hl = self.hl;
        let nodes = match hl.keywords_of(self.top().rule) {
            Some(kw) => self.classify(kw, range),
            None => vec![Node::Text(range)],
        };
        let pos = self.pos;
        let frame = self.top_mut();
        nodes
            .into_iter()
            .for_each(|node| push_node(&mut frame.children, node));
        frame.buffer = pos;
    }

    fn pop(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        log::trace!(
            "POP: rule {:?}, scope {:?}, range {:?}",
            frame.rule,
            frame.scope,
            frame.start..self.pos
        );
        let pos = self.pos;
        let parent = self.top_mut();
        match frame.scope {
            Some(scope) => push_node(
                &mut parent.children,
                Node::Scoped(Scoped {
                    scope,
                    range: frame.start..pos,
                    children: frame.children,
                }),
            ),
            None => frame
                .children
                .into_iter()
                .for_each(|node| push_node(&mut parent.children, node)),
        }
        parent.buffer = pos;
    }

    /// Split `range` into words and operators found in `kw`, and plain text.
    fn classify(&mut self, kw: &KeywordTable, range: Range<usize>) -> Vec<Node> {
        let source = self.source;
        let mut out = Vec::new();
        let mut last = range.start;
        let mut i = range.start;

        while i < range.end {
            // Never start a word inside a longer identifier (`_self`, `x2in`).
            let inside_word = source[..i].chars().next_back().is_some_and(is_word_char);
            if inside_word && source[i..].starts_with(is_word_char) {
                i = source[i..range.end]
                    .find(|c| !is_word_char(c))
                    .map_or(range.end, |n| i + n);
                continue;
            }
            if let Some(end) = match_at(&kw.pattern, source, i, range.end).filter(|&e| e > i) {
                let mut word_end = end;
                let mut scope = kw.words.get(&source[i..end]).copied();
                if scope.is_none() && end - i > 1 && source[i..end].ends_with('!') {
                    // Leave the `!` to the operator table (`x!=y`).
                    word_end = end - 1;
                    scope = kw.words.get(&source[i..word_end]).copied();
                }
                if let Some(scope) = scope {
                    let word = &source[i..word_end];
                    push_node(&mut out, Node::Text(last..i));
                    push_node(&mut out, leaf(scope, i..word_end));
                    last = word_end;
                    self.stats.keyword_hits += 1;
                    if scope != Scope::Operator && !COMMON_KEYWORDS.iter().any(|w| *w == word) {
                        self.relevance += 1;
                    }
                }
                i = word_end;
                continue;
            }
            if let Some(end) = kw
                .operators
                .as_ref()
                .and_then(|ops| match_at(ops, source, i, range.end))
                .filter(|&e| e > i)
            {
                push_node(&mut out, Node::Text(last..i));
                push_node(&mut out, leaf(Scope::Operator, i..end));
                self.stats.keyword_hits += 1;
                last = end;
                i = end;
                continue;
            }
            i += source[i..].chars().next().map_or(1, char::len_utf8);
        }
        push_node(&mut out, Node::Text(last..range.end));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base;
    use crate::grammar::{Groups, Nested, Single};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    const NUMBER: Single = Single {
        scope: Some(Scope::Number),
        begin: r"\b[0-9]+",
        relevance: 0,
        ..Single::DEFAULT
    };

    const NESTING: Nested = Nested {
        name: Some("paren"),
        scope: Some(Scope::Meta),
        begin: r"\(",
        end: r"\)",
        contains: &[Contained::SelfRef, Contained::Rule(Rule::Single(NUMBER))],
        ..Nested::DEFAULT
    };

    static LANG: Language = Language {
        name: "Test",
        aliases: &["t"],
        keywords: Keywords {
            pattern: base::IDENT_RE,
            keyword: &["if", "true"],
            literal: &["true", "nil"],
            operator: &["<", "<<", "<<=", "and"],
            ..Keywords::EMPTY
        },
        illegal: Some("</"),
        contains: &[
            Contained::Rule(Rule::Groups(Groups {
                parts: &[r"\bdef", r"\s+", base::UNDERSCORE_IDENT_RE],
                scopes: &[(1, Scope::Keyword), (3, Scope::TitleFunction)],
                ..Groups::DEFAULT
            })),
            Contained::Rule(Rule::Single(Single {
                scope: Some(Scope::String),
                begin: r#"r(#*)""#,
                fence: Some(Fence {
                    group: 1,
                    close: '"',
                    mark: '#',
                }),
                ..Single::DEFAULT
            })),
            Contained::Ref("paren"),
            Contained::Rule(Rule::Nested(NESTING)),
            Contained::Rule(Rule::Single(NUMBER)),
            Contained::Rule(Rule::Single(Single {
                scope: Some(Scope::TitleFunctionInvoke),
                begin: r"\b[a-zA-Z][a-zA-Z0-9_]*",
                followed_by: Some(r"\s*\["),
                excluded: &["if"],
                relevance: 0,
                ..Single::DEFAULT
            })),
        ],
    };

    fn scoped<'s>(hl: &Highlight<'s>) -> Vec<(Scope, &'s str)> {
        hl.regions().into_iter().map(|r| (r.scope, r.text)).collect()
    }

    #[test]
    fn groups_classify_parts() {
        init_logger();
        let hl = Highlighter::new(&LANG).unwrap();
        let out = hl.highlight("def  go").unwrap();
        assert_eq!(
            scoped(&out),
            [
                (Scope::Keyword, "def"),
                (Scope::TitleFunction, "go"),
            ]
        );
        assert_eq!(out.to_plain(), "def  go");
        // No match inside a longer identifier.
        let out = hl.highlight("undef go").unwrap();
        assert!(scoped(&out).is_empty());
    }

    #[test]
    fn first_vocabulary_wins_and_operators_longest_first() {
        init_logger();
        let hl = Highlighter::new(&LANG).unwrap();
        let out = hl.highlight("true nil a <<= b and c < d").unwrap();
        assert_eq!(
            scoped(&out),
            [
                (Scope::Keyword, "true"),
                (Scope::Literal, "nil"),
                (Scope::Operator, "<<="),
                (Scope::Operator, "and"),
                (Scope::Operator, "<"),
            ]
        );
        assert_eq!(out.stats().keyword_hits, 5);
    }

    #[test]
    fn words_are_not_split() {
        init_logger();
        let hl = Highlighter::new(&LANG).unwrap();
        let out = hl.highlight("iffy android").unwrap();
        assert!(scoped(&out).is_empty());
    }

    const BANG: Language = Language {
        name: "Bang",
        aliases: &[],
        keywords: Keywords {
            pattern: concat!(crate::ident_re!(), "!?"),
            keyword: &["if", "true", "print!"],
            operator: &["!=", "+"],
            ..Keywords::EMPTY
        },
        illegal: None,
        contains: &[],
    };

    #[test]
    fn keyword_before_bang() {
        init_logger();
        let hl = Highlighter::new(&BANG).unwrap();
        let out = hl.highlight("if!x true!=y print!z").unwrap();
        assert_eq!(
            scoped(&out),
            [
                (Scope::Keyword, "if"),
                (Scope::Keyword, "true"),
                (Scope::Operator, "!="),
                (Scope::Keyword, "print!"),
            ]
        );
        assert_eq!(out.to_plain(), "if!x true!=y print!z");
    }

    #[test]
    fn no_keyword_inside_identifier() {
        init_logger();
        let hl = Highlighter::new(&BANG).unwrap();
        let out = hl.highlight("_if + __true + x_if + 2if + ünif").unwrap();
        assert_eq!(
            scoped(&out),
            [
                (Scope::Operator, "+"),
                (Scope::Operator, "+"),
                (Scope::Operator, "+"),
                (Scope::Operator, "+"),
            ]
        );
    }

    #[test]
    fn fence_requires_matching_marks() {
        init_logger();
        let hl = Highlighter::new(&LANG).unwrap();
        let out = hl.highlight(r####"r##"a "# b"## c"####).unwrap();
        assert_eq!(scoped(&out), [(Scope::String, r###"r##"a "# b"##"###)]);

        // A closer followed by an extra mark does not count.
        let out = hl.highlight(r###"r#"a"## "###).unwrap();
        assert!(scoped(&out).is_empty());
    }

    #[test]
    fn self_reference_nests() {
        init_logger();
        let hl = Highlighter::new(&LANG).unwrap();
        let out = hl.highlight("(1 (2) 3) 4").unwrap();
        let regions = out.regions();
        let depths: Vec<_> = regions.iter().map(|r| (r.scope, r.text, r.depth)).collect();
        assert_eq!(
            depths,
            [
                (Scope::Meta, "(1 (2) 3)", 0),
                (Scope::Number, "1", 1),
                (Scope::Meta, "(2)", 1),
                (Scope::Number, "2", 2),
                (Scope::Number, "3", 1),
                (Scope::Number, "4", 0),
            ]
        );
    }

    #[test]
    fn unterminated_container_runs_to_end() {
        init_logger();
        let hl = Highlighter::new(&LANG).unwrap();
        let out = hl.highlight("x (1 2").unwrap();
        assert_eq!(out.regions()[0].text, "(1 2");
        assert_eq!(out.to_plain(), "x (1 2");
    }

    #[test]
    fn lookahead_and_exclusion() {
        init_logger();
        let hl = Highlighter::new(&LANG).unwrap();
        let out = hl.highlight("f [x] if [y]").unwrap();
        assert_eq!(
            scoped(&out),
            [
                (Scope::TitleFunctionInvoke, "f"),
                (Scope::Keyword, "if"),
            ]
        );
    }

    #[test]
    fn illegal_aborts_unless_ignored() {
        init_logger();
        let hl = Highlighter::new(&LANG).unwrap();
        let err = hl.highlight("a\n b </c>").unwrap_err();
        match err {
            HighlexError::Illegal { lexeme, offset, span } => {
                assert_eq!(lexeme.as_str(), "</");
                assert_eq!(offset, 5);
                assert_eq!(span.start.line, 1);
                assert_eq!(span.start.column, 3);
            }
            other => panic!("unexpected error {other:?}"),
        }

        let hl = Highlighter::new(&LANG).unwrap().with_options(HighlightOptions {
            ignore_illegals: true,
        });
        let out = hl.highlight("a </c>").unwrap();
        assert_eq!(out.to_plain(), "a </c>");
        assert_eq!(scoped(&out), [(Scope::Operator, "<")]);
    }

    #[test]
    fn unicode_text_round_trips() {
        init_logger();
        let hl = Highlighter::new(&LANG).unwrap();
        let src = "héllo (ünï 1) 日本 if";
        let out = hl.highlight(src).unwrap();
        assert_eq!(out.to_plain(), src);
    }

    #[test]
    fn relevance_counts_rules_and_words() {
        init_logger();
        let hl = Highlighter::new(&LANG).unwrap();
        let out = hl.highlight("def f nil 1").unwrap();
        // `def` rule (1) + `nil` (1); numbers weigh nothing.
        assert_eq!(out.relevance(), 2);
        assert_eq!(out.stats().rule_matches, 2);
    }

    #[test]
    fn compile_errors() {
        init_logger();
        const BAD_PATTERN: Language = Language {
            name: "Bad",
            aliases: &[],
            keywords: Keywords::EMPTY,
            illegal: None,
            contains: &[Contained::Rule(Rule::Single(Single {
                begin: "(",
                ..Single::DEFAULT
            }))],
        };
        assert!(matches!(
            Highlighter::new(&BAD_PATTERN),
            Err(HighlexError::Pattern { .. })
        ));

        const BAD_REF: Language = Language {
            contains: &[Contained::Ref("nowhere")],
            ..BAD_PATTERN
        };
        assert!(matches!(
            Highlighter::new(&BAD_REF),
            Err(HighlexError::UnknownRule(name)) if name.as_str() == "nowhere"
        ));

        const TOP_SELF: Language = Language {
            contains: &[Contained::SelfRef],
            ..BAD_PATTERN
        };
        assert!(matches!(
            Highlighter::new(&TOP_SELF),
            Err(HighlexError::SelfOutsideRule)
        ));

        const DUPLICATE: Language = Language {
            contains: &[
                Contained::Rule(Rule::Nested(NESTING)),
                Contained::Rule(Rule::Nested(NESTING)),
            ],
            ..BAD_PATTERN
        };
        assert!(matches!(
            Highlighter::new(&DUPLICATE),
            Err(HighlexError::DuplicateRule(_))
        ));
    }

    fn _assert_send_sync<T: Send + Sync>() {}
    #[test]
    fn highlighter_is_send_sync() {
        _assert_send_sync::<Highlighter>();
    }
}
