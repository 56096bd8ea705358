//! State machine turning the token stream into a [`Mask`].
//!
//! The parser keeps a stack of levels, one per open `(`. Each level remembers the
//! nodes it started from, the nodes finished by earlier `,` alternatives and the nodes
//! the current chain is extending. Nodes live in a flat arena and levels hold their
//! indices, so every alternative writes into the one tree and nothing is aliased. The
//! arena is folded into a [`Mask`] once the input is accepted.

use std::{iter, mem};

use indexmap::{IndexMap, IndexSet};

use crate::lexer::{Lexer, Token, TokenKind};
use crate::{Error, FieldKey, Mask, ParseErrorKind, ParseOptions, Result};

type NodeId = usize;

const ROOT: NodeId = 0;

#[derive(Debug)]
enum Segment {
    Any,
    Key(FieldKey),
}

#[derive(Debug, Default)]
struct Node {
    depth: usize,
    any: Option<NodeId>,
    field_parts: IndexMap<FieldKey, NodeId>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Key,
    Separator,
    LevelStart,
}

#[derive(Debug)]
struct Level {
    starts: IndexSet<NodeId>,
    ends: IndexSet<NodeId>,
    active: IndexSet<NodeId>,
    /// Byte offset of the `(` that opened this level.
    pos: usize,
}

impl Level {
    fn root() -> Self {
        let start: IndexSet<NodeId> = iter::once(ROOT).collect();
        Level {
            starts: start.clone(),
            ends: IndexSet::new(),
            active: start,
            pos: 0,
        }
    }

    fn nested(&self, pos: usize) -> Self {
        Level {
            starts: self.active.clone(),
            ends: IndexSet::new(),
            active: self.active.clone(),
            pos,
        }
    }
}

struct Parser<'a> {
    source: &'a str,
    options: &'a ParseOptions,
    nodes: Vec<Node>,
    level: Level,
    parents: Vec<Level>,
    state: State,
}

/// Parses `source` into a mask.
pub(crate) fn parse(source: &str, options: &ParseOptions) -> Result<Mask> {
    if let Some(max) = options.max_length {
        if source.len() > max {
            return Err(Error::parse(
                ParseErrorKind::LengthLimitExceeded,
                source,
                max,
                &format!("mask is longer than {} bytes", max),
            ));
        }
    }

    let tokens = Lexer::new(source).collect::<Result<Vec<_>>>()?;
    if tokens.is_empty() {
        return Ok(Mask::new());
    }

    let mut parser = Parser {
        source,
        options,
        nodes: vec![Node::default()],
        level: Level::root(),
        parents: Vec::new(),
        state: State::Key,
    };
    for token in &tokens {
        parser.step(token)?;
    }
    let nodes = parser.finish()?;
    let node_count = nodes.len();
    let mask = build_mask(nodes);

    tracing::trace!(
        target: "fieldmask::parser",
        length = source.len(),
        tokens = tokens.len(),
        nodes = node_count,
        "parsed field mask"
    );
    Ok(mask)
}

impl<'a> Parser<'a> {
    fn step(&mut self, token: &Token<'_>) -> Result<()> {
        match self.state {
            // `(` may be closed right away; anything else starts a key.
            State::LevelStart if token.kind == TokenKind::RBrace => self.separator(token),
            State::Key | State::LevelStart => self.key(token),
            State::Separator => self.separator(token),
        }
    }

    fn key(&mut self, token: &Token<'_>) -> Result<()> {
        match token.kind {
            TokenKind::PlainKey | TokenKind::QuotedKey => {
                let key = FieldKey::from(&*token.value);
                self.descend(&Segment::Key(key), token.pos)?;
                self.state = State::Separator;
            }
            TokenKind::WildCard => {
                self.descend(&Segment::Any, token.pos)?;
                self.state = State::Separator;
            }
            TokenKind::LBrace => {
                let nested = self.level.nested(token.pos);
                self.parents.push(mem::replace(&mut self.level, nested));
                self.state = State::LevelStart;
            }
            _ => {
                return Err(self.unexpected(token, "expecting field or submask"));
            }
        }
        Ok(())
    }

    fn separator(&mut self, token: &Token<'_>) -> Result<()> {
        match token.kind {
            TokenKind::Dot => {
                self.state = State::Key;
            }
            TokenKind::Comma => {
                let restart = self.level.starts.clone();
                let finished = mem::replace(&mut self.level.active, restart);
                self.level.ends.extend(finished);
                self.state = State::Key;
            }
            TokenKind::RBrace => {
                let Some(parent) = self.parents.pop() else {
                    return Err(Error::parse(
                        ParseErrorKind::UnmatchedRightBrace,
                        self.source,
                        token.pos,
                        "unmatched right brace",
                    ));
                };
                let closed = mem::replace(&mut self.level, parent);
                let mut active = closed.ends;
                active.extend(closed.active);
                self.level.active = active;
                self.state = State::Separator;
            }
            _ => {
                return Err(self.unexpected(token, "expecting separator or closing brace"));
            }
        }
        Ok(())
    }

    /// Moves every active node to its child for `segment`, creating the children on the
    /// way.
    fn descend(&mut self, segment: &Segment, pos: usize) -> Result<()> {
        let active = mem::take(&mut self.level.active);
        let mut next = IndexSet::with_capacity(active.len());
        for parent in active {
            next.insert(self.child(parent, segment, pos)?);
        }
        self.level.active = next;
        Ok(())
    }

    fn child(&mut self, parent: NodeId, segment: &Segment, pos: usize) -> Result<NodeId> {
        let existing = match segment {
            Segment::Any => self.nodes[parent].any,
            Segment::Key(key) => self.nodes[parent].field_parts.get(key).copied(),
        };
        if let Some(id) = existing {
            return Ok(id);
        }

        let depth = self.nodes[parent].depth + 1;
        if let Some(max) = self.options.max_depth {
            if depth > max {
                return Err(Error::parse(
                    ParseErrorKind::DepthLimitExceeded,
                    self.source,
                    pos,
                    &format!("mask is deeper than {} levels", max),
                ));
            }
        }

        let id = self.nodes.len();
        self.nodes.push(Node {
            depth,
            ..Node::default()
        });
        match segment {
            Segment::Any => self.nodes[parent].any = Some(id),
            Segment::Key(key) => {
                self.nodes[parent].field_parts.insert(key.clone(), id);
            }
        }
        Ok(id)
    }

    fn unexpected(&self, token: &Token<'_>, expecting: &str) -> Error {
        Error::parse(
            ParseErrorKind::UnexpectedToken,
            self.source,
            token.pos,
            &format!("unexpected token {}, {}", token, expecting),
        )
    }

    fn finish(self) -> Result<Vec<Node>> {
        if !self.parents.is_empty() {
            return Err(Error::parse(
                ParseErrorKind::UnclosedLeftBrace,
                self.source,
                self.level.pos,
                "unclosed left brace",
            ));
        }
        if self.state != State::Separator {
            return Err(Error::parse(
                ParseErrorKind::UnexpectedEnd,
                self.source,
                self.source.len(),
                "unexpected end of mask",
            ));
        }
        Ok(self.nodes)
    }
}

/// Folds the arena into a tree. Children are always pushed after their parent, so
/// walking the arena backwards finishes every child before its parent needs it.
fn build_mask(nodes: Vec<Node>) -> Mask {
    let mut masks: Vec<Mask> = iter::repeat_with(Mask::new).take(nodes.len()).collect();
    for (id, node) in nodes.into_iter().enumerate().rev() {
        let mut mask = Mask::new();
        if let Some(child) = node.any {
            mask.any = Some(Box::new(mem::take(&mut masks[child])));
        }
        for (key, child) in node.field_parts {
            mask.field_parts.insert(key, mem::take(&mut masks[child]));
        }
        masks[id] = mask;
    }
    masks.into_iter().next().unwrap_or_default()
}
