//! Raw-preserving stylesheet parser built on the `cssparser` tokenizer.
//!
//! The parser only recovers structure: rules, at-rules, declarations and
//! comments. Selector, value and media query text is kept verbatim, and the
//! whitespace around every node is stored so printing reproduces the input.
//! Parenthesized, bracketed and function blocks are treated as opaque text.

use std::mem::take;
use std::path::Path;

use cssparser::{ParseError, Parser, ParserInput, SourcePosition, Token};

use super::Stylesheet;
use super::node::{AtRule, Comment, Declaration, Node, Rule, Source};
use crate::{Error, Result};

type ParseResult<'i, T> = std::result::Result<T, ParseError<'i, ()>>;

/// Parse CSS text into a stylesheet tree.
///
/// `file` is recorded on every node so path-based filters can see it.
pub(crate) fn parse_stylesheet(css: &str, file: Option<&Path>) -> Result<Stylesheet> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);

    let block = parse_block(&mut parser, file).map_err(|e| {
        Error::parse(format!("{:?}", e.kind), e.location.line + 1, e.location.column)
    })?;

    Ok(Stylesheet {
        nodes: block.nodes,
        after: block.after,
        semicolon: block.semicolon,
        source: file.map(Path::to_path_buf),
    })
}

/// Contents of the root or of a `{}` block.
#[derive(Default)]
struct Block {
    nodes: Vec<Node>,
    after: String,
    semicolon: bool,
}

/// How a prelude scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Terminator {
    Semicolon,
    CurlyBlock,
    End,
}

/// Text of a rule/declaration/at-rule head, split around its content.
struct Prelude<'i> {
    /// Whitespace before the first significant token.
    lead: &'i str,
    /// From the first to the last significant token.
    text: &'i str,
    /// Whitespace after the last significant token.
    trailing: &'i str,
    terminator: Terminator,
}

fn parse_block<'i>(p: &mut Parser<'i, '_>, file: Option<&Path>) -> ParseResult<'i, Block> {
    let mut block = Block::default();
    let mut before = String::new();

    loop {
        let location = p.current_source_location();
        let start = p.position();
        let token = match p.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        let source = Source {
            file: file.map(Path::to_path_buf),
            line: location.line + 1,
            column: location.column,
        };

        match token {
            Token::WhiteSpace(ws) => before.push_str(ws),
            // A stray semicolon has no node of its own.
            Token::Semicolon => before.push(';'),
            Token::Comment(raw) => {
                let comment = Comment::from_raw(raw, take(&mut before), source);
                block.nodes.push(Node::Comment(comment));
            }
            Token::AtKeyword(name) => {
                let name = name.to_string();
                let head_start = p.position();
                let prelude = scan_prelude(p, head_start, None, None)?;
                let mut at_rule = AtRule {
                    name,
                    params: prelude.text.to_string(),
                    nodes: None,
                    before: take(&mut before),
                    after_name: prelude.lead.to_string(),
                    between: String::new(),
                    after: String::new(),
                    semicolon: false,
                    source,
                };
                match prelude.terminator {
                    Terminator::CurlyBlock => {
                        at_rule.between = prelude.trailing.to_string();
                        let body = p.parse_nested_block(|nested| parse_block(nested, file))?;
                        at_rule.nodes = Some(body.nodes);
                        at_rule.after = body.after;
                        at_rule.semicolon = body.semicolon;
                        block.semicolon = false;
                    }
                    Terminator::Semicolon => {
                        at_rule.between = prelude.trailing.to_string();
                        block.semicolon = true;
                    }
                    Terminator::End => {
                        before.push_str(prelude.trailing);
                        block.semicolon = false;
                    }
                }
                block.nodes.push(Node::AtRule(at_rule));
            }
            Token::CurlyBracketBlock => {
                // Block with an empty selector.
                let mut rule = Rule::new("");
                rule.before = take(&mut before);
                rule.between = String::new();
                rule.source = source;
                parse_rule_body(p, &mut rule, file)?;
                block.nodes.push(Node::Rule(rule));
                block.semicolon = false;
            }
            first => {
                if opens_block(&first) {
                    skip_block(p)?;
                }
                let content_end = p.position();
                let prelude = scan_prelude(p, start, Some(start), Some(content_end))?;
                match prelude.terminator {
                    Terminator::CurlyBlock => {
                        let mut rule = Rule::new(prelude.text);
                        rule.before = take(&mut before);
                        rule.between = prelude.trailing.to_string();
                        rule.source = source;
                        parse_rule_body(p, &mut rule, file)?;
                        block.nodes.push(Node::Rule(rule));
                        block.semicolon = false;
                    }
                    Terminator::Semicolon => {
                        let mut decl = split_declaration(prelude.text);
                        decl.before = take(&mut before);
                        decl.after = prelude.trailing.to_string();
                        decl.source = source;
                        block.nodes.push(Node::Declaration(decl));
                        block.semicolon = true;
                    }
                    Terminator::End => {
                        let mut decl = split_declaration(prelude.text);
                        decl.before = take(&mut before);
                        decl.source = source;
                        block.nodes.push(Node::Declaration(decl));
                        before.push_str(prelude.trailing);
                        block.semicolon = false;
                    }
                }
            }
        }
    }

    block.after = before;
    Ok(block)
}

fn parse_rule_body<'i>(
    p: &mut Parser<'i, '_>,
    rule: &mut Rule,
    file: Option<&Path>,
) -> ParseResult<'i, ()> {
    let body = p.parse_nested_block(|nested| parse_block(nested, file))?;
    rule.nodes = body.nodes;
    rule.after = body.after;
    rule.semicolon = body.semicolon;
    Ok(())
}

/// Consume tokens up to a `;`, a `{` block, or the end of the enclosing
/// block. The terminating `;` is consumed; a `{` block is left ready for
/// `parse_nested_block`.
fn scan_prelude<'i>(
    p: &mut Parser<'i, '_>,
    start: SourcePosition,
    mut content_start: Option<SourcePosition>,
    mut content_end: Option<SourcePosition>,
) -> ParseResult<'i, Prelude<'i>> {
    let (end, terminator) = loop {
        let token_start = p.position();
        let token = match p.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break (token_start, Terminator::End),
        };
        match token {
            Token::Semicolon => break (token_start, Terminator::Semicolon),
            Token::CurlyBracketBlock => break (token_start, Terminator::CurlyBlock),
            Token::WhiteSpace(_) => {}
            other => {
                if opens_block(&other) {
                    skip_block(p)?;
                }
                content_start.get_or_insert(token_start);
                content_end = Some(p.position());
            }
        }
    };

    Ok(match (content_start, content_end) {
        (Some(content_start), Some(content_end)) => Prelude {
            lead: p.slice(start..content_start),
            text: p.slice(content_start..content_end),
            trailing: p.slice(content_end..end),
            terminator,
        },
        _ => Prelude {
            lead: p.slice(start..end),
            text: "",
            trailing: "",
            terminator,
        },
    })
}

fn opens_block(token: &Token<'_>) -> bool {
    matches!(
        token,
        Token::Function(_)
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::CurlyBracketBlock
    )
}

/// Consume the rest of a block whose opening token was just returned.
fn skip_block<'i>(p: &mut Parser<'i, '_>) -> ParseResult<'i, ()> {
    p.parse_nested_block(|nested| {
        while nested.next_including_whitespace_and_comments().is_ok() {}
        Ok(())
    })
}

/// Split `prop: value` text. Text without a colon becomes a declaration
/// with an empty value so it still prints unchanged.
fn split_declaration(text: &str) -> Declaration {
    let mut decl = Declaration::new(text, "");
    decl.between = String::new();

    if let Some(colon) = text.find(':') {
        let prop = text[..colon].trim_end();
        let value = text[colon + 1..].trim_start();
        decl.prop = prop.to_string();
        decl.between = text[prop.len()..text.len() - value.len()].to_string();
        decl.value = value.to_string();
    }

    decl
}
