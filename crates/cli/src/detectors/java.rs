// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lexical model of a Java test file.
//!
//! Not a parser: the source is split into tokens (comments dropped, string
//! and char literals collapsed), and test methods are recognised by shape:
//! annotations, a name, a parameter list, an optional `throws` clause and
//! a brace-delimited body.

/// Lexer state while scanning source text.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LexerState {
    Code,
    LineComment,
    /// Block comment, with the line it opened on.
    BlockComment(usize),
    /// `"..."`; Java strings cannot span lines.
    String,
    /// `"""..."""`, with the line it opened on.
    TextBlock(usize),
    Char,
}

/// One lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Ident(String),
    Number(String),
    /// A string, text block or char literal. Contents are not kept.
    Literal,
    Punct(char),
}

impl Token {
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(self, Token::Ident(s) if s == name)
    }

    pub fn is_punct(&self, ch: char) -> bool {
        *self == Token::Punct(ch)
    }
}

/// Token with the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub line: usize,
}

/// Source the lexer could not make sense of.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("unterminated {what} starting on line {line}")]
    Unterminated { what: &'static str, line: usize },

    #[error("unbalanced braces: unmatched `{ch}` on line {line}")]
    Unbalanced { ch: char, line: usize },
}

/// Split Java source into tokens.
pub fn tokenize(source: &str) -> Result<Vec<Spanned>, SyntaxError> {
    let mut tokens = Vec::new();
    let mut state = LexerState::Code;
    let mut line = 1;
    let mut chars = source.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\n' {
            line += 1;
        }
        match state {
            LexerState::Code => match ch {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = LexerState::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = LexerState::BlockComment(line);
                }
                '"' => {
                    tokens.push(Spanned {
                        token: Token::Literal,
                        line,
                    });
                    let mut ahead = chars.clone();
                    if ahead.next() == Some('"') && ahead.next() == Some('"') {
                        chars.next();
                        chars.next();
                        state = LexerState::TextBlock(line);
                    } else {
                        state = LexerState::String;
                    }
                }
                '\'' => {
                    tokens.push(Spanned {
                        token: Token::Literal,
                        line,
                    });
                    state = LexerState::Char;
                }
                c if c.is_ascii_digit()
                    || (c == '.' && chars.peek().is_some_and(char::is_ascii_digit)) =>
                {
                    let mut text = String::from(c);
                    while let Some(&next) = chars.peek() {
                        let exponent_sign = (next == '+' || next == '-')
                            && text.ends_with(['e', 'E'])
                            && !text.starts_with("0x")
                            && !text.starts_with("0X");
                        if next.is_ascii_alphanumeric() || next == '_' || next == '.' || exponent_sign
                        {
                            text.push(next);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    tokens.push(Spanned {
                        token: Token::Number(text),
                        line,
                    });
                }
                c if c.is_alphabetic() || c == '_' || c == '$' => {
                    let mut text = String::from(c);
                    while let Some(&next) = chars.peek() {
                        if next.is_alphanumeric() || next == '_' || next == '$' {
                            text.push(next);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    tokens.push(Spanned {
                        token: Token::Ident(text),
                        line,
                    });
                }
                c if c.is_whitespace() => {}
                c => tokens.push(Spanned {
                    token: Token::Punct(c),
                    line,
                }),
            },
            LexerState::LineComment => {
                if ch == '\n' {
                    state = LexerState::Code;
                }
            }
            LexerState::BlockComment(_) => {
                if ch == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = LexerState::Code;
                }
            }
            LexerState::String => match ch {
                '\\' => {
                    if chars.next() == Some('\n') {
                        line += 1;
                    }
                }
                '"' | '\n' => state = LexerState::Code,
                _ => {}
            },
            LexerState::TextBlock(_) => match ch {
                '\\' => {
                    if chars.next() == Some('\n') {
                        line += 1;
                    }
                }
                '"' => {
                    let mut ahead = chars.clone();
                    if ahead.next() == Some('"') && ahead.next() == Some('"') {
                        chars.next();
                        chars.next();
                        state = LexerState::Code;
                    }
                }
                _ => {}
            },
            LexerState::Char => match ch {
                '\\' => {
                    if chars.next() == Some('\n') {
                        line += 1;
                    }
                }
                '\'' | '\n' => state = LexerState::Code,
                _ => {}
            },
        }
    }

    match state {
        LexerState::BlockComment(line) => Err(SyntaxError::Unterminated {
            what: "comment",
            line,
        }),
        LexerState::TextBlock(line) => Err(SyntaxError::Unterminated {
            what: "text block",
            line,
        }),
        _ => Ok(tokens),
    }
}

/// Confirm every `{` has a matching `}`.
fn check_braces(tokens: &[Spanned]) -> Result<(), SyntaxError> {
    let mut open = Vec::new();
    for t in tokens {
        match t.token {
            Token::Punct('{') => open.push(t.line),
            Token::Punct('}') => {
                if open.pop().is_none() {
                    return Err(SyntaxError::Unbalanced {
                        ch: '}',
                        line: t.line,
                    });
                }
            }
            _ => {}
        }
    }
    match open.pop() {
        Some(line) => Err(SyntaxError::Unbalanced { ch: '{', line }),
        None => Ok(()),
    }
}

/// Index of the token closing the group opened at `open`.
///
/// Only the bracket kind at `open` is counted.
fn matching(tokens: &[Spanned], open: usize, left: char, right: char) -> Option<usize> {
    let mut depth = 0usize;
    for (i, t) in tokens.iter().enumerate().skip(open) {
        if t.token.is_punct(left) {
            depth += 1;
        } else if t.token.is_punct(right) {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Annotation names that mark a test method.
pub const TEST_ANNOTATIONS: [&str; 3] = ["Test", "ParameterizedTest", "RepeatedTest"];

/// An annotation on a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    /// Simple name (`org.junit.Test` is `Test`).
    pub name: String,
    /// Tokens between the parentheses, if any.
    pub args: Vec<Token>,
}

impl Annotation {
    /// True if the arguments name `key` (e.g. `expected = ...`).
    pub fn has_arg(&self, key: &str) -> bool {
        self.args
            .windows(2)
            .any(|w| w[0].is_ident(key) && w[1].is_punct('='))
    }
}

/// A method call found in a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call<'a> {
    /// Dotted callee as written (`Assert.assertEquals`, `System.out.println`).
    pub callee: String,
    /// Top-level arguments.
    pub args: Vec<&'a [Token]>,
}

impl Call<'_> {
    /// Final segment of the callee.
    pub fn method(&self) -> &str {
        self.callee.rsplit('.').next().unwrap_or(&self.callee)
    }
}

/// Words that look like calls when followed by `(` but are not.
const KEYWORDS: [&str; 10] = [
    "if",
    "for",
    "while",
    "switch",
    "catch",
    "synchronized",
    "return",
    "throw",
    "new",
    "try",
];

/// A test method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestMethod {
    pub name: String,
    /// Line of the method name.
    pub line: usize,
    pub annotations: Vec<Annotation>,
    /// Declares a `throws` clause.
    pub throws: bool,
    /// Tokens between the body braces.
    pub body: Vec<Token>,
}

impl TestMethod {
    pub fn has_annotation(&self, name: &str) -> bool {
        self.annotations.iter().any(|a| a.name == name)
    }

    /// Method calls in the body, in source order.
    pub fn calls(&self) -> Vec<Call<'_>> {
        let body = &self.body;
        let mut calls = Vec::new();

        for i in 0..body.len() {
            let Token::Ident(name) = &body[i] else {
                continue;
            };
            if !body.get(i + 1).is_some_and(|t| t.is_punct('('))
                || KEYWORDS.contains(&name.as_str())
            {
                continue;
            }
            if i > 0 && body[i - 1].is_ident("new") {
                continue;
            }

            let mut callee = name.clone();
            let mut j = i;
            while j >= 2 && body[j - 1].is_punct('.') {
                let Token::Ident(segment) = &body[j - 2] else {
                    break;
                };
                callee = format!("{segment}.{callee}");
                j -= 2;
            }

            calls.push(Call {
                callee,
                args: split_args(&body[i + 1..]),
            });
        }
        calls
    }
}

/// Split the argument list starting at `tokens[0] == '('` on top-level commas.
fn split_args(tokens: &[Token]) -> Vec<&[Token]> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut start = 1;

    for (i, t) in tokens.iter().enumerate() {
        match t {
            Token::Punct('(' | '[' | '{') => depth += 1,
            Token::Punct(')' | ']' | '}') => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    if i > start || !args.is_empty() {
                        args.push(&tokens[start..i]);
                    }
                    return args;
                }
            }
            Token::Punct(',') if depth == 1 => {
                args.push(&tokens[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    args
}

/// Extract every test method from `source`.
pub fn test_methods(source: &str) -> Result<Vec<TestMethod>, SyntaxError> {
    let tokens = tokenize(source)?;
    check_braces(&tokens)?;

    let mut methods = Vec::new();
    let mut pending: Vec<Annotation> = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        if tokens[i].token.is_punct('@')
            && let Some(Token::Ident(first)) = tokens.get(i + 1).map(|t| &t.token)
            && first != "interface"
        {
            let (annotation, next) = read_annotation(&tokens, i + 1);
            pending.push(annotation);
            i = next;
            continue;
        }

        if pending.is_empty() {
            i += 1;
            continue;
        }

        match read_declaration(&tokens, i) {
            Declaration::Method {
                name,
                line,
                throws,
                body,
                end,
            } => {
                let annotations = std::mem::take(&mut pending);
                if annotations
                    .iter()
                    .any(|a| TEST_ANNOTATIONS.contains(&a.name.as_str()))
                {
                    methods.push(TestMethod {
                        name,
                        line,
                        annotations,
                        throws,
                        body: tokens[body].iter().map(|t| t.token.clone()).collect(),
                    });
                }
                i = end;
            }
            Declaration::Other(end) => {
                pending.clear();
                i = end;
            }
        }
    }

    Ok(methods)
}

/// Read `Name(.Name)*` and optional `( args )` starting at the first name.
fn read_annotation(tokens: &[Spanned], start: usize) -> (Annotation, usize) {
    let mut name = String::new();
    let mut i = start;
    while let Some(Token::Ident(segment)) = tokens.get(i).map(|t| &t.token) {
        name = segment.clone();
        if tokens.get(i + 1).is_some_and(|t| t.token.is_punct('.')) {
            i += 2;
        } else {
            i += 1;
            break;
        }
    }

    let mut args = Vec::new();
    if tokens.get(i).is_some_and(|t| t.token.is_punct('('))
        && let Some(close) = matching(tokens, i, '(', ')')
    {
        args = tokens[i + 1..close].iter().map(|t| t.token.clone()).collect();
        i = close + 1;
    }

    (Annotation { name, args }, i)
}

enum Declaration {
    Method {
        name: String,
        line: usize,
        throws: bool,
        body: std::ops::Range<usize>,
        end: usize,
    },
    /// Anything else; resume scanning at the index.
    Other(usize),
}

/// Classify the declaration following a run of annotations.
fn read_declaration(tokens: &[Spanned], start: usize) -> Declaration {
    let mut i = start;
    while let Some(t) = tokens.get(i) {
        match &t.token {
            Token::Ident(word)
                if matches!(word.as_str(), "class" | "interface" | "enum" | "record") =>
            {
                return Declaration::Other(i + 1);
            }
            Token::Punct(';' | '=' | '{' | '}') => return Declaration::Other(i + 1),
            Token::Punct('(') => break,
            Token::Punct('@') => i = read_annotation(tokens, i + 1).1,
            _ => i += 1,
        }
    }

    let Some(Token::Ident(name)) = i.checked_sub(1).and_then(|n| tokens.get(n)).map(|t| &t.token)
    else {
        return Declaration::Other(i + 1);
    };
    let line = tokens[i - 1].line;
    let Some(close) = matching(tokens, i, '(', ')') else {
        return Declaration::Other(tokens.len());
    };

    let mut throws = false;
    let mut j = close + 1;
    while let Some(t) = tokens.get(j) {
        match t.token {
            Token::Punct('{') => {
                let Some(end) = matching(tokens, j, '{', '}') else {
                    return Declaration::Other(tokens.len());
                };
                return Declaration::Method {
                    name: name.clone(),
                    line,
                    throws,
                    body: j + 1..end,
                    end: end + 1,
                };
            }
            Token::Punct(';') => return Declaration::Other(j + 1),
            _ => {
                throws |= t.token.is_ident("throws");
                j += 1;
            }
        }
    }
    Declaration::Other(j)
}

#[cfg(test)]
#[path = "java_tests.rs"]
mod tests;
