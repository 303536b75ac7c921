//! Generic type signature parsing.
//!
//! Declarations carry their types as source-style signatures:
//!
//! | Signature | Parsed as |
//! |-----------|-----------|
//! | `java.util.List<com.example.Order>` | named type with one argument |
//! | `T` | named type without arguments (a type variable if declared) |
//! | `int[]`, `String...` | array of the component |
//! | `? extends Number` | wildcard with upper bound |
//! | `? super T`, `?` | unbounded wildcard |

use thiserror::Error;

/// Parsed form of a type signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    Named { name: String, args: Vec<TypeExpr> },
    Array(Box<TypeExpr>),
    /// Wildcard with its upper bound, if any
    Wildcard(Option<Box<TypeExpr>>),
}

/// A signature that could not be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason} at offset {offset}")]
pub struct SignatureError {
    pub offset: usize,
    pub reason: String,
}

impl TypeExpr {
    /// Parse a complete signature. Trailing input is an error.
    pub fn parse(input: &str) -> Result<TypeExpr, SignatureError> {
        let mut parser = Parser {
            chars: input.chars().collect(),
            pos: 0,
        };
        let expr = parser.parse_type()?;
        parser.skip_whitespace();
        if parser.pos < parser.chars.len() {
            return Err(parser.error("unexpected trailing input"));
        }
        Ok(expr)
    }

    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Names that appear without arguments anywhere in the expression.
    /// Each one is a type variable when the enclosing scope declares it.
    pub fn bare_names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_bare_names(&mut out);
        out
    }

    fn collect_bare_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeExpr::Named { name, args } if args.is_empty() => {
                if !out.contains(&name.as_str()) {
                    out.push(name);
                }
            }
            TypeExpr::Named { args, .. } => {
                for arg in args {
                    arg.collect_bare_names(out);
                }
            }
            TypeExpr::Array(component) => component.collect_bare_names(out),
            TypeExpr::Wildcard(Some(bound)) => bound.collect_bare_names(out),
            TypeExpr::Wildcard(None) => {}
        }
    }
}

struct Parser {
    chars: Vec<char>,
    pos: usize,
}

impl Parser {
    fn parse_type(&mut self) -> Result<TypeExpr, SignatureError> {
        self.skip_whitespace();
        if self.eat('?') {
            self.skip_whitespace();
            if self.eat_keyword("extends") {
                let bound = self.parse_type()?;
                return Ok(TypeExpr::Wildcard(Some(Box::new(bound))));
            }
            if self.eat_keyword("super") {
                // Lower bounds carry no usable upper type.
                self.parse_type()?;
            }
            return Ok(TypeExpr::Wildcard(None));
        }

        let name = self.parse_name()?;
        let mut args = Vec::new();
        self.skip_whitespace();
        if self.eat('<') {
            loop {
                args.push(self.parse_type()?);
                self.skip_whitespace();
                if self.eat(',') {
                    continue;
                }
                if self.eat('>') {
                    break;
                }
                return Err(self.error("expected ',' or '>'"));
            }
        }

        let mut expr = TypeExpr::Named { name, args };
        loop {
            self.skip_whitespace();
            if self.eat_str("[]") || self.eat_str("...") {
                expr = TypeExpr::Array(Box::new(expr));
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn parse_name(&mut self) -> Result<String, SignatureError> {
        let start = self.pos;
        while let Some(&c) = self.chars.get(self.pos) {
            if c.is_alphanumeric() || c == '_' || c == '$' || (c == '.' && !self.at_str("...")) {
                self.pos += 1;
            } else {
                break;
            }
        }
        let name: String = self.chars[start..self.pos].iter().collect();
        if name.is_empty() {
            return Err(SignatureError {
                offset: start,
                reason: "expected type name".to_string(),
            });
        }
        if name.starts_with('.') || name.ends_with('.') || name.contains("..") {
            return Err(SignatureError {
                offset: start,
                reason: format!("invalid qualified name `{name}`"),
            });
        }
        if name.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(SignatureError {
                offset: start,
                reason: format!("type name `{name}` starts with a digit"),
            });
        }
        Ok(name)
    }

    fn skip_whitespace(&mut self) {
        while self.chars.get(self.pos).is_some_and(|c| c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.get(self.pos) == Some(&expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn at_str(&self, expected: &str) -> bool {
        let mut pos = self.pos;
        for c in expected.chars() {
            if self.chars.get(pos) != Some(&c) {
                return false;
            }
            pos += 1;
        }
        true
    }

    fn eat_str(&mut self, expected: &str) -> bool {
        if self.at_str(expected) {
            self.pos += expected.chars().count();
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        let end = self.pos + keyword.chars().count();
        let followed_by_ident = self
            .chars
            .get(end)
            .is_some_and(|c| c.is_alphanumeric() || *c == '_');
        if self.at_str(keyword) && !followed_by_ident {
            self.pos = end;
            true
        } else {
            false
        }
    }

    fn error(&self, reason: &str) -> SignatureError {
        SignatureError {
            offset: self.pos,
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "signature/signature_tests.rs"]
mod signature_tests;
