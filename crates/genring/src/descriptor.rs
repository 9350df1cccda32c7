//! Recursive-descent parser for structure descriptors.
//!
//! ```text
//! descriptor := item EOF
//! item       := INT | IDENT [ '(' [ item { ',' item } ] ')' ]
//! ```
//!
//! A call `kind(...)` always builds a structure. A bare identifier builds
//! a structure when it names a registered kind and is otherwise kept as
//! an identifier argument, e.g. the variable in `poly(QQ, t)`.

use genring_core::Ctx;

use crate::error::DescriptorError;
use crate::registry::{Arg, Registry};

pub(crate) struct Parser<'a> {
    registry: &'a Registry,
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(registry: &'a Registry, input: &'a str) -> Self {
        Self { registry, input, pos: 0 }
    }

    pub(crate) fn parse(mut self) -> Result<Ctx, DescriptorError> {
        let item = self.item()?;
        self.skip_whitespace();
        if self.pos < self.input.len() {
            return Err(DescriptorError::TrailingInput(self.pos));
        }
        match item {
            Arg::Structure(ctx) => Ok(ctx),
            Arg::Ident(name) => Err(DescriptorError::UnknownKind(name)),
            Arg::Int(_) => Err(DescriptorError::NotAStructure),
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn expect(&mut self, want: char) -> Result<(), DescriptorError> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) if c == want => {
                self.pos += 1;
                Ok(())
            }
            Some(found) => Err(DescriptorError::UnexpectedChar {
                found,
                offset: self.pos,
            }),
            None => Err(DescriptorError::UnexpectedEnd),
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.input[start..self.pos]
    }

    fn item(&mut self) -> Result<Arg, DescriptorError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(DescriptorError::UnexpectedEnd),
            Some(c) if c.is_ascii_digit() => {
                let start = self.pos;
                let digits = self.take_while(|c| c.is_ascii_digit());
                digits
                    .parse::<u64>()
                    .map(Arg::Int)
                    .map_err(|_| DescriptorError::IntegerOverflow(start))
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let name = self.take_while(|c| c.is_ascii_alphanumeric() || c == '_');
                self.skip_whitespace();
                if self.peek() == Some('(') {
                    self.pos += 1;
                    let args = self.arguments()?;
                    self.registry.build(name, &args).map(Arg::Structure)
                } else if self.registry.contains(name) {
                    self.registry.build(name, &[]).map(Arg::Structure)
                } else {
                    Ok(Arg::Ident(name.to_string()))
                }
            }
            Some(found) => Err(DescriptorError::UnexpectedChar {
                found,
                offset: self.pos,
            }),
        }
    }

    /// Parses the arguments after an opening parenthesis, closing one included.
    fn arguments(&mut self) -> Result<Vec<Arg>, DescriptorError> {
        let mut args = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(')') {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            args.push(self.item()?);
            self.skip_whitespace();
            match self.peek() {
                Some(',') => self.pos += 1,
                Some(')') => {
                    self.pos += 1;
                    return Ok(args);
                }
                _ => return self.expect(')').map(|()| args),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DescriptorError;
    use crate::registry::parse_descriptor;

    #[test]
    fn test_parse_leaves() {
        assert_eq!(parse_descriptor("ZZ").unwrap().name(), "Integer ring (ZZ)");
        assert_eq!(parse_descriptor(" QQ ").unwrap().name(), "Rational field (QQ)");
        assert_eq!(parse_descriptor("ZZ()").unwrap().name(), "Integer ring (ZZ)");
        assert_eq!(parse_descriptor("nmod(7)").unwrap().name(), "Integers mod 7 (nmod)");
    }

    #[test]
    fn test_parse_nested() {
        let ctx = parse_descriptor("poly( poly(nmod(5)), y )").unwrap();
        assert_eq!(
            ctx.name(),
            "Polynomials in y over Polynomials in x over Integers mod 5 (nmod)"
        );
        let ctx = parse_descriptor("vec(mat(QQ, 2), 3)").unwrap();
        assert_eq!(
            ctx.name(),
            "Vectors (length 3) over Matrices (2 x 2) over Rational field (QQ)"
        );
        let ctx = parse_descriptor("vec(ZZ)").unwrap();
        assert_eq!(ctx.name(), "Vectors (any length) over Integer ring (ZZ)");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_descriptor("").unwrap_err(), DescriptorError::UnexpectedEnd);
        assert_eq!(parse_descriptor("nmod(7").unwrap_err(), DescriptorError::UnexpectedEnd);
        assert_eq!(
            parse_descriptor("nmod(7]").unwrap_err(),
            DescriptorError::UnexpectedChar { found: ']', offset: 6 }
        );
        assert_eq!(parse_descriptor("ZZ QQ").unwrap_err(), DescriptorError::TrailingInput(3));
        assert_eq!(parse_descriptor("t").unwrap_err(), DescriptorError::UnknownKind("t".to_string()));
        assert_eq!(parse_descriptor("GF(7)").unwrap_err(), DescriptorError::UnknownKind("GF".to_string()));
        assert_eq!(parse_descriptor("42").unwrap_err(), DescriptorError::NotAStructure);
        assert_eq!(
            parse_descriptor("nmod(99999999999999999999)").unwrap_err(),
            DescriptorError::IntegerOverflow(5)
        );
        assert_eq!(
            parse_descriptor("-ZZ").unwrap_err(),
            DescriptorError::UnexpectedChar { found: '-', offset: 0 }
        );
    }

    #[test]
    fn test_error_messages() {
        let err = parse_descriptor("mat(ZZ)").unwrap_err();
        assert_eq!(err.to_string(), "`mat` expects a base with one or two dimensions, got 1 argument(s)");
        let err = parse_descriptor("poly(ZZ, 3)").unwrap_err();
        assert_eq!(err.to_string(), "`poly`: argument 1 must be a variable name");
    }
}
