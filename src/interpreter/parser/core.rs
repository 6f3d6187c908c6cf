use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::binary::parse_logic_or,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// A cursor over a scanned token sequence.
///
/// The sequence always ends with [`TokenKind::Eof`] and the cursor never moves
/// past it, so lookahead at the end keeps returning the end marker. The stream
/// also tracks how many function declarations enclose the current position,
/// which decides whether `return` is legal.
pub struct TokenStream<'a> {
    tokens:         &'a [Token],
    end:            &'a Token,
    current:        usize,
    function_depth: usize,
}

impl<'a> TokenStream<'a> {
    /// Wraps a token sequence produced by the lexer.
    ///
    /// # Errors
    /// `UnexpectedEndOfInput` if the sequence does not end with an end marker.
    pub fn new(tokens: &'a [Token]) -> ParseResult<Self> {
        match tokens.last() {
            Some(end) if end.kind == TokenKind::Eof => Ok(Self { tokens,
                                                                 end,
                                                                 current: 0,
                                                                 function_depth: 0 }),
            Some(last) => Err(ParseError::UnexpectedEndOfInput { line: last.line }),
            None => Err(ParseError::UnexpectedEndOfInput { line: 1 }),
        }
    }

    /// The current token, without consuming it.
    #[must_use]
    pub fn peek(&self) -> &'a Token {
        self.tokens.get(self.current).unwrap_or(self.end)
    }

    /// Whether the cursor sits on the end marker.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Whether the current token has the given kind.
    #[must_use]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Whether the token after the current one has the given kind.
    ///
    /// At the end of input this looks at the end marker itself.
    #[must_use]
    pub fn check_next(&self, kind: TokenKind) -> bool {
        if self.is_at_end() {
            return self.check(kind);
        }
        self.tokens.get(self.current + 1).unwrap_or(self.end).kind == kind
    }

    /// Whether an `=` appears before the next `;`, scanning from the current
    /// token.
    #[must_use]
    pub fn is_equal_ahead(&self) -> bool {
        self.tokens
            .iter()
            .skip(self.current)
            .map(|token| token.kind)
            .find(|kind| matches!(kind, TokenKind::Semicolon | TokenKind::Equal))
            == Some(TokenKind::Equal)
    }

    /// Consumes and returns the current token. The end marker is never
    /// consumed.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.peek();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    /// Consumes the current token if it has one of the given kinds.
    pub fn match_any(&mut self, kinds: &[TokenKind]) -> Option<&'a Token> {
        if kinds.contains(&self.peek().kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consumes a token of the required kind.
    ///
    /// # Errors
    /// `Expected` carrying `message` and the token actually found.
    pub fn consume(&mut self, kind: TokenKind, message: &str) -> ParseResult<&'a Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        let found = self.peek();
        Err(ParseError::Expected { message: message.to_string(),
                                   found:   describe(found),
                                   line:    found.line, })
    }

    /// Marks the start of a function body.
    pub fn enter_function(&mut self) {
        self.function_depth += 1;
    }

    /// Marks the end of a function body.
    pub fn exit_function(&mut self) {
        self.function_depth = self.function_depth.saturating_sub(1);
    }

    /// Whether the cursor is inside at least one function declaration.
    #[must_use]
    pub const fn in_function(&self) -> bool {
        self.function_depth > 0
    }
}

/// How a token is named in error messages.
pub(in crate::interpreter::parser) fn describe(token: &Token) -> String {
    if token.kind == TokenKind::Eof {
        "end of input".to_string()
    } else {
        token.lexeme.clone()
    }
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, logical OR, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := logic_or`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first token of the expression.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_logic_or(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::lexer::scan;

    #[test]
    fn lookahead_stops_at_end_marker() {
        let tokens = scan("a").unwrap();
        let mut stream = TokenStream::new(&tokens).unwrap();
        assert!(stream.check_next(TokenKind::Eof));
        stream.advance();
        assert!(stream.is_at_end());
        assert_eq!(stream.advance().kind, TokenKind::Eof);
        assert!(stream.check_next(TokenKind::Eof));
    }

    #[test]
    fn equal_ahead_stops_at_semicolon() {
        let tokens = scan("a[1] = 2; b = 3;").unwrap();
        assert!(TokenStream::new(&tokens).unwrap().is_equal_ahead());

        let tokens = scan("a[1]; b = 3;").unwrap();
        assert!(!TokenStream::new(&tokens).unwrap().is_equal_ahead());
    }

    #[test]
    fn rejects_streams_without_end_marker() {
        assert!(TokenStream::new(&[]).is_err());
    }
}
