use std::fmt;

use logos::Logos;

use crate::error::LexError;

/// Result type produced by the lexer.
pub type LexResult<T> = Result<T, LexError>;

/// Classifies a lexical token.
///
/// Every token produced by [`scan`] carries one of these kinds. Whitespace,
/// newlines and `//` comments are matched so the line counter can advance, but
/// they are skipped and never reach the token stream. [`TokenKind::Eof`] has no
/// pattern; [`scan`] appends it once the source is exhausted.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(extras = LexerExtras)]
#[logos(error = LexErrorKind)]
#[logos(skip r"[ \t\r\f]+")]
pub enum TokenKind {
    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
    /// `{`
    #[token("{")]
    LeftBrace,
    /// `}`
    #[token("}")]
    RightBrace,
    /// `[`
    #[token("[")]
    LeftBracket,
    /// `]`
    #[token("]")]
    RightBracket,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `-`
    #[token("-")]
    Minus,
    /// `+`
    #[token("+")]
    Plus,
    /// `/`
    #[token("/")]
    Slash,
    /// `*`
    #[token("*")]
    Star,
    /// `%`
    #[token("%")]
    Percent,
    /// `!`
    #[token("!")]
    Bang,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `=`
    #[token("=")]
    Equal,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// Identifier tokens; variable or function names such as `x` or `square`.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
    /// String literal tokens. The lexeme keeps its surrounding quotes.
    #[regex(r#""[^"]*""#, string_literal, allow_greedy = true)]
    #[regex(r#""[^"]*"#, unterminated_string, allow_greedy = true)]
    String,
    /// Numeric literal tokens, such as `42` or `3.14`.
    #[regex(r"[0-9]+(\.[0-9]+)?")]
    Number,
    /// `and`
    #[token("and")]
    And,
    /// `else`
    #[token("else")]
    Else,
    /// `false`
    #[token("false")]
    False,
    /// `func`
    #[token("func")]
    Func,
    /// `for`
    #[token("for")]
    For,
    /// `if`
    #[token("if")]
    If,
    /// `in`
    #[token("in")]
    In,
    /// `null`
    #[token("null")]
    Null,
    /// `or`
    #[token("or")]
    Or,
    /// `return`
    #[token("return")]
    Return,
    /// `true`
    #[token("true")]
    True,
    /// `while`
    #[token("while")]
    While,
    /// `// Comments.`
    #[regex(r"//[^\n]*", logos::skip, allow_greedy = true)]
    Comment,
    /// Newlines advance the line counter and are otherwise ignored.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns the upper-case name used in token renderings.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LeftParen => "LEFT_PAREN",
            Self::RightParen => "RIGHT_PAREN",
            Self::LeftBrace => "LEFT_BRACE",
            Self::RightBrace => "RIGHT_BRACE",
            Self::LeftBracket => "LEFT_BRACKET",
            Self::RightBracket => "RIGHT_BRACKET",
            Self::Comma => "COMMA",
            Self::Dot => "DOT",
            Self::Semicolon => "SEMICOLON",
            Self::Colon => "COLON",
            Self::Minus => "MINUS",
            Self::Plus => "PLUS",
            Self::Slash => "SLASH",
            Self::Star => "STAR",
            Self::Percent => "PERCENT",
            Self::Bang => "BANG",
            Self::BangEqual => "BANG_EQUAL",
            Self::Equal => "EQUAL",
            Self::EqualEqual => "EQUAL_EQUAL",
            Self::Greater => "GREATER",
            Self::GreaterEqual => "GREATER_EQUAL",
            Self::Less => "LESS",
            Self::LessEqual => "LESS_EQUAL",
            Self::Identifier => "IDENTIFIER",
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::And => "AND",
            Self::Else => "ELSE",
            Self::False => "FALSE",
            Self::Func => "FUNC",
            Self::For => "FOR",
            Self::If => "IF",
            Self::In => "IN",
            Self::Null => "NULL",
            Self::Or => "OR",
            Self::Return => "RETURN",
            Self::True => "TRUE",
            Self::While => "WHILE",
            Self::Comment => "COMMENT",
            Self::NewLine => "NEW_LINE",
            Self::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A lexical token: its kind, the exact source slice and the line it ended on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is.
    pub kind:   TokenKind,
    /// The source text of the token. Empty for [`TokenKind::Eof`].
    pub lexeme: String,
    /// Line number in the source code.
    pub line:   usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ {} }} {{ {} }} line:{}", self.kind, self.lexeme, self.line)
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line: 1 }
    }
}

/// Why logos rejected a slice of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    /// No pattern matches the character at the current position.
    #[default]
    UnexpectedCharacter,
    /// A `"` was opened and the input ended before it was closed.
    UnterminatedString,
}

/// Counts the newlines a string literal spans.
fn string_literal(lex: &mut logos::Lexer<TokenKind>) -> bool {
    lex.extras.line += lex.slice().matches('\n').count();
    true
}

/// Counts the newlines of an unterminated string before reporting it.
fn unterminated_string(lex: &mut logos::Lexer<TokenKind>) -> Result<(), LexErrorKind> {
    lex.extras.line += lex.slice().matches('\n').count();
    Err(LexErrorKind::UnterminatedString)
}

/// Scans source text into tokens.
///
/// The returned sequence always ends with exactly one [`TokenKind::Eof`]
/// token whose lexeme is empty. Scanning stops at the first error, so no
/// partial stream is ever returned.
///
/// # Parameters
/// - `source`: The complete program text.
///
/// # Returns
/// The token sequence in source order.
///
/// # Errors
/// - `UnexpectedCharacter` when a character starts no token.
/// - `UnterminatedString` when a string literal reaches the end of input.
pub fn scan(source: &str) -> LexResult<Vec<Token>> {
    let mut lexer = TokenKind::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        let line = lexer.extras.line;
        match result {
            Ok(kind) => tokens.push(Token { kind,
                                            lexeme: lexer.slice().to_string(),
                                            line }),
            Err(LexErrorKind::UnterminatedString) => {
                return Err(LexError::UnterminatedString { line });
            },
            Err(LexErrorKind::UnexpectedCharacter) => {
                let character = lexer.slice().chars().next().unwrap_or_default();
                return Err(LexError::UnexpectedCharacter { character, line });
            },
        }
    }

    tracing::debug!(count = tokens.len(), "scanned tokens");

    tokens.push(Token { kind:   TokenKind::Eof,
                        lexeme: String::new(),
                        line:   lexer.extras.line, });
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        scan(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn empty_source_yields_only_eof() {
        let tokens = scan("").unwrap();
        assert_eq!(tokens,
                   vec![Token { kind:   TokenKind::Eof,
                                lexeme: String::new(),
                                line:   1, }]);
    }

    #[test]
    fn two_character_operators_win_over_prefixes() {
        assert_eq!(kinds("== != <= >= = ! < >"),
                   vec![TokenKind::EqualEqual,
                        TokenKind::BangEqual,
                        TokenKind::LessEqual,
                        TokenKind::GreaterEqual,
                        TokenKind::Equal,
                        TokenKind::Bang,
                        TokenKind::Less,
                        TokenKind::Greater,
                        TokenKind::Eof]);
    }

    #[test]
    fn keywords_and_identifiers() {
        assert_eq!(kinds("func fun for format in inner null _x1"),
                   vec![TokenKind::Func,
                        TokenKind::Identifier,
                        TokenKind::For,
                        TokenKind::Identifier,
                        TokenKind::In,
                        TokenKind::Identifier,
                        TokenKind::Null,
                        TokenKind::Identifier,
                        TokenKind::Eof]);
    }

    #[test]
    fn number_followed_by_dot_is_two_tokens() {
        let tokens = scan("12.5 7.").unwrap();
        assert_eq!(tokens[0].lexeme, "12.5");
        assert_eq!(tokens[1].lexeme, "7");
        assert_eq!(tokens[2].kind, TokenKind::Dot);
    }

    #[test]
    fn strings_keep_quotes_and_count_lines() {
        let tokens = scan("\"a\nb\" x").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "\"a\nb\"");
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn comments_and_newlines_are_skipped() {
        let tokens = scan("x // note\n\ny").unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].line, 3);
        assert_eq!(tokens[2].line, 3);
    }

    #[test]
    fn unterminated_string_fails() {
        assert_eq!(scan("x = \"abc\n"), Err(LexError::UnterminatedString { line: 2 }));
    }

    #[test]
    fn unexpected_character_is_named() {
        assert_eq!(scan("x\n  @"),
                   Err(LexError::UnexpectedCharacter { character: '@',
                                                       line:      2, }));
    }

    #[test]
    fn token_rendering() {
        let tokens = scan("foo").unwrap();
        assert_eq!(tokens[0].to_string(), "{ IDENTIFIER } { foo } line:1");
        assert_eq!(tokens[1].to_string(), "{ EOF } {  } line:1");
    }
}
