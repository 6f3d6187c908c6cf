use crate::{
    ast::StmtBlock,
    error::ParseError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            core::{ParseResult, TokenStream, describe},
            statement::parse_statement,
        },
    },
};

/// Parses statements until a closing `}` or the end of input.
///
/// Neither terminator is consumed. The block's line is that of its first
/// token.
///
/// Grammar: `statements := statement*`
pub fn parse_statements(tokens: &mut TokenStream<'_>) -> ParseResult<StmtBlock> {
    let line = tokens.peek().line;
    let mut statements = Vec::new();

    while !tokens.is_at_end() && !tokens.check(TokenKind::RightBrace) {
        statements.push(parse_statement(tokens)?);
    }

    Ok(StmtBlock { statements, line })
}

/// Parses a block delimited by braces.
///
/// Grammar: `block := "{" statements "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening brace.
/// - `context`: Names the construct owning the block, used in error messages
///   (e.g. `"if statement"`).
///
/// # Returns
/// The statements of the block, possibly none.
pub fn parse_block(tokens: &mut TokenStream<'_>, context: &str) -> ParseResult<StmtBlock> {
    tokens.consume(TokenKind::LeftBrace, &format!("Expect {{ before the {context}"))?;
    let block = parse_statements(tokens)?;
    tokens.consume(TokenKind::RightBrace, &format!("Expect }} after the {context}"))?;
    Ok(block)
}

/// Parses a whole program.
///
/// Every token up to the end marker must belong to a statement; a stray `}`
/// at the top level is an error.
///
/// # Errors
/// The first grammar violation encountered.
pub fn parse_program(tokens: &[Token]) -> ParseResult<StmtBlock> {
    let mut stream = TokenStream::new(tokens)?;
    let program = parse_statements(&mut stream)?;

    if !stream.is_at_end() {
        let token = stream.peek();
        return Err(ParseError::UnexpectedToken { token: describe(token),
                                                 line:  token.line, });
    }

    tracing::debug!(statements = program.statements.len(), "parsed program");
    Ok(program)
}
