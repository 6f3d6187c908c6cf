use crate::{
    ast::Expr,
    interpreter::{
        lexer::TokenKind,
        parser::core::{ParseResult, TokenStream, parse_expression},
    },
};

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by array literals, map literals, function argument
/// lists and parameter lists. It repeatedly calls `parse_item` to parse one
/// element, expecting either:
///
/// - a comma, to continue the list, or
/// - the specified closing token, to end it.
///
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)*)? closing`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first item or closing token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token kind that terminates the list (e.g., `]` or `)`).
/// - `message`: Error message used when the list is not closed.
///
/// # Returns
/// A vector of parsed items. The closing token is consumed.
///
/// # Errors
/// Returns a `ParseError` if an item fails to parse or the list is not
/// terminated by `closing`.
pub(in crate::interpreter::parser) fn parse_comma_separated<T>(
    tokens: &mut TokenStream<'_>,
    parse_item: impl Fn(&mut TokenStream<'_>) -> ParseResult<T>,
    closing: TokenKind,
    message: &str)
    -> ParseResult<Vec<T>> {
    let mut items = Vec::new();
    if tokens.match_any(&[closing]).is_some() {
        return Ok(items);
    }
    loop {
        items.push(parse_item(tokens)?);
        if tokens.match_any(&[TokenKind::Comma]).is_none() {
            break;
        }
    }
    tokens.consume(closing, message)?;
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// Returns `Expected` carrying `message` if the next token is not an
/// identifier.
pub(in crate::interpreter::parser) fn parse_identifier(tokens: &mut TokenStream<'_>,
                                                       message: &str)
                                                       -> ParseResult<String> {
    Ok(tokens.consume(TokenKind::Identifier, message)?.lexeme.clone())
}

/// Parses one or more `[expr]` links of an element chain.
///
/// Grammar: `chain := ("[" expression "]")+`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first `[`.
///
/// # Returns
/// The index and key expressions, outermost first.
pub(in crate::interpreter::parser) fn parse_element_chain(tokens: &mut TokenStream<'_>)
                                                          -> ParseResult<Vec<Expr>> {
    let mut chain = Vec::new();
    tokens.consume(TokenKind::LeftBracket, "Expect [ to start an element accession")?;
    loop {
        chain.push(parse_expression(tokens)?);
        tokens.consume(TokenKind::RightBracket, "Expect ] after array index accession")?;
        if tokens.match_any(&[TokenKind::LeftBracket]).is_none() {
            break;
        }
    }
    Ok(chain)
}
