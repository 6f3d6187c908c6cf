use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::{ParseResult, TokenStream, describe, parse_expression},
            utils::{parse_comma_separated, parse_element_chain},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `!`  (logical not)
///
/// Unary operators are right-associative, so an input like `!-x` is parsed as
/// `!( -x )`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "!") unary
///            | primary
/// ```
/// # Parameters
/// - `tokens`: Token stream with lookahead.
///
/// # Returns
/// An [`Expr::Unary`] or a primary expression.
pub(crate) fn parse_unary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    if let Some(operator) = tokens.match_any(&[TokenKind::Bang, TokenKind::Minus]) {
        let operand = parse_unary(tokens)?;
        return Expr::unary(operator, operand);
    }
    parse_primary(tokens)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - number, string, boolean and null literals
/// - parenthesized expressions
/// - identifiers, function calls and element accession
/// - array literals (`[ ... ]`)
/// - map literals (`{ key : value, ... }`)
///
/// # Errors
/// `UnexpectedToken` if the current token starts no expression.
pub(crate) fn parse_primary(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let token = tokens.peek();
    let line = token.line;

    match token.kind {
        TokenKind::False | TokenKind::True => {
            tokens.advance();
            Ok(Expr::Bool { value: token.kind == TokenKind::True,
                            line })
        },
        TokenKind::Null => {
            tokens.advance();
            Ok(Expr::Null { line })
        },
        TokenKind::Number => {
            tokens.advance();
            Expr::number(&token.lexeme, line)
        },
        TokenKind::String => {
            tokens.advance();
            Ok(Expr::String { value: strip_quotes(&token.lexeme).to_string(),
                              line })
        },
        TokenKind::Identifier => parse_identifier_led(tokens),
        TokenKind::LeftParen => parse_grouping(tokens),
        TokenKind::LeftBracket => parse_array_literal(tokens),
        TokenKind::LeftBrace => parse_map_literal(tokens),
        TokenKind::Eof => Err(ParseError::UnexpectedEndOfInput { line }),
        _ => Err(ParseError::UnexpectedToken { token: describe(token),
                                               line }),
    }
}

/// The contents of a string lexeme without its surrounding quotes.
fn strip_quotes(lexeme: &str) -> &str {
    lexeme.strip_prefix('"')
          .and_then(|rest| rest.strip_suffix('"'))
          .unwrap_or(lexeme)
}

/// Parses the forms that start with an identifier.
///
/// - `name [ ... ]...` is an element accession,
/// - `name ( ... )` is a function call,
/// - a bare `name` is a variable reference.
fn parse_identifier_led(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let identifier = tokens.advance();
    let line = identifier.line;

    if tokens.check(TokenKind::LeftBracket) {
        let chain = parse_element_chain(tokens)?;
        return Expr::structure_accession(&identifier.lexeme, chain, line);
    }

    if tokens.match_any(&[TokenKind::LeftParen]).is_some() {
        let arguments = parse_comma_separated(tokens,
                                              parse_expression,
                                              TokenKind::RightParen,
                                              "Expect ) at the end of the function call")?;
        return Expr::function_call(&identifier.lexeme, arguments, line);
    }

    Expr::identifier(&identifier.lexeme, line)
}

/// Parses a parenthesized expression.
///
/// Grammar: `grouping := "(" expression ")"`
fn parse_grouping(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let line = tokens.advance().line;
    let expr = parse_expression(tokens)?;
    tokens.consume(TokenKind::RightParen, "Expect ')' after expression")?;
    Ok(Expr::Grouping { expr: Box::new(expr),
                        line })
}

/// Parses an array literal of the form `[ expr1, expr2, ..., exprN ]`.
///
/// An empty array `[]` is accepted.
fn parse_array_literal(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let line = tokens.advance().line;
    let elements = parse_comma_separated(tokens,
                                         parse_expression,
                                         TokenKind::RightBracket,
                                         "Expect ] at the end of the array")?;
    Ok(Expr::ArrayLiteral { elements, line })
}

/// Parses a map literal of the form `{ key1 : value1, ..., keyN : valueN }`.
///
/// Keys and values are arbitrary expressions; key types are checked at
/// runtime. An empty map `{}` is accepted.
fn parse_map_literal(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let line = tokens.advance().line;
    let entries = parse_comma_separated(tokens,
                                        parse_key_value_pair,
                                        TokenKind::RightBrace,
                                        "Expect } at the end of the map")?;
    Ok(Expr::MapLiteral { entries, line })
}

/// Parses `key : value`.
fn parse_key_value_pair(tokens: &mut TokenStream<'_>) -> ParseResult<(Expr, Expr)> {
    let key = parse_expression(tokens)?;
    tokens.consume(TokenKind::Colon, "Expect : after map key")?;
    let value = parse_expression(tokens)?;
    Ok((key, value))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::interpreter::lexer::scan;

    fn parse(source: &str) -> ParseResult<Expr> {
        let tokens = scan(source).unwrap();
        let mut stream = TokenStream::new(&tokens).unwrap();
        parse_expression(&mut stream)
    }

    #[test]
    fn unary_is_right_recursive() {
        assert_eq!(parse("!-x").unwrap().to_string(),
                   "Unary (!, Unary (-, Identifier [x]))");
    }

    #[test]
    fn string_literals_lose_their_quotes() {
        assert_eq!(parse("\"hi there\"").unwrap(),
                   Expr::String { value: "hi there".to_string(),
                                  line:  1, });
    }

    #[test]
    fn identifier_forms() {
        assert_eq!(parse("grid[1][j]").unwrap().to_string(),
                   "StructureAccession (grid, Number [1], Identifier [j])");
        assert_eq!(parse("f()").unwrap().to_string(), "FunctionCall (f)");
        assert_eq!(parse("f(1, x)").unwrap().to_string(),
                   "FunctionCall (f, Number [1], Identifier [x])");
    }

    #[test]
    fn composite_literals() {
        assert_eq!(parse("[]").unwrap().to_string(), "ArrayLiteral ()");
        assert_eq!(parse("{}").unwrap().to_string(), "MapLiteral ()");
        assert_eq!(parse("{\"a\" : 1, 2 : [3]}").unwrap().to_string(),
                   "MapLiteral (String [a] : Number [1], Number [2] : ArrayLiteral (Number [3]))");
    }

    #[test]
    fn unclosed_group_reports_expected_token() {
        assert_eq!(parse("(1 + 2"),
                   Err(ParseError::Expected { message: "Expect ')' after expression".to_string(),
                                              found:   "end of input".to_string(),
                                              line:    1, }));
    }

    #[test]
    fn operator_tokens_do_not_start_expressions() {
        assert_eq!(parse("* 2"),
                   Err(ParseError::UnexpectedToken { token: "*".to_string(),
                                                     line:  1, }));
    }
}
