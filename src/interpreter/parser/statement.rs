use std::rc::Rc;

use crate::{
    ast::{Expr, FunctionDeclaration, Stmt, StmtBlock},
    error::ParseError,
    interpreter::{
        lexer::TokenKind,
        parser::{
            block::parse_block,
            core::{ParseResult, TokenStream, parse_expression},
            utils::{parse_comma_separated, parse_element_chain, parse_identifier},
        },
    },
};

/// Parses a single statement.
///
/// Keyword-led statements are recognised by their keyword. A statement that
/// starts with an identifier is:
/// - an element assignment when the identifier is followed by `[` and an `=`
///   appears before the next `;`,
/// - a standard assignment when the identifier is followed by `=`,
/// - an expression statement otherwise.
///
/// # Parameters
/// - `tokens`: Token stream positioned at the first token of the statement.
///
/// # Returns
/// A parsed [`Stmt`] node.
pub fn parse_statement(tokens: &mut TokenStream<'_>) -> ParseResult<Stmt> {
    match tokens.peek().kind {
        TokenKind::If => parse_if(tokens),
        TokenKind::While => parse_while(tokens),
        TokenKind::For => parse_for(tokens),
        TokenKind::Func => parse_function_declaration(tokens),
        TokenKind::Return => parse_return(tokens),
        TokenKind::Identifier
            if tokens.check_next(TokenKind::LeftBracket) && tokens.is_equal_ahead() =>
        {
            parse_element_assignment(tokens)
        },
        TokenKind::Identifier if tokens.check_next(TokenKind::Equal) => parse_assignment(tokens),
        _ => parse_expression_statement(tokens),
    }
}

/// Parses `expression ";"`.
fn parse_expression_statement(tokens: &mut TokenStream<'_>) -> ParseResult<Stmt> {
    let line = tokens.peek().line;
    let expr = parse_expression(tokens)?;
    tokens.consume(TokenKind::Semicolon, "Expect ';' after expression")?;
    Ok(Stmt::Expression { expr, line })
}

/// Parses `IDENTIFIER "=" expression ";"`.
fn parse_assignment(tokens: &mut TokenStream<'_>) -> ParseResult<Stmt> {
    let identifier = tokens.consume(TokenKind::Identifier, "Expect identifier")?;
    tokens.consume(TokenKind::Equal, "Expect = after identifier")?;
    let value = parse_expression(tokens)?;
    tokens.consume(TokenKind::Semicolon, "Expect ; after assignment")?;
    Stmt::assignment(&identifier.lexeme, value, identifier.line)
}

/// Parses `IDENTIFIER ("[" expression "]")+ "=" expression ";"`.
fn parse_element_assignment(tokens: &mut TokenStream<'_>) -> ParseResult<Stmt> {
    let identifier = tokens.consume(TokenKind::Identifier, "Expect identifier")?;
    let chain = parse_element_chain(tokens)?;
    tokens.consume(TokenKind::Equal, "Expect = after array element assignment")?;
    let value = parse_expression(tokens)?;
    tokens.consume(TokenKind::Semicolon, "Expect ; after assignment")?;
    Stmt::element_assignment(&identifier.lexeme, chain, value, identifier.line)
}

/// Parses a parenthesized condition, as used by `if` and `while`.
fn parse_condition(tokens: &mut TokenStream<'_>, keyword: &str) -> ParseResult<Expr> {
    tokens.consume(TokenKind::LeftParen, &format!("Expect ( before {keyword} condition"))?;
    let condition = parse_expression(tokens)?;
    tokens.consume(TokenKind::RightParen, &format!("Expect ) after {keyword} condition"))?;
    Ok(condition)
}

/// Parses an `if` statement with an optional `else` block.
///
/// Syntax:
/// ```text
///     if (<condition>) { <statements> }
///     else { <statements> }
/// ```
fn parse_if(tokens: &mut TokenStream<'_>) -> ParseResult<Stmt> {
    let line = tokens.advance().line;
    let condition = parse_condition(tokens, "if")?;
    let then_block = parse_block(tokens, "if statements")?;

    let else_block = if tokens.match_any(&[TokenKind::Else]).is_some() {
        parse_block(tokens, "else statements")?
    } else {
        StmtBlock { statements: Vec::new(),
                    line }
    };

    Ok(Stmt::If { condition,
                  then_block,
                  else_block,
                  line })
}

/// Parses `"while" "(" expression ")" block`.
fn parse_while(tokens: &mut TokenStream<'_>) -> ParseResult<Stmt> {
    let line = tokens.advance().line;
    let condition = parse_condition(tokens, "while")?;
    let body = parse_block(tokens, "while statements")?;
    Ok(Stmt::While { condition,
                     body,
                     line })
}

/// Parses a `for` loop over an array.
///
/// Syntax:
/// ```text
///     for (<identifier> in <expression>) { <statements> }
///     else { <statements> }
/// ```
/// Writing the `else` block, even an empty one, changes how null elements
/// are handled, so its presence is recorded.
fn parse_for(tokens: &mut TokenStream<'_>) -> ParseResult<Stmt> {
    let line = tokens.advance().line;
    tokens.consume(TokenKind::LeftParen, "Expect ( before the for loop header")?;
    let element = parse_identifier(tokens, "Expect identifier after ( in the for loop header")?;
    tokens.consume(TokenKind::In,
                   "Expect \"in\" after element identifier in the for loop header")?;
    let iterable = parse_expression(tokens)?;
    tokens.consume(TokenKind::RightParen, "Expect ) after the for loop header")?;
    let body = parse_block(tokens, "for loop statements")?;

    let else_block = if tokens.match_any(&[TokenKind::Else]).is_some() {
        Some(parse_block(tokens, "else statements")?)
    } else {
        None
    };

    Stmt::for_loop(&element, iterable, body, else_block, line)
}

/// Parses a function declaration.
///
/// Syntax: `func <identifier> ( <params>? ) { <statements> }`
///
/// `return` is legal anywhere inside the body, including nested blocks.
///
/// # Errors
/// Besides grammar errors, the declaration is rejected when it reuses a
/// builtin's name or repeats a parameter.
fn parse_function_declaration(tokens: &mut TokenStream<'_>) -> ParseResult<Stmt> {
    let line = tokens.advance().line;
    let name = parse_identifier(tokens, "Expect identifier after the func keyword")?;
    tokens.consume(TokenKind::LeftParen, "Expect opening ( after the function identifier")?;
    let params =
        parse_comma_separated(tokens,
                              |tokens| {
                                  parse_identifier(tokens,
                                                   "Expect identifier in the function \
                                                    parameters list")
                              },
                              TokenKind::RightParen,
                              "Expect closing ) after the function parameters list")?;

    tokens.enter_function();
    let body = parse_block(tokens, "function body");
    tokens.exit_function();

    let declaration = FunctionDeclaration::new(&name, params, body?, line)?;
    Ok(Stmt::FunctionDeclaration(Rc::new(declaration)))
}

/// Parses `"return" expression? ";"`. A bare `return;` returns null.
///
/// # Errors
/// `ReturnOutsideFunction` when no function declaration encloses the
/// statement.
fn parse_return(tokens: &mut TokenStream<'_>) -> ParseResult<Stmt> {
    let line = tokens.advance().line;

    if !tokens.in_function() {
        return Err(ParseError::ReturnOutsideFunction { line });
    }

    let value = if tokens.match_any(&[TokenKind::Semicolon]).is_some() {
        Expr::Null { line }
    } else {
        let value = parse_expression(tokens)?;
        tokens.consume(TokenKind::Semicolon, "Expect ';' after expression")?;
        value
    };

    Ok(Stmt::Return { value, line })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        ast::Stmt,
        error::ParseError,
        interpreter::{lexer::scan, parser::block::parse_program},
    };

    fn parse(source: &str) -> Result<Vec<Stmt>, ParseError> {
        parse_program(&scan(source).unwrap()).map(|program| program.statements)
    }

    fn render(source: &str) -> String {
        parse(source).unwrap()
                     .iter()
                     .map(ToString::to_string)
                     .collect::<Vec<_>>()
                     .join("\n")
    }

    #[test]
    fn identifier_statements_are_disambiguated() {
        assert_eq!(render("a[1] = 2;"),
                   "StructureElementAssignmentStmt (a, Number [1], Number [2])");
        assert_eq!(render("a = 2;"), "StandardAssignmentStmt (a, Number [2])");
        assert_eq!(render("a[1] == 2;"),
                   "ExpressionStmt (Binary (==, StructureAccession (a, Number [1]), Number [2]))");
        assert_eq!(render("a;"), "ExpressionStmt (Identifier [a])");
    }

    #[test]
    fn element_assignment_value_may_use_accession() {
        assert_eq!(render("a[0] = b[1];"),
                   "StructureElementAssignmentStmt (a, Number [0], StructureAccession (b, Number \
                    [1]))");
    }

    #[test]
    fn for_records_whether_else_was_written() {
        let with_else = parse("for (x in xs) {} else {}").unwrap();
        let without_else = parse("for (x in xs) {}").unwrap();
        assert!(matches!(&with_else[0], Stmt::For { else_block: Some(_), .. }));
        assert!(matches!(&without_else[0], Stmt::For { else_block: None, .. }));
    }

    #[test]
    fn return_requires_an_enclosing_function() {
        assert_eq!(parse("return 1;"),
                   Err(ParseError::ReturnOutsideFunction { line: 1 }));
        assert!(parse("func f() { if (true) { return; } }").is_ok());
        assert_eq!(parse("func f() {}\nreturn;"),
                   Err(ParseError::ReturnOutsideFunction { line: 2 }));
    }

    #[test]
    fn bare_return_yields_null() {
        assert_eq!(render("func f() { return; }"),
                   "FunctionDeclarationStmt (f, Stmts (ReturnStmt (Null [null])))");
    }

    #[test]
    fn missing_semicolon_is_reported_on_the_following_token() {
        assert_eq!(parse("x = 1\ny = 2;"),
                   Err(ParseError::Expected { message: "Expect ; after assignment".to_string(),
                                              found:   "y".to_string(),
                                              line:    2, }));
    }

    #[test]
    fn stray_closing_brace_at_top_level() {
        assert_eq!(parse("x = 1; }"),
                   Err(ParseError::UnexpectedToken { token: "}".to_string(),
                                                     line:  1, }));
    }

    #[test]
    fn if_without_else_has_an_empty_else_block() {
        assert_eq!(render("if (c) { x = 1; }"),
                   "IfStmt (Identifier [c], Stmts (StandardAssignmentStmt (x, Number [1])), \
                    Stmts ())");
    }
}
