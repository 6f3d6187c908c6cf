use crate::{
    ast::Expr,
    interpreter::{
        lexer::TokenKind,
        parser::{
            core::{ParseResult, TokenStream},
            unary::parse_unary,
        },
    },
};

/// Parses a left-associative chain of binary operators of one precedence
/// level.
///
/// The rule is: `level := operand (operator operand)*`
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `operators`: Token kinds accepted at this level.
/// - `operand`: Parser for the next-higher precedence level.
///
/// # Returns
/// A left-nested `Expr::Binary` tree, or the single operand.
fn parse_left_assoc(tokens: &mut TokenStream<'_>,
                    operators: &[TokenKind],
                    operand: fn(&mut TokenStream<'_>) -> ParseResult<Expr>)
                    -> ParseResult<Expr> {
    let mut left = operand(tokens)?;
    while let Some(operator) = tokens.match_any(operators) {
        let right = operand(tokens)?;
        left = Expr::binary(left, operator, right)?;
    }
    Ok(left)
}

/// Parses logical OR expressions.
///
/// The rule is: `logic_or := logic_and ("or" logic_and)*`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An `Expr::LogicalOr` chain or the single operand.
pub fn parse_logic_or(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let mut left = parse_logic_and(tokens)?;
    while let Some(operator) = tokens.match_any(&[TokenKind::Or]) {
        let right = parse_logic_and(tokens)?;
        left = Expr::LogicalOr { left:  Box::new(left),
                                 right: Box::new(right),
                                 line:  operator.line, };
    }
    Ok(left)
}

/// Parses logical AND expressions.
///
/// The rule is: `logic_and := equality ("and" equality)*`
pub fn parse_logic_and(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    let mut left = parse_equality(tokens)?;
    while let Some(operator) = tokens.match_any(&[TokenKind::And]) {
        let right = parse_equality(tokens)?;
        left = Expr::LogicalAnd { left:  Box::new(left),
                                  right: Box::new(right),
                                  line:  operator.line, };
    }
    Ok(left)
}

/// Parses equality operators.
///
/// The rule is: `equality := comparison (("==" | "!=") comparison)*`
pub fn parse_equality(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_assoc(tokens,
                     &[TokenKind::BangEqual, TokenKind::EqualEqual],
                     parse_comparison)
}

/// Parses relational operators.
///
/// The rule is: `comparison := term ((">" | ">=" | "<" | "<=") term)*`
pub fn parse_comparison(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_assoc(tokens,
                     &[TokenKind::Greater,
                       TokenKind::GreaterEqual,
                       TokenKind::Less,
                       TokenKind::LessEqual],
                     parse_term)
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `term := factor (("-" | "+") factor)*`
pub fn parse_term(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_assoc(tokens, &[TokenKind::Minus, TokenKind::Plus], parse_factor)
}

/// Parses multiplication and division expressions.
///
/// The rule is: `factor := modulo (("/" | "*") modulo)*`
pub fn parse_factor(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_assoc(tokens, &[TokenKind::Slash, TokenKind::Star], parse_modulo)
}

/// Parses modulo expressions. `%` binds tighter than `*` and `/`.
///
/// The rule is: `modulo := unary ("%" unary)*`
pub fn parse_modulo(tokens: &mut TokenStream<'_>) -> ParseResult<Expr> {
    parse_left_assoc(tokens, &[TokenKind::Percent], parse_unary)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::interpreter::{
        lexer::scan,
        parser::core::{TokenStream, parse_expression},
    };

    fn render(source: &str) -> String {
        let tokens = scan(source).unwrap();
        let mut stream = TokenStream::new(&tokens).unwrap();
        parse_expression(&mut stream).unwrap().to_string()
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(render("1 + 2 * 3"),
                   "Binary (+, Number [1], Binary (*, Number [2], Number [3]))");
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(render("8 - 3 - 2"),
                   "Binary (-, Binary (-, Number [8], Number [3]), Number [2])");
    }

    #[test]
    fn modulo_binds_tighter_than_multiplication() {
        assert_eq!(render("2 * 7 % 4"),
                   "Binary (*, Number [2], Binary (%, Number [7], Number [4]))");
    }

    #[test]
    fn and_binds_tighter_than_or() {
        assert_eq!(render("a or b and c"),
                   "LogicalOr (or, Identifier [a], LogicalAnd (and, Identifier [b], Identifier \
                    [c]))");
    }

    #[test]
    fn comparison_binds_tighter_than_equality() {
        assert_eq!(render("1 < 2 == true"),
                   "Binary (==, Binary (<, Number [1], Number [2]), Bool [true])");
    }
}
