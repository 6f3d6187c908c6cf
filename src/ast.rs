use std::{collections::HashSet, fmt, rc::Rc};

use crate::{
    error::ParseError,
    interpreter::{
        evaluator::function::core::is_builtin,
        lexer::{Token, TokenKind},
        parser::core::ParseResult,
    },
    util::num::format_number,
};

/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// `Expr` covers literals, variables, operators, composite literals, element
/// accession and function calls. Every variant records the line it was parsed
/// on so the evaluator can report errors against the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A number literal.
    Number {
        /// The numeric value, always finite.
        value: f64,
        /// Line number in the source code.
        line:  usize,
    },
    /// A string literal, without its quotes.
    String {
        /// The literal text.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// `true` or `false`.
    Bool {
        /// The boolean value.
        value: bool,
        /// Line number in the source code.
        line:  usize,
    },
    /// `null`.
    Null {
        /// Line number in the source code.
        line: usize,
    },
    /// Reference to a variable by name.
    Identifier {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A parenthesised expression.
    Grouping {
        /// The inner expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A unary operation (negation or logical not).
    Unary {
        /// The unary operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Line number in the source code.
        line:    usize,
    },
    /// A binary arithmetic, comparison or equality operation.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Short-circuiting `and`.
    LogicalAnd {
        /// Left operand, always evaluated.
        left:  Box<Self>,
        /// Right operand, evaluated only when the left one is `true`.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Short-circuiting `or`.
    LogicalOr {
        /// Left operand, always evaluated.
        left:  Box<Self>,
        /// Right operand, evaluated only when the left one is `false`.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Array literal expression, e.g. `[1, 2, 3]`.
    ArrayLiteral {
        /// Elements of the array.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// Map literal expression, e.g. `{"a" : 1}`.
    MapLiteral {
        /// Key and value expressions in source order.
        entries: Vec<(Self, Self)>,
        /// Line number in the source code.
        line:    usize,
    },
    /// Element accession on a variable, e.g. `grid[1][2]`.
    StructureAccession {
        /// The variable the chain starts from.
        name:  String,
        /// Index or key expressions, outermost first. Never empty.
        chain: Vec<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Function call expression, e.g. `print(x)`.
    FunctionCall {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
}

impl Expr {
    /// Builds a number literal from its lexeme.
    ///
    /// # Errors
    /// `InvalidNumber` if the lexeme does not denote a finite number.
    pub fn number(lexeme: &str, line: usize) -> ParseResult<Self> {
        match lexeme.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Self::Number { value, line }),
            _ => Err(ParseError::InvalidNumber { lexeme: lexeme.to_string(),
                                                 line }),
        }
    }

    /// Builds a variable reference.
    ///
    /// # Errors
    /// `InvalidIdentifier` if `name` is not identifier text.
    pub fn identifier(name: &str, line: usize) -> ParseResult<Self> {
        Ok(Self::Identifier { name: checked_identifier(name, line)?,
                              line })
    }

    /// Builds a unary node from the operator token.
    ///
    /// # Errors
    /// `InvalidOperator` if the token is not `!` or `-`.
    pub fn unary(operator: &Token, operand: Self) -> ParseResult<Self> {
        Ok(Self::Unary { op:      UnaryOperator::from_token(operator)?,
                         operand: Box::new(operand),
                         line:    operator.line, })
    }

    /// Builds a binary node from the operator token.
    ///
    /// # Errors
    /// `InvalidOperator` if the token is not a binary operator.
    pub fn binary(left: Self, operator: &Token, right: Self) -> ParseResult<Self> {
        Ok(Self::Binary { left:  Box::new(left),
                          op:    BinaryOperator::from_token(operator)?,
                          right: Box::new(right),
                          line:  operator.line, })
    }

    /// Builds a structure accession on the named variable.
    ///
    /// # Errors
    /// `InvalidIdentifier` if `name` is not identifier text.
    pub fn structure_accession(name: &str, chain: Vec<Self>, line: usize) -> ParseResult<Self> {
        Ok(Self::StructureAccession { name: checked_identifier(name, line)?,
                                      chain,
                                      line })
    }

    /// Builds a call of the named function.
    ///
    /// # Errors
    /// `InvalidIdentifier` if `name` is not identifier text.
    pub fn function_call(name: &str, arguments: Vec<Self>, line: usize) -> ParseResult<Self> {
        Ok(Self::FunctionCall { name: checked_identifier(name, line)?,
                                arguments,
                                line })
    }

    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use quill::ast::Expr;
    ///
    /// let expr = Expr::Identifier { name: "x".to_string(),
    ///                               line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Number { line, .. }
            | Self::String { line, .. }
            | Self::Bool { line, .. }
            | Self::Null { line }
            | Self::Identifier { line, .. }
            | Self::Grouping { line, .. }
            | Self::Unary { line, .. }
            | Self::Binary { line, .. }
            | Self::LogicalAnd { line, .. }
            | Self::LogicalOr { line, .. }
            | Self::ArrayLiteral { line, .. }
            | Self::MapLiteral { line, .. }
            | Self::StructureAccession { line, .. }
            | Self::FunctionCall { line, .. } => *line,
        }
    }
}

/// A user-defined function declaration.
///
/// Declarations are shared between the AST and every environment that
/// registers them, so they are handed out as `Rc<FunctionDeclaration>`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    /// The name of the function.
    pub name:   String,
    /// The parameter names, in call order.
    pub params: Vec<String>,
    /// The statements run when the function is called.
    pub body:   StmtBlock,
    /// Line number in the source code.
    pub line:   usize,
}

impl FunctionDeclaration {
    /// Builds a function declaration.
    ///
    /// # Errors
    /// - `InvalidIdentifier` if the name or a parameter is not identifier
    ///   text.
    /// - `BuiltinRedefinition` if the name belongs to a builtin.
    /// - `DuplicateParameter` if a parameter name repeats.
    pub fn new(name: &str, params: Vec<String>, body: StmtBlock, line: usize) -> ParseResult<Self> {
        let name = checked_identifier(name, line)?;
        if is_builtin(&name) {
            return Err(ParseError::BuiltinRedefinition { name, line });
        }

        let mut seen = HashSet::new();
        for param in &params {
            checked_identifier(param, line)?;
            if !seen.insert(param.as_str()) {
                return Err(ParseError::DuplicateParameter { name: param.clone(),
                                                            line });
            }
        }

        Ok(Self { name,
                  params,
                  body,
                  line })
    }
}

/// An ordered sequence of statements, such as a program or a `{ ... }` body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StmtBlock {
    /// The statements, in execution order.
    pub statements: Vec<Stmt>,
    /// Line number of the first token of the block.
    pub line:       usize,
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// An expression evaluated for its side effects.
    Expression {
        /// The expression to evaluate.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// `name = value;`
    Assignment {
        /// The name of the variable.
        name:  String,
        /// The value which is being assigned.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `name[k1]...[kn] = value;`
    ElementAssignment {
        /// The variable the chain starts from.
        name:  String,
        /// Index or key expressions, outermost first. Never empty.
        chain: Vec<Expr>,
        /// The value which is being stored.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `if (condition) { ... } else { ... }`
    If {
        /// Must evaluate to a boolean.
        condition:  Expr,
        /// Runs when the condition is `true`.
        then_block: StmtBlock,
        /// Runs when the condition is `false`. Empty when no `else` was
        /// written.
        else_block: StmtBlock,
        /// Line number in the source code.
        line:       usize,
    },
    /// `while (condition) { ... }`
    While {
        /// Must evaluate to a boolean on every iteration.
        condition: Expr,
        /// The loop body.
        body:      StmtBlock,
        /// Line number in the source code.
        line:      usize,
    },
    /// `for (element in iterable) { ... } else { ... }`
    For {
        /// The loop variable, rebound on every iteration.
        element:    String,
        /// Must evaluate to an array.
        iterable:   Expr,
        /// Runs for every element, or only for non-null ones when an `else`
        /// block was written.
        body:       StmtBlock,
        /// Runs instead of the body for null elements. `None` when no `else`
        /// was written.
        else_block: Option<StmtBlock>,
        /// Line number in the source code.
        line:       usize,
    },
    /// A user-defined function declaration.
    FunctionDeclaration(Rc<FunctionDeclaration>),
    /// `return value;`, where a bare `return;` carries a null literal.
    Return {
        /// The returned expression.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
}

impl Stmt {
    /// Builds `name = value;`.
    ///
    /// # Errors
    /// `InvalidIdentifier` if `name` is not identifier text.
    pub fn assignment(name: &str, value: Expr, line: usize) -> ParseResult<Self> {
        Ok(Self::Assignment { name: checked_identifier(name, line)?,
                              value,
                              line })
    }

    /// Builds `name[k1]...[kn] = value;`.
    ///
    /// # Errors
    /// `InvalidIdentifier` if `name` is not identifier text.
    pub fn element_assignment(name: &str,
                              chain: Vec<Expr>,
                              value: Expr,
                              line: usize)
                              -> ParseResult<Self> {
        Ok(Self::ElementAssignment { name: checked_identifier(name, line)?,
                                     chain,
                                     value,
                                     line })
    }

    /// Builds a `for` loop.
    ///
    /// # Errors
    /// `InvalidIdentifier` if `element` is not identifier text.
    pub fn for_loop(element: &str,
                    iterable: Expr,
                    body: StmtBlock,
                    else_block: Option<StmtBlock>,
                    line: usize)
                    -> ParseResult<Self> {
        Ok(Self::For { element: checked_identifier(element, line)?,
                       iterable,
                       body,
                       else_block,
                       line })
    }

    /// Gets the line number from `self`.
    #[must_use]
    pub fn line_number(&self) -> usize {
        match self {
            Self::Expression { line, .. }
            | Self::Assignment { line, .. }
            | Self::ElementAssignment { line, .. }
            | Self::If { line, .. }
            | Self::While { line, .. }
            | Self::For { line, .. }
            | Self::Return { line, .. } => *line,
            Self::FunctionDeclaration(declaration) => declaration.line,
        }
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons and equality. `and` and
/// `or` short-circuit and get their own expression variants instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
}

impl BinaryOperator {
    /// Maps an operator token to its binary operator.
    ///
    /// # Errors
    /// `InvalidOperator` for tokens that are not binary operators.
    pub fn from_token(token: &Token) -> ParseResult<Self> {
        Ok(match token.kind {
            TokenKind::Plus => Self::Add,
            TokenKind::Minus => Self::Sub,
            TokenKind::Star => Self::Mul,
            TokenKind::Slash => Self::Div,
            TokenKind::Percent => Self::Mod,
            TokenKind::Less => Self::Less,
            TokenKind::Greater => Self::Greater,
            TokenKind::LessEqual => Self::LessEqual,
            TokenKind::GreaterEqual => Self::GreaterEqual,
            TokenKind::EqualEqual => Self::Equal,
            TokenKind::BangEqual => Self::NotEqual,
            _ => {
                return Err(ParseError::InvalidOperator { operator: token.lexeme.clone(),
                                                         position: "binary",
                                                         line:     token.line, });
            },
        })
    }

    /// The operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
        }
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `!x`).
    Not,
}

impl UnaryOperator {
    /// Maps an operator token to its unary operator.
    ///
    /// # Errors
    /// `InvalidOperator` for tokens other than `-` and `!`.
    pub fn from_token(token: &Token) -> ParseResult<Self> {
        match token.kind {
            TokenKind::Minus => Ok(Self::Negate),
            TokenKind::Bang => Ok(Self::Not),
            _ => Err(ParseError::InvalidOperator { operator: token.lexeme.clone(),
                                                   position: "unary",
                                                   line:     token.line, }),
        }
    }

    /// The operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Not => "!",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Whether `text` has the shape `[A-Za-z_][A-Za-z0-9_]*`.
#[must_use]
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    chars.next()
         .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn checked_identifier(name: &str, line: usize) -> ParseResult<String> {
    if is_identifier(name) {
        Ok(name.to_string())
    } else {
        Err(ParseError::InvalidIdentifier { name: name.to_string(),
                                            line })
    }
}

/// Writes `items` separated by `", "`.
fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { value, .. } => write!(f, "Number [{}]", format_number(*value)),
            Self::String { value, .. } => write!(f, "String [{value}]"),
            Self::Bool { value, .. } => write!(f, "Bool [{value}]"),
            Self::Null { .. } => f.write_str("Null [null]"),
            Self::Identifier { name, .. } => write!(f, "Identifier [{name}]"),
            Self::Grouping { expr, .. } => write!(f, "Grouping ({expr})"),
            Self::Unary { op, operand, .. } => write!(f, "Unary ({op}, {operand})"),
            Self::Binary { left, op, right, .. } => write!(f, "Binary ({op}, {left}, {right})"),
            Self::LogicalAnd { left, right, .. } => write!(f, "LogicalAnd (and, {left}, {right})"),
            Self::LogicalOr { left, right, .. } => write!(f, "LogicalOr (or, {left}, {right})"),
            Self::ArrayLiteral { elements, .. } => {
                f.write_str("ArrayLiteral (")?;
                write_list(f, elements)?;
                f.write_str(")")
            },
            Self::MapLiteral { entries, .. } => {
                f.write_str("MapLiteral (")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key} : {value}")?;
                }
                f.write_str(")")
            },
            Self::StructureAccession { name, chain, .. } => {
                write!(f, "StructureAccession ({name}, ")?;
                write_list(f, chain)?;
                f.write_str(")")
            },
            Self::FunctionCall { name, arguments, .. } => {
                write!(f, "FunctionCall ({name}")?;
                for argument in arguments {
                    write!(f, ", {argument}")?;
                }
                f.write_str(")")
            },
        }
    }
}

impl fmt::Display for StmtBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Stmts (")?;
        write_list(f, &self.statements)?;
        f.write_str(")")
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expression { expr, .. } => write!(f, "ExpressionStmt ({expr})"),
            Self::Assignment { name, value, .. } => {
                write!(f, "StandardAssignmentStmt ({name}, {value})")
            },
            Self::ElementAssignment { name, chain, value, .. } => {
                write!(f, "StructureElementAssignmentStmt ({name}, ")?;
                write_list(f, chain)?;
                write!(f, ", {value})")
            },
            Self::If { condition,
                       then_block,
                       else_block,
                       .. } => write!(f, "IfStmt ({condition}, {then_block}, {else_block})"),
            Self::While { condition, body, .. } => write!(f, "WhileStmt ({condition}, {body})"),
            Self::For { element,
                        iterable,
                        body,
                        else_block,
                        .. } => {
                write!(f, "ForStmt ({element}, {iterable}, {body}")?;
                if let Some(else_block) = else_block {
                    write!(f, ", {else_block}")?;
                }
                f.write_str(")")
            },
            Self::FunctionDeclaration(declaration) => {
                write!(f, "FunctionDeclarationStmt ({}", declaration.name)?;
                for param in &declaration.params {
                    write!(f, ", {param}")?;
                }
                write!(f, ", {})", declaration.body)
            },
            Self::Return { value, .. } => write!(f, "ReturnStmt ({value})"),
        }
    }
}

/// Lays out a one-line node rendering as an indented tree.
///
/// Every `(` opens a level four columns deeper, every `,` ends a line and every
/// `)` closes the current level on its own line.
///
/// ## Example
/// ```
/// use quill::ast::indent_rendering;
///
/// assert_eq!(indent_rendering("Grouping (Number [1])"),
///            "Grouping (\n    Number [1]\n)\n");
/// ```
#[must_use]
pub fn indent_rendering(rendering: &str) -> String {
    fn flush(current: &mut String, depth: usize, out: &mut String) {
        let text = current.trim();
        if !text.is_empty() {
            out.push_str(&" ".repeat(depth));
            out.push_str(text);
            out.push('\n');
        }
        current.clear();
    }

    let mut out = String::new();
    let mut depth = 0usize;
    let mut current = String::new();

    for c in rendering.chars() {
        match c {
            '(' => {
                current.push(c);
                flush(&mut current, depth, &mut out);
                depth += 4;
            },
            ',' => {
                current.push(c);
                flush(&mut current, depth, &mut out);
            },
            ')' => {
                flush(&mut current, depth, &mut out);
                depth = depth.saturating_sub(4);
                out.push_str(&" ".repeat(depth));
                out.push_str(")\n");
            },
            _ => current.push(c),
        }
    }
    flush(&mut current, depth, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn token(kind: TokenKind, lexeme: &str) -> Token {
        Token { kind,
                lexeme: lexeme.to_string(),
                line: 3 }
    }

    #[test]
    fn number_literals_must_be_finite() {
        assert!(Expr::number("12.5", 1).is_ok());
        assert_eq!(Expr::number(&"9".repeat(400), 4),
                   Err(ParseError::InvalidNumber { lexeme: "9".repeat(400),
                                                   line:   4, }));
    }

    #[test]
    fn identifiers_are_validated() {
        assert!(is_identifier("_a1"));
        assert!(!is_identifier("1a"));
        assert!(!is_identifier(""));
        assert!(matches!(Expr::identifier("a-b", 2),
                         Err(ParseError::InvalidIdentifier { line: 2, .. })));
    }

    #[test]
    fn operators_are_position_checked() {
        assert_eq!(UnaryOperator::from_token(&token(TokenKind::Bang, "!")),
                   Ok(UnaryOperator::Not));
        assert!(UnaryOperator::from_token(&token(TokenKind::Plus, "+")).is_err());
        assert!(BinaryOperator::from_token(&token(TokenKind::Bang, "!")).is_err());
        assert_eq!(BinaryOperator::from_token(&token(TokenKind::Percent, "%")),
                   Ok(BinaryOperator::Mod));
    }

    #[test]
    fn declarations_reject_builtin_names_and_repeated_params() {
        let body = StmtBlock::default();
        assert_eq!(FunctionDeclaration::new("print", vec![], body.clone(), 1),
                   Err(ParseError::BuiltinRedefinition { name: "print".to_string(),
                                                         line: 1, }));
        assert_eq!(FunctionDeclaration::new("f",
                                            vec!["a".to_string(), "a".to_string()],
                                            body,
                                            2),
                   Err(ParseError::DuplicateParameter { name: "a".to_string(),
                                                        line: 2, }));
    }

    #[test]
    fn renders_nested_nodes() {
        let one = Expr::number("1", 1).unwrap();
        let two = Expr::number("2", 1).unwrap();
        let sum = Expr::binary(one, &token(TokenKind::Plus, "+"), two).unwrap();
        assert_eq!(sum.to_string(), "Binary (+, Number [1], Number [2])");
    }
}
