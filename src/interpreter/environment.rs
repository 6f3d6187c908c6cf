use std::{collections::HashMap, rc::Rc};

use crate::{ast::FunctionDeclaration, interpreter::value::core::Value};

/// A lexical scope: variable and function tables plus an optional parent.
///
/// Lookups walk from this scope outwards through its parents. Writes always
/// land in this scope, so a child can shadow but never modify a binding of
/// its parent.
///
/// The parent is borrowed, not owned: a child scope lives only as long as
/// the call that created it.
#[derive(Debug, Default)]
pub struct Environment<'p> {
    variables: HashMap<String, Value>,
    functions: HashMap<String, Rc<FunctionDeclaration>>,
    parent:    Option<&'p Environment<'p>>,
}

impl<'p> Environment<'p> {
    /// Creates a root scope with no parent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty scope whose lookups fall back to `parent`.
    #[must_use]
    pub fn with_parent(parent: &'p Environment<'p>) -> Self {
        Self { variables: HashMap::new(),
               functions: HashMap::new(),
               parent:    Some(parent), }
    }

    /// Binds `name` in this scope, replacing any previous local binding.
    pub fn define_variable(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    /// Looks up a variable in this scope, then in each parent in turn.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.variables
            .get(name)
            .or_else(|| self.parent.and_then(|parent| parent.get_variable(name)))
    }

    /// Registers a function in this scope, replacing any previous local
    /// declaration of the same name.
    pub fn define_function(&mut self, declaration: Rc<FunctionDeclaration>) {
        self.functions.insert(declaration.name.clone(), declaration);
    }

    /// Looks up a function in this scope, then in each parent in turn.
    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<Rc<FunctionDeclaration>> {
        self.functions
            .get(name)
            .cloned()
            .or_else(|| self.parent.and_then(|parent| parent.get_function(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::StmtBlock;

    #[test]
    fn lookups_walk_parents() {
        let mut root = Environment::new();
        root.define_variable("x", Value::Number(1.0));

        let child = Environment::with_parent(&root);
        assert_eq!(child.get_variable("x"), Some(&Value::Number(1.0)));
        assert_eq!(child.get_variable("y"), None);
    }

    #[test]
    fn writes_stay_local() {
        let mut root = Environment::new();
        root.define_variable("x", Value::Number(1.0));
        {
            let mut child = Environment::with_parent(&root);
            child.define_variable("x", Value::Number(2.0));
            assert_eq!(child.get_variable("x"), Some(&Value::Number(2.0)));
        }
        assert_eq!(root.get_variable("x"), Some(&Value::Number(1.0)));
    }

    #[test]
    fn functions_are_found_through_parents() {
        let mut root = Environment::new();
        let declaration = FunctionDeclaration::new("f", vec![], StmtBlock::default(), 1).unwrap();
        root.define_function(Rc::new(declaration));

        let child = Environment::with_parent(&root);
        assert_eq!(child.get_function("f").map(|f| f.name.clone()), Some("f".to_string()));
        assert!(child.get_function("g").is_none());
    }
}
