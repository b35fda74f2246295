#![forbid(unsafe_code)]

use std::fmt;
use std::sync::Arc;

use itertools::Itertools;

use crate::Sort;

/// A variable of a rewrite rule. Variables are identified by their name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Variable {
    name: String,
    sort: Sort,
}

impl Variable {
    pub fn new(name: impl Into<String>, sort: Sort) -> Variable {
        Variable {
            name: name.into(),
            sort,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sort(&self) -> Sort {
        self.sort
    }
}

/// A function symbol together with its type.
///
/// The type consists of the sorts of the arguments followed by the output
/// sort, so a symbol of arity `n` has `n + 1` sorts.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionSymbol {
    name: String,
    argument_sorts: Vec<Sort>,
    output_sort: Sort,
}

impl FunctionSymbol {
    /// Creates a function symbol of the given arity, in which every argument
    /// and the output have sort [`Sort::A`].
    pub fn new(name: impl Into<String>, arity: usize) -> FunctionSymbol {
        FunctionSymbol {
            name: name.into(),
            argument_sorts: vec![Sort::A; arity],
            output_sort: Sort::A,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of arguments of this symbol.
    pub fn arity(&self) -> usize {
        self.argument_sorts.len()
    }

    /// Returns true iff this symbol takes no arguments.
    pub fn is_constant(&self) -> bool {
        self.argument_sorts.is_empty()
    }

    /// Returns the sorts of the arguments.
    pub fn argument_sorts(&self) -> &[Sort] {
        &self.argument_sorts
    }

    /// Returns the sort of an application of this symbol.
    pub fn output_sort(&self) -> Sort {
        self.output_sort
    }

    /// Returns the argument sorts followed by the output sort.
    pub fn sorts(&self) -> impl Iterator<Item = Sort> {
        self.argument_sorts.iter().copied().chain(std::iter::once(self.output_sort))
    }
}

/// Prints the declaration `name s1 ... sn -> s`, which is the MSTRS syntax of
/// a signature entry without the surrounding parentheses.
impl fmt::Display for FunctionSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for sort in self.argument_sorts() {
            write!(f, " {sort}")?;
        }
        write!(f, " -> {}", self.output_sort())
    }
}

/// Prints the type of a symbol as `name :: s1 -> ... -> s`.
pub struct SymbolTypeFormatter<'a>(pub &'a FunctionSymbol);

impl fmt::Display for SymbolTypeFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :: {}", self.0.name, self.0.sorts().format(" -> "))
    }
}

/// An application of a function symbol to a sequence of arguments.
///
/// The number of arguments is not required to match the arity of the symbol,
/// see [`crate::ReaderOptions::strict`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Application {
    symbol: Arc<FunctionSymbol>,
    arguments: Vec<Term>,
}

impl Application {
    pub fn new(symbol: Arc<FunctionSymbol>, arguments: Vec<Term>) -> Application {
        Application { symbol, arguments }
    }

    pub fn symbol(&self) -> &FunctionSymbol {
        &self.symbol
    }

    pub fn arguments(&self) -> &[Term] {
        &self.arguments
    }
}

/// A first-order term.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    Variable(Variable),
    Application(Application),
}

impl Term {
    /// Returns an iterator over all subterms in pre-order, starting with the
    /// term itself.
    pub fn iter(&self) -> TermIterator<'_> {
        TermIterator { stack: vec![self] }
    }

    /// Returns the function symbols occurring in this term, in pre-order and
    /// with repetitions.
    pub fn function_symbols(&self) -> impl Iterator<Item = &FunctionSymbol> {
        self.iter().filter_map(|t| match t {
            Term::Application(app) => Some(app.symbol()),
            Term::Variable(_) => None,
        })
    }
}

impl From<Variable> for Term {
    fn from(var: Variable) -> Self {
        Term::Variable(var)
    }
}

impl From<Application> for Term {
    fn from(app: Application) -> Self {
        Term::Application(app)
    }
}

/// Prints a term in the MSTRS syntax. Constants are printed without
/// parentheses, other applications as `f(t1, ..., tn)`.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Variable(var) => write!(f, "{}", var.name),
            Term::Application(app) => {
                if app.symbol.is_constant() {
                    write!(f, "{}", app.symbol.name)
                } else {
                    write!(f, "{}({})", app.symbol.name, app.arguments.iter().format(", "))
                }
            }
        }
    }
}

/// Pre-order traversal of a [`Term`].
pub struct TermIterator<'a> {
    stack: Vec<&'a Term>,
}

impl<'a> Iterator for TermIterator<'a> {
    type Item = &'a Term;

    fn next(&mut self) -> Option<Self::Item> {
        let term = self.stack.pop()?;
        if let Term::Application(app) = term {
            self.stack.extend(app.arguments.iter().rev());
        }
        Some(term)
    }
}

/// A rewrite rule `lhs -> rhs`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rule {
    pub lhs: Term,
    pub rhs: Term,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.lhs, self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    fn app(symbol: &Arc<FunctionSymbol>, arguments: Vec<Term>) -> Term {
        Application::new(symbol.clone(), arguments).into()
    }

    fn var(name: &str) -> Term {
        Variable::new(name, Sort::A).into()
    }

    #[test_case(0, "zero -> a" ; "constant")]
    #[test_case(1, "s a -> a" ; "unary")]
    #[test_case(3, "ite a a a -> a" ; "ternary")]
    fn test_symbol_declaration(arity: usize, expected: &str) {
        let name = expected.split(' ').next().unwrap();
        let symbol = FunctionSymbol::new(name, arity);

        assert_eq!(symbol.arity(), arity);
        assert_eq!(symbol.is_constant(), arity == 0);
        assert_eq!(symbol.sorts().count(), arity + 1);
        assert_eq!(symbol.to_string(), expected);
    }

    #[test]
    fn test_symbol_type() {
        assert_eq!(SymbolTypeFormatter(&FunctionSymbol::new("f", 0)).to_string(), "f :: a");
        assert_eq!(
            SymbolTypeFormatter(&FunctionSymbol::new("g", 2)).to_string(),
            "g :: a -> a -> a"
        );
    }

    #[test]
    fn test_print_term() {
        let zero = Arc::new(FunctionSymbol::new("0", 0));
        let add = Arc::new(FunctionSymbol::new("add", 2));
        let s = Arc::new(FunctionSymbol::new("s", 1));

        let term = app(&add, vec![var("x"), app(&s, vec![app(&zero, vec![])])]);
        assert_eq!(term.to_string(), "add(x, s(0))");
    }

    #[test]
    fn test_print_constant_ignores_arguments() {
        // The arguments are not checked against the arity, a constant is always printed bare.
        let c = Arc::new(FunctionSymbol::new("c", 0));
        assert_eq!(app(&c, vec![var("x")]).to_string(), "c");
    }

    #[test]
    fn test_print_rule() {
        let f = Arc::new(FunctionSymbol::new("f", 0));
        let g = Arc::new(FunctionSymbol::new("g", 1));

        let rule = Rule {
            lhs: app(&f, vec![]),
            rhs: app(&g, vec![app(&f, vec![])]),
        };
        assert_eq!(rule.to_string(), "f -> g(f)");
    }

    #[test]
    fn test_term_iterator() {
        let f = Arc::new(FunctionSymbol::new("f", 2));
        let g = Arc::new(FunctionSymbol::new("g", 1));

        let term = app(&f, vec![app(&g, vec![var("x")]), var("y")]);
        let printed: Vec<String> = term.iter().map(|t| t.to_string()).collect();
        assert_eq!(printed, vec!["f(g(x), y)", "g(x)", "x", "y"]);

        let names: Vec<&str> = term.function_symbols().map(|s| s.name()).collect();
        assert_eq!(names, vec!["f", "g"]);
    }
}
