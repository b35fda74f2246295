#![forbid(unsafe_code)]

use std::sync::Arc;

use itertools::Itertools;

use crate::FunctionSymbol;

/// The ordered table of function symbols of a TRS.
///
/// Symbols keep their declaration order. Names are expected to be unique, but
/// this is not enforced: [`Signature::find`] returns the first declaration
/// with the given name, so later declarations with the same name are shadowed.
/// Use [`Signature::duplicates`] to detect this.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Signature {
    symbols: Vec<Arc<FunctionSymbol>>,
}

impl Signature {
    pub fn new() -> Signature {
        Signature::default()
    }

    /// Adds a symbol at the end of the table and returns a shared reference to it.
    pub fn push(&mut self, symbol: FunctionSymbol) -> Arc<FunctionSymbol> {
        let symbol = Arc::new(symbol);
        self.symbols.push(symbol.clone());
        symbol
    }

    /// Returns the first declared symbol with the given name.
    pub fn find(&self, name: &str) -> Option<&Arc<FunctionSymbol>> {
        self.symbols.iter().find(|symbol| symbol.name() == name)
    }

    /// Returns the names that are declared more than once. Each name is
    /// reported once, at the position of its second declaration.
    pub fn duplicates(&self) -> Vec<&str> {
        self.symbols
            .iter()
            .map(|symbol| symbol.name())
            .duplicates()
            .collect()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &FunctionSymbol> {
        self.symbols.iter().map(|symbol| symbol.as_ref())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl FromIterator<FunctionSymbol> for Signature {
    fn from_iter<T: IntoIterator<Item = FunctionSymbol>>(iter: T) -> Self {
        Signature {
            symbols: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_first_match() {
        let signature: Signature = [
            FunctionSymbol::new("f", 1),
            FunctionSymbol::new("g", 0),
            FunctionSymbol::new("f", 2),
        ]
        .into_iter()
        .collect();

        assert_eq!(signature.len(), 3);
        assert_eq!(signature.find("f").map(|f| f.arity()), Some(1));
        assert_eq!(signature.find("g").map(|g| g.arity()), Some(0));
        assert!(signature.find("h").is_none());
    }

    #[test]
    fn test_duplicates() {
        let mut signature = Signature::new();
        assert!(signature.duplicates().is_empty());

        signature.push(FunctionSymbol::new("f", 1));
        signature.push(FunctionSymbol::new("g", 0));
        assert!(signature.duplicates().is_empty());

        signature.push(FunctionSymbol::new("g", 1));
        signature.push(FunctionSymbol::new("f", 0));
        signature.push(FunctionSymbol::new("f", 3));
        assert_eq!(signature.duplicates(), vec!["g", "f"]);
    }
}
