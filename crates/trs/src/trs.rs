#![forbid(unsafe_code)]

use std::fmt;

use crate::Rule;
use crate::Signature;
use crate::SymbolTypeFormatter;

/// A term rewriting system: a signature and an ordered list of rewrite rules
/// over the symbols of that signature.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trs {
    signature: Signature,
    rules: Vec<Rule>,
}

impl Trs {
    pub fn new(signature: Signature, rules: Vec<Rule>) -> Trs {
        Trs { signature, rules }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// Prints a human readable summary, as shown by `trsconv info`.
impl fmt::Display for Trs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Signature:")?;
        for symbol in self.signature.iter() {
            writeln!(f, " - {}", SymbolTypeFormatter(symbol))?;
        }

        writeln!(f)?;
        writeln!(f, "Rules:")?;
        for rule in &self.rules {
            writeln!(f, " - {rule}")?;
        }
        Ok(())
    }
}
