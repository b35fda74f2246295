use std::fmt;

/// The sort of variables and function symbols.
///
/// The input format is single-sorted, so every position carries the same
/// sort. It is printed as `a` in the MSTRS format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sort {
    #[default]
    A,
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::A => write!(f, "a"),
        }
    }
}
