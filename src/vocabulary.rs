//! Character label vocabulary.

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Digits, then upper case, then lower case letters.
pub const ALPHANUMERIC: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Ordered set of symbols; a symbol's label is its position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Vocabulary {
    symbols: Vec<char>,
    #[serde(skip)]
    index: HashMap<char, usize>,
}

impl Vocabulary {
    /// Build a vocabulary from symbols in label order.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::InvalidLabel`] if a symbol appears twice or the
    /// vocabulary is empty.
    pub fn new<I: IntoIterator<Item = char>>(symbols: I) -> Result<Self> {
        let symbols: Vec<char> = symbols.into_iter().collect();
        if symbols.is_empty() {
            return Err(EvalError::InvalidLabel("Vocabulary is empty".to_string()));
        }

        let mut index = HashMap::with_capacity(symbols.len());
        for (i, &symbol) in symbols.iter().enumerate() {
            if index.insert(symbol, i).is_some() {
                return Err(EvalError::InvalidLabel(format!(
                    "Symbol {:?} appears more than once in the vocabulary",
                    symbol
                )));
            }
        }

        Ok(Self { symbols, index })
    }

    /// The default detection alphabet, see [`ALPHANUMERIC`].
    pub fn alphanumeric() -> Self {
        let symbols: Vec<char> = ALPHANUMERIC.chars().collect();
        let index = symbols.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        Self { symbols, index }
    }

    pub fn index_of(&self, symbol: char) -> Option<usize> {
        self.index.get(&symbol).copied()
    }

    /// Like [`Vocabulary::index_of`], failing with [`EvalError::UnknownSymbol`].
    pub fn require(&self, symbol: char) -> Result<usize> {
        self.index_of(symbol).ok_or(EvalError::UnknownSymbol(symbol))
    }

    pub fn symbol(&self, index: usize) -> Option<char> {
        self.symbols.get(index).copied()
    }

    pub fn contains(&self, symbol: char) -> bool {
        self.index.contains_key(&symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::alphanumeric()
    }
}

impl TryFrom<String> for Vocabulary {
    type Error = EvalError;

    fn try_from(symbols: String) -> Result<Self> {
        Self::new(symbols.chars())
    }
}

impl From<Vocabulary> for String {
    fn from(vocabulary: Vocabulary) -> Self {
        vocabulary.symbols.into_iter().collect()
    }
}
