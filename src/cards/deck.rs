//! Deck specifications and dealing.
//!
//! A [`DeckSpec`] is the validated multiset of symbols a board is dealt
//! from: non-empty, even-sized, every symbol exactly twice. Dealing
//! shuffles the multiset and assigns positional [`CardId`]s.
//!
//! ```
//! use paw_match::cards::DeckSpec;
//! use paw_match::core::Unshuffled;
//!
//! let spec = DeckSpec::from_pairs(["A", "B"]).unwrap();
//! let cards = spec.deal(&mut Unshuffled);
//!
//! assert_eq!(spec.pair_count(), 2);
//! assert_eq!(cards.len(), 4);
//! assert_eq!(cards[2].symbol.as_str(), "A");
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, Symbol};
use crate::core::{CardId, DeckError, Shuffler};

/// Image directory of the bundled presets.
const PRESET_IMAGE_DIR: &str = "assets/images";

/// A validated deck: each symbol appears exactly twice.
///
/// Deserializing goes through the same validation as [`DeckSpec::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Symbol>", into = "Vec<Symbol>")]
pub struct DeckSpec {
    symbols: Vec<Symbol>,
}

impl DeckSpec {
    /// Validate a full multiset of symbols (both copies of every pair listed).
    pub fn new<I, S>(symbols: I) -> Result<Self, DeckError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let symbols: Vec<Symbol> = symbols.into_iter().map(Into::into).collect();
        validate(&symbols)?;
        Ok(Self { symbols })
    }

    /// Build a deck from distinct symbols, adding the second copy of each.
    ///
    /// A symbol listed twice here would end up four times in the deck and
    /// is rejected.
    pub fn from_pairs<I, S>(symbols: I) -> Result<Self, DeckError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        let singles: Vec<Symbol> = symbols.into_iter().map(Into::into).collect();
        let mut doubled = Vec::with_capacity(singles.len() * 2);
        doubled.extend(singles.iter().cloned());
        doubled.extend(singles);
        Self::new(doubled)
    }

    /// Four-pair board (`bild1`..`bild4`).
    #[must_use]
    pub fn four_pairs() -> Self {
        Self::preset(4)
    }

    /// Eight-pair board (`bild1`..`bild8`).
    #[must_use]
    pub fn eight_pairs() -> Self {
        Self::preset(8)
    }

    fn preset(pairs: usize) -> Self {
        let singles = (1..=pairs).map(|n| Symbol::new(format!("{PRESET_IMAGE_DIR}/bild{n}.png")));
        let mut symbols: Vec<Symbol> = singles.collect();
        symbols.extend_from_within(..);
        Self { symbols }
    }

    /// Number of cards in the deck.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the deck has no cards. Never true for a validated deck.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of distinct symbols (= pairs to find).
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.symbols.len() / 2
    }

    /// Symbols in specification order.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Shuffle and lay out the cards, all face-down.
    #[must_use]
    pub fn deal(&self, shuffler: &mut dyn Shuffler) -> Vec<Card> {
        let mut layout = self.symbols.clone();
        shuffler.shuffle_symbols(&mut layout);

        layout
            .into_iter()
            .enumerate()
            .map(|(position, symbol)| Card::new(CardId(position as u32), symbol))
            .collect()
    }
}

impl TryFrom<Vec<Symbol>> for DeckSpec {
    type Error = DeckError;

    fn try_from(symbols: Vec<Symbol>) -> Result<Self, Self::Error> {
        Self::new(symbols)
    }
}

impl From<DeckSpec> for Vec<Symbol> {
    fn from(spec: DeckSpec) -> Self {
        spec.symbols
    }
}

fn validate(symbols: &[Symbol]) -> Result<(), DeckError> {
    if symbols.is_empty() {
        return Err(DeckError::Empty);
    }
    if symbols.len() % 2 != 0 {
        return Err(DeckError::OddSize(symbols.len()));
    }

    let mut counts: FxHashMap<&Symbol, usize> = FxHashMap::default();
    for symbol in symbols {
        *counts.entry(symbol).or_insert(0) += 1;
    }

    // First offender in deck order, so errors are reproducible
    for symbol in symbols {
        let count = counts[symbol];
        if count != 2 {
            return Err(DeckError::BadCardinality {
                symbol: symbol.clone(),
                count,
            });
        }
    }

    Ok(())
}
