//! Data structures to hold the parsed dice

use std::{
    fmt::{self, Display},
    num::NonZeroU32,
    ops::Index,
    str::FromStr,
};

use rand::Rng;
use tracing::trace;

use crate::FormulaError;

/// A group of identical dice, with a fixed modifier added to their sum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Die {
    sides: NonZeroU32,
    num_dice: u32,
    modifier: i64,
}

impl Die {
    /// Largest dice count accepted in a formula
    ///
    /// Each die is drawn separately, so larger counts would stall the roll.
    pub const MAX_DICE: u32 = 10_000;

    /// A single die with the given number of sides
    pub const fn new(sides: NonZeroU32) -> Self {
        Self {
            sides,
            num_dice: 1,
            modifier: 0,
        }
    }

    /// Set how many dice are rolled
    #[must_use]
    pub const fn with_num_dice(self, num_dice: u32) -> Self {
        Self { num_dice, ..self }
    }

    /// Set the modifier added to the sum of the dice
    #[must_use]
    pub const fn with_modifier(self, modifier: i64) -> Self {
        Self { modifier, ..self }
    }

    pub const fn sides(&self) -> NonZeroU32 {
        self.sides
    }

    pub const fn num_dice(&self) -> u32 {
        self.num_dice
    }

    pub const fn modifier(&self) -> i64 {
        self.modifier
    }

    /// Roll all the dice, and add the modifier
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        let total = (0..self.num_dice)
            .map(|_| i64::from(rng.gen_range(1..=self.sides.get())))
            .fold(0, i64::saturating_add)
            .saturating_add(self.modifier);
        trace!(die = %self, total, "Rolled");
        total
    }

    pub fn roll_to_str<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        format!("Rolled {self}    = {}", self.roll(rng))
    }
}

impl Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifier == 0 {
            write!(f, "{}d{}", self.num_dice, self.sides)
        } else {
            write!(f, "{}d{}{:+}", self.num_dice, self.sides, self.modifier)
        }
    }
}

/// A die inside a [`DiceBag`], either added or subtracted from the total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiceBagItem {
    die: Die,
    subtracted: bool,
}

impl DiceBagItem {
    pub const fn die(&self) -> &Die {
        &self.die
    }

    pub const fn is_subtracted(&self) -> bool {
        self.subtracted
    }

    fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        let total = self.die.roll(rng);
        if self.subtracted {
            total.saturating_neg()
        } else {
            total
        }
    }
}

/// A sequence of dice, summed together
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DiceBag {
    items: Vec<DiceBagItem>,
}

impl DiceBag {
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a die to the bag
    ///
    /// If `subtracted` is true, the whole roll of the die (modifier included)
    /// is subtracted from the total.
    pub fn add_die(&mut self, die: Die, subtracted: bool) {
        self.items.push(DiceBagItem { die, subtracted });
    }

    pub fn get(&self, idx: usize) -> Option<&Die> {
        self.items.get(idx).map(DiceBagItem::die)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiceBagItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Roll every die in the bag, returning the total
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        self.items
            .iter()
            .map(|item| item.roll(rng))
            .fold(0, i64::saturating_add)
    }

    pub fn roll_to_str<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        format!("Rolled {self}    = {}", self.roll(rng))
    }
}

impl Index<usize> for DiceBag {
    type Output = Die;

    fn index(&self, idx: usize) -> &Self::Output {
        &self.items[idx].die
    }
}

impl Display for DiceBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.items.split_first() else {
            return write!(f, "<empty DiceBag>");
        };
        write!(f, "{}", first.die)?;
        for item in rest {
            let sign = if item.subtracted { '-' } else { '+' };
            write!(f, " {sign} {}", item.die)?;
        }
        Ok(())
    }
}

impl FromStr for DiceBag {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_formula(s)
    }
}
