//! Dice formulas in the usual tabletop nomenclature.
//!
//! A formula is one or more dice, each written `[num]d<sides>[+-modifier]`,
//! added to or subtracted from each other:
//!
//! ```text
//! d6                  -> 1d6
//! 2d10                -> 2d10
//! d12+1               -> 1d12+1
//! 20d6-5              -> 20d6-5
//! 8d10+1d4-1          -> 8d10 + 1d4-1
//! d20+5-1d4           -> 1d20+5 - 1d4
//! d20+2+4-1           -> 1d20+5
//! d8+1-2+3+d4         -> 1d8+2 + 1d4
//! 2d10-1+7-2d4+1-1+2  -> 2d10+6 - 2d4+2
//! ```
//!
//! Whitespace is allowed anywhere except inside a number.

use rand::Rng;

pub use die::{DiceBag, DiceBagItem, Die};
pub use parser::FormulaError;

mod die;
mod parser;

/// Parse `formula` and roll it, returning the total
pub fn roll<R: Rng + ?Sized>(formula: &str, rng: &mut R) -> Result<i64, FormulaError> {
    Ok(formula.parse::<DiceBag>()?.roll(rng))
}

/// Parse `formula` and roll it, describing the dice and the total
pub fn roll_to_str<R: Rng + ?Sized>(formula: &str, rng: &mut R) -> Result<String, FormulaError> {
    Ok(formula.parse::<DiceBag>()?.roll_to_str(rng))
}
