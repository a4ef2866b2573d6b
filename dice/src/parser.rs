use std::num::NonZeroU32;

use peg::str::LineCol;
use thiserror::Error;

use crate::{DiceBag, Die};

/// Error in parsing a dice formula
#[derive(Debug, Error)]
pub enum FormulaError {
    #[error("The dice formula is empty")]
    Empty,
    #[error("Invalid dice formula")]
    Syntax(#[from] peg::error::ParseError<LineCol>),
}

enum Sign {
    Plus,
    Minus,
}

peg::parser! {
  grammar formula() for str {
    /// A unsigned number literal
    rule number() -> u32
        = n:$(['0'..='9']+) {? n.parse().or(Err("u32")) }

    rule sign() -> Sign
        = "+" { Sign::Plus }
        / "-" { Sign::Minus }

    /// A modifier is a signed number that does not start a new die
    rule modifier() -> i64
        = s:sign() _ n:number() !(_ "d") {
            match s {
                Sign::Plus => i64::from(n),
                Sign::Minus => -i64::from(n),
            }
        }

    /// A group of dice, with all its modifiers
    rule die() -> Die
        = num_dice:number()? _ "d" _ sides:number() modifiers:(_ m:modifier() { m })* {?
            match (
                NonZeroU32::new(sides),
                modifiers.into_iter().try_fold(0i64, i64::checked_add),
            ) {
                (None, _) => Err("a positive number of sides"),
                _ if num_dice.is_some_and(|n| n > Die::MAX_DICE) => {
                    Err("a dice count up to 10000")
                }
                (_, None) => Err("a modifier in range"),
                (Some(sides), Some(modifier)) => Ok(Die::new(sides)
                    .with_num_dice(num_dice.unwrap_or(1))
                    .with_modifier(modifier)),
            }
        }

    /// A full formula, with optional space around it
    pub rule dice() -> DiceBag
        = _ first:die() rest:(_ s:sign() _ d:die() { (s, d) })* _ {
            let mut bag = DiceBag::new();
            bag.add_die(first, false);
            for (sign, die) in rest {
                bag.add_die(die, matches!(sign, Sign::Minus));
            }
            bag
        }

    /// Whitespace, discarded
    rule _ = quiet!{ [' ' | '\t' | '\r' | '\n']* }
  }
}

pub(crate) fn parse_formula(input: &str) -> Result<DiceBag, FormulaError> {
    if input.trim().is_empty() {
        return Err(FormulaError::Empty);
    }
    Ok(formula::dice(input)?)
}

#[cfg(test)]
mod tests {
    use super::{parse_formula, FormulaError};

    fn parse_test(src: &str, normal: &str) {
        match parse_formula(src) {
            Ok(parsed) => assert_eq!(parsed.to_string(), normal),
            Err(err) => panic!("{src:?} did not parse: {err}"),
        }
    }

    fn fail_test(src: &str) {
        if let Ok(parsed) = parse_formula(src) {
            panic!("{src:?} should not parse, but gave `{parsed}`")
        }
    }

    macro_rules! parse_tests {
        (
            $(
            $name:ident : $src:literal => $res:literal
            );* $(;)?
        ) => {
            $(
                #[test]
                fn $name() {
                    parse_test($src, $res)
                }
            )*
        };
    }

    macro_rules! fail_tests {
        (
            $(
            $name:ident : $src:literal
            );* $(;)?
        ) => {
            $(
                #[test]
                fn $name() {
                    fail_test($src)
                }
            )*
        };
    }

    parse_tests! {
        implicit_count: "d6" => "1d6";
        explicit_count: "1d6" => "1d6";
        many_dice: "2d10" => "2d10";
        positive_modifier: "d12+1" => "1d12+1";
        count_and_modifier: "1d4+1" => "1d4+1";
        negative_modifier: "20d6-5" => "20d6-5";
        zero_modifier: "d6+0" => "1d6";
        zero_dice: "0d6+3" => "0d6+3";
        most_dice: "10000d6" => "10000d6";
        added_die: "8d10+1d4-1" => "8d10 + 1d4-1";
        subtracted_die: "d20+5-1d4" => "1d20+5 - 1d4";
        summed_modifiers: "d20+2+4-1" => "1d20+5";
        implicit_count_after_modifiers: "d8+1-2+3+d4" => "1d8+2 + 1d4";
        long_chain: "2d10-1+7-2d4+1-1+2" => "2d10+6 - 2d4+2";
        spaces: "12 d 10 + 2" => "12d10+2";
        surrounding_spaces: "  2d6  " => "2d6";
        spaced_new_die: "2d6 + 5 d4" => "2d6 + 5d4";
        tabs: "d20\t-\td4" => "1d20 - 1d4";
    }

    fail_tests! {
        split_number: "1 2d6";
        no_sides: "2d";
        zero_sides: "d0";
        dangling_operator: "2d6+";
        missing_operator: "d6 d6";
        trailing_number: "2d6 5";
        plain_number: "5";
        uppercase_delimiter: "2D6";
        unknown_character: "2d6*2";
        sides_overflow: "d99999999999";
        too_many_dice: "10001d6";
        count_overflow: "4294967295d6";
    }

    #[test]
    fn blank_is_empty() {
        assert!(matches!(parse_formula(""), Err(FormulaError::Empty)));
        assert!(matches!(parse_formula(" \t "), Err(FormulaError::Empty)));
    }

    #[test]
    fn syntax_errors_point_to_the_input() {
        let Err(FormulaError::Syntax(err)) = parse_formula("2d6 + x") else {
            panic!("`2d6 + x` should be a syntax error")
        };
        assert_eq!(err.location.column, 7);
    }
}
