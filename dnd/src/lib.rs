//! Vocabulary of a 5e character sheet

use std::str::FromStr;

use derive_more::derive::{Display, Error};

/// One of the six ability scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// All the abilities, in the order they appear on the sheet
    pub const ALL: [Self; 6] = [
        Self::Strength,
        Self::Dexterity,
        Self::Constitution,
        Self::Intelligence,
        Self::Wisdom,
        Self::Charisma,
    ];
}

#[derive(Debug, Display, Error)]
#[display("Unknown ability {_0:?}")]
pub struct UnknownAbility(#[error(not(source))] String);

impl FromStr for Ability {
    type Err = UnknownAbility;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|ability| ability.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownAbility(s.to_owned()))
    }
}

/// A named proficiency, like a skill or a tool
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("{name}")]
pub struct Proficiency {
    name: String,
}

impl Proficiency {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::{Ability, Proficiency};

    #[test]
    fn abilities_are_title_case() {
        let names: Vec<_> = Ability::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(
            names,
            [
                "Strength",
                "Dexterity",
                "Constitution",
                "Intelligence",
                "Wisdom",
                "Charisma"
            ]
        );
    }

    #[test]
    fn abilities_roundtrip() {
        for ability in Ability::ALL {
            assert_eq!(ability.to_string().parse::<Ability>().unwrap(), ability);
        }
        assert_eq!("wisdom".parse::<Ability>().unwrap(), Ability::Wisdom);
        assert_eq!(" CHARISMA ".parse::<Ability>().unwrap(), Ability::Charisma);
    }

    #[test]
    fn unknown_ability() {
        let err = "Luck".parse::<Ability>().unwrap_err();
        assert_eq!(err.to_string(), r#"Unknown ability "Luck""#);
    }

    #[test]
    fn proficiency_displays_its_name() {
        let proficiency = Proficiency::new("Sleight of Hand");
        assert_eq!(proficiency.name(), "Sleight of Hand");
        assert_eq!(proficiency.to_string(), "Sleight of Hand");
    }
}
