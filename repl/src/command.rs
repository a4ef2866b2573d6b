//! The commands known by the shell

use phf::phf_map;

/// A command of the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Command {
    Roll,
    Quit,
    Help,
}

static COMMANDS: phf::Map<&'static str, Command> = phf_map! {
    "roll" => Command::Roll,
    "quit" => Command::Quit,
    "help" => Command::Help,
};

impl Command {
    /// All the commands, in the order they are listed in the help
    pub const ALL: [Self; 3] = [Self::Roll, Self::Help, Self::Quit];

    /// Find the command with the given name
    ///
    /// Names are case sensitive.
    pub fn named(name: &str) -> Option<Self> {
        COMMANDS.get(name).copied()
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Roll => "roll",
            Self::Quit => "quit",
            Self::Help => "help",
        }
    }

    pub(crate) const fn args(self) -> &'static str {
        match self {
            Self::Roll => "<EXPR>",
            Self::Quit => "",
            Self::Help => "[CMD]",
        }
    }

    pub(crate) const fn description(self) -> &'static str {
        match self {
            Self::Roll => "Roll a dice formula",
            Self::Quit => "Exit the shell",
            Self::Help => "Get help",
        }
    }

    pub(crate) const fn help_page(self) -> &'static str {
        match self {
            Self::Roll => include_str!("help/roll.md"),
            Self::Quit => include_str!("help/quit.md"),
            Self::Help => include_str!("help/help.md"),
        }
    }
}

#[cfg(test)]
#[test]
fn all_names_roundtrip() {
    for command in Command::ALL {
        let name = command.name();
        let named = Command::named(name).unwrap_or_else(|| {
            panic!("Command `{command:?}` gave `{name}` as name, but `named` did not recognize it")
        });
        assert_eq!(command, named, "Command `{name}` did not roundtrip")
    }
}

#[cfg(test)]
#[test]
fn names_are_case_sensitive() {
    assert_eq!(Command::named("ROLL"), None);
    assert_eq!(Command::named("Quit"), None);
}
