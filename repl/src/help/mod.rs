//! Help pages

use std::io::{self, Write};

use termimad::{minimad::TextTemplate, FmtText, MadSkin};

use crate::{command::Command, render_width, NAME};

/// Print the list of commands, with a short description of each one
pub(crate) fn print_general(skin: &MadSkin, out: &mut (impl Write + ?Sized)) -> io::Result<()> {
    let template = TextTemplate::from(include_str!("general.md"));

    let mut expander = template.expander();
    expander
        .set("appname", NAME)
        .set("appversion", env!("CARGO_PKG_VERSION"))
        .set("appdescription", env!("CARGO_PKG_DESCRIPTION"));
    for command in Command::ALL {
        expander
            .sub("cmds")
            .set("cmd-name", command.name())
            .set("cmd-args", command.args())
            .set("cmd-descr", command.description());
    }

    write!(
        out,
        "{}",
        FmtText::from_text(skin, expander.expand(), Some(render_width()))
    )
}

/// Print the help page of a single command
pub(crate) fn print_command(
    command: Command,
    skin: &MadSkin,
    out: &mut (impl Write + ?Sized),
) -> io::Result<()> {
    write!(
        out,
        "{}",
        FmtText::from(skin, command.help_page(), Some(render_width()))
    )
}

#[cfg(test)]
mod tests {
    use termimad::MadSkin;

    use super::{print_command, print_general};
    use crate::command::Command;

    #[test]
    fn general_lists_every_command() {
        let mut out = vec![];
        print_general(&MadSkin::no_style(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        for command in Command::ALL {
            assert!(
                out.contains(command.name()),
                "`{}` is missing from the help:\n{out}",
                command.name()
            );
        }
    }

    #[test]
    fn every_command_has_a_page() {
        for command in Command::ALL {
            let mut out = vec![];
            print_command(command, &MadSkin::no_style(), &mut out).unwrap();
            let out = String::from_utf8(out).unwrap();
            assert!(out.contains(command.name()), "Bad help page:\n{out}");
        }
    }

    #[test]
    fn roll_page_warns_about_trailing_text() {
        let mut out = vec![];
        print_command(Command::Roll, &MadSkin::no_style(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("complete formula"), "Bad help page:\n{out}");
    }
}
