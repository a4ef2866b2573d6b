//! The command loop state and the dispatch of a single line

use std::io::{self, Write};

use termimad::MadSkin;
use tracing::{debug, trace};

use crate::{command::Command, evaluator::Evaluator, help, print_err, Graphic};

/// The prompt used if none is configured
pub const DEFAULT_PROMPT: &str = "dndcm> ";

/// State of the command loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum State {
    #[default]
    Running,
    /// Terminal: reached only through `quit`
    Stopped,
}

/// A line split into command and argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ParsedLine<'l> {
    command: &'l str,
    arg: &'l str,
    /// The whole line, trimmed
    line: &'l str,
}

/// Split a line into command and argument
///
/// Returns `None` for blank lines.
fn parse_line(line: &str) -> Option<ParsedLine> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if let Some(topic) = line.strip_prefix('?') {
        return Some(ParsedLine {
            command: Command::Help.name(),
            arg: topic.trim(),
            line,
        });
    }
    let name_end = line
        .find(|ch: char| !(ch.is_ascii_alphanumeric() || ch == '_'))
        .unwrap_or(line.len());
    let (command, arg) = line.split_at(name_end);
    Some(ParsedLine {
        command,
        arg: arg.trim(),
        line,
    })
}

/// The shell: prompt, loop state and the evaluator used by `roll`
pub struct Shell<E> {
    prompt: String,
    state: State,
    graphic: Graphic,
    skin: MadSkin,
    evaluator: E,
}

impl<E> Shell<E> {
    pub fn new(evaluator: E) -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_owned(),
            state: State::Running,
            graphic: Graphic::None,
            skin: Graphic::None.skin(),
            evaluator,
        }
    }

    #[must_use]
    pub fn with_prompt(self, prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..self
        }
    }

    #[must_use]
    pub fn with_graphic(self, graphic: Graphic) -> Self {
        Self {
            graphic,
            skin: graphic.skin(),
            ..self
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub const fn state(&self) -> State {
        self.state
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.state, State::Running)
    }

    pub const fn graphic(&self) -> Graphic {
        self.graphic
    }

    pub const fn skin(&self) -> &MadSkin {
        &self.skin
    }

    pub const fn evaluator(&self) -> &E {
        &self.evaluator
    }
}

impl<E: Evaluator> Shell<E> {
    /// Interpret a single line of input, writing any output to `out`
    pub fn execute(&mut self, line: &str, out: &mut (impl Write + ?Sized)) -> io::Result<()> {
        let Some(ParsedLine { command, arg, line }) = parse_line(line) else {
            return self.empty_line();
        };
        debug!(command, arg, "Dispatching");
        match Command::named(command) {
            Some(Command::Roll) => self.roll(arg, out),
            Some(Command::Quit) => self.quit(arg),
            Some(Command::Help) => self.help(arg, out),
            None => self.default(line, out),
        }
    }

    fn roll(&mut self, expression: &str, out: &mut (impl Write + ?Sized)) -> io::Result<()> {
        match self.evaluator.evaluate(expression) {
            Ok(result) => writeln!(out, "{result}"),
            Err(err) => {
                debug!(expression, error = %err, "Roll failed");
                print_err::<false>(self.graphic, &self.skin, out, &err)
            }
        }
    }

    fn quit(&mut self, _arg: &str) -> io::Result<()> {
        self.state = State::Stopped;
        Ok(())
    }

    fn help(&mut self, topic: &str, out: &mut (impl Write + ?Sized)) -> io::Result<()> {
        if topic.is_empty() {
            return help::print_general(&self.skin, out);
        }
        match Command::named(topic) {
            Some(command) => help::print_command(command, &self.skin, out),
            None => writeln!(out, "*** No help on {topic}"),
        }
    }

    /// Blank lines do nothing, in particular they do not repeat the last command
    fn empty_line(&mut self) -> io::Result<()> {
        trace!("Empty line");
        Ok(())
    }

    fn default(&mut self, line: &str, out: &mut (impl Write + ?Sized)) -> io::Result<()> {
        writeln!(out, "*** Unknown syntax: {line}")
    }
}
