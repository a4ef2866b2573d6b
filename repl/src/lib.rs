use std::{
    borrow::Cow,
    error::Error,
    io::{self, stderr, stdin, stdout, BufRead, Write},
    path::{Path, PathBuf},
};

use chrono::Local;
pub use clap::Parser as ClapParser;
use clap::ValueEnum;
use derive_more::derive::{Display, Error, From};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use reedline::{
    FileBackedHistory, Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus,
    Reedline, ReedlineError, Signal,
};
use serde::{Deserialize, Serialize};
use termimad::{
    minimad::{self, Compound, Line, Text},
    terminal_size, Alignment, FmtText, MadSkin,
};
use tracing::info;

pub use command::Command;
pub use evaluator::{DiceEvaluator, EvalError, Evaluator};
pub use logging::LoggingSetupError;
pub use setup::Setup;
pub use shell::{Shell, State, DEFAULT_PROMPT};

mod command;
mod evaluator;
mod help;
mod logging;
mod setup;
mod shell;

/// Name of the shell, as shown to the user
pub(crate) const NAME: &str = "dndcm";

/// How many lines are kept in the history file
const HISTORY_CAPACITY: usize = 1000;

#[derive(Debug, Clone, ClapParser)]
#[command(name = NAME, version, about, long_about = None)]
pub struct ReplCli {
    /// File for the default options for the REPL
    #[clap(long = "setup", short = 'S')]
    file_setup: Option<PathBuf>,

    #[clap(flatten)]
    cli_setup: Setup,

    /// If `run` is given, do not close after command execution.
    #[clap(long, short)]
    interactive: bool,

    #[clap(
        short,
        long,
        num_args = ..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    /// Command to run. If missing, an interactive prompt is open
    run: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, Display, ValueEnum, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Graphic {
    /// No graphic
    #[display("none")]
    None,
    /// Only ascii graphic
    #[display("ascii")]
    Ascii,
    /// Fancy graphic, with emojis
    #[display("fancy")]
    Fancy,
}
impl Default for Graphic {
    fn default() -> Self {
        if atty::is(atty::Stream::Stdout) {
            Self::Fancy
        } else {
            Self::None
        }
    }
}
impl Graphic {
    const fn banner(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Ascii => concat!(
                "Welcome to dndcm ",
                env!("CARGO_PKG_VERSION"),
                "\n\nUse help for the list of commands, and quit or Ctrl+D to exit."
            ),
            Self::Fancy => concat!(
                "🎲🐉 ~ ***Welcome to dndcm ",
                env!("CARGO_PKG_VERSION"),
                "*** ~ 🎲🐉\n\nUse `help` for the list of commands, and `quit` or `Ctrl+D` to exit."
            ),
        }
    }
    const fn bye(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Ascii => "\nSee you at the next game!",
            Self::Fancy => "\n🎲🐉 ~ *See you at the next game!* ~ 🎲🐉",
        }
    }

    pub(crate) fn skin(self) -> MadSkin {
        let mut skin = match self {
            Self::None | Self::Ascii => MadSkin::no_style(),
            Self::Fancy => MadSkin::default(),
        };
        // Disabling centered text, I find it confusing
        skin.headers[0].align = Alignment::Left;
        skin
    }
}

struct ShellPrompt {
    prompt: String,
    graphic: Graphic,
}
impl Prompt for ShellPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        self.prompt.as_str().into()
    }

    fn render_prompt_right(&self) -> Cow<str> {
        match self.graphic {
            Graphic::Fancy => Local::now().format("%I:%M:%S %p").to_string().into(),
            Graphic::None | Graphic::Ascii => "".into(),
        }
    }

    fn render_prompt_indicator(&self, prompt_mode: PromptEditMode) -> Cow<str> {
        // the prompt already carries its own indicator
        match prompt_mode {
            PromptEditMode::Custom(str) => format!("({str}) ").into(),
            _ => "".into(),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        "... ".into()
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<str> {
        // Copying reedline DefaultPrompt
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        format!("({prefix}reverse-search: {}) ", history_search.term).into()
    }
}

#[derive(Debug, Display, Error, From)]
pub enum ReplFatalError {
    #[display("Error during IO")]
    IO(io::Error),
    #[display("Error during extraction of the setup")]
    Setup(figment::Error),
    #[display("Error during the logging setup")]
    Logging(LoggingSetupError),
    #[display("Cannot open the history file")]
    History(ReedlineError),
    #[display("Interrupted.")]
    Interrupted,
}

/// Run the REPL
pub fn repl(
    ReplCli {
        file_setup,
        cli_setup,
        interactive,
        run,
    }: &ReplCli,
) -> Result<(), ReplFatalError> {
    let (graphic, err) = match Setup::extract_setups(file_setup.as_deref(), cli_setup) {
        Ok(setup) => match repl_with_setup(*interactive, run.as_deref(), &setup) {
            Ok(()) => return Ok(()),
            Err(err) => (setup.graphic.unwrap_or_default(), err),
        },
        Err(err) => (Graphic::default(), err.into()),
    };

    // the error is returned anyway, nothing to do if it cannot be printed
    let _ = print_err::<true>(graphic, &graphic.skin(), &mut stderr().lock(), &err);

    Err(err)
}

fn repl_with_setup(
    interactive: bool,
    run: Option<&[String]>,
    setup: &Setup,
) -> Result<(), ReplFatalError> {
    logging::setup_logging(setup.logging())?;

    let mut shell = dice_shell(setup);
    let graphic = shell.graphic();
    info!(%graphic, seeded = setup.seed.is_some(), "Shell started");

    if let Some(run) = run {
        if !run_command(&mut shell, run, interactive, &mut stdout())? {
            return Ok(());
        }
    }

    print_markdown(&shell, graphic.banner());

    if atty::is(atty::Stream::Stdin) {
        interactive_repl(&mut shell, setup.history.as_deref())?;
    } else {
        detached_repl(&mut shell, stdin().lock(), &mut stdout())?;
    }

    print_markdown(&shell, graphic.bye());

    info!(state = ?shell.state(), "Shell closed");
    Ok(())
}

/// Build the dice shell described by the setup
fn dice_shell(setup: &Setup) -> Shell<DiceEvaluator<Xoshiro256PlusPlus>> {
    // Identify the default graphic if not given
    let graphic = setup.graphic.unwrap_or_default();

    let rng = match setup.seed {
        Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
        None => Xoshiro256PlusPlus::from_entropy(),
    };
    let shell = Shell::new(DiceEvaluator::new(rng)).with_graphic(graphic);
    match &setup.prompt {
        Some(prompt) => shell.with_prompt(prompt.clone()),
        None => shell,
    }
}

/// Execute the command given with `--run`
///
/// Returns `true` if the shell must stay open afterwards.
pub fn run_command<E: Evaluator>(
    shell: &mut Shell<E>,
    run: &[String],
    interactive: bool,
    out: &mut impl Write,
) -> io::Result<bool> {
    // joining of the shell arguments
    shell.execute(&run.join(" "), out)?;
    Ok(interactive && shell.is_running())
}

fn print_markdown<E>(shell: &Shell<E>, text: &str) {
    if !text.is_empty() {
        shell.skin().print_text(text);
    }
}

/// Run the REPL in interactive mode
pub fn interactive_repl<E: Evaluator>(
    shell: &mut Shell<E>,
    history: Option<&Path>,
) -> Result<(), ReplFatalError> {
    // Creating the editor
    let mut line_editor = Reedline::create();
    if let Some(history) = history {
        line_editor = line_editor.with_history(Box::new(FileBackedHistory::with_file(
            HISTORY_CAPACITY,
            history.to_owned(),
        )?));
    }
    let prompt = ShellPrompt {
        prompt: shell.prompt().to_owned(),
        graphic: shell.graphic(),
    };
    // REPL loop
    while shell.is_running() {
        match line_editor.read_line(&prompt)? {
            Signal::Success(line) => shell.execute(&line, &mut stdout())?,
            Signal::CtrlD => break,
            Signal::CtrlC => return Err(ReplFatalError::Interrupted),
        }
    }
    Ok(())
}

/// Run the REPL in detached mode (input from a stream)
pub fn detached_repl<E: Evaluator>(
    shell: &mut Shell<E>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), ReplFatalError> {
    // REPL loop
    for line in input.lines() {
        let line = line?;
        if shell.graphic() != Graphic::None {
            writeln!(out, "{}{line}", shell.prompt())?;
        }
        shell.execute(&line, &mut *out)?;
        if !shell.is_running() {
            break;
        }
    }
    Ok(())
}

/// Width used to render markdown
pub(crate) fn render_width() -> usize {
    terminal_size().0 as _
}

/// Print an error, with the chain of its causes
pub(crate) fn print_err<const FATAL: bool>(
    graphic: Graphic,
    skin: &MadSkin,
    out: &mut (impl Write + ?Sized),
    error: &dyn Error,
) -> io::Result<()> {
    let message = error.to_string();
    let mut causes = vec![];
    let mut source = error.source();
    while let Some(current) = source {
        causes.push(current.to_string());
        source = current.source();
    }

    let mut compounds = vec![];
    if graphic == Graphic::Fancy {
        compounds.push(Compound::raw_str(if FATAL { "🛑 " } else { "🚨 " }).bold());
    }
    compounds.push(Compound::raw_str("Error: ").bold());
    compounds.append(&mut minimad::parse_inline(&message).compounds);
    let mut text = Text {
        lines: vec![Line::new_paragraph(compounds)],
    };

    if !causes.is_empty() {
        text.lines.push(Line::raw_str(""));
        text.lines.push(Line::new_paragraph(vec![
            Compound::raw_str("Caused by:").italic()
        ]));
        for cause in &causes {
            text.lines.push(Line::new_list_item(
                1,
                minimad::parse_inline(cause).compounds,
            ));
        }
    }

    write!(
        out,
        "{}",
        FmtText::from_text(skin, text, Some(render_width()))
    )
}
