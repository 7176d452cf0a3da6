use std::io::{BufRead, Write};

use tracing::info;

use crate::catalog::{CatalogLoad, RouteCatalog};
use crate::clock::Clock;
use crate::schema::{CardDetails, ClassKey};
use crate::state::{Action, TicketState, reduce};
use crate::view::{RenderOptions, render_card};

static HELP: &str = "\
Commands:
  edit            toggle edit mode
  route <id>      select a route
  swap            swap source and destination
  adults <n>      set the number of adults
  class <c>       first or second
  journey         toggle journey/return
  color <hex>     set the header color, e.g. #38BDF8
  picker          show/hide preset colors
  close           hide preset colors
  retry           load the routes again
  dismiss         hide the load error
  show            print the card
  help            this text
  quit            exit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Apply(Action),
    Retry,
    Show,
    Help,
    Quit,
}

/// Parses one line of input. Blank lines re-render the card.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(name) = parts.next() else {
        return Ok(Command::Show);
    };
    let arg = parts.next();

    let need = |what: &str| arg.ok_or_else(|| format!("`{name}` needs {what}"));
    let command = match name.to_ascii_lowercase().as_str() {
        "edit" | "e" => Command::Apply(Action::ToggleEdit),
        "route" | "r" => {
            let id = need("a route id")?;
            let id = id
                .parse::<u32>()
                .map_err(|_| format!("invalid route id '{id}'"))?;
            Command::Apply(Action::SelectRoute(id))
        }
        "swap" | "s" => Command::Apply(Action::ToggleSwap),
        "adults" | "a" => {
            let n = need("a number")?;
            let n = n
                .parse::<u32>()
                .map_err(|_| format!("invalid adult count '{n}'"))?;
            Command::Apply(Action::SetAdults(n))
        }
        "class" | "c" => Command::Apply(Action::SelectClass(
            need("first or second")?.parse::<ClassKey>()?,
        )),
        "journey" | "return" | "j" => Command::Apply(Action::ToggleJourney),
        "color" => Command::Apply(Action::SetAccentColor(need("a color")?.to_string())),
        "picker" => Command::Apply(Action::TogglePicker),
        "close" => Command::Apply(Action::ClosePicker),
        "dismiss" => Command::Apply(Action::DismissError),
        "retry" => Command::Retry,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command '{other}', type `help`")),
    };
    Ok(command)
}

/// Owns everything an interactive run needs.
pub struct Session<'a> {
    pub state: TicketState,
    pub catalog: RouteCatalog,
    pub details: CardDetails,
    pub options: RenderOptions,
    pub clock: &'a dyn Clock,
    /// Loads the catalog again on `retry`.
    pub reload: Box<dyn FnMut() -> CatalogLoad + 'a>,
}

impl Session<'_> {
    pub fn render(&self) -> String {
        render_card(
            &self.state,
            &self.catalog,
            &self.details,
            self.clock,
            self.options,
        )
    }

    pub fn dispatch(&mut self, action: Action) {
        if let Action::CatalogLoaded(load) = &action {
            self.catalog = load.catalog.clone();
        }
        self.state = reduce(&self.state, &self.catalog, action);
    }

    /// Reads commands until `quit` or end of input, printing the card after
    /// every change.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> std::io::Result<()> {
        write!(output, "{}", self.render())?;
        writeln!(output, "Type `help` for commands.")?;

        for line in input.lines() {
            let line = line?;
            match parse_command(&line) {
                Ok(Command::Quit) => break,
                Ok(Command::Help) => writeln!(output, "{HELP}")?,
                Ok(Command::Show) => write!(output, "{}", self.render())?,
                Ok(Command::Retry) => {
                    info!("retrying route load");
                    let load = (self.reload)();
                    self.dispatch(Action::CatalogLoaded(load));
                    write!(output, "{}", self.render())?;
                }
                Ok(Command::Apply(action)) => {
                    let before = self.state.clone();
                    self.dispatch(action);
                    if self.state == before {
                        writeln!(output, "Nothing changed.")?;
                    } else {
                        write!(output, "{}", self.render())?;
                    }
                }
                Err(msg) => writeln!(output, "Error: {msg}")?,
            }
        }
        Ok(())
    }
}
