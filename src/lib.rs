pub mod catalog;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod loader;
pub mod price;
pub mod schema;
pub mod session;
pub mod short_name;
pub mod state;
pub mod view;

use tracing::info;

use std::io;

use crate::cli::Args;
use crate::clock::SystemClock;
use crate::config::Config;
use crate::session::Session;
use crate::state::{Action, TicketState, reduce};
use crate::view::{RenderOptions, render_route_options};

/// Initial state: catalog defaults first, then whatever the flags preset.
pub fn initial_state(args: &Args, config: &Config, load: &catalog::CatalogLoad) -> TicketState {
    let catalog = &load.catalog;
    let mut state = TicketState {
        accent_color: config.accent_color.clone(),
        ..TicketState::for_load(load)
    };

    let mut actions = Vec::new();
    if let Some(id) = args.route {
        actions.push(Action::SelectRoute(id));
    }
    if let Some(class) = args.class {
        actions.push(Action::SelectClass(class));
    }
    if let Some(adults) = args.adults {
        actions.push(Action::SetAdults(adults));
    }
    if args.return_ticket {
        actions.push(Action::ToggleJourney);
    }
    if args.swap {
        actions.push(Action::ToggleSwap);
    }
    if args.edit {
        actions.push(Action::ToggleEdit);
    }
    for action in actions {
        state = reduce(&state, catalog, action);
    }
    state
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let config = Config::load(&args)?;
    let load = loader::load(&config.source);
    if let Some(err) = &load.error {
        eprintln!("Error: {}", err);
    }

    if args.list_routes {
        print!("{}", render_route_options(&load.catalog, load.catalog.first().id));
        return Ok(());
    }

    let state = initial_state(&args, &config, &load);
    if args.dump_state {
        println!("{}", serde_json::to_string_pretty(&state)?);
        return Ok(());
    }

    let clock = SystemClock;
    let source = config.source.clone();
    let mut session = Session {
        state,
        catalog: load.catalog,
        details: config.details,
        options: RenderOptions { ansi: !args.plain },
        clock: &clock,
        reload: Box::new(move || loader::load(&source)),
    };

    if args.interactive {
        info!("starting interactive session");
        let stdin = io::stdin();
        session.run(stdin.lock(), io::stdout())?;
    } else {
        print!("{}", session.render());
    }
    Ok(())
}
