use clap::Parser;

use std::path::PathBuf;

use crate::schema::ClassKey;

/// Renders an Indian Railways unreserved (UTS) ticket card in the terminal.
/// Run with -I to adjust the card interactively.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Route ID to show.
    /// To see available routes, use the --list-routes option.
    #[arg(long, short = 'r', value_name = "ROUTE_ID")]
    pub route: Option<u32>,

    /// Class: first or second
    #[arg(long, short = 'c', value_name = "CLASS")]
    pub class: Option<ClassKey>,

    /// Number of adults
    #[arg(long, short = 'a', value_name = "NUMBER")]
    pub adults: Option<u32>,

    /// Show a return ticket (doubles the fare)
    #[arg(long = "return")]
    pub return_ticket: bool,

    /// Swap source and destination
    #[arg(long, short = 's')]
    pub swap: bool,

    /// Header accent color, e.g. #38BDF8
    #[arg(long, value_name = "HEX")]
    pub color: Option<String>,

    /// Show the edit controls on the card
    #[arg(long, short = 'e')]
    pub edit: bool,

    /// Fetch routes from this URL
    #[arg(long, value_name = "URL", conflicts_with_all = ["routes_file", "offline"])]
    pub routes_url: Option<String>,

    /// Read routes from a local JSON file
    #[arg(long, value_name = "PATH", conflicts_with = "offline")]
    pub routes_file: Option<PathBuf>,

    /// Use the built-in default route only
    #[arg(long)]
    pub offline: bool,

    /// Adjust the card with typed commands
    #[arg(long, short = 'I')]
    pub interactive: bool,

    /// Don't color the card header
    #[arg(long)]
    pub plain: bool,

    /// Print the card state as JSON instead of the card
    #[arg(long)]
    pub dump_state: bool,

    /// List available routes
    #[arg(long)]
    pub list_routes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_presets() {
        let args = Args::try_parse_from([
            "uts", "-r", "3", "--class", "first", "-a", "2", "--return", "--swap",
        ])
        .unwrap();
        assert_eq!(args.route, Some(3));
        assert_eq!(args.class, Some(ClassKey::First));
        assert_eq!(args.adults, Some(2));
        assert!(args.return_ticket);
        assert!(args.swap);
    }

    #[test]
    fn sources_conflict() {
        assert!(Args::try_parse_from(["uts", "--offline", "--routes-file", "r.json"]).is_err());
    }
}
