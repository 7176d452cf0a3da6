use std::path::PathBuf;

use tracing::debug;

use crate::cli::Args;
use crate::error::{Result, TicketError};
use crate::loader::RouteSource;
use crate::schema::{CardDetails, DEFAULT_ACCENT_COLOR, DEFAULT_ROUTES_URL};
use crate::state::is_valid_color;

#[derive(Debug, Clone)]
pub struct Config {
    pub source: RouteSource,
    pub accent_color: String,
    pub details: CardDetails,
}

impl Config {
    /// Reads `.env` and the environment, then applies command-line
    /// overrides.
    pub fn load(args: &Args) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(args, |key| dotenvy::var(key).ok().filter(|v| !v.is_empty()))
    }

    pub fn from_lookup<F>(args: &Args, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = if args.offline {
            RouteSource::Builtin
        } else if let Some(path) = &args.routes_file {
            RouteSource::File(path.clone())
        } else if let Some(url) = &args.routes_url {
            RouteSource::Url(url.clone())
        } else if let Some(path) = lookup("UTS_ROUTES_FILE") {
            RouteSource::File(PathBuf::from(path))
        } else {
            RouteSource::Url(
                lookup("UTS_ROUTES_URL").unwrap_or_else(|| DEFAULT_ROUTES_URL.to_string()),
            )
        };

        let accent_color = args
            .color
            .clone()
            .or_else(|| lookup("UTS_ACCENT_COLOR"))
            .unwrap_or_else(|| DEFAULT_ACCENT_COLOR.to_string());
        if !is_valid_color(&accent_color) {
            return Err(TicketError::Config(format!(
                "Invalid accent color {accent_color:?}, expected #rgb or #rrggbb"
            )));
        }

        let mut details = CardDetails::default();
        if let Some(mobile) = lookup("UTS_MOBILE") {
            if !mobile.chars().all(|c| c.is_ascii_digit()) {
                return Err(TicketError::Config("Invalid UTS_MOBILE".to_string()));
            }
            details.mobile = mobile;
        }
        if let Some(number) = lookup("UTS_NUMBER") {
            details.uts_number = number;
        }

        let config = Config {
            source,
            accent_color,
            details,
        };
        debug!(?config, "configuration loaded");
        Ok(config)
    }
}
