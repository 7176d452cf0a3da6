use bytes::Bytes;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use tracing::{debug, info};

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::{CatalogLoad, RouteCatalog, load_catalog, parse_routes};
use crate::error::{Result, TicketError};
use crate::schema::Route;

/// Where the route catalog comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum RouteSource {
    Url(String),
    File(PathBuf),
    /// Built-in default only; not treated as a failure.
    Builtin,
}

fn get_header() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "User-Agent",
        HeaderValue::from_static(concat!("uts/", env!("CARGO_PKG_VERSION"))),
    );
    headers.insert(
        "Accept",
        HeaderValue::from_static("application/json,text/plain;q=0.9,*/*;q=0.8"),
    );
    headers
}

pub fn build_client() -> Result<Client> {
    let policy = reqwest::redirect::Policy::limited(20);
    let client = Client::builder()
        .redirect(policy)
        .default_headers(get_header())
        .timeout(Duration::from_secs(60))
        .build()?;
    Ok(client)
}

/// One GET of `url`; non-success statuses are errors.
pub fn fetch_routes(client: &Client, url: &str) -> Result<Vec<Route>> {
    info!("Requesting routes from {}", url);
    let response = client.get(url).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(TicketError::DataLoad(format!("Failed to fetch: {status}")));
    }

    let body: Bytes = response.bytes()?;
    debug!("received {} bytes", body.len());
    let text = std::str::from_utf8(&body)
        .map_err(|e| TicketError::DataLoad(format!("response is not UTF-8: {e}")))?;
    parse_routes(text)
}

pub fn read_routes(path: &Path) -> Result<Vec<Route>> {
    info!("Reading routes from {}", path.display());
    let text = fs::read_to_string(path)?;
    parse_routes(&text)
}

/// Loads the catalog from `source`, falling back to the default route on
/// any failure.
pub fn load(source: &RouteSource) -> CatalogLoad {
    match source {
        RouteSource::Builtin => CatalogLoad {
            catalog: RouteCatalog::default(),
            error: None,
        },
        RouteSource::File(path) => load_catalog(read_routes(path)),
        RouteSource::Url(url) => load_catalog(build_client().and_then(|c| fetch_routes(&c, url))),
    }
}
