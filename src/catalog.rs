use std::collections::HashSet;

use tracing::{debug, warn};

use crate::error::{Result, TicketError};
use crate::schema::{Route, default_route};

pub static LOAD_FAILURE_MESSAGE: &str = "Failed to load data. Showing default routes.";

/// The routes the card can show. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteCatalog {
    routes: Vec<Route>,
}

impl Default for RouteCatalog {
    fn default() -> Self {
        RouteCatalog {
            routes: vec![default_route()],
        }
    }
}

impl RouteCatalog {
    /// Builds a catalog, rejecting empty lists and duplicate ids.
    pub fn new(routes: Vec<Route>) -> Result<Self> {
        if routes.is_empty() {
            return Err(TicketError::DataLoad("route list is empty".to_string()));
        }

        let mut seen = HashSet::new();
        for route in &routes {
            if !seen.insert(route.id) {
                return Err(TicketError::DataLoad(format!(
                    "duplicate route id {}",
                    route.id
                )));
            }
        }

        Ok(RouteCatalog { routes })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn first(&self) -> &Route {
        &self.routes[0]
    }

    pub fn find(&self, id: u32) -> Option<&Route> {
        self.routes.iter().find(|route| route.id == id)
    }

    /// The route with `id`, or the first route when there is none.
    pub fn find_or_first(&self, id: u32) -> &Route {
        self.find(id).unwrap_or_else(|| self.first())
    }
}

/// Result of one catalog load, after the fallback policy has been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogLoad {
    pub catalog: RouteCatalog,
    /// User-facing message when the default catalog is shown because loading failed.
    pub error: Option<String>,
}

impl CatalogLoad {
    pub fn fallback() -> Self {
        CatalogLoad {
            catalog: RouteCatalog::default(),
            error: Some(LOAD_FAILURE_MESSAGE.to_string()),
        }
    }

    pub fn loaded(&self) -> bool {
        self.error.is_none()
    }
}

fn malformed(msg: &str) -> TicketError {
    TicketError::DataLoad(msg.to_string())
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Skips whitespace and `//` / `/* */` comments.
fn skip_trivia(mut text: &str) -> Result<&str> {
    loop {
        text = text.trim_start();
        if let Some(rest) = text.strip_prefix("//") {
            text = rest.find('\n').map_or("", |i| &rest[i + 1..]);
        } else if let Some(rest) = text.strip_prefix("/*") {
            let end = rest
                .find("*/")
                .ok_or_else(|| malformed("unterminated comment"))?;
            text = &rest[end + 2..];
        } else {
            return Ok(text);
        }
    }
}

fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    (!rest.starts_with(is_ident_char)).then_some(rest)
}

/// Skips an `export default` or `export const name[: Type] =` wrapper.
/// Text without a leading `export` is returned as is.
fn strip_export(text: &str) -> Result<&str> {
    let Some(rest) = strip_keyword(text, "export") else {
        return Ok(text);
    };
    let rest = rest.trim_start();
    if let Some(rest) = strip_keyword(rest, "default") {
        return Ok(rest);
    }

    let rest = strip_keyword(rest, "const")
        .ok_or_else(|| malformed("expected `export const` or `export default`"))?
        .trim_start();
    let name_len = rest
        .find(|c: char| !is_ident_char(c))
        .unwrap_or(rest.len());
    if name_len == 0 || rest.starts_with(|c: char| c.is_ascii_digit()) {
        return Err(malformed("expected a binding name after `export const`"));
    }

    let mut rest = rest[name_len..].trim_start();
    if let Some(annotation) = rest.strip_prefix(':') {
        let end = annotation
            .find('=')
            .ok_or_else(|| malformed("expected `=` after type annotation"))?;
        let plain_type = annotation[..end]
            .chars()
            .all(|c| is_ident_char(c) || c.is_whitespace() || "[]<>,.|".contains(c));
        if !plain_type {
            return Err(malformed("unsupported type annotation"));
        }
        rest = &annotation[end..];
    }
    rest.strip_prefix('=')
        .ok_or_else(|| malformed("expected `=` in export"))
}

/// Parses route data strictly as data.
///
/// Accepts a bare JSON array, or one exported from a script module as
/// `export default [...]` or `export const routes[: Type] = [...];`.
/// Comments and whitespace may surround it; any other content is rejected.
pub fn parse_routes(text: &str) -> Result<Vec<Route>> {
    let rest = skip_trivia(strip_export(skip_trivia(text)?)?)?;
    if !rest.starts_with('[') {
        return Err(malformed("no route array found in payload"));
    }

    let mut stream = serde_json::Deserializer::from_str(rest).into_iter::<Vec<Route>>();
    let routes = match stream.next() {
        Some(routes) => routes?,
        None => return Err(malformed("no route array found in payload")),
    };

    let tail = skip_trivia(&rest[stream.byte_offset()..])?;
    let tail = tail.strip_prefix(';').unwrap_or(tail);
    if !skip_trivia(tail)?.is_empty() {
        return Err(malformed("unexpected content after route array"));
    }

    debug!("parsed {} route records", routes.len());
    Ok(routes)
}

/// Applies the fallback policy to a fetch outcome: any error, or data that
/// doesn't form a valid catalog, yields the default catalog plus a message.
pub fn load_catalog(fetched: Result<Vec<Route>>) -> CatalogLoad {
    match fetched.and_then(RouteCatalog::new) {
        Ok(catalog) => CatalogLoad {
            catalog,
            error: None,
        },
        Err(err) => {
            warn!("using default routes: {}", err);
            CatalogLoad::fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Price, PriceTable};

    const TWO_ROUTES: &str = r#"[
        {
            "id": 7,
            "source": {"stationCode": "S", "stationNameHindi": "वाशी", "stationNameEnglish": "VASHI", "stationNameMarathi": "वाशी"},
            "destination": {"stationCode": "D", "stationNameHindi": "छ शिवाजी महा ट", "stationNameEnglish": "C SHIVAJI MAH T", "stationNameMarathi": "छ शिवाजी महा ट"},
            "price": 15,
            "via": "KRLA-SION",
            "distance": "27 km",
            "travelTime": 55
        },
        {
            "id": 8,
            "source": {"stationCode": "S", "stationNameHindi": "पनवेल", "stationNameEnglish": "PANVEL", "stationNameMarathi": "पनवेल"},
            "destination": {"stationCode": "D", "stationNameHindi": "ठाणे", "stationNameEnglish": "THANE", "stationNameMarathi": "ठाणे"},
            "price": {"FIRST": 145, "SECOND": 15},
            "via": "JNJ",
            "distance": "34 km",
            "travelTime": 60
        }
    ]"#;

    #[test]
    fn parses_plain_json_array() {
        let routes = parse_routes(TWO_ROUTES).unwrap();
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].price, Price::Flat(15.0));
        assert_eq!(
            routes[1].price,
            Price::PerClass(PriceTable {
                first: 145.0,
                second: 15.0
            })
        );
        assert_eq!(routes[1].travel_time, 60);
    }

    #[test]
    fn parses_module_wrapped_array() {
        let text = format!("export const stationRoutes = {TWO_ROUTES};\n");
        assert_eq!(parse_routes(&text).unwrap().len(), 2);
    }

    #[test]
    fn parses_typed_and_default_exports() {
        let typed = format!("export const stationRoutes: Route[] = {TWO_ROUTES};");
        assert_eq!(parse_routes(&typed).unwrap().len(), 2);

        let generic = format!("export const stationRoutes: Array<Route> = {TWO_ROUTES}");
        assert_eq!(parse_routes(&generic).unwrap().len(), 2);

        let default = format!("export default {TWO_ROUTES};");
        assert_eq!(parse_routes(&default).unwrap().len(), 2);
    }

    #[test]
    fn comments_around_array_are_ignored() {
        let text = format!(
            "// station routes [generated]\n/* v2 */ export const routes = {TWO_ROUTES}; // see [docs]\n"
        );
        assert_eq!(parse_routes(&text).unwrap().len(), 2);
        assert!(parse_routes("[] /* open").is_err());
    }

    #[test]
    fn rejects_code_around_array() {
        let trailing = format!("{TWO_ROUTES}; fetch('https://evil.example');");
        assert!(parse_routes(&trailing).is_err());

        let wrapped = format!("export const routes = load({TWO_ROUTES});");
        assert!(parse_routes(&wrapped).is_err());

        let typed = format!("export const routes: ReturnType<typeof f()> = {TWO_ROUTES};");
        assert!(parse_routes(&typed).is_err());

        assert!(parse_routes(&format!("const routes = {TWO_ROUTES};")).is_err());
        assert!(parse_routes(&format!("export let routes = {TWO_ROUTES};")).is_err());
    }

    #[test]
    fn rejects_script_content() {
        let text = "(() => { fetch('https://evil.example'); return []; })()";
        assert!(parse_routes(text).is_err());
        assert!(parse_routes("[{id: 1}]").is_err());
        assert!(parse_routes("no array here").is_err());
    }

    #[test]
    fn rejects_price_without_both_classes() {
        let text = TWO_ROUTES.replace(r#"{"FIRST": 145, "SECOND": 15}"#, r#"{"FIRST": 145}"#);
        assert!(parse_routes(&text).is_err());
    }

    #[test]
    fn catalog_rejects_duplicates_and_empty() {
        let mut routes = parse_routes(TWO_ROUTES).unwrap();
        routes[1].id = 7;
        assert!(RouteCatalog::new(routes).is_err());
        assert!(RouteCatalog::new(Vec::new()).is_err());
    }

    #[test]
    fn lookup_falls_back_to_first() {
        let catalog = RouteCatalog::new(parse_routes(TWO_ROUTES).unwrap()).unwrap();
        assert_eq!(catalog.find_or_first(8).id, 8);
        assert_eq!(catalog.find_or_first(99).id, 7);
        assert!(catalog.find(99).is_none());
    }

    #[test]
    fn failed_load_uses_default_route() {
        let load = load_catalog(Err(TicketError::DataLoad("offline".to_string())));
        assert!(!load.loaded());
        assert_eq!(load.error.as_deref(), Some(LOAD_FAILURE_MESSAGE));
        assert_eq!(load.catalog.routes(), &[default_route()]);

        let load = load_catalog(Ok(Vec::new()));
        assert!(!load.loaded());
    }

    #[test]
    fn successful_load_clears_error() {
        let load = load_catalog(parse_routes(TWO_ROUTES));
        assert!(load.loaded());
        assert_eq!(load.catalog.first().id, 7);
    }
}
