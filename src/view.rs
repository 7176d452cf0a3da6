use crate::catalog::RouteCatalog;
use crate::clock::{Clock, booking_time, formatted_date};
use crate::price::{format_fare, normalize_price};
use crate::schema::{CardDetails, ClassKey, MAX_ADULTS, PRESET_COLORS, Route, Station};
use crate::short_name::short_name;
use crate::state::TicketState;

static RULE: &str = "------------------------------------------------";
static MARQUEE: &str = "IR Unreserved Ticketing";
static HANDSET_ADVISORY: &str = "It is recommended not to perform factory reset or change your handset whenever you are having valid ticket in the mobile.";
static EMERGENCY: &str =
    "FOR MEDICAL EMERGENCY | FIRST AID, CONTACT TICKET CHECKING STAFF | GUARD OR DIAL 139";
static FOOTER: &str = "Centre for Railway Information Systems (CRIS)";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Paint the card header with the accent color using ANSI escapes.
    pub ansi: bool,
}

fn line(out: &mut String, text: impl AsRef<str>) {
    out.push_str(text.as_ref());
    out.push('\n');
}

/// One line per route: `NAVADE → PANVEL (v.KLMC) | ₹25/5`.
pub fn route_option(route: &Route) -> String {
    let prices = normalize_price(&route.price);
    format!(
        "{} → {} (v.{}) | ₹{}/{}",
        short_name(&route.source.name_english),
        short_name(&route.destination.name_english),
        route.via,
        prices.first,
        prices.second
    )
}

pub fn render_route_options(catalog: &RouteCatalog, selected: u32) -> String {
    let mut out = String::new();
    for route in catalog.routes() {
        let marker = if route.id == selected { '*' } else { ' ' };
        line(
            &mut out,
            format!("{} {:>3}: {}", marker, route.id, route_option(route)),
        );
    }
    out
}

fn accent_escape(color: &str) -> Option<String> {
    let hex = color.strip_prefix('#')?;
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => return None,
    };
    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    Some(format!(
        "\x1b[48;2;{};{};{}m\x1b[30m",
        channel(0)?,
        channel(2)?,
        channel(4)?
    ))
}

fn station_lines(out: &mut String, station: &Station) {
    line(out, format!("({}) {}", station.code, station.name_hindi));
    line(out, format!("    {}", station.name_english));
    line(out, format!("    {}", station.name_marathi));
}

fn mode_label(journey: bool) -> &'static str {
    if journey { "JOURNEY" } else { "RETURN" }
}

fn edit_controls(out: &mut String, state: &TicketState, catalog: &RouteCatalog) {
    line(out, "[route] select with `route <id>`:");
    out.push_str(&render_route_options(catalog, state.route_id));
    line(
        out,
        format!("[{}] Swap", if state.swapped { 'x' } else { ' ' }),
    );
    if let Some(err) = &state.error {
        line(out, format!("! {} (type `retry` to try again)", err));
    }
    let classes: Vec<String> = ClassKey::ALL
        .iter()
        .map(|c| format!("{} / {} / {}", c.hindi(), c.english(), c.short()))
        .collect();
    line(out, format!("[class] {}", classes.join(" | ")));
    line(out, format!("[adults] 1..={}", MAX_ADULTS));
    if state.picker_open {
        line(out, format!("[color] presets: {}", PRESET_COLORS.join(" ")));
    }
}

/// Renders the ticket card as text.
pub fn render_card(
    state: &TicketState,
    catalog: &RouteCatalog,
    details: &CardDetails,
    clock: &dyn Clock,
    options: RenderOptions,
) -> String {
    let route = state.current_route(catalog);
    let date = formatted_date(clock);

    let mut header = String::new();
    line(&mut header, "HAPPY JOURNEY");
    if state.editing {
        line(&mut header, format!("[accent {}]", state.accent_color));
    }
    line(&mut header, RULE);
    line(
        &mut header,
        format!("{:^16}{:^16}{:>16}", "", mode_label(state.journey), date),
    );
    line(
        &mut header,
        format!(
            "{:<24}{:>24}",
            format_fare(state.total_price(catalog)),
            details.mobile
        ),
    );
    line(&mut header, format!("UTS No: {}", details.uts_number));
    line(&mut header, RULE);

    let mut out = String::new();
    line(&mut out, format!("{:^48}", MARQUEE));
    match options.ansi.then(|| accent_escape(&state.accent_color)).flatten() {
        Some(escape) => {
            for text in header.lines() {
                line(&mut out, format!("{escape}{text:<48}\x1b[0m"));
            }
        }
        None => out.push_str(&header),
    }

    if state.editing {
        edit_controls(&mut out, state, catalog);
    }

    station_lines(&mut out, &route.source);
    station_lines(&mut out, &route.destination);
    line(&mut out, format!("Adult: {}   Child: 0", state.adults));
    line(
        &mut out,
        format!("CLASS: {:<12}TRAIN TYPE: साधारण", state.class.hindi()),
    );
    line(
        &mut out,
        format!("       {:<12}            ORDINARY", state.class.english()),
    );
    line(
        &mut out,
        format!("       {:<12}            साधारण", state.class.short()),
    );
    line(&mut out, RULE);
    line(&mut out, format!("via {}", state.via(catalog)));
    line(&mut out, RULE);
    line(&mut out, format!("SAC: {} IR: {}", details.sac, details.gstin));
    line(&mut out, "Journey Should Commence within 1 hour");
    line(
        &mut out,
        format!("{:<24}Distance: {}", details.serial, route.distance),
    );
    line(
        &mut out,
        format!(
            "Booking Time: {} {}",
            date,
            booking_time(clock, route.travel_time)
        ),
    );
    line(&mut out, RULE);
    line(&mut out, HANDSET_ADVISORY);
    line(&mut out, EMERGENCY);
    line(&mut out, "[ OPEN QR CODE ]");
    line(
        &mut out,
        format!(
            "[ NEXT TRAINS TO {} ]",
            route.destination.name_english.to_uppercase()
        ),
    );
    line(&mut out, "[ OK ]");
    line(&mut out, format!("{:^48}", FOOTER));
    out
}
