//! Card state and the transitions user commands drive.
//!
//! Every command becomes one [`Action`]; [`reduce`] applies it to a
//! [`TicketState`] without side effects.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::{CatalogLoad, RouteCatalog};
use crate::price::{normalize_price, total_price};
use crate::schema::{ClassKey, DEFAULT_ACCENT_COLOR, MAX_ADULTS, Route};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TicketState {
    pub route_id: u32,
    pub class: ClassKey,
    pub adults: u32,
    pub journey: bool,
    pub swapped: bool,
    pub editing: bool,
    pub accent_color: String,
    pub picker_open: bool,
    pub error: Option<String>,
}

impl Default for TicketState {
    fn default() -> Self {
        TicketState {
            route_id: 1,
            class: ClassKey::Second,
            adults: 1,
            journey: true,
            swapped: false,
            editing: false,
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            picker_open: false,
            error: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ToggleEdit,
    SelectRoute(u32),
    ToggleSwap,
    SetAdults(u32),
    SelectClass(ClassKey),
    ToggleJourney,
    SetAccentColor(String),
    TogglePicker,
    ClosePicker,
    CatalogLoaded(CatalogLoad),
    DismissError,
}

impl TicketState {
    /// Initial state for a freshly loaded catalog.
    pub fn for_load(load: &CatalogLoad) -> Self {
        TicketState {
            route_id: load.catalog.first().id,
            error: load.error.clone(),
            ..TicketState::default()
        }
    }

    /// The selected route as displayed, with the swap applied.
    pub fn current_route(&self, catalog: &RouteCatalog) -> Route {
        let route = catalog.find_or_first(self.route_id);
        if self.swapped {
            route.swapped()
        } else {
            route.clone()
        }
    }

    /// Waypoints in travel order; reversed while swapped.
    pub fn via(&self, catalog: &RouteCatalog) -> String {
        let via = &catalog.find_or_first(self.route_id).via;
        if self.swapped {
            via.split('-').rev().collect::<Vec<_>>().join("-")
        } else {
            via.clone()
        }
    }

    pub fn total_price(&self, catalog: &RouteCatalog) -> f64 {
        let route = catalog.find_or_first(self.route_id);
        total_price(
            &normalize_price(&route.price),
            self.class,
            self.adults,
            self.journey,
        )
    }
}

/// Accepts `#rgb` and `#rrggbb`.
pub fn is_valid_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => {
            (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Applies `action` to `state`. Catalog replacement is carried by the
/// action itself; the caller swaps its catalog when it sees
/// `Action::CatalogLoaded`.
///
/// Invalid input (unknown route, out-of-range adult count, malformed color)
/// leaves the state as it was.
pub fn reduce(state: &TicketState, catalog: &RouteCatalog, action: Action) -> TicketState {
    let mut next = state.clone();
    match action {
        Action::ToggleEdit => {
            next.editing = !state.editing;
            if !next.editing {
                next.picker_open = false;
            }
        }
        Action::SelectRoute(id) => match catalog.find(id) {
            Some(route) => next.route_id = route.id,
            None => warn!("no route with id {}", id),
        },
        Action::ToggleSwap => next.swapped = !state.swapped,
        Action::SetAdults(adults) => {
            if (1..=MAX_ADULTS).contains(&adults) {
                next.adults = adults;
            } else {
                warn!("adult count {} outside 1..={}", adults, MAX_ADULTS);
            }
        }
        Action::SelectClass(class) => next.class = class,
        Action::ToggleJourney => next.journey = !state.journey,
        Action::SetAccentColor(color) => {
            if is_valid_color(&color) {
                next.accent_color = color;
            } else {
                warn!("ignoring invalid color {:?}", color);
            }
        }
        Action::TogglePicker => next.picker_open = !state.picker_open,
        Action::ClosePicker => next.picker_open = false,
        Action::CatalogLoaded(load) => {
            next.error = load.error.clone();
            if load.loaded() {
                next.route_id = load.catalog.first().id;
            } else if load.catalog.find(state.route_id).is_none() {
                next.route_id = load.catalog.first().id;
            }
        }
        Action::DismissError => next.error = None,
    }
    debug!(?next, "state updated");
    next
}
