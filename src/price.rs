use crate::schema::{ClassKey, Price, PriceTable};

/// Per-class view of a route's fare.
///
/// Legacy records carry a single number, which is used for both classes.
/// No fare calculation happens here.
pub fn normalize_price(price: &Price) -> PriceTable {
    match *price {
        Price::Flat(p) => PriceTable {
            first: p,
            second: p,
        },
        Price::PerClass(table) => table,
    }
}

pub fn total_price(prices: &PriceTable, class: ClassKey, adults: u32, journey: bool) -> f64 {
    let multiplier = if journey { 1.0 } else { 2.0 };
    prices.get(class) * f64::from(adults) * multiplier
}

/// `₹12.50/-`
pub fn format_fare(amount: f64) -> String {
    format!("₹{:.2}/-", amount)
}
