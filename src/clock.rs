use chrono::{Duration, Local, NaiveDateTime};

/// Source of local wall-clock time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Today as `DD/MM/YYYY`.
pub fn formatted_date(clock: &dyn Clock) -> String {
    clock.now().format("%d/%m/%Y").to_string()
}

/// The time the ticket would have been booked, `travel_minutes` ago, as `HH:MM`.
pub fn booking_time(clock: &dyn Clock, travel_minutes: u32) -> String {
    let booked = clock.now() - Duration::minutes(i64::from(travel_minutes));
    booked.format("%H:%M").to_string()
}
