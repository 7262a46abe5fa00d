//! Deterministic patron dataset.
//!
//! The same `(count, seed)` pair always yields the same records, so paging
//! through the demo is reproducible across runs.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

use crate::model::{ExternalPatron, Gender, Status};

pub const DEFAULT_COUNT: usize = 200;
pub const DEFAULT_SEED: u64 = 42;

const FIRST_NAMES: &[&str] = &[
    "John", "Jane", "Alice", "Steven", "Peter", "Maria", "Wei", "Aisha", "Carlos", "Yuki",
    "Omar", "Priya", "Liam", "Sofia", "Noah", "Mei",
];

const LAST_NAMES: &[&str] = &[
    "Doe", "Smith", "Johnson", "Lim", "Street", "Tan", "Garcia", "Khan", "Nguyen", "Brown",
    "Silva", "Kim", "Okafor", "Rossi",
];

const COUNTRIES: &[&str] = &[
    "Singapore", "Malaysia", "Japan", "Brazil", "India", "Nigeria", "Italy", "Canada",
    "Vietnam", "Egypt",
];

const PASSPORT_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// splitmix64: tiny, seedable, good enough for fixtures.
struct SplitMix64(u64);

impl SplitMix64 {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }

    /// A moment within `days` days before `end`.
    fn moment_before(&mut self, end: NaiveDate, days: u64) -> NaiveDateTime {
        let day = end - Days::new(self.below(days.max(1)));
        let secs = self.below(86_400) as u32;
        let time = NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap_or(NaiveTime::MIN);
        day.and_time(time)
    }

    fn passport(&mut self) -> String {
        (0..10)
            .map(|_| *self.pick(PASSPORT_CHARS) as char)
            .collect()
    }
}

/// The day every generated date is measured back from.
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap_or(NaiveDate::MIN)
}

/// Generates `count` patrons with FormIDs `1..=count`.
pub fn generate(count: usize, seed: u64) -> Vec<ExternalPatron> {
    let mut rng = SplitMix64(seed);
    let today = reference_date();
    let adult = today - Days::new(18 * 365);

    (1..=count)
        .map(|index| {
            let created = rng.moment_before(today, 7);
            let status = *rng.pick(&Status::ALL);
            let first = *rng.pick(FIRST_NAMES);
            let last = *rng.pick(LAST_NAMES);

            let mut patron =
                ExternalPatron::new(index as u32, created, status).with_name(first, last);
            patron.nationality = Some(rng.pick(COUNTRIES).to_string());
            patron.gender = Some(*rng.pick(&Gender::ALL));
            patron.date_of_birth = Some(rng.moment_before(adult, 60 * 365).date());
            patron.passport_number = Some(rng.passport());
            patron.date_joined = Some(rng.moment_before(today, 10 * 365));
            patron
        })
        .collect()
}
