use chrono::NaiveDate;

pub const MAGIC_ENERGY_MIN: u32 = 10;
pub const MAGIC_ENERGY_MAX: u32 = 100;
pub const LUCK_INDEX_MIN: u32 = 1;
pub const LUCK_INDEX_MAX: u32 = 100;

/// Features capped at one randomized computation per user per calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    MagicEnergy,
    LuckIndex,
    DailyRitual,
}

/// A value memoized for one calendar day. A record from any other day is
/// ignored and overwritten on the next write; nothing is ever swept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyRecord<T> {
    pub day: NaiveDate,
    pub value: T,
}

/// Day-gated get-or-compute over one feature slot.
///
/// Returns `(value, is_fresh)`: if the slot holds a record for `today` the
/// stored value comes back with `is_fresh = false` and `compute` is never
/// invoked; otherwise `compute` runs once and its result is stored under
/// `today`.
pub fn get_or_compute<T: Clone>(
    slot: &mut Option<DailyRecord<T>>,
    today: NaiveDate,
    compute: impl FnOnce() -> T,
) -> (T, bool) {
    match slot {
        Some(record) if record.day == today => (record.value.clone(), false),
        _ => {
            let value = compute();
            *slot = Some(DailyRecord {
                day: today,
                value: value.clone(),
            });
            (value, true)
        }
    }
}

/// Tier bucket for the supplementary luck comment. Derived from the cached
/// value, never re-randomized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuckTier {
    High,
    Medium,
    Low,
}

impl LuckTier {
    pub fn for_value(value: u32) -> Self {
        if value >= 80 {
            LuckTier::High
        } else if value >= 50 {
            LuckTier::Medium
        } else {
            LuckTier::Low
        }
    }

    pub fn comment(self) -> &'static str {
        match self {
            LuckTier::High => "🔥 Today is your day! Put that luck to work!",
            LuckTier::Medium => "🙂 Not bad at all! Worth taking a chance!",
            LuckTier::Low => "🌧 Careful! Not the best day for adventures.",
        }
    }
}
