use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate, Weekday};
use tracing::debug;

use crate::error::TimelineError;
use crate::models::{DailyCount, DatedEvent, Month, MonthlyCount, Post, WeekdayCount};

/// Input date format, e.g. `2024/01/31`.
pub const DATE_FORMAT: &str = "%Y/%m/%d";


/// Turns a sparse list of dated posts into dense daily, monthly and weekday tallies
///
/// Holds no state; every call recomputes from its input.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimelineAggregator;

impl TimelineAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Parse each post's `YYYY/MM/DD` date, silently dropping posts whose
    /// date is missing or malformed.
    pub fn parse<I>(&self, posts: I) -> Vec<DatedEvent>
    where
        I: IntoIterator<Item = Post>,
    {
        let mut dropped = 0usize;
        let events: Vec<DatedEvent> = posts
            .into_iter()
            .filter_map(|post| {
                let parsed = post.date.as_deref().and_then(parse_date);
                match parsed {
                    Some(date) => Some(dated_event(date, post)),
                    None => {
                        dropped += 1;
                        None
                    }
                }
            })
            .collect();

        debug!("Parsed {} dated events ({} dropped)", events.len(), dropped);
        events
    }

    /// One entry per calendar day between the first and last event,
    /// inclusive, with zero counts on days without posts.
    pub fn daily_timeline(&self, events: &[DatedEvent]) -> Result<Vec<DailyCount>, TimelineError> {
        let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
        for event in events {
            *counts.entry(event.date).or_insert(0) += 1;
        }

        let (first, last) = match (counts.keys().next(), counts.keys().next_back()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return Err(TimelineError::EmptyInput),
        };

        let timeline: Vec<DailyCount> = first
            .iter_days()
            .take_while(|date| *date <= last)
            .map(|date| DailyCount {
                date,
                count: counts.get(&date).copied().unwrap_or(0),
            })
            .collect();

        debug!(
            "Built daily timeline: {} days from {} to {} ({} with posts)",
            timeline.len(),
            first,
            last,
            counts.len()
        );
        Ok(timeline)
    }

    /// Months with at least one post, by year then calendar month.
    pub fn monthly_summary(&self, events: &[DatedEvent]) -> Vec<MonthlyCount> {
        let mut counts: BTreeMap<(i32, Month), usize> = BTreeMap::new();
        for event in events {
            *counts.entry((event.year, event.month)).or_insert(0) += 1;
        }

        let monthly: Vec<MonthlyCount> = counts
            .into_iter()
            .map(|((year, month), count)| MonthlyCount { year, month, count })
            .collect();

        debug!("Aggregated {} monthly data points", monthly.len());
        monthly
    }

    /// Weekdays that have posts, Monday first, with their share of the total.
    pub fn weekday_summary(&self, events: &[DatedEvent]) -> Vec<WeekdayCount> {
        let mut counts: HashMap<Weekday, usize> = HashMap::new();
        for event in events {
            *counts.entry(event.weekday).or_insert(0) += 1;
        }

        let total = events.len();
        let mut weekdays: Vec<WeekdayCount> = counts
            .into_iter()
            .map(|(weekday, count)| WeekdayCount {
                weekday,
                count,
                percentage: percentage(count, total),
            })
            .collect();

        weekdays.sort_by_key(|w| w.weekday.num_days_from_monday());

        debug!("Aggregated {} weekday data points", weekdays.len());
        weekdays
    }

    /// The `n` busiest days, highest count first. Equal counts keep the
    /// earlier date first. Returns fewer than `n` entries if the timeline
    /// is shorter.
    pub fn top_active_days(&self, timeline: &[DailyCount], n: usize) -> Vec<DailyCount> {
        let mut days = timeline.to_vec();
        days.sort_by(|a, b| b.count.cmp(&a.count).then(a.date.cmp(&b.date)));
        days.truncate(n);
        days
    }
}

/// Parse a `YYYY/MM/DD` date. The year must be exactly four digits;
/// chrono's `%Y` alone would also take signed and five-digit years.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let year = raw.split('/').next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

fn dated_event(date: NaiveDate, post: Post) -> DatedEvent {
    DatedEvent {
        date,
        weekday: date.weekday(),
        year: date.year(),
        month: Month::of(&date),
        post,
    }
}

/// `100 * part / total`, rounded half to even at one decimal place.
pub(crate) fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_one_decimal(part as f64 * 100.0 / total as f64)
}

/// Ties go to the even digit, so `6.25` becomes `6.2`.
pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
