//! Headline numbers shown above the charts.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{DailyCount, DatedEvent, MonthlyCount};
use crate::timeline::round_one_decimal;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TimelineStats {
    pub total_posts: usize,
    pub active_days: usize,
    pub average_posts_per_active_day: f64,
    pub max_posts_per_day: usize,
    pub most_active_day: Option<DailyCount>,
    pub days_without_posts: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub span_days: usize,
}

impl TimelineStats {
    /// `daily` is the gap-filled timeline built from the same `events`.
    pub fn compute(events: &[DatedEvent], daily: &[DailyCount]) -> Self {
        let active_days = events.iter().map(|e| e.date).collect::<HashSet<_>>().len();
        let average = if active_days > 0 {
            round_one_decimal(events.len() as f64 / active_days as f64)
        } else {
            0.0
        };

        // first maximum wins, i.e. the earliest date
        let most_active_day = daily
            .iter()
            .copied()
            .fold(None, |best: Option<DailyCount>, day| match best {
                Some(b) if b.count >= day.count => Some(b),
                _ => Some(day),
            });

        Self {
            total_posts: events.len(),
            active_days,
            average_posts_per_active_day: average,
            max_posts_per_day: most_active_day.map(|d| d.count).unwrap_or(0),
            most_active_day,
            days_without_posts: daily.iter().filter(|d| d.count == 0).count(),
            first_date: daily.first().map(|d| d.date),
            last_date: daily.last().map(|d| d.date),
            span_days: daily.len(),
        }
    }
}

/// Busiest months first; months with equal counts stay in calendar order.
pub fn rank_months(monthly: &[MonthlyCount]) -> Vec<MonthlyCount> {
    let mut ranked = monthly.to_vec();
    ranked.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.year.cmp(&b.year))
            .then(a.month.cmp(&b.month))
    });
    ranked
}
