use std::fmt::Write;

use serde::Serialize;
use tracing::info;

use crate::error::TimelineError;
use crate::models::{
    weekday_name, ContentTotals, DailyCount, Location, MonthlyCount, Post, QueryResult,
    WeekdayCount,
};
use crate::stats::{rank_months, TimelineStats};
use crate::timeline::TimelineAggregator;

/// Everything the dashboard shows, computed once from the post list
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub stats: TimelineStats,
    pub daily: Vec<DailyCount>,
    pub monthly: Vec<MonthlyCount>,
    pub monthly_ranking: Vec<MonthlyCount>,
    pub weekdays: Vec<WeekdayCount>,
    pub top_days: Vec<DailyCount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentTotals>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
}

/// One part of the report, selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Summary,
    Daily,
    Monthly,
    Weekdays,
    Top,
    Totals,
    Locations,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::Summary,
        Section::Daily,
        Section::Monthly,
        Section::Weekdays,
        Section::Top,
        Section::Totals,
        Section::Locations,
    ];

    fn query(self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Daily => "daily",
            Section::Monthly => "monthly",
            Section::Weekdays => "weekdays",
            Section::Top => "top",
            Section::Totals => "totals",
            Section::Locations => "locations",
        }
    }
}

impl Dashboard {
    /// Fails with [`TimelineError::EmptyInput`] when no post has a usable date.
    pub fn build(posts: Vec<Post>, top_n: usize) -> Result<Self, TimelineError> {
        let aggregator = TimelineAggregator::new();
        let events = aggregator.parse(posts);
        let daily = aggregator.daily_timeline(&events)?;
        let monthly = aggregator.monthly_summary(&events);
        let weekdays = aggregator.weekday_summary(&events);
        let top_days = aggregator.top_active_days(&daily, top_n);
        let stats = TimelineStats::compute(&events, &daily);

        info!(
            "Dashboard built: {} posts over {} days",
            stats.total_posts, stats.span_days
        );

        Ok(Self {
            stats,
            monthly_ranking: rank_months(&monthly),
            daily,
            monthly,
            weekdays,
            top_days,
            content: None,
            locations: Vec::new(),
        })
    }

    pub fn with_content_totals(mut self, totals: ContentTotals) -> Self {
        self.content = Some(totals);
        self
    }

    pub fn with_locations(mut self, locations: Vec<Location>) -> Self {
        self.locations = locations;
        self
    }

    /// A single section wrapped for JSON output.
    pub fn query(&self, section: Section) -> serde_json::Result<QueryResult> {
        let (result_type, data) = match section {
            Section::Summary => ("stats", serde_json::to_value(&self.stats)),
            Section::Daily => ("timeline", serde_json::to_value(&self.daily)),
            Section::Monthly => (
                "monthly",
                Ok(serde_json::json!({
                    "chronological": self.monthly,
                    "ranking": self.monthly_ranking,
                })),
            ),
            Section::Weekdays => ("weekdays", serde_json::to_value(&self.weekdays)),
            Section::Top => ("days", serde_json::to_value(&self.top_days)),
            Section::Totals => ("totals", serde_json::to_value(&self.content)),
            Section::Locations => ("locations", serde_json::to_value(&self.locations)),
        };

        Ok(QueryResult {
            query: section.query().to_string(),
            result_type: result_type.to_string(),
            data: data?,
        })
    }

    pub fn render_json(&self, sections: &[Section]) -> serde_json::Result<String> {
        if sections == &Section::ALL[..] {
            return serde_json::to_string_pretty(self);
        }
        let results = sections
            .iter()
            .map(|s| self.query(*s))
            .collect::<serde_json::Result<Vec<QueryResult>>>()?;
        match results.as_slice() {
            [single] => serde_json::to_string_pretty(single),
            _ => serde_json::to_string_pretty(&results),
        }
    }

    pub fn render_text(&self, sections: &[Section]) -> String {
        let mut out = String::new();
        for section in sections {
            let block = match section {
                Section::Summary => self.summary_text(),
                Section::Daily => self.daily_text(),
                Section::Monthly => self.monthly_text(),
                Section::Weekdays => self.weekdays_text(),
                Section::Top => self.top_text(),
                Section::Totals => match self.totals_text() {
                    Some(block) => block,
                    None => continue,
                },
                Section::Locations => match self.locations_text() {
                    Some(block) => block,
                    None => continue,
                },
            };
            out.push_str(&block);
            out.push('\n');
        }
        if let (Some(first), Some(last)) = (self.stats.first_date, self.stats.last_date) {
            let _ = writeln!(out, "Data range: {} to {}", first, last);
        }
        out
    }

    fn summary_text(&self) -> String {
        let s = &self.stats;
        let most_active = s
            .most_active_day
            .map(|d| d.date.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
        let rows = vec![
            vec!["Total posts".to_string(), s.total_posts.to_string()],
            vec!["Active days".to_string(), s.active_days.to_string()],
            vec![
                "Avg posts/day".to_string(),
                format!("{:.1}", s.average_posts_per_active_day),
            ],
            vec!["Max posts/day".to_string(), s.max_posts_per_day.to_string()],
            vec!["Most active day".to_string(), most_active],
            vec!["Days without posts".to_string(), s.days_without_posts.to_string()],
        ];
        titled("Summary", &table(&["Metric", "Value"], &rows))
    }

    fn daily_text(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .daily
            .iter()
            .map(|d| vec![d.date.format("%Y-%m-%d").to_string(), d.count.to_string()])
            .collect();
        titled("Daily timeline", &table(&["Date", "Posts"], &rows))
    }

    fn monthly_text(&self) -> String {
        let chronological: Vec<Vec<String>> = self
            .monthly
            .iter()
            .map(|m| vec![m.label(), m.count.to_string()])
            .collect();
        let ranking: Vec<Vec<String>> = self
            .monthly_ranking
            .iter()
            .map(|m| vec![m.label(), m.count.to_string()])
            .collect();
        let mut out = titled("Monthly summary", &table(&["Month", "Posts"], &chronological));
        out.push('\n');
        out.push_str(&titled("Busiest months", &table(&["Month", "Posts"], &ranking)));
        out
    }

    fn weekdays_text(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .weekdays
            .iter()
            .map(|w| {
                vec![
                    weekday_name(w.weekday).to_string(),
                    w.count.to_string(),
                    format!("{:.1}", w.percentage),
                ]
            })
            .collect();
        titled("Weekday analysis", &table(&["Day", "Posts", "%"], &rows))
    }

    fn top_text(&self) -> String {
        let rows: Vec<Vec<String>> = self
            .top_days
            .iter()
            .map(|d| vec![d.date.format("%Y-%m-%d").to_string(), d.count.to_string()])
            .collect();
        titled(
            &format!("Top {} most active days", self.top_days.len()),
            &table(&["Date", "Posts"], &rows),
        )
    }

    fn totals_text(&self) -> Option<String> {
        let totals = self.content.as_ref()?;
        let rows = vec![
            vec!["Total blogs".to_string(), totals.total_blogs.to_string()],
            vec!["Total characters".to_string(), totals.total_characters.to_string()],
            vec!["Total images".to_string(), totals.total_images.to_string()],
            vec![
                "Avg characters/blog".to_string(),
                format!("{:.1}", totals.average_characters),
            ],
            vec!["Avg images/blog".to_string(), format!("{:.1}", totals.average_images)],
        ];
        Some(titled("Content totals", &table(&["Metric", "Value"], &rows)))
    }

    fn locations_text(&self) -> Option<String> {
        if self.locations.is_empty() {
            return None;
        }
        let rows: Vec<Vec<String>> = self
            .locations
            .iter()
            .map(|l| {
                vec![
                    l.name.clone(),
                    format!("{:.4}", l.latitude),
                    format!("{:.4}", l.longitude),
                ]
            })
            .collect();
        Some(titled("Locations", &table(&["Name", "Latitude", "Longitude"], &rows)))
    }
}

fn titled(title: &str, body: &str) -> String {
    format!("{}\n{}\n{}", title, "=".repeat(title.chars().count()), body)
}

/// Left-aligned first column, right-aligned numbers.
fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, width))| {
            if i == 0 {
                format!("{:<width$}", cell, width = width)
            } else {
                format!("{:>width$}", cell, width = width)
            }
        })
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}
