//! Timeline statistics for a scraped blog post dataset.
//!
//! Posts carry a `YYYY/MM/DD` date. [`TimelineAggregator`] turns them into a
//! gap-filled daily series, calendar-ordered monthly counts, a Monday-first
//! weekday breakdown and the busiest days. [`report::Dashboard`] bundles those
//! with the headline numbers and renders them as text tables or JSON.
//!
//! ```
//! use blog_timeline::{Post, TimelineAggregator};
//!
//! let aggregator = TimelineAggregator::new();
//! let events = aggregator.parse(vec![
//!     Post::dated("2024/01/01"),
//!     Post::dated("2024/01/01"),
//!     Post::dated("2024/01/03"),
//!     Post::dated("not-a-date"),
//! ]);
//!
//! let daily = aggregator.daily_timeline(&events).unwrap();
//! let counts: Vec<usize> = daily.iter().map(|d| d.count).collect();
//! assert_eq!(counts, vec![2, 0, 1]);
//! ```

pub mod error;
pub mod loader;
pub mod models;
pub mod report;
pub mod settings;
pub mod stats;
pub mod timeline;


pub use error::{LoadError, TimelineError};
pub use models::{
    ContentTotals, DailyCount, DatedEvent, Location, Month, MonthlyCount, Post, WeekdayCount,
};
pub use timeline::TimelineAggregator;
