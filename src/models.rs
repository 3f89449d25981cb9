use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One scraped blog post, as it appears in the input file
///
/// Only `date` matters to the aggregator. Everything else is carried
/// through untouched for whoever renders the results.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Post {
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Post {
    pub fn dated(date: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            ..Self::default()
        }
    }
}

/// Anything but a string (a number, an object, null) counts as no date,
/// so one odd record never fails the whole file.
fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(date) => Ok(Some(date)),
        _ => Ok(None),
    }
}

/// Calendar month, ordered January to December
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// `1` is January.
    pub fn from_number(n: u32) -> Option<Self> {
        if (1..=12).contains(&n) {
            Some(Self::ALL[(n - 1) as usize])
        } else {
            None
        }
    }

    pub fn of(date: &NaiveDate) -> Self {
        Self::ALL[date.month0() as usize]
    }

    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl std::fmt::Display for Month {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn serialize_weekday<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(weekday_name(*weekday))
}

/// A post whose date parsed, with the calendar fields derived once
#[derive(Debug, Clone, PartialEq)]
pub struct DatedEvent {
    pub date: NaiveDate,
    pub weekday: Weekday,
    pub year: i32,
    pub month: Month,
    pub post: Post,
}

/// Posts on a single calendar day (zero for gap days)
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: usize,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub struct MonthlyCount {
    pub year: i32,
    pub month: Month,
    pub count: usize,
}

impl MonthlyCount {
    /// e.g. `2024 January`
    pub fn label(&self) -> String {
        format!("{} {}", self.year, self.month)
    }
}

/// Weekday statistics
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct WeekdayCount {
    #[serde(serialize_with = "serialize_weekday")]
    pub weekday: Weekday,
    pub count: usize,
    pub percentage: f64,
}

/// A place shown on the map view
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lon", alias = "lng")]
    pub longitude: f64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Pre-computed content totals produced alongside the scrape
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ContentTotals {
    pub total_blogs: u64,
    pub total_characters: u64,
    pub total_images: u64,
    pub average_characters: f64,
    pub average_images: f64,
}

/// Query result
#[derive(Debug, Serialize)]
pub struct QueryResult {
    pub query: String,
    pub result_type: String,
    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_calendar_order() {
        assert!(Month::January < Month::April);
        assert!(Month::April < Month::December);
        // alphabetically April would come first
        let mut months = vec![Month::January, Month::April, Month::August];
        months.sort();
        assert_eq!(months, vec![Month::January, Month::April, Month::August]);
    }

    #[test]
    fn test_month_numbers() {
        assert_eq!(Month::from_number(1), Some(Month::January));
        assert_eq!(Month::from_number(12), Some(Month::December));
        assert_eq!(Month::from_number(0), None);
        assert_eq!(Month::from_number(13), None);
        for month in Month::ALL {
            assert_eq!(Month::from_number(month.number()), Some(month));
        }
    }

    #[test]
    fn test_month_of_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(Month::of(&date), Month::February);
        let date = NaiveDate::from_ymd_opt(1999, 12, 31).unwrap();
        assert_eq!(Month::of(&date), Month::December);
    }

    #[test]
    fn test_post_keeps_extra_fields() {
        let raw = r#"{"date":"2024/01/01","title":"hello","page":3,"images":4,"characters":812}"#;
        let post: Post = serde_json::from_str(raw).unwrap();

        assert_eq!(post.date.as_deref(), Some("2024/01/01"));
        assert_eq!(post.title.as_deref(), Some("hello"));
        assert_eq!(post.page, Some(serde_json::json!(3)));
        assert_eq!(post.extra["images"], 4);
        assert_eq!(post.extra["characters"], 812);

        let back = serde_json::to_value(&post).unwrap();
        assert_eq!(back["images"], 4);
    }

    #[test]
    fn test_post_without_date() {
        let post: Post = serde_json::from_str(r#"{"title":"untitled"}"#).unwrap();
        assert_eq!(post.date, None);

        let post: Post = serde_json::from_str(r#"{"date":null}"#).unwrap();
        assert_eq!(post.date, None);

        let post: Post = serde_json::from_str(r#"{"date":20240102,"title":"x"}"#).unwrap();
        assert_eq!(post.date, None);
        assert_eq!(post.title.as_deref(), Some("x"));
    }

    #[test]
    fn test_location_aliases() {
        let loc: Location =
            serde_json::from_str(r#"{"name":"Tokyo","lat":35.68,"lng":139.76,"visits":2}"#).unwrap();
        assert_eq!(loc.name, "Tokyo");
        assert_eq!(loc.latitude, 35.68);
        assert_eq!(loc.longitude, 139.76);
        assert_eq!(loc.extra["visits"], 2);
    }

    #[test]
    fn test_serialized_names() {
        let monthly = MonthlyCount {
            year: 2024,
            month: Month::March,
            count: 2,
        };
        let value = serde_json::to_value(monthly).unwrap();
        assert_eq!(value["month"], "March");
        assert_eq!(monthly.label(), "2024 March");

        let weekday = WeekdayCount {
            weekday: Weekday::Wed,
            count: 1,
            percentage: 50.0,
        };
        let value = serde_json::to_value(weekday).unwrap();
        assert_eq!(value["weekday"], "Wednesday");
    }
}
