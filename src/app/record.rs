use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveTime};

use super::markup::{cdata, escape_xml};

pub(crate) const SEARCH_URL: &str = "https://www.netflix.com/search?q=";
const PUB_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S -0700";

/// One watched title from the viewing-activity export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewingRecord {
    pub title: String,
    pub source_url: String,
    pub identifier: String,
    pub watched_at: NaiveDate,
}

impl ViewingRecord {
    pub fn new(title: &str, sequence: u32, watched_at: NaiveDate) -> Self {
        Self {
            title: title.to_string(),
            source_url: search_url(title),
            identifier: format!("{title}{sequence}"),
            watched_at,
        }
    }

    pub fn cmp_watched_at(&self, other: &Self) -> Ordering {
        self.watched_at.cmp(&other.watched_at)
    }

    /// Midnight of the watch date, stamped with the fixed `-0700` offset.
    pub fn pub_date(&self) -> String {
        self.watched_at
            .and_time(NaiveTime::MIN)
            .format(PUB_DATE_FORMAT)
            .to_string()
    }

    pub fn to_rss_item(&self) -> String {
        let date = self.pub_date();
        format!(
            "<item><title>{}</title><pubDate>{date}</pubDate><link>{}</link><guid isPermaLink=\"false\">{}</guid><description>{}</description></item>\n",
            escape_xml(&self.title),
            escape_xml(&self.source_url),
            escape_xml(&self.identifier),
            cdata(&format!("{} on {date}", self.title)),
        )
    }
}

/// Percent-encodes the title for the search query, leaving `/` literal.
pub(crate) fn search_url(title: &str) -> String {
    let encoded = urlencoding::encode(title).replace("%2F", "/");
    format!("{SEARCH_URL}{encoded}")
}

/// Stable sort, newest first. Records watched on the same day keep their
/// export order.
pub fn sort_most_recent_first(records: &mut [ViewingRecord]) {
    records.sort_by(|left, right| right.cmp_watched_at(left));
}
