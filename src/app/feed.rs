use chrono::{DateTime, Utc};

use super::markup::escape_xml;
use super::record::ViewingRecord;

pub(crate) const PROVIDER_HOME: &str = "https://www.netflix.com/";
const BUILD_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S +0000";

/// Channel-level settings for the rendered feed.
#[derive(Debug, Clone)]
pub struct Channel<'a> {
    pub title: &'a str,
    pub self_link: &'a str,
}

/// Renders an RSS 2.0 document. `generated_at` only affects the channel
/// `<pubDate>`; everything else depends on the channel and records alone.
pub fn render_feed(
    channel: &Channel<'_>,
    records: &[ViewingRecord],
    generated_at: DateTime<Utc>,
) -> String {
    let title = escape_xml(channel.title);
    let mut buf = String::new();

    buf.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    buf.push_str("<rss xmlns:atom=\"http://www.w3.org/2005/Atom\" version=\"2.0\">\n");
    buf.push_str("<channel>\n");
    buf.push_str(&format!(
        "<atom:link href=\"{}\" rel=\"self\" type=\"application/rss+xml\" />",
        escape_xml(channel.self_link)
    ));
    buf.push_str(&format!("<title>{title}</title>"));
    buf.push_str(&format!("<link>{PROVIDER_HOME}</link>"));
    buf.push_str(&format!(
        "<pubDate>{}</pubDate>",
        generated_at.format(BUILD_DATE_FORMAT)
    ));
    buf.push_str(&format!("<description>{title}</description>"));
    buf.push_str("<language>en-us</language>\n");

    for record in records {
        buf.push_str(&record.to_rss_item());
    }

    buf.push_str("</channel></rss>\n");
    buf
}
