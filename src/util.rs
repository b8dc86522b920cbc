use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;

pub fn init_log() {
    if let Ok(logger) = flexi_logger::Logger::try_with_env_or_str("debug") {
        let _ = logger.log_to_stdout().start();
    }
}

static ANCHOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<a[^>]+href=["'](.*?)["'][^>]*>(.*?)</a>"#).unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

// descriptions arrive with inline markup; keep link targets readable as
// "text (url)" and strip the rest
pub fn clean_description(text: &str) -> String {
    let with_links = ANCHOR_RE.replace_all(text, "$2 ($1)");
    TAG_RE.replace_all(&with_links, "").trim().to_string()
}

// "2024-05-01 10:21:14" -> "MAY 1, 2024"; unparseable input passes through
pub fn format_date(date: &str) -> String {
    NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| chrono::DateTime::parse_from_rfc3339(date).map(|d| d.naive_utc()))
        .map(|d| d.format("%b %-d, %Y").to_string().to_uppercase())
        .unwrap_or_else(|_| date.to_string())
}

// summary form, rounded whole minutes
pub fn format_duration(seconds: u64) -> String {
    let minutes = (seconds as f64 / 60.0).round() as u64;
    format!("{} mins", minutes)
}

// scrub label form, zero-padded MM:SS
pub fn format_time(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
