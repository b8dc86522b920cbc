use crate::entity::{Episode, Podcast};
use crate::error::{Error, Result};
use crate::PodcastId;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const API_BASE: &str = "https://api.wokpa.app/api/listeners";

// seam between page composition and the wire; tests plug in a canned impl
pub trait Fetch {
    fn top_podcasts(&self, page: u32, per_page: u32) -> Result<Vec<Podcast>>;
    fn latest_episodes(&self, page: u32, per_page: u32) -> Result<Vec<Episode>>;
    fn podcast_episodes(
        &self,
        podcast_id: PodcastId,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Episode>>;
}

pub struct HttpClient {
    base: String,
}

impl HttpClient {
    pub fn new(base: impl Into<String>) -> Self {
        HttpClient { base: base.into() }
    }

    fn get_records<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<T>> {
        let url = format!(
            "{}/{}?page={}&per_page={}",
            self.base, path, page, per_page
        );
        log::debug!("GET {}", url);
        let resp = ureq::get(&url)
            .call()
            .map_err(|e| Error::FetchFailed(e.to_string()))?;
        let body: Value = serde_json::from_reader(resp.into_reader())
            .map_err(|e| Error::FetchFailed(e.to_string()))?;
        Ok(unwrap_envelope(&body))
    }
}

impl Fetch for HttpClient {
    fn top_podcasts(&self, page: u32, per_page: u32) -> Result<Vec<Podcast>> {
        self.get_records("top-podcasts", page, per_page)
    }

    fn latest_episodes(&self, page: u32, per_page: u32) -> Result<Vec<Episode>> {
        self.get_records("episodes/latest", page, per_page)
    }

    fn podcast_episodes(
        &self,
        podcast_id: PodcastId,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Episode>> {
        self.get_records(&format!("podcasts/{}/episodes", podcast_id), page, per_page)
    }
}

// collections arrive wrapped as {data:{data:[..]}}; any other shape is
// treated as zero records to tolerate api drift, and a record that fails
// to decode is dropped rather than failing the whole page
pub fn unwrap_envelope<T: DeserializeOwned>(body: &Value) -> Vec<T> {
    match body.pointer("/data/data") {
        Some(Value::Array(records)) => records
            .iter()
            .filter_map(|record| match serde_json::from_value(record.clone()) {
                Ok(typed) => Some(typed),
                Err(e) => {
                    log::warn!("dropping malformed record: {}", e);
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::init_log;
    use log::debug;

    const ENVELOPE: &str = r#"{
        "data": {
            "data": [
                {"id": 7, "title": "Morning Brief", "category_type": "NEWS"},
                {"id": 8, "title": "Byte Sized", "category_type": "TECHNOLOGY"}
            ]
        }
    }"#;

    fn serve(body: &'static str) -> String {
        let server = rouille::Server::new("127.0.0.1:0", move |_req| {
            rouille::Response::from_data("application/json", body)
        })
        .expect("server failed");
        let addr = server.server_addr();
        std::thread::spawn(move || server.run());
        format!("http://{}", addr)
    }

    #[test]
    fn envelope_happy_path() {
        init_log();
        let body: Value = serde_json::from_str(ENVELOPE).expect("json failed");
        let podcasts: Vec<Podcast> = unwrap_envelope(&body);
        assert_eq!(podcasts.len(), 2);
        assert_eq!(podcasts[0].id, 7);
        debug!("decoded {:?}", podcasts[1].title);
    }

    #[test]
    fn envelope_shape_drift_is_empty() {
        let flat: Value = serde_json::from_str(r#"{"data": [1, 2]}"#).expect("json failed");
        let missing: Value = serde_json::from_str(r#"{"status": "ok"}"#).expect("json failed");
        let scalar: Value = serde_json::from_str(r#"{"data": {"data": 5}}"#).expect("json failed");
        assert!(unwrap_envelope::<Podcast>(&flat).is_empty());
        assert!(unwrap_envelope::<Podcast>(&missing).is_empty());
        assert!(unwrap_envelope::<Podcast>(&scalar).is_empty());
    }

    #[test]
    fn envelope_drops_malformed_record() {
        init_log();
        let body: Value = serde_json::from_str(
            r#"{"data": {"data": [{"id": "not-a-number"}, {"id": 3, "podcast_id": 9}]}}"#,
        )
        .expect("json failed");
        let episodes: Vec<Episode> = unwrap_envelope(&body);
        assert_eq!(episodes.len(), 1);
        assert_eq!(episodes[0].id, 3);
    }

    #[test]
    fn fetch_top_podcasts() {
        init_log();
        let base = serve(ENVELOPE);
        let client = HttpClient::new(base);
        let podcasts = client.top_podcasts(1, 50).expect("fetch failed");
        assert_eq!(podcasts.len(), 2);
        assert_eq!(podcasts[1].category_type, "TECHNOLOGY");
    }

    #[test]
    fn fetch_failure_is_reported() {
        // nothing listens here
        let client = HttpClient::new("http://127.0.0.1:9");
        let err = client.top_podcasts(1, 50).expect_err("fetch should fail");
        match err {
            Error::FetchFailed(msg) => debug!("reported: {}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn fetch_non_json_body_is_error() {
        let base = serve("<html>gateway error</html>");
        let client = HttpClient::new(base);
        assert!(matches!(
            client.top_podcasts(1, 50),
            Err(Error::FetchFailed(_))
        ));
    }
}
