use crate::{EpisodeId, PodcastId};
use serde::{Deserialize, Serialize};

// everything here arrives from the listeners api and is read-only;
// derivations clone before reordering
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Podcast {
    pub id: PodcastId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub picture_url: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category_name: String,
    #[serde(default)]
    pub category_type: String,
    #[serde(default)]
    pub publisher: Publisher,
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Publisher {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
}

#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct Episode {
    pub id: EpisodeId,
    pub podcast_id: PodcastId,
    #[serde(default)]
    pub content_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub picture_url: String,
    // seconds
    #[serde(default)]
    pub duration: u64,
}

impl Publisher {
    pub fn display_name(&self) -> String {
        if !self.company_name.is_empty() {
            self.company_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
                .trim()
                .to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_podcast() {
        let raw = r#"{
            "id": 7,
            "title": "Morning Brief",
            "picture_url": "https://cdn.example/7.jpg",
            "author": "Newsroom",
            "description": "<p>Daily news</p>",
            "category_name": "News",
            "category_type": "NEWS",
            "publisher": {
                "first_name": "Ada",
                "last_name": "Obi",
                "company_name": "",
                "profile_image_url": null
            },
            "subscriber_count": 120
        }"#;
        let p: Podcast = serde_json::from_str(raw).expect("decode failed");
        assert_eq!(p.id, 7);
        assert_eq!(p.category_type, "NEWS");
        assert_eq!(p.publisher.display_name(), "Ada Obi");
    }

    #[test]
    fn decode_episode_with_missing_optionals() {
        let raw = r#"{"id": 42, "podcast_id": 9, "title": "Pilot"}"#;
        let e: Episode = serde_json::from_str(raw).expect("decode failed");
        assert_eq!(e.podcast_id, 9);
        assert_eq!(e.duration, 0);
        assert!(e.content_url.is_empty());
    }

    #[test]
    fn publisher_prefers_company_name() {
        let pb = Publisher {
            first_name: "Ada".to_string(),
            last_name: "Obi".to_string(),
            company_name: "Wokpa Media".to_string(),
            profile_image_url: None,
        };
        assert_eq!(pb.display_name(), "Wokpa Media");
    }
}
