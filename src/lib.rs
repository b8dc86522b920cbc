pub mod category;
pub mod client;
pub mod derive;
pub mod entity;
pub mod error;
pub mod page;
pub mod player;
pub mod query;
pub mod render;
pub mod util;

pub use error::{Error, Result};

pub type PodcastId = u64;
pub type EpisodeId = u64;

// default client against the public listeners api
pub fn get_client() -> client::HttpClient {
    client::HttpClient::new(client::API_BASE)
}
