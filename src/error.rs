use crate::{EpisodeId, PodcastId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    // local conditions: the id was absent from an otherwise valid response
    #[error("podcast {0} not found in top podcasts")]
    PodcastNotFound(PodcastId),

    #[error("episode {0} not found")]
    EpisodeNotFound(EpisodeId),
}

pub type Result<T> = std::result::Result<T, Error>;
