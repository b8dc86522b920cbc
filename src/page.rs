use crate::category::{self, CategoryGroup, CATEGORY_GROUPS};
use crate::client::Fetch;
use crate::derive::{self, CategoryFilter, SortBy};
use crate::entity::{Episode, Podcast};
use crate::error::Error;
use crate::query::{QueryCache, QueryKey, QueryState, RetryPolicy};
use crate::render::{self, RenderBranch};
use crate::{EpisodeId, PodcastId, Result};

const RAIL_PER_PAGE: u32 = 15;
const EPISODES_PER_PAGE: u32 = 20;
const SCAN_PER_PAGE: u32 = 50;
// there is no by-id podcast endpoint; details come from scanning the
// first pages of the top list
const SCAN_PAGES: u32 = 2;

fn page_key(endpoint: &str, page: u32, per_page: u32) -> QueryKey {
    QueryKey::new(
        endpoint,
        &[
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ],
    )
}

pub fn trending_podcasts(
    cache: &QueryCache,
    client: &impl Fetch,
    policy: &RetryPolicy,
) -> QueryState<Vec<Podcast>> {
    cache.fetch(&page_key("top-podcasts", 1, RAIL_PER_PAGE), policy, || {
        client.top_podcasts(1, RAIL_PER_PAGE)
    })
}

pub fn latest_episodes(
    cache: &QueryCache,
    client: &impl Fetch,
    policy: &RetryPolicy,
) -> QueryState<Vec<Episode>> {
    cache.fetch(&page_key("episodes/latest", 1, RAIL_PER_PAGE), policy, || {
        client.latest_episodes(1, RAIL_PER_PAGE)
    })
}

fn scan_top_podcasts(client: &impl Fetch) -> Result<Vec<Podcast>> {
    let mut all = Vec::new();
    for page in 1..=SCAN_PAGES {
        all.extend(client.top_podcasts(page, SCAN_PER_PAGE)?);
    }
    Ok(all)
}

pub fn podcast_details(
    cache: &QueryCache,
    client: &impl Fetch,
    policy: &RetryPolicy,
    id: PodcastId,
) -> QueryState<Podcast> {
    let key = QueryKey::new(&format!("podcast/{}", id), &[]);
    cache.fetch(&key, policy, || {
        scan_top_podcasts(client)?
            .into_iter()
            .find(|p| p.id == id)
            .ok_or(Error::PodcastNotFound(id))
    })
}

pub fn podcast_episodes(
    cache: &QueryCache,
    client: &impl Fetch,
    policy: &RetryPolicy,
    id: PodcastId,
) -> QueryState<Vec<Episode>> {
    let key = page_key(&format!("podcasts/{}/episodes", id), 1, EPISODES_PER_PAGE);
    cache.fetch(&key, policy, || {
        client.podcast_episodes(id, 1, EPISODES_PER_PAGE)
    })
}

pub fn episode_details(
    cache: &QueryCache,
    client: &impl Fetch,
    policy: &RetryPolicy,
    podcast_id: PodcastId,
    episode_id: EpisodeId,
) -> QueryState<Episode> {
    let key = QueryKey::new(
        &format!("episode/{}", episode_id),
        &[("podcast_id", podcast_id.to_string())],
    );
    cache.fetch(&key, policy, || {
        client
            .podcast_episodes(podcast_id, 1, EPISODES_PER_PAGE)?
            .into_iter()
            .find(|e| e.id == episode_id)
            .ok_or(Error::EpisodeNotFound(episode_id))
    })
}

// "next episodes in queue" rail, the episode on screen excluded
pub fn episode_queue(episodes: &[Episode], current: EpisodeId) -> Vec<Episode> {
    episodes
        .iter()
        .filter(|e| e.id != current)
        .cloned()
        .collect()
}

// deterministic stand-in for the editor's random pick: the seed chooses the
// podcast and rotates its episode list, three episodes surface
pub fn editors_pick(
    cache: &QueryCache,
    client: &impl Fetch,
    policy: &RetryPolicy,
    seed: u64,
) -> QueryState<Vec<Episode>> {
    let key = QueryKey::new("editors-pick", &[("seed", seed.to_string())]);
    cache.fetch(&key, policy, || {
        let podcasts = scan_top_podcasts(client)?;
        if podcasts.is_empty() {
            return Ok(Vec::new());
        }
        let pick = &podcasts[(seed as usize) % podcasts.len()];
        let mut episodes = client.podcast_episodes(pick.id, 1, EPISODES_PER_PAGE)?;
        if !episodes.is_empty() {
            let rot = (seed as usize) % episodes.len();
            episodes.rotate_left(rot);
        }
        episodes.truncate(3);
        Ok(episodes)
    })
}

pub struct CategoryPage {
    pub branch: RenderBranch,
    pub podcasts: Vec<Podcast>,
    pub others: Vec<(&'static CategoryGroup, Vec<Podcast>)>,
}

pub fn category_page(
    cache: &QueryCache,
    client: &impl Fetch,
    policy: &RetryPolicy,
    group_name: &str,
    filter: &CategoryFilter,
    sort: SortBy,
) -> CategoryPage {
    let state = cache.fetch(&page_key("top-podcasts", 1, SCAN_PER_PAGE), policy, || {
        client.top_podcasts(1, SCAN_PER_PAGE)
    });
    let all = state.data.as_deref().unwrap_or(&[]);
    let podcasts = match category::find_group(group_name) {
        Some(group) => derive::derive_category(all, group, filter, sort),
        None => Vec::new(),
    };
    let others = derive::group_podcasts(
        CATEGORY_GROUPS.iter().filter(|g| g.name != group_name),
        all,
    );
    let branch = render::select(&state, |_| podcasts.is_empty());
    CategoryPage {
        branch,
        podcasts,
        others,
    }
}

pub struct PodcastPage {
    pub branch: RenderBranch,
    pub podcast: QueryState<Podcast>,
    pub episodes: QueryState<Vec<Episode>>,
}

pub fn podcast_page(
    cache: &QueryCache,
    client: &impl Fetch,
    policy: &RetryPolicy,
    id: PodcastId,
) -> PodcastPage {
    let podcast = podcast_details(cache, client, policy, id);
    let episodes = podcast_episodes(cache, client, policy, id);
    let branch = render::select(&podcast, |_| false);
    PodcastPage {
        branch,
        podcast,
        episodes,
    }
}

pub struct EpisodePage {
    pub branch: RenderBranch,
    pub episode: QueryState<Episode>,
    pub podcast: QueryState<Podcast>,
    pub queue: Vec<Episode>,
    // where the error branch links back to
    pub back_link: String,
}

pub fn episode_page(
    cache: &QueryCache,
    client: &impl Fetch,
    policy: &RetryPolicy,
    podcast_id: PodcastId,
    episode_id: EpisodeId,
) -> EpisodePage {
    let episode = episode_details(cache, client, policy, podcast_id, episode_id);
    let podcast = podcast_details(cache, client, policy, podcast_id);
    let episodes = podcast_episodes(cache, client, policy, podcast_id);
    let queue = episodes
        .data
        .as_deref()
        .map(|eps| episode_queue(eps, episode_id))
        .unwrap_or_default();
    let branch = render::select(&episode, |_| false);
    EpisodePage {
        branch,
        episode,
        podcast,
        queue,
        back_link: format!("/podcast/{}", podcast_id),
    }
}
