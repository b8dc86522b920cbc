use crate::category::CategoryGroup;
use crate::entity::Podcast;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Popular,
    Recent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Type(String),
}

impl CategoryFilter {
    fn keeps(&self, podcast: &Podcast) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Type(t) => podcast.category_type == *t,
        }
    }
}

pub fn filter_group<'a>(group: &'a CategoryGroup) -> impl Fn(&Podcast) -> bool + 'a {
    move |p: &Podcast| -> bool { group.contains(&p.category_type) }
}

// pure view derivation: the fetched collection is never touched, the output
// is a fresh subset of it
pub fn derive_category(
    podcasts: &[Podcast],
    group: &CategoryGroup,
    filter: &CategoryFilter,
    sort: SortBy,
) -> Vec<Podcast> {
    let in_group = filter_group(group);
    let mut shown: Vec<Podcast> = podcasts
        .iter()
        .filter(|p| in_group(p))
        .filter(|p| filter.keeps(p))
        .cloned()
        .collect();
    // "recent" reverses the api ranking; the list carries no recency
    // timestamp to compare, so this is an order flip, not a date sort
    if sort == SortBy::Recent {
        shown.reverse();
    }
    shown
}

// bucket the full collection for the other-categories rail
pub fn group_podcasts<'a, I>(groups: I, podcasts: &[Podcast]) -> Vec<(&'a CategoryGroup, Vec<Podcast>)>
where
    I: IntoIterator<Item = &'a CategoryGroup>,
{
    groups
        .into_iter()
        .map(|group| {
            let in_group = filter_group(group);
            let bucket = podcasts.iter().filter(|p| in_group(p)).cloned().collect();
            (group, bucket)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::{find_group, CATEGORY_GROUPS};

    fn podcast(id: u64, category_type: &str) -> Podcast {
        Podcast {
            id,
            category_type: category_type.to_string(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Podcast> {
        vec![
            podcast(7, "NEWS"),
            podcast(8, "TECHNOLOGY"),
            podcast(9, "SOCIETY & CULTURE"),
            podcast(10, "NEWS"),
            podcast(11, "UNMAPPED TYPE"),
        ]
    }

    #[test]
    fn output_is_subset_of_input() {
        let all = sample();
        let group = find_group("News & Storytelling").expect("group missing");
        let shown = derive_category(&all, group, &CategoryFilter::All, SortBy::Popular);
        assert!(shown.iter().all(|p| all.contains(p)));
        assert_eq!(shown.len(), 3);
    }

    #[test]
    fn popular_preserves_api_order() {
        let all = sample();
        let group = find_group("News & Storytelling").expect("group missing");
        let shown = derive_category(&all, group, &CategoryFilter::All, SortBy::Popular);
        let ids: Vec<u64> = shown.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![7, 9, 10]);
    }

    #[test]
    fn recent_is_exact_reverse() {
        let all = sample();
        let group = find_group("News & Storytelling").expect("group missing");
        let popular = derive_category(&all, group, &CategoryFilter::All, SortBy::Popular);
        let recent = derive_category(&all, group, &CategoryFilter::All, SortBy::Recent);
        let mut reversed = recent.clone();
        reversed.reverse();
        assert_eq!(reversed, popular);
        // untouched input
        assert_eq!(all[0].id, 7);
    }

    #[test]
    fn sub_filter_intersects_group() {
        let all = sample();
        let group = find_group("News & Storytelling").expect("group missing");
        let filter = CategoryFilter::Type("NEWS".to_string());
        let shown = derive_category(&all, group, &filter, SortBy::Popular);
        let ids: Vec<u64> = shown.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![7, 10]);
        assert!(shown.iter().all(|p| p.category_type != "TECHNOLOGY"));
    }

    #[test]
    fn category_scenario_news_excludes_technology() {
        // 50 records, id 7 carries NEWS, the rest alternate tech/unmapped
        let mut all = vec![podcast(7, "NEWS")];
        for id in 100..149 {
            all.push(podcast(id, if id % 2 == 0 { "TECHNOLOGY" } else { "HISTORY" }));
        }
        assert_eq!(all.len(), 50);
        let group = find_group("News & Storytelling").expect("group missing");
        let shown = derive_category(&all, group, &CategoryFilter::All, SortBy::Popular);
        assert!(shown.iter().any(|p| p.id == 7));
        assert!(shown.iter().all(|p| p.category_type != "TECHNOLOGY"));
    }

    #[test]
    fn unmapped_types_are_excluded_from_buckets() {
        let all = sample();
        let grouped = group_podcasts(CATEGORY_GROUPS.iter(), &all);
        let bucketed: usize = grouped.iter().map(|(_, b)| b.len()).sum();
        // id 11 is in no bucket
        assert_eq!(bucketed, 4);
    }
}
