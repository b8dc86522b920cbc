// static buckets grouping raw api category types under one display label;
// a type unmapped here simply never shows up in grouped views
#[derive(Debug, PartialEq, Eq)]
pub struct CategoryGroup {
    pub name: &'static str,
    pub category_types: &'static [&'static str],
}

pub const CATEGORY_GROUPS: &[CategoryGroup] = &[
    CategoryGroup {
        name: "News & Storytelling",
        category_types: &["NEWS", "SOCIETY & CULTURE"],
    },
    CategoryGroup {
        name: "Educational",
        category_types: &["EDUCATION"],
    },
    CategoryGroup {
        name: "Entertainment & Lifestyle",
        category_types: &["LEISURE", "ARTS", "KIDS & FAMILY"],
    },
    CategoryGroup {
        name: "Tech, Sport & Business",
        category_types: &["TECHNOLOGY", "SPORTS", "BUSINESS"],
    },
    CategoryGroup {
        name: "Other Podcasts",
        category_types: &[
            "RELIGION & SPIRITUALITY",
            "GOVERNMENT",
            "HEALTH & FITNESS",
            "HISTORY",
        ],
    },
];

impl CategoryGroup {
    pub fn contains(&self, category_type: &str) -> bool {
        self.category_types.iter().any(|t| *t == category_type)
    }

    pub fn slug(&self) -> String {
        self.name.replace(" & ", "-")
    }
}

pub fn find_group(name: &str) -> Option<&'static CategoryGroup> {
    CATEGORY_GROUPS.iter().find(|g| g.name == name)
}

pub fn name_from_slug(slug: &str) -> String {
    slug.replace('-', " & ")
}

// display form of a raw type string, e.g. "NEWS" -> "News"
pub fn format_category_type(category_type: &str) -> String {
    category_type
        .to_lowercase()
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
