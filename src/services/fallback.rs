/// Fallback catalog
///
/// Hand-curated, known-good result sets used when every live strategy fails
/// or yields nothing. Ids are real video ids so the client still renders
/// playable content.
use crate::models::{Category, ContentItem};

const FALLBACK_PUBLISHED_AT: &str = "2024-01-15T12:00:00Z";
const TRAILER_PUBLISHED_AT: &str = "2024-01-10T12:00:00Z";

/// (title, video id, thumbnail, channel)
const GENERAL_VIDEOS: &[(&str, &str, &str, &str)] = &[
    (
        "MrBeast - $1 vs $500,000 Experiences",
        "jk7GA4EZZrw",
        "https://i.ytimg.com/vi/jk7GA4EZZrw/hqdefault.jpg",
        "MrBeast",
    ),
    (
        "Mark Rober - Glitter Bomb 5.0",
        "h4T_LlK1VE4",
        "https://i.ytimg.com/vi/h4T_LlK1VE4/hqdefault.jpg",
        "Mark Rober",
    ),
    (
        "Veritasium - The Most Powerful Computers",
        "IxkSlnrRFqc",
        "https://i.ytimg.com/vi/IxkSlnrRFqc/hqdefault.jpg",
        "Veritasium",
    ),
    (
        "Marques Brownlee - iPhone 15 Review",
        "TUXpoM9OY3M",
        "https://i.ytimg.com/vi/TUXpoM9OY3M/hqdefault.jpg",
        "MKBHD",
    ),
    (
        "Kurzgesagt - What if You Detonated a Nuclear Bomb",
        "5iPH-br_eJQ",
        "https://i.ytimg.com/vi/5iPH-br_eJQ/hqdefault.jpg",
        "Kurzgesagt",
    ),
    (
        "Vsauce - What If Everyone Jumped at Once",
        "jHbyQ_AQP8c",
        "https://i.ytimg.com/vi/jHbyQ_AQP8c/hqdefault.jpg",
        "Vsauce",
    ),
    (
        "Dude Perfect - Extreme Hide and Seek",
        "rf0Lsjewg8c",
        "https://i.ytimg.com/vi/rf0Lsjewg8c/hqdefault.jpg",
        "Dude Perfect",
    ),
    (
        "Casey Neistat - DO WHAT YOU CAN'T",
        "jG7dSXcfVqE",
        "https://i.ytimg.com/vi/jG7dSXcfVqE/hqdefault.jpg",
        "Casey Neistat",
    ),
];

const SHORT_FORM_CLIPS: &[(&str, &str, &str, &str)] = &[
    (
        "Labubu Unboxing #1",
        "nXA_f0xBSjw",
        "https://i.ytimg.com/vi/nXA_f0xBSjw/hqdefault.jpg",
        "Toy Reviews",
    ),
    (
        "Labubu Collection Tour",
        "8VGF-rQqF7Q",
        "https://i.ytimg.com/vi/8VGF-rQqF7Q/hqdefault.jpg",
        "Collectibles Hub",
    ),
    (
        "Viral Dance Trend",
        "2g6J6vT5mBU",
        "https://i.ytimg.com/vi/2g6J6vT5mBU/hqdefault.jpg",
        "TikTok Dancer",
    ),
    (
        "Funny Cat Moment",
        "J---aiyznGQ",
        "https://i.ytimg.com/vi/J---aiyznGQ/hqdefault.jpg",
        "Cat Lover",
    ),
    (
        "Quick Recipe Hack",
        "0FTw0UHb3vw",
        "https://i.ytimg.com/vi/0FTw0UHb3vw/hqdefault.jpg",
        "Food Shorts",
    ),
    (
        "Life Hack You Need",
        "dQw4w9WgXcQ",
        "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg",
        "Daily Tips",
    ),
    (
        "Satisfying Video",
        "9bZkp7q19f0",
        "https://i.ytimg.com/vi/9bZkp7q19f0/hqdefault.jpg",
        "Oddly Satisfying",
    ),
    (
        "Epic Fail Compilation",
        "K5le9sYdYkM",
        "https://i.ytimg.com/vi/K5le9sYdYkM/hqdefault.jpg",
        "Fail Army",
    ),
    (
        "Magic Trick Revealed",
        "YbJOTdZBX1g",
        "https://i.ytimg.com/vi/YbJOTdZBX1g/hqdefault.jpg",
        "Magic Show",
    ),
    (
        "Cute Puppy Reaction",
        "2Vv-BfVoq4g",
        "https://i.ytimg.com/vi/2Vv-BfVoq4g/hqdefault.jpg",
        "Pet Channel",
    ),
];

/// (known title key, curated trailers: (title, video id, thumbnail))
const TRAILER_BUCKETS: &[(&str, &[(&str, &str, &str)])] = &[
    (
        "avengers",
        &[
            (
                "Iron Man Official Trailer",
                "8ugaeA-nMTc",
                "https://i.ytimg.com/vi/8ugaeA-nMTc/hqdefault.jpg",
            ),
            (
                "Captain America: Winter Soldier Trailer",
                "7SlILk2WMTI",
                "https://i.ytimg.com/vi/7SlILk2WMTI/hqdefault.jpg",
            ),
            (
                "Thor Official Trailer",
                "JOddp-nlNvQ",
                "https://i.ytimg.com/vi/JOddp-nlNvQ/hqdefault.jpg",
            ),
            (
                "Guardians of the Galaxy Trailer",
                "d96cjJhvlMA",
                "https://i.ytimg.com/vi/d96cjJhvlMA/hqdefault.jpg",
            ),
            (
                "Black Panther Official Trailer",
                "xjDjIWPwcPU",
                "https://i.ytimg.com/vi/xjDjIWPwcPU/hqdefault.jpg",
            ),
            (
                "Doctor Strange Trailer",
                "HSzx-zryEgM",
                "https://i.ytimg.com/vi/HSzx-zryEgM/hqdefault.jpg",
            ),
        ],
    ),
    (
        "inception",
        &[
            (
                "Interstellar Trailer",
                "zSWdZVtXT7E",
                "https://i.ytimg.com/vi/zSWdZVtXT7E/hqdefault.jpg",
            ),
            (
                "Shutter Island Trailer",
                "5iaYLCiq5RM",
                "https://i.ytimg.com/vi/5iaYLCiq5RM/hqdefault.jpg",
            ),
            (
                "The Prestige Trailer",
                "o4gHCmTQDVI",
                "https://i.ytimg.com/vi/o4gHCmTQDVI/hqdefault.jpg",
            ),
            (
                "Memento Trailer",
                "HDWylEQSwFo",
                "https://i.ytimg.com/vi/HDWylEQSwFo/hqdefault.jpg",
            ),
            (
                "Tenet Trailer",
                "AZGcmvrTX9M",
                "https://i.ytimg.com/vi/AZGcmvrTX9M/hqdefault.jpg",
            ),
            (
                "The Matrix Trailer",
                "m8e-FF8MsqU",
                "https://i.ytimg.com/vi/m8e-FF8MsqU/hqdefault.jpg",
            ),
        ],
    ),
    (
        "spider-man",
        &[
            (
                "Spider-Man: No Way Home",
                "JfVOs4VSpmA",
                "https://i.ytimg.com/vi/JfVOs4VSpmA/hqdefault.jpg",
            ),
            (
                "Spider-Man: Into the Spider-Verse",
                "g4Hbz2jLxvQ",
                "https://i.ytimg.com/vi/g4Hbz2jLxvQ/hqdefault.jpg",
            ),
            (
                "The Amazing Spider-Man",
                "DyLUwOcR5pk",
                "https://i.ytimg.com/vi/DyLUwOcR5pk/hqdefault.jpg",
            ),
            (
                "Spider-Man: Homecoming",
                "rk-dF1lIbIg",
                "https://i.ytimg.com/vi/rk-dF1lIbIg/hqdefault.jpg",
            ),
            (
                "Spider-Man: Far From Home",
                "Nt9L1jCKGnE",
                "https://i.ytimg.com/vi/Nt9L1jCKGnE/hqdefault.jpg",
            ),
            (
                "Venom",
                "u9Mv98Gr5pY",
                "https://i.ytimg.com/vi/u9Mv98Gr5pY/hqdefault.jpg",
            ),
        ],
    ),
    (
        "batman",
        &[
            (
                "The Batman Trailer",
                "mqqft2x_Aa4",
                "https://i.ytimg.com/vi/mqqft2x_Aa4/hqdefault.jpg",
            ),
            (
                "The Dark Knight Trailer",
                "EXeTwQWrcwY",
                "https://i.ytimg.com/vi/EXeTwQWrcwY/hqdefault.jpg",
            ),
            (
                "Batman Begins Trailer",
                "neY2xVmOfUM",
                "https://i.ytimg.com/vi/neY2xVmOfUM/hqdefault.jpg",
            ),
            (
                "Joker Trailer",
                "zAGVQLHvwOY",
                "https://i.ytimg.com/vi/zAGVQLHvwOY/hqdefault.jpg",
            ),
            (
                "Justice League Trailer",
                "3cxixDgHUYw",
                "https://i.ytimg.com/vi/3cxixDgHUYw/hqdefault.jpg",
            ),
            (
                "Superman Man of Steel",
                "T6DJcgm3wNY",
                "https://i.ytimg.com/vi/T6DJcgm3wNY/hqdefault.jpg",
            ),
        ],
    ),
];

const DEFAULT_TRAILERS: &[(&str, &str, &str)] = &[
    (
        "Dune: Part Two Trailer",
        "Way9Dexny3w",
        "https://i.ytimg.com/vi/Way9Dexny3w/hqdefault.jpg",
    ),
    (
        "Oppenheimer Trailer",
        "uYPbbksJxIg",
        "https://i.ytimg.com/vi/uYPbbksJxIg/hqdefault.jpg",
    ),
    (
        "Barbie Trailer",
        "pBk4NYhWNMM",
        "https://i.ytimg.com/vi/pBk4NYhWNMM/hqdefault.jpg",
    ),
    (
        "Deadpool & Wolverine",
        "73_1biulkYk",
        "https://i.ytimg.com/vi/73_1biulkYk/hqdefault.jpg",
    ),
    (
        "The Marvels Trailer",
        "wS_qbDztgVY",
        "https://i.ytimg.com/vi/wS_qbDztgVY/hqdefault.jpg",
    ),
    (
        "Top Gun: Maverick",
        "giXco2jaZ_4",
        "https://i.ytimg.com/vi/giXco2jaZ_4/hqdefault.jpg",
    ),
];

fn video_item(
    title: &str,
    video_id: &str,
    thumbnail: &str,
    channel: &str,
    description: String,
    platform: &str,
) -> ContentItem {
    ContentItem {
        id: video_id.to_string(),
        title: title.to_string(),
        description,
        thumbnail: thumbnail.to_string(),
        channel: channel.to_string(),
        published_at: FALLBACK_PUBLISHED_AT.to_string(),
        platform: platform.to_string(),
        url: format!("https://www.youtube.com/watch?v={}", video_id),
        all_platforms: None,
        rating: None,
        year: None,
    }
}

fn general_video_results(query: &str) -> Vec<ContentItem> {
    GENERAL_VIDEOS
        .iter()
        .map(|(title, id, thumbnail, channel)| {
            video_item(
                title,
                id,
                thumbnail,
                channel,
                format!("Popular video about {}", query),
                "youtube",
            )
        })
        .collect()
}

fn short_form_results(query: &str) -> Vec<ContentItem> {
    SHORT_FORM_CLIPS
        .iter()
        .map(|(title, id, thumbnail, channel)| {
            video_item(
                title,
                id,
                thumbnail,
                channel,
                format!("Viral {} content", query),
                "shorts",
            )
        })
        .collect()
}

/// Selects a curated trailer bucket: exact key match first, then substring
/// containment in either direction, else the default bucket.
fn trailer_bucket(query: &str) -> &'static [(&'static str, &'static str, &'static str)] {
    let query_lower = query.to_lowercase();

    if let Some((_, videos)) = TRAILER_BUCKETS.iter().find(|(key, _)| *key == query_lower) {
        return videos;
    }

    TRAILER_BUCKETS
        .iter()
        .find(|(key, _)| query_lower.contains(key) || key.contains(&query_lower))
        .map(|(_, videos)| *videos)
        .unwrap_or(DEFAULT_TRAILERS)
}

fn media_results(query: &str, category: Category) -> Vec<ContentItem> {
    trailer_bucket(query)
        .iter()
        .map(|(title, id, thumbnail)| ContentItem {
            id: id.to_string(),
            title: title.to_string(),
            description: "Watch the official trailer".to_string(),
            thumbnail: thumbnail.to_string(),
            channel: "Official Movie Trailers".to_string(),
            published_at: TRAILER_PUBLISHED_AT.to_string(),
            platform: category.as_str().to_string(),
            url: format!("https://www.youtube.com/watch?v={}", id),
            all_platforms: None,
            rating: None,
            year: None,
        })
        .collect()
}

/// The static substitute result set for a category and query.
pub fn results_for(category: Category, query: &str) -> Vec<ContentItem> {
    tracing::info!(category = %category, query = %query, "Serving fallback catalog results");
    match category {
        Category::Youtube => general_video_results(query),
        Category::Shorts => short_form_results(query),
        Category::Movies | Category::Tv => media_results(query, category),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batman_bucket_exact_match() {
        let items = results_for(Category::Movies, "batman");
        assert_eq!(items.len(), 6);
        assert_eq!(items[0].id, "mqqft2x_Aa4");
        assert!(items.iter().all(|item| item.platform == "movies"));
    }

    #[test]
    fn test_substring_match_both_directions() {
        // Query contains the key
        let items = results_for(Category::Movies, "the batman 2022");
        assert_eq!(items[0].id, "mqqft2x_Aa4");

        // Key contains the query
        let items = results_for(Category::Movies, "incep");
        assert_eq!(items[0].id, "zSWdZVtXT7E");
    }

    #[test]
    fn test_unmatched_query_gets_default_bucket() {
        let items = results_for(Category::Movies, "obscure arthouse film");
        assert_eq!(items.len(), 6);
        assert_eq!(items[0].id, "Way9Dexny3w");
    }

    #[test]
    fn test_tv_category_tags_platform_tv() {
        let items = results_for(Category::Tv, "batman");
        assert!(items.iter().all(|item| item.platform == "tv"));
    }

    #[test]
    fn test_general_and_short_form_sets() {
        let general = results_for(Category::Youtube, "science");
        assert_eq!(general.len(), 8);
        assert!(general.iter().all(|item| item.platform == "youtube"));
        assert!(general[0].description.contains("science"));

        let shorts = results_for(Category::Shorts, "dance");
        assert_eq!(shorts.len(), 10);
        assert!(shorts.iter().all(|item| item.platform == "shorts"));
    }

    #[test]
    fn test_ids_unique_within_each_set() {
        for category in [
            Category::Youtube,
            Category::Shorts,
            Category::Movies,
            Category::Tv,
        ] {
            let items = results_for(category, "batman");
            let mut ids: Vec<&str> = items.iter().map(|item| item.id.as_str()).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), items.len());
        }
    }
}
