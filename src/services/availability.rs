/// Availability filter
///
/// Maps raw watch-provider offers to the closed platform set, prefers
/// subscription offers over buy/rent, and selects a single primary platform
/// by fixed priority. Candidates with no mapped platform are excluded from
/// output entirely; that decision lives with the caller, which treats an
/// empty list as a hard filter.
use crate::models::{Platform, PlatformAvailability, RegionOffers};

/// Primary-platform priority, first match wins
pub const PLATFORM_PRIORITY: [Platform; 7] = [
    Platform::Netflix,
    Platform::Disney,
    Platform::Prime,
    Platform::Hulu,
    Platform::Hbo,
    Platform::Apple,
    Platform::Peacock,
];

/// How many buy/rent offers to consider when no subscription offer exists
const BUY_OFFER_CAP: usize = 3;

/// Maps a catalog provider id to a known platform. Unrecognized providers
/// are dropped, not surfaced.
pub fn platform_for_provider(provider_id: u64) -> Option<Platform> {
    match provider_id {
        8 => Some(Platform::Netflix),
        9 => Some(Platform::Prime),
        337 => Some(Platform::Disney),
        15 => Some(Platform::Hulu),
        384 => Some(Platform::Hbo),
        350 => Some(Platform::Apple),
        386 => Some(Platform::Peacock),
        _ => None,
    }
}

/// Converts one region's offers into mapped platform availability.
/// Subscription ("flatrate") offers are preferred; buy offers are consulted
/// only when no subscription offer mapped, capped to the first few.
pub fn map_offers(offers: &RegionOffers, title: &str) -> Vec<PlatformAvailability> {
    let mut platforms: Vec<PlatformAvailability> = offers
        .flatrate
        .iter()
        .filter_map(|offer| platform_for_provider(offer.provider_id))
        .map(|platform| PlatformAvailability {
            platform,
            url: platform_url(platform, title),
        })
        .collect();

    if platforms.is_empty() {
        platforms = offers
            .buy
            .iter()
            .take(BUY_OFFER_CAP)
            .filter_map(|offer| platform_for_provider(offer.provider_id))
            .map(|platform| PlatformAvailability {
                platform,
                url: platform_url(platform, title),
            })
            .collect();
    }

    platforms
}

/// Picks the primary platform: first priority-list match, else the first
/// available platform.
pub fn primary_platform(platforms: &[PlatformAvailability]) -> Option<&PlatformAvailability> {
    PLATFORM_PRIORITY
        .iter()
        .find_map(|wanted| platforms.iter().find(|p| p.platform == *wanted))
        .or_else(|| platforms.first())
}

/// Direct links to the streaming platforms. Most platforms require a login
/// before search, so those land on the platform home; Prime supports an
/// unauthenticated title search.
pub fn platform_url(platform: Platform, title: &str) -> String {
    match platform {
        Platform::Netflix => "https://www.netflix.com/browse".to_string(),
        Platform::Prime => format!(
            "https://www.amazon.com/s?k={}&i=instant-video",
            urlencoding::encode(title)
        ),
        Platform::Disney => "https://www.disneyplus.com/".to_string(),
        Platform::Hulu => "https://www.hulu.com/hub/home".to_string(),
        Platform::Hbo => "https://www.max.com/".to_string(),
        Platform::Apple => "https://tv.apple.com/".to_string(),
        Platform::Peacock => "https://www.peacocktv.com/".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProviderOffer;

    fn offers(flatrate: Vec<u64>, buy: Vec<u64>) -> RegionOffers {
        RegionOffers {
            flatrate: flatrate
                .into_iter()
                .map(|provider_id| ProviderOffer { provider_id })
                .collect(),
            buy: buy
                .into_iter()
                .map(|provider_id| ProviderOffer { provider_id })
                .collect(),
        }
    }

    #[test]
    fn test_platform_for_provider_known() {
        assert_eq!(platform_for_provider(8), Some(Platform::Netflix));
        assert_eq!(platform_for_provider(337), Some(Platform::Disney));
        assert_eq!(platform_for_provider(386), Some(Platform::Peacock));
    }

    #[test]
    fn test_platform_for_provider_unknown_dropped() {
        assert_eq!(platform_for_provider(9999), None);
    }

    #[test]
    fn test_map_offers_prefers_flatrate() {
        let offers = offers(vec![8, 15], vec![9]);
        let platforms = map_offers(&offers, "Inception");
        let tags: Vec<_> = platforms.iter().map(|p| p.platform).collect();
        assert_eq!(tags, vec![Platform::Netflix, Platform::Hulu]);
    }

    #[test]
    fn test_map_offers_falls_back_to_buy() {
        let offers = offers(vec![], vec![9, 350]);
        let platforms = map_offers(&offers, "Inception");
        let tags: Vec<_> = platforms.iter().map(|p| p.platform).collect();
        assert_eq!(tags, vec![Platform::Prime, Platform::Apple]);
    }

    #[test]
    fn test_map_offers_buy_capped_to_three() {
        // Four known buy providers; only the first three offers are considered
        let offers = offers(vec![], vec![9, 350, 386, 8]);
        let platforms = map_offers(&offers, "Inception");
        assert_eq!(platforms.len(), 3);
    }

    #[test]
    fn test_map_offers_unknown_providers_dropped() {
        let offers = offers(vec![1899, 2], vec![]);
        assert!(map_offers(&offers, "Inception").is_empty());
    }

    #[test]
    fn test_primary_platform_priority_order() {
        let platforms = vec![
            PlatformAvailability {
                platform: Platform::Peacock,
                url: String::new(),
            },
            PlatformAvailability {
                platform: Platform::Disney,
                url: String::new(),
            },
        ];
        // Disney outranks Peacock regardless of list order
        assert_eq!(
            primary_platform(&platforms).unwrap().platform,
            Platform::Disney
        );
    }

    #[test]
    fn test_primary_platform_first_when_no_priority_match() {
        // All mapped platforms are in the priority list by construction,
        // so the fallback only triggers for an empty priority intersection;
        // with a non-empty list the first entry wins.
        let platforms = vec![PlatformAvailability {
            platform: Platform::Apple,
            url: String::new(),
        }];
        assert_eq!(
            primary_platform(&platforms).unwrap().platform,
            Platform::Apple
        );
        assert!(primary_platform(&[]).is_none());
    }

    #[test]
    fn test_prime_url_encodes_title() {
        let url = platform_url(Platform::Prime, "Spider-Man: No Way Home");
        assert!(url.contains("Spider-Man%3A%20No%20Way%20Home"));
        assert!(url.starts_with("https://www.amazon.com/s?k="));
    }
}
