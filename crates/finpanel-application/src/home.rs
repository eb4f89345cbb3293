//! Static content of the landing view.

use finpanel_core::route::{ADVISOR_PATH, ANALYSIS_PATH, LOAN_PATH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureCard {
    pub title: &'static str,
    pub description: &'static str,
    pub path: &'static str,
    pub stat: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformStat {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeView {
    pub headline: &'static str,
    pub pitch: &'static str,
    /// Target of the hero "Go To Site" action.
    pub hero_path: &'static str,
    pub features: &'static [FeatureCard],
    pub stats: &'static [PlatformStat],
}

const FEATURES: &[FeatureCard] = &[
    FeatureCard {
        title: "Stock Past Analysis",
        description: "Analyze historical stock performance and trends with advanced analytics tools",
        path: ANALYSIS_PATH,
        stat: "98% accuracy",
    },
    FeatureCard {
        title: "Automatic Loan Approver",
        description: "Get instant loan approval decisions using our AI-powered system",
        path: LOAN_PATH,
        stat: "3min average",
    },
    FeatureCard {
        title: "AI Financial Advisor",
        description: "Receive personalized financial advice powered by advanced AI algorithms",
        path: ADVISOR_PATH,
        stat: "24/7 available",
    },
];

const STATS: &[PlatformStat] = &[
    PlatformStat {
        label: "Active Users",
        value: "50K+",
    },
    PlatformStat {
        label: "Processing Time",
        value: "3 mins",
    },
    PlatformStat {
        label: "Success Rate",
        value: "99.9%",
    },
    PlatformStat {
        label: "Secure Transactions",
        value: "1M+",
    },
];

impl Default for HomeView {
    fn default() -> Self {
        Self {
            headline: "Smart Finance Solutions",
            pitch: "Harness the power of AI to make smarter financial decisions. \
                    Get real-time insights, instant loan approvals, and personalized advice.",
            hero_path: ADVISOR_PATH,
            features: FEATURES,
            stats: STATS,
        }
    }
}

impl HomeView {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finpanel_core::route::{Route, RouteTable};

    #[test]
    fn test_every_link_reaches_a_tool_view() {
        let home = HomeView::new();
        let mut links: Vec<&str> = home.features.iter().map(|card| card.path).collect();
        links.push(home.hero_path);

        for link in links {
            let resolution = RouteTable::resolve(link, true);
            assert!(!resolution.redirected, "{}", link);
            assert_ne!(resolution.route, Route::Home);
        }
    }

    #[test]
    fn test_content() {
        let home = HomeView::new();
        assert_eq!(home.headline, "Smart Finance Solutions");
        assert_eq!(home.features.len(), 3);
        assert_eq!(home.stats.len(), 4);
        assert_eq!(home.stats[0].value, "50K+");
    }
}
