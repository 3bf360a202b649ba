//! Reasoning, strengths and improvement suggestions are produced from
//! ordered rule tables. Each rule contributes at most one line, in table
//! order.

use crate::models::{AiScores, DerivedMetrics, DeveloperType, LanguageBreakdown, ProjectQuality, Tier};

pub struct NarrativeInput<'a> {
    pub metrics: &'a DerivedMetrics,
    pub scores: &'a AiScores,
    pub languages: &'a [LanguageBreakdown],
    pub project_quality: &'a ProjectQuality,
    pub developer_type: &'a DeveloperType,
    pub tier: Tier,
}

impl NarrativeInput<'_> {
    fn top_languages(&self) -> String {
        self.languages
            .iter()
            .take(3)
            .map(|l| l.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub struct Rule {
    pub applies: fn(&NarrativeInput) -> bool,
    pub render: fn(&NarrativeInput) -> String,
}

pub fn evaluate(rules: &[Rule], input: &NarrativeInput) -> Vec<String> {
    rules
        .iter()
        .filter(|rule| (rule.applies)(input))
        .map(|rule| (rule.render)(input))
        .collect()
}

pub const REASONING_RULES: &[Rule] = &[
    Rule {
        applies: |_| true,
        render: |n| {
            format!(
                "{} with {} repositories and {} total stars.",
                n.developer_type.label(),
                n.metrics.own_repos,
                n.metrics.total_stars
            )
        },
    },
    Rule {
        applies: |_| true,
        render: |n| {
            let top = n.top_languages();
            let top = if top.is_empty() { "various languages".to_string() } else { top };
            format!("Primary expertise in {}.", top)
        },
    },
    Rule {
        applies: |n| n.tier == Tier::Diamond,
        render: |_| "Exceptional developer demonstrating outstanding code quality, active contributions, and significant community impact. Highly recommended for senior roles.".to_string(),
    },
    Rule {
        applies: |n| n.tier == Tier::Gold,
        render: |_| "Strong developer with quality projects and established community presence. Suitable for mid to senior level positions.".to_string(),
    },
    Rule {
        applies: |n| n.tier == Tier::Silver,
        render: |_| "Developing developer showing promising skills and consistent growth. Great potential for junior to mid-level roles.".to_string(),
    },
    Rule {
        applies: |n| n.tier == Tier::Bronze,
        render: |_| "Beginner developer building their portfolio. Recommended for internships and entry-level positions.".to_string(),
    },
];

pub const STRENGTH_RULES: &[Rule] = &[
    Rule {
        applies: |_| true,
        render: |n| n.developer_type.label(),
    },
    Rule {
        applies: |n| !n.languages.is_empty(),
        render: |n| format!("💻 Proficient in {}", n.top_languages()),
    },
    Rule {
        applies: |n| n.scores.code_quality > 70,
        render: |n| format!("✨ High code quality ({}/100)", n.scores.code_quality),
    },
    Rule {
        applies: |n| n.scores.activity_level > 70,
        render: |n| format!("⚡ Very active contributor ({}/100)", n.scores.activity_level),
    },
    Rule {
        applies: |n| n.scores.community_impact > 70,
        render: |n| format!("🌟 Strong community presence ({}/100)", n.scores.community_impact),
    },
    Rule {
        applies: |n| n.project_quality.quality_score > 70,
        render: |n| format!("📦 Well-documented projects ({}% quality)", n.project_quality.quality_score),
    },
    Rule {
        applies: |n| n.metrics.total_stars > 100,
        render: |n| format!("⭐ {} total stars earned", n.metrics.total_stars),
    },
    Rule {
        applies: |n| n.metrics.followers > 50,
        render: |n| format!("👥 {} GitHub followers", n.metrics.followers),
    },
    Rule {
        applies: |n| n.languages.len() >= 5,
        render: |n| format!("🎯 Versatile - {} programming languages", n.languages.len()),
    },
];

pub const IMPROVEMENT_RULES: &[Rule] = &[
    Rule {
        applies: |n| n.project_quality.has_description < 70,
        render: |_| "Add detailed README files and descriptions to all repositories".to_string(),
    },
    Rule {
        applies: |n| n.project_quality.has_topics < 50,
        render: |_| "Use topics/tags to categorize repositories for better discoverability".to_string(),
    },
    Rule {
        applies: |n| n.project_quality.has_license < 50,
        render: |_| "Add licenses to projects to clarify usage rights".to_string(),
    },
    Rule {
        applies: |n| n.scores.activity_level < 50,
        render: |_| "Increase contribution frequency and consistency".to_string(),
    },
    Rule {
        applies: |n| n.scores.activity_level < 50,
        render: |_| "Participate in more open source projects".to_string(),
    },
    Rule {
        applies: |n| n.scores.community_impact < 50,
        render: |_| "Create projects that solve real-world problems".to_string(),
    },
    Rule {
        applies: |n| n.scores.community_impact < 50,
        render: |_| "Engage more with the developer community".to_string(),
    },
    Rule {
        applies: |n| n.metrics.followers < 50,
        render: |_| "Build your developer network and following".to_string(),
    },
    Rule {
        applies: |n| n.project_quality.avg_stars < 5.0,
        render: |_| "Focus on creating higher quality, more useful projects".to_string(),
    },
    Rule {
        applies: |n| n.scores.project_diversity < 50,
        render: |_| "Explore different programming languages and technologies".to_string(),
    },
    Rule {
        applies: |n| n.scores.project_diversity < 50,
        render: |_| "Diversify project types and domains".to_string(),
    },
];

pub const GROWING_PROFILE: &str = "🌱 Growing developer profile";
pub const KEEP_BUILDING: &str = "Keep building quality projects and engaging with the community";

pub fn generate_reasoning(input: &NarrativeInput) -> String {
    evaluate(REASONING_RULES, input).join(" ")
}

/// Falls back to a single encouragement when nothing beyond the developer
/// type stood out.
pub fn identify_strengths(input: &NarrativeInput) -> Vec<String> {
    let strengths = evaluate(STRENGTH_RULES, input);
    if strengths.len() > 1 {
        strengths
    } else {
        vec![GROWING_PROFILE.to_string()]
    }
}

pub fn suggest_improvements(input: &NarrativeInput) -> Vec<String> {
    let improvements = evaluate(IMPROVEMENT_RULES, input);
    if improvements.is_empty() {
        vec![KEEP_BUILDING.to_string()]
    } else {
        improvements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        metrics: DerivedMetrics,
        scores: AiScores,
        languages: Vec<LanguageBreakdown>,
        quality: ProjectQuality,
        developer_type: DeveloperType,
        tier: Tier,
    }

    impl Fixture {
        fn weak() -> Self {
            Self {
                metrics: DerivedMetrics {
                    fetched_repos: 0,
                    total_repos: 0,
                    own_repos: 0,
                    total_stars: 0,
                    total_forks: 0,
                    languages: 0,
                    recent_activity_count: 0,
                    repos_with_description: 0,
                    repos_with_topics: 0,
                    avg_stars_per_repo: 0.0,
                    avg_forks_per_repo: 0.0,
                    account_age_in_days: 10,
                    repos_per_year: 0.0,
                    followers: 0,
                    following: 0,
                    public_gists: 0,
                },
                scores: AiScores {
                    code_quality: 0,
                    activity_level: 0,
                    community_impact: 0,
                    project_diversity: 0,
                    overall_score: 0,
                    confidence: 0,
                },
                languages: Vec::new(),
                quality: ProjectQuality {
                    has_readme: 0,
                    has_description: 0,
                    has_topics: 0,
                    has_license: 0,
                    avg_stars: 0.0,
                    quality_score: 0,
                },
                developer_type: DeveloperType::new("Aspiring Developer", "🌱"),
                tier: Tier::Bronze,
            }
        }

        fn strong() -> Self {
            let mut f = Self::weak();
            f.metrics.own_repos = 40;
            f.metrics.total_repos = 40;
            f.metrics.total_stars = 900;
            f.metrics.followers = 300;
            f.scores = AiScores {
                code_quality: 85,
                activity_level: 75,
                community_impact: 71,
                project_diversity: 90,
                overall_score: 80,
                confidence: 100,
            };
            f.languages = ["Rust", "Go", "C", "Zig", "Python"]
                .iter()
                .map(|n| LanguageBreakdown {
                    name: n.to_string(),
                    percentage: 20,
                    repo_count: 8,
                    stars: 100,
                })
                .collect();
            f.quality = ProjectQuality {
                has_readme: 100,
                has_description: 90,
                has_topics: 80,
                has_license: 75,
                avg_stars: 22.5,
                quality_score: 88,
            };
            f.developer_type = DeveloperType::new("Systems Programmer", "💻");
            f.tier = Tier::Diamond;
            f
        }

        fn input(&self) -> NarrativeInput<'_> {
            NarrativeInput {
                metrics: &self.metrics,
                scores: &self.scores,
                languages: &self.languages,
                project_quality: &self.quality,
                developer_type: &self.developer_type,
                tier: self.tier,
            }
        }
    }

    #[test]
    fn test_weak_profile_narrative() {
        let f = Fixture::weak();
        let input = f.input();

        assert_eq!(
            generate_reasoning(&input),
            "🌱 Aspiring Developer with 0 repositories and 0 total stars. \
             Primary expertise in various languages. \
             Beginner developer building their portfolio. Recommended for internships and entry-level positions."
        );
        assert_eq!(identify_strengths(&input), vec![GROWING_PROFILE.to_string()]);

        let improvements = suggest_improvements(&input);
        assert_eq!(improvements.len(), IMPROVEMENT_RULES.len());
        assert_eq!(improvements[0], "Add detailed README files and descriptions to all repositories");
        assert_eq!(improvements[10], "Diversify project types and domains");
    }

    #[test]
    fn test_strong_profile_narrative() {
        let f = Fixture::strong();
        let input = f.input();

        let reasoning = generate_reasoning(&input);
        assert!(reasoning.starts_with("💻 Systems Programmer with 40 repositories and 900 total stars."));
        assert!(reasoning.contains("Primary expertise in Rust, Go, C."));
        assert!(reasoning.ends_with("Highly recommended for senior roles."));

        assert_eq!(
            identify_strengths(&input),
            vec![
                "💻 Systems Programmer",
                "💻 Proficient in Rust, Go, C",
                "✨ High code quality (85/100)",
                "⚡ Very active contributor (75/100)",
                "🌟 Strong community presence (71/100)",
                "📦 Well-documented projects (88% quality)",
                "⭐ 900 total stars earned",
                "👥 300 GitHub followers",
                "🎯 Versatile - 5 programming languages",
            ]
        );
        assert_eq!(suggest_improvements(&input), vec![KEEP_BUILDING.to_string()]);
    }

    #[test]
    fn test_thresholds_are_strict() {
        let mut f = Fixture::strong();
        f.scores.code_quality = 70;
        f.metrics.followers = 50;
        f.quality.has_description = 70;
        f.quality.has_topics = 49;
        let input = f.input();

        let strengths = identify_strengths(&input);
        assert!(!strengths.iter().any(|s| s.starts_with("✨")));
        assert!(!strengths.iter().any(|s| s.starts_with("👥")));

        assert_eq!(
            suggest_improvements(&input),
            vec!["Use topics/tags to categorize repositories for better discoverability".to_string()]
        );
    }

    #[test]
    fn test_each_tier_has_one_sentence() {
        let mut f = Fixture::weak();
        for tier in Tier::ALL {
            f.tier = tier;
            let lines = evaluate(REASONING_RULES, &f.input());
            assert_eq!(lines.len(), 3);
        }
    }
}
