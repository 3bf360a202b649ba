use indexmap::IndexMap;

use crate::models::{LanguageBreakdown, ProjectQuality, Repository};

const MAX_EXPERTISE: usize = 10;
const MAX_TOPICS: usize = 5;

fn percent(part: usize, total: f64) -> u32 {
    (part as f64 / total * 100.0).round() as u32
}

pub fn analyze_project_quality(repos: &[&Repository]) -> ProjectQuality {
    let total = repos.len().max(1) as f64;
    let count = |pred: fn(&Repository) -> bool| repos.iter().filter(|r| pred(r)).count();

    let with_readme = count(|r| r.has_description() || r.has_wiki);
    let with_description = count(|r| r.has_description());
    let with_topics = count(|r| r.has_topics());
    let with_license = count(|r| r.license.is_some());
    let total_stars: u32 = repos.iter().map(|r| r.stargazers_count).sum();

    let stars_term = (total_stars as f64 / total / 10.0 * 25.0).min(25.0);
    let quality_score = (with_description as f64 / total * 30.0
        + with_topics as f64 / total * 25.0
        + with_license as f64 / total * 20.0
        + stars_term)
        .round() as u32;

    ProjectQuality {
        has_readme: percent(with_readme, total),
        has_description: percent(with_description, total),
        has_topics: percent(with_topics, total),
        has_license: percent(with_license, total),
        avg_stars: (total_stars as f64 / total * 10.0).round() / 10.0,
        quality_score: quality_score.min(100),
    }
}

/// Notable languages followed by recurring topic tags.
pub fn identify_expertise(languages: &[LanguageBreakdown], repos: &[&Repository]) -> Vec<String> {
    let mut expertise: Vec<String> = languages
        .iter()
        .filter(|l| l.repo_count >= 3 || l.stars >= 10)
        .map(|l| format!("{} ({} projects, {}⭐)", l.name, l.repo_count, l.stars))
        .collect();

    let mut topic_counts: IndexMap<&str, u32> = IndexMap::new();
    for topic in repos.iter().flat_map(|r| r.topics.iter()) {
        *topic_counts.entry(topic.as_str()).or_insert(0) += 1;
    }

    let mut recurring: Vec<(&str, u32)> = topic_counts
        .into_iter()
        .filter(|(_, count)| *count >= 2)
        .collect();
    recurring.sort_by(|a, b| b.1.cmp(&a.1));

    expertise.extend(
        recurring
            .into_iter()
            .take(MAX_TOPICS)
            .map(|(topic, _)| format!("#{}", topic)),
    );
    expertise.truncate(MAX_EXPERTISE);
    expertise
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::repo;
    use crate::models::License;

    fn topics(r: &mut Repository, tags: &[&str]) {
        r.topics = tags.iter().map(|t| t.to_string()).collect();
    }

    #[test]
    fn test_empty_repos() {
        let quality = analyze_project_quality(&[]);
        assert_eq!(quality.quality_score, 0);
        assert_eq!(quality.has_description, 0);
        assert_eq!(quality.avg_stars, 0.0);
        assert!(identify_expertise(&[], &[]).is_empty());
    }

    #[test]
    fn test_quality_score() {
        let mut a = repo("a", Some("Rust"), 30);
        a.license = Some(License { name: "MIT".to_string() });
        topics(&mut a, &["cli"]);
        let mut b = repo("b", Some("Rust"), 3);
        b.description = None;
        b.has_wiki = true;
        let c = repo("c", None, 0);
        let d = repo("d", None, 0);

        let quality = analyze_project_quality(&[&a, &b, &c, &d]);
        assert_eq!(quality.has_readme, 100);
        assert_eq!(quality.has_description, 75);
        assert_eq!(quality.has_topics, 25);
        assert_eq!(quality.has_license, 25);
        assert_eq!(quality.avg_stars, 8.3);
        // 22.5 + 6.25 + 5 + 20.625
        assert_eq!(quality.quality_score, 54);
    }

    #[test]
    fn test_stars_term_is_capped() {
        let popular = repo("popular", None, 5000);
        let quality = analyze_project_quality(&[&popular]);
        // 30 + 0 + 0 + 25
        assert_eq!(quality.quality_score, 55);
    }

    #[test]
    fn test_expertise_languages_and_topics() {
        let languages = vec![
            LanguageBreakdown { name: "Rust".into(), percentage: 50, repo_count: 3, stars: 2 },
            LanguageBreakdown { name: "Go".into(), percentage: 25, repo_count: 1, stars: 12 },
            LanguageBreakdown { name: "C".into(), percentage: 25, repo_count: 1, stars: 1 },
        ];
        let mut a = repo("a", None, 0);
        topics(&mut a, &["wasm", "cli"]);
        let mut b = repo("b", None, 0);
        topics(&mut b, &["cli", "parser", "wasm"]);
        let mut c = repo("c", None, 0);
        topics(&mut c, &["cli"]);

        let expertise = identify_expertise(&languages, &[&a, &b, &c]);
        assert_eq!(
            expertise,
            vec![
                "Rust (3 projects, 2⭐)".to_string(),
                "Go (1 projects, 12⭐)".to_string(),
                "#cli".to_string(),
                "#wasm".to_string(),
            ]
        );
    }

    #[test]
    fn test_expertise_is_truncated() {
        let languages: Vec<_> = (0..8)
            .map(|i| LanguageBreakdown {
                name: format!("L{}", i),
                percentage: 10,
                repo_count: 3,
                stars: 0,
            })
            .collect();
        let mut a = repo("a", None, 0);
        topics(&mut a, &["x", "y", "z"]);
        let mut b = repo("b", None, 0);
        topics(&mut b, &["x", "y", "z"]);

        let expertise = identify_expertise(&languages, &[&a, &b]);
        assert_eq!(expertise.len(), 10);
        assert_eq!(expertise[8], "#x");
        assert_eq!(expertise[9], "#y");
    }
}
