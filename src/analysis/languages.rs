use indexmap::IndexMap;

use crate::models::{DeveloperType, LanguageBreakdown, Repository};
use crate::taxonomy::{self, languages::{BACKEND_PRIMARY, FRONTEND_PRIMARY}};

const MAX_LANGUAGES: usize = 8;
const TOP_LANGUAGES_FOR_TYPE: usize = 5;

/// Share of repositories per primary language, most used first. Ties keep
/// the order in which languages first appear in `repos`.
pub fn analyze_languages(repos: &[&Repository]) -> Vec<LanguageBreakdown> {
    let mut by_language: IndexMap<&str, (u32, u32)> = IndexMap::new();
    for repo in repos {
        if let Some(language) = repo.language() {
            let entry = by_language.entry(language).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += repo.stargazers_count;
        }
    }

    let total = repos.len().max(1) as f64;
    let mut languages: Vec<LanguageBreakdown> = by_language
        .into_iter()
        .map(|(name, (repo_count, stars))| LanguageBreakdown {
            name: name.to_string(),
            percentage: (repo_count as f64 / total * 100.0).round() as u32,
            repo_count,
            stars,
        })
        .collect();

    languages.sort_by(|a, b| b.percentage.cmp(&a.percentage));
    languages.truncate(MAX_LANGUAGES);
    languages
}

pub fn detect_developer_type(languages: &[LanguageBreakdown]) -> DeveloperType {
    let Some(top) = languages.first() else {
        return taxonomy::aspiring();
    };

    let top_langs: Vec<&str> = languages
        .iter()
        .take(TOP_LANGUAGES_FOR_TYPE)
        .map(|l| l.name.as_str())
        .collect();

    if let Some(archetype) = taxonomy::match_archetype(top_langs.iter().copied()) {
        return archetype.developer_type();
    }

    let has_frontend = top_langs.iter().any(|l| taxonomy::is_frontend_signal(l));
    let has_backend = top_langs.iter().any(|l| taxonomy::is_backend_signal(l));
    if has_frontend && has_backend {
        return taxonomy::full_stack();
    }

    let top = top.name.as_str();
    if FRONTEND_PRIMARY.contains(&top) {
        taxonomy::frontend()
    } else if BACKEND_PRIMARY.contains(&top) {
        taxonomy::backend()
    } else {
        taxonomy::generalist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::repo;

    fn breakdown(names: &[&str]) -> Vec<LanguageBreakdown> {
        names
            .iter()
            .map(|n| LanguageBreakdown {
                name: n.to_string(),
                percentage: 10,
                repo_count: 1,
                stars: 0,
            })
            .collect()
    }

    #[test]
    fn test_breakdown_percentages() {
        let repos = vec![
            repo("a", Some("Rust"), 3),
            repo("b", Some("Rust"), 4),
            repo("c", Some("Go"), 1),
            repo("d", Some("Rust"), 0),
        ];
        let refs: Vec<_> = repos.iter().collect();
        let languages = analyze_languages(&refs);

        assert_eq!(languages.len(), 2);
        assert_eq!(languages[0].name, "Rust");
        assert_eq!(languages[0].percentage, 75);
        assert_eq!(languages[0].repo_count, 3);
        assert_eq!(languages[0].stars, 7);
        assert_eq!(languages[1].name, "Go");
        assert_eq!(languages[1].percentage, 25);
        assert_eq!(languages.iter().map(|l| l.percentage).sum::<u32>(), 100);
    }

    #[test]
    fn test_repos_without_language_dilute_share() {
        let repos = vec![repo("a", Some("C"), 0), repo("b", None, 0)];
        let refs: Vec<_> = repos.iter().collect();
        let languages = analyze_languages(&refs);
        assert_eq!(languages.len(), 1);
        assert_eq!(languages[0].percentage, 50);
    }

    #[test]
    fn test_breakdown_truncates_and_keeps_tie_order() {
        let names = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];
        let repos: Vec<_> = names.iter().map(|n| repo(n, Some(*n), 0)).collect();
        let refs: Vec<_> = repos.iter().collect();
        let languages = analyze_languages(&refs);
        assert_eq!(languages.len(), 8);
        let order: Vec<_> = languages.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(order, ["A", "B", "C", "D", "E", "F", "G", "H"]);
    }

    #[test]
    fn test_developer_type_rules() {
        assert_eq!(detect_developer_type(&[]).name, "Aspiring Developer");
        assert_eq!(
            detect_developer_type(&breakdown(&["Move", "Rust"])).name,
            "Blockchain Developer"
        );
        assert_eq!(
            detect_developer_type(&breakdown(&["TypeScript", "Python"])).name,
            "Full-Stack Developer"
        );
        assert_eq!(
            detect_developer_type(&breakdown(&["HTML", "Rust"])).name,
            "Frontend Developer"
        );
        assert_eq!(
            detect_developer_type(&breakdown(&["Go", "Swift"])).name,
            "Backend Developer"
        );
        assert_eq!(
            detect_developer_type(&breakdown(&["Haskell"])).name,
            "Software Developer"
        );
    }

    #[test]
    fn test_only_top_five_languages_count() {
        // Solidity would be the second blockchain match but ranks sixth.
        let langs = breakdown(&["Rust", "Haskell", "Elixir", "OCaml", "Zig", "Solidity"]);
        assert_eq!(detect_developer_type(&langs).name, "Software Developer");
    }
}
