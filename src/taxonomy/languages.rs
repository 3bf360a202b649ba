//! Language groupings used when classifying a developer by their repos.
//! Names follow GitHub's linguist spelling as reported in `language`.

/// Languages that suggest client-side work for the full-stack check.
pub const FRONTEND_SIGNALS: &[&str] = &["JavaScript", "TypeScript", "Vue", "CSS"];

/// Languages that suggest server-side work for the full-stack check.
pub const BACKEND_SIGNALS: &[&str] = &["Python", "Java", "Go", "Ruby", "PHP", "C#"];

/// Top-language fallback when no archetype or full-stack mix matched.
pub const FRONTEND_PRIMARY: &[&str] = &["JavaScript", "TypeScript", "CSS", "HTML", "Vue"];
pub const BACKEND_PRIMARY: &[&str] = &["Python", "Java", "Go", "Ruby", "PHP"];

pub fn is_frontend_signal(language: &str) -> bool {
    FRONTEND_SIGNALS.contains(&language)
}

pub fn is_backend_signal(language: &str) -> bool {
    BACKEND_SIGNALS.contains(&language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signals() {
        assert!(is_frontend_signal("TypeScript"));
        assert!(!is_frontend_signal("HTML"));
        assert!(is_backend_signal("C#"));
        assert!(!is_backend_signal("Rust"));
        assert!(FRONTEND_PRIMARY.contains(&"HTML"));
        assert!(!BACKEND_PRIMARY.contains(&"C#"));
    }
}
