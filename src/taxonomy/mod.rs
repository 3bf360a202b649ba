pub mod languages;

use crate::models::DeveloperType;

pub use languages::{is_backend_signal, is_frontend_signal};

pub struct Archetype {
    pub name: &'static str,
    pub emoji: &'static str,
    pub languages: &'static [&'static str],
}

impl Archetype {
    pub fn developer_type(&self) -> DeveloperType {
        DeveloperType::new(self.name, self.emoji)
    }

    pub fn matches(&self, language: &str) -> usize {
        usize::from(self.languages.contains(&language))
    }
}

/// Checked in order; the first archetype matching at least two of a
/// developer's top languages wins.
pub const ARCHETYPES: &[Archetype] = &[
    Archetype {
        name: "Blockchain Developer",
        emoji: "⛓️",
        languages: &["Move", "Solidity", "Rust"],
    },
    Archetype {
        name: "Frontend Developer",
        emoji: "🎨",
        languages: &["JavaScript", "TypeScript", "Vue", "CSS", "HTML"],
    },
    Archetype {
        name: "Backend Developer",
        emoji: "⚙️",
        languages: &["Python", "Java", "Go", "C#", "PHP", "Ruby"],
    },
    Archetype {
        name: "Mobile Developer",
        emoji: "📱",
        languages: &["Swift", "Kotlin", "Dart", "Objective-C"],
    },
    Archetype {
        name: "Data Scientist",
        emoji: "📊",
        languages: &["Python", "R", "Jupyter Notebook"],
    },
    Archetype {
        name: "DevOps Engineer",
        emoji: "🔧",
        languages: &["Shell", "Dockerfile", "HCL"],
    },
    Archetype {
        name: "Systems Programmer",
        emoji: "💻",
        languages: &["C", "C++", "Assembly", "Rust"],
    },
];

pub const ARCHETYPE_MATCH_THRESHOLD: usize = 2;

pub fn full_stack() -> DeveloperType {
    DeveloperType::new("Full-Stack Developer", "🚀")
}

pub fn frontend() -> DeveloperType {
    DeveloperType::new("Frontend Developer", "🎨")
}

pub fn backend() -> DeveloperType {
    DeveloperType::new("Backend Developer", "⚙️")
}

pub fn generalist() -> DeveloperType {
    DeveloperType::new("Software Developer", "💻")
}

pub fn aspiring() -> DeveloperType {
    DeveloperType::new("Aspiring Developer", "🌱")
}

/// First archetype with enough matches among `languages`.
pub fn match_archetype<'a, I>(languages: I) -> Option<&'static Archetype>
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    ARCHETYPES.iter().find(|archetype| {
        let hits: usize = languages.clone().into_iter().map(|l| archetype.matches(l)).sum();
        hits >= ARCHETYPE_MATCH_THRESHOLD
    })
}
