use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Ordinal badge tier shared by the point-based calculator and the
/// heuristic analyzer. The two produce scores on different scales, so each
/// has its own constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Diamond,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierInfo {
    pub emoji: &'static str,
    pub label: &'static str,
    pub color: &'static str,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::Bronze, Tier::Silver, Tier::Gold, Tier::Diamond];

    /// Tier for a badge point total (0..=250).
    pub fn from_badge_points(total: u32) -> Self {
        match total {
            t if t >= 180 => Tier::Diamond,
            t if t >= 150 => Tier::Gold,
            t if t >= 90 => Tier::Silver,
            _ => Tier::Bronze,
        }
    }

    /// Tier for a heuristic overall score (0..=100).
    pub fn from_overall_score(score: u8) -> Self {
        match score {
            s if s >= 80 => Tier::Diamond,
            s if s >= 60 => Tier::Gold,
            s if s >= 40 => Tier::Silver,
            _ => Tier::Bronze,
        }
    }

    /// Bronze = 1 through Diamond = 4.
    pub fn ordinal(self) -> u8 {
        match self {
            Tier::Bronze => 1,
            Tier::Silver => 2,
            Tier::Gold => 3,
            Tier::Diamond => 4,
        }
    }

    pub fn info(self) -> TierInfo {
        match self {
            Tier::Bronze => TierInfo { emoji: "🥉", label: "Bronze", color: "#cd7f32" },
            Tier::Silver => TierInfo { emoji: "🥈", label: "Silver", color: "#c0c0c0" },
            Tier::Gold => TierInfo { emoji: "🥇", label: "Gold", color: "#000000" },
            Tier::Diamond => TierInfo { emoji: "💎", label: "Diamond", color: "#b9f2ff" },
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.info().label)
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bronze" => Ok(Tier::Bronze),
            "silver" => Ok(Tier::Silver),
            "gold" => Ok(Tier::Gold),
            "diamond" => Ok(Tier::Diamond),
            other => Err(format!("unknown tier: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_badge_point_boundaries() {
        assert_eq!(Tier::from_badge_points(180), Tier::Diamond);
        assert_eq!(Tier::from_badge_points(179), Tier::Gold);
        assert_eq!(Tier::from_badge_points(150), Tier::Gold);
        assert_eq!(Tier::from_badge_points(149), Tier::Silver);
        assert_eq!(Tier::from_badge_points(90), Tier::Silver);
        assert_eq!(Tier::from_badge_points(89), Tier::Bronze);
        assert_eq!(Tier::from_badge_points(0), Tier::Bronze);
    }

    #[test]
    fn test_overall_score_boundaries() {
        assert_eq!(Tier::from_overall_score(100), Tier::Diamond);
        assert_eq!(Tier::from_overall_score(80), Tier::Diamond);
        assert_eq!(Tier::from_overall_score(79), Tier::Gold);
        assert_eq!(Tier::from_overall_score(60), Tier::Gold);
        assert_eq!(Tier::from_overall_score(59), Tier::Silver);
        assert_eq!(Tier::from_overall_score(40), Tier::Silver);
        assert_eq!(Tier::from_overall_score(39), Tier::Bronze);
    }

    #[test]
    fn test_ordering_matches_ordinal() {
        for pair in Tier::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
            assert_eq!(pair[0].ordinal() + 1, pair[1].ordinal());
        }
    }

    #[test]
    fn test_parse_and_serialize() {
        assert_eq!("Gold".parse::<Tier>(), Ok(Tier::Gold));
        assert_eq!("diamond".parse::<Tier>(), Ok(Tier::Diamond));
        assert!("platinum".parse::<Tier>().is_err());
        assert_eq!(serde_json::to_string(&Tier::Silver).unwrap(), "\"silver\"");
        assert_eq!(Tier::Bronze.to_string(), "Bronze");
    }
}
