use serde::{Deserialize, Serialize};

/// Number of judged sub-scores in a scored reply.
pub const CATEGORY_COUNT: usize = 7;

/// Highest value a single category can take.
pub const MAX_CATEGORY_POINTS: i64 = 10;

/// Highest combined score of one reply, the denominator in `SCORE: 28/70`.
pub const MAX_TOTAL_POINTS: i64 = CATEGORY_COUNT as i64 * MAX_CATEGORY_POINTS;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Creativity,
    Challenge,
    Humor,
    Cleverness,
    Engagement,
    Broke,
    Hacked,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; CATEGORY_COUNT] = [
        Self::Creativity,
        Self::Challenge,
        Self::Humor,
        Self::Cleverness,
        Self::Engagement,
        Self::Broke,
        Self::Hacked,
    ];

    /// Label as it appears in reply text, e.g. `Creativity: 5`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Creativity => "Creativity",
            Self::Challenge => "Challenge",
            Self::Humor => "Humor",
            Self::Cleverness => "Cleverness",
            Self::Engagement => "Engagement",
            Self::Broke => "Broke",
            Self::Hacked => "Hacked",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Creativity => "🎨",
            Self::Challenge => "🧠",
            Self::Humor => "😂",
            Self::Cleverness => "💡",
            Self::Engagement => "🔥",
            Self::Broke => "🚨",
            Self::Hacked => "🔓",
        }
    }
}

impl std::fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Creativity => write!(f, "creativity"),
            Self::Challenge => write!(f, "challenge"),
            Self::Humor => write!(f, "humor"),
            Self::Cleverness => write!(f, "cleverness"),
            Self::Engagement => write!(f, "engagement"),
            Self::Broke => write!(f, "broke"),
            Self::Hacked => write!(f, "hacked"),
        }
    }
}

impl std::str::FromStr for ScoreCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "creativity" => Ok(Self::Creativity),
            "challenge" => Ok(Self::Challenge),
            "humor" => Ok(Self::Humor),
            "cleverness" => Ok(Self::Cleverness),
            "engagement" => Ok(Self::Engagement),
            "broke" => Ok(Self::Broke),
            "hacked" => Ok(Self::Hacked),
            _ => Err(format!("Unknown score category: {s}")),
        }
    }
}

/// Cumulative per-category points. Serializes as one flat field per category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CategoryScores {
    #[serde(deserialize_with = "super::source::lenient_i64")]
    pub creativity: i64,
    #[serde(deserialize_with = "super::source::lenient_i64")]
    pub challenge: i64,
    #[serde(deserialize_with = "super::source::lenient_i64")]
    pub humor: i64,
    #[serde(deserialize_with = "super::source::lenient_i64")]
    pub cleverness: i64,
    #[serde(deserialize_with = "super::source::lenient_i64")]
    pub engagement: i64,
    #[serde(deserialize_with = "super::source::lenient_i64")]
    pub broke: i64,
    #[serde(deserialize_with = "super::source::lenient_i64")]
    pub hacked: i64,
}

impl CategoryScores {
    pub fn get(&self, category: ScoreCategory) -> i64 {
        match category {
            ScoreCategory::Creativity => self.creativity,
            ScoreCategory::Challenge => self.challenge,
            ScoreCategory::Humor => self.humor,
            ScoreCategory::Cleverness => self.cleverness,
            ScoreCategory::Engagement => self.engagement,
            ScoreCategory::Broke => self.broke,
            ScoreCategory::Hacked => self.hacked,
        }
    }

    fn slot(&mut self, category: ScoreCategory) -> &mut i64 {
        match category {
            ScoreCategory::Creativity => &mut self.creativity,
            ScoreCategory::Challenge => &mut self.challenge,
            ScoreCategory::Humor => &mut self.humor,
            ScoreCategory::Cleverness => &mut self.cleverness,
            ScoreCategory::Engagement => &mut self.engagement,
            ScoreCategory::Broke => &mut self.broke,
            ScoreCategory::Hacked => &mut self.hacked,
        }
    }

    pub fn add(&mut self, category: ScoreCategory, points: i64) {
        let slot = self.slot(category);
        *slot = slot.saturating_add(points);
    }

    pub fn sum(&self) -> i64 {
        ScoreCategory::ALL.iter().map(|c| self.get(*c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        ScoreCategory::ALL.iter().all(|c| self.get(*c) == 0)
    }
}

impl std::ops::AddAssign for CategoryScores {
    fn add_assign(&mut self, other: Self) {
        for category in ScoreCategory::ALL {
            self.add(category, other.get(category));
        }
    }
}
