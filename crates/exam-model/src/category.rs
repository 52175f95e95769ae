use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Question-type families an assessment section may draw from.
///
/// This is a closed enumeration: class policy decides which of these a class
/// may use, and each carries a conventional default mark value that a
/// blueprint may override per section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionCategory {
    OneWord,
    FillBlank,
    TrueFalse,
    MultipleChoice,
    Matching,
    ShortAnswer,
    Descriptive,
    Application,
}

impl SectionCategory {
    pub const ALL: [SectionCategory; 8] = [
        SectionCategory::OneWord,
        SectionCategory::FillBlank,
        SectionCategory::TrueFalse,
        SectionCategory::MultipleChoice,
        SectionCategory::Matching,
        SectionCategory::ShortAnswer,
        SectionCategory::Descriptive,
        SectionCategory::Application,
    ];

    /// Conventional mark value for a single question of this category.
    pub fn default_marks(&self) -> u32 {
        match self {
            SectionCategory::OneWord
            | SectionCategory::FillBlank
            | SectionCategory::TrueFalse
            | SectionCategory::MultipleChoice => 1,
            SectionCategory::Matching => 2,
            SectionCategory::ShortAnswer => 3,
            SectionCategory::Application => 4,
            SectionCategory::Descriptive => 5,
        }
    }

    /// Categories whose questions carry an option list and answer by option id.
    pub fn is_choice_based(&self) -> bool {
        matches!(
            self,
            SectionCategory::MultipleChoice | SectionCategory::Matching
        )
    }

    /// Canonical label as shown on rendered papers and in CLI tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionCategory::OneWord => "One Word",
            SectionCategory::FillBlank => "Fill in the Blanks",
            SectionCategory::TrueFalse => "True / False",
            SectionCategory::MultipleChoice => "Multiple Choice",
            SectionCategory::Matching => "Match the Following",
            SectionCategory::ShortAnswer => "Short Answer",
            SectionCategory::Descriptive => "Descriptive",
            SectionCategory::Application => "Application",
        }
    }
}

impl fmt::Display for SectionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SectionCategory {
    type Err = ModelError;

    /// Parse a category from the spellings found in policy files and request
    /// payloads (case-insensitive, hyphen/underscore/space agnostic).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "one_word" | "oneword" => Ok(SectionCategory::OneWord),
            "fill_blank" | "fill_in_the_blanks" | "fillblank" => Ok(SectionCategory::FillBlank),
            "true_false" | "true/false" | "truefalse" => Ok(SectionCategory::TrueFalse),
            "multiple_choice" | "mcq" => Ok(SectionCategory::MultipleChoice),
            "matching" | "match_the_following" => Ok(SectionCategory::Matching),
            "short_answer" => Ok(SectionCategory::ShortAnswer),
            "descriptive" | "long_answer" => Ok(SectionCategory::Descriptive),
            "application" | "application_based" => Ok(SectionCategory::Application),
            _ => Err(ModelError::UnknownCategory(s.to_string())),
        }
    }
}
