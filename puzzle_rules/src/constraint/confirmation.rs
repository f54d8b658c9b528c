//! Closing question asked after the grid is solved.

use serde::{Deserialize, Serialize};

use crate::text::normalize;

fn default_articles() -> Vec<String> {
    ["a", "o", "as", "os", "um", "uma"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Free-text question about one codename's weapon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmationQuestion {
    /// Codename the question is about.
    pub label: String,
    /// Expected answer as the player would write it.
    pub answer: String,
    /// Leading words that may be dropped from the player's answer.
    #[serde(default = "default_articles")]
    pub articles: Vec<String>,
}

impl ConfirmationQuestion {
    pub fn new(label: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            answer: answer.into(),
            articles: default_articles(),
        }
    }

    /// Whether `raw` answers the question.
    ///
    /// Comparison is case and accent insensitive, ignores repeated spaces and
    /// also accepts the answer preceded by one article (`"a seringa ..."`).
    pub fn accepts(&self, raw: &str) -> bool {
        let expected = collapse(&normalize(&self.answer));
        let given = collapse(&normalize(raw));
        if given == expected {
            return true;
        }
        match given.split_once(' ') {
            Some((first, rest)) => {
                rest == expected && self.articles.iter().any(|a| normalize(a) == first)
            }
            None => false,
        }
    }
}

fn collapse(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
