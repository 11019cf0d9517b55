use std::collections::HashMap;

use rand::seq::SliceRandom;

/// Content pool categories. Each maps to one flat list of candidate
/// strings loaded at startup and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Predictions,
    OracleQuestions,
    OracleResponses,
    DailyRituals,
    MagicBallResponses,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Predictions,
        Category::OracleQuestions,
        Category::OracleResponses,
        Category::DailyRituals,
        Category::MagicBallResponses,
    ];

    /// File stem the loader reads this category from (`<stem>.txt`).
    pub fn file_stem(self) -> &'static str {
        match self {
            Category::Predictions => "predictions",
            Category::OracleQuestions => "oracle_questions",
            Category::OracleResponses => "oracle_responses",
            Category::DailyRituals => "daily_rituals",
            Category::MagicBallResponses => "magic_ball_responses",
        }
    }

    /// Fixed reply used when the category has no candidates. Selection
    /// degrades gracefully; a missing source never reaches the user as an
    /// error.
    pub fn fallback(self) -> &'static str {
        match self {
            Category::Predictions => "The stars are silent today. Try again later!",
            Category::OracleQuestions => "The Oracle has run out of questions. Come back later!",
            Category::OracleResponses => "No answer has revealed itself yet. Try asking later.",
            Category::DailyRituals => "No ritual was found for today. Try again later!",
            Category::MagicBallResponses => "The ball is not attuned yet. Try again later!",
        }
    }
}

/// Immutable candidate strings per category.
#[derive(Debug, Default, Clone)]
pub struct ContentPool {
    categories: HashMap<Category, Vec<String>>,
}

impl ContentPool {
    pub fn set(&mut self, category: Category, entries: Vec<String>) {
        self.categories.insert(category, entries);
    }

    pub fn len(&self, category: Category) -> usize {
        self.entries(category).len()
    }

    fn entries(&self, category: Category) -> &[String] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Draw uniformly at random with replacement. An empty category yields
    /// its fixed fallback string.
    pub fn pick(&self, category: Category) -> String {
        self.entries(category)
            .choose(&mut rand::thread_rng())
            .cloned()
            .unwrap_or_else(|| category.fallback().to_string())
    }
}
