use serde::Serialize;
use vader_sentiment::SentimentIntensityAnalyzer;

/// Polarity scores for a piece of text. `compound` is normalized to [-1.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SentimentScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

/// Scores review text. Implementations must be deterministic for equal input.
pub trait SentimentAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> SentimentScores;
}

/// Lexicon and rule based analyzer (VADER)
pub struct VaderAnalyzer {
    inner: SentimentIntensityAnalyzer<'static>,
}

impl VaderAnalyzer {
    pub fn new() -> Self {
        Self {
            inner: SentimentIntensityAnalyzer::new(),
        }
    }
}

impl Default for VaderAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer for VaderAnalyzer {
    fn analyze(&self, text: &str) -> SentimentScores {
        let scores = self.inner.polarity_scores(text);
        let score = |key: &str| scores.get(key).copied().unwrap_or(0.0);

        SentimentScores {
            neg: score("neg"),
            neu: score("neu"),
            pos: score("pos"),
            compound: score("compound"),
        }
    }
}
