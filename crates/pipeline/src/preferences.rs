//! The user's answered questionnaire, typed at the boundary.
//!
//! Answers arrive as free text keyed by question id. They are parsed once,
//! here, into closed enumerations so the filters never see raw strings
//! (except the genre label, which is compared verbatim).

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

/// The recognized question keys. Anything else in an answer map is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum QuestionKey {
    Mood,
    Genre,
    Duration,
    Rating,
}

impl QuestionKey {
    pub const ALL: [QuestionKey; 4] = [
        QuestionKey::Mood,
        QuestionKey::Genre,
        QuestionKey::Duration,
        QuestionKey::Rating,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionKey::Mood => "mood",
            QuestionKey::Genre => "genre",
            QuestionKey::Duration => "duration",
            QuestionKey::Rating => "rating",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        QuestionKey::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Mood
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Happy,
    Relaxed,
    Excited,
    Thoughtful,
    NeedAGoodLaugh,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Relaxed,
        Mood::Excited,
        Mood::Thoughtful,
        Mood::NeedAGoodLaugh,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Relaxed => "Relaxed",
            Mood::Excited => "Excited",
            Mood::Thoughtful => "Thoughtful",
            Mood::NeedAGoodLaugh => "Need a good laugh",
        }
    }

    /// Exact label match, as offered by the questionnaire.
    pub fn from_label(label: &str) -> Option<Self> {
        Mood::ALL.into_iter().find(|m| m.label() == label)
    }

    /// Genres associated with this mood.
    pub fn genres(self) -> &'static [&'static str] {
        match self {
            Mood::Happy => &["Comedy", "Animation", "Family"],
            Mood::Relaxed => &["Drama", "Documentary"],
            Mood::Excited => &["Action", "Adventure", "Thriller"],
            Mood::Thoughtful => &["Drama", "Mystery"],
            Mood::NeedAGoodLaugh => &["Comedy"],
        }
    }
}

// =============================================================================
// Duration
// =============================================================================

/// Preferred runtime. Recorded but not yet used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationPreference {
    Under90,
    Between90And120,
    Over2Hours,
    NoPreference,
}

impl DurationPreference {
    pub const ALL: [DurationPreference; 4] = [
        DurationPreference::Under90,
        DurationPreference::Between90And120,
        DurationPreference::Over2Hours,
        DurationPreference::NoPreference,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DurationPreference::Under90 => "Under 90 mins",
            DurationPreference::Between90And120 => "90-120 mins",
            DurationPreference::Over2Hours => "Over 2 hours",
            DurationPreference::NoPreference => "No preference",
        }
    }

    /// Unrecognized labels mean no preference.
    pub fn from_label(label: &str) -> Self {
        DurationPreference::ALL
            .into_iter()
            .find(|d| d.label() == label)
            .unwrap_or(DurationPreference::NoPreference)
    }
}

// =============================================================================
// Rating floor
// =============================================================================

/// Minimum rating answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingFloor {
    /// The "Any rating" sentinel
    Any,
    Above6,
    Above7,
    Above8,
    /// Free text that still carried an integer threshold
    AtLeast(u32),
}

/// Label of the "no minimum" rating option.
pub const ANY_RATING: &str = "Any rating";

impl RatingFloor {
    pub const OPTIONS: [RatingFloor; 4] = [
        RatingFloor::Any,
        RatingFloor::Above6,
        RatingFloor::Above7,
        RatingFloor::Above8,
    ];

    pub fn label(self) -> String {
        match self {
            RatingFloor::Any => ANY_RATING.to_string(),
            RatingFloor::Above6 => "Above 6".to_string(),
            RatingFloor::Above7 => "Above 7".to_string(),
            RatingFloor::Above8 => "Above 8".to_string(),
            RatingFloor::AtLeast(n) => format!("Above {n}"),
        }
    }

    /// Parse a rating answer.
    ///
    /// Known options map to their variants. Other text yields the first
    /// whitespace-separated token that starts with a digit, read up to the
    /// first non-digit ("Above 7.5" gives 7). Returns `None` when there is
    /// no such token.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text == ANY_RATING {
            return Some(RatingFloor::Any);
        }
        if let Some(known) = RatingFloor::OPTIONS.into_iter().find(|r| r.label() == text) {
            return Some(known);
        }
        let threshold = leading_integer(text)?;
        Some(match threshold {
            6 => RatingFloor::Above6,
            7 => RatingFloor::Above7,
            8 => RatingFloor::Above8,
            n => RatingFloor::AtLeast(n),
        })
    }

    /// The numeric floor, `None` for [`RatingFloor::Any`].
    pub fn threshold(self) -> Option<f32> {
        match self {
            RatingFloor::Any => None,
            RatingFloor::Above6 => Some(6.0),
            RatingFloor::Above7 => Some(7.0),
            RatingFloor::Above8 => Some(8.0),
            RatingFloor::AtLeast(n) => Some(n as f32),
        }
    }
}

fn leading_integer(text: &str) -> Option<u32> {
    text.split_whitespace().find_map(|token| {
        let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            None
        } else {
            digits.parse().ok()
        }
    })
}

// =============================================================================
// Snapshot
// =============================================================================

/// Immutable snapshot of a completed questionnaire.
///
/// Absent axes mean "no preference". Built once per questionnaire
/// completion; a new questionnaire produces a new snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreferenceSnapshot {
    mood: Option<Mood>,
    genre: Option<String>,
    duration: Option<DurationPreference>,
    rating: Option<RatingFloor>,
    answers: BTreeMap<QuestionKey, String>,
}

impl PreferenceSnapshot {
    /// Snapshot with no preferences at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw answers keyed by question id.
    ///
    /// Unknown keys and empty answers are ignored. Answers that cannot be
    /// interpreted (an unknown mood, a rating without a number) are kept in
    /// [`answers`](Self::answers) but impose no constraint.
    pub fn from_answers<I, K, V>(answers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut snapshot = Self::new();
        for (key, value) in answers {
            let (key, value) = (key.as_ref(), value.as_ref().trim());
            let Some(question) = QuestionKey::from_key(key) else {
                debug!(key, "Ignoring unrecognized preference key");
                continue;
            };
            if value.is_empty() {
                continue;
            }
            snapshot.answers.insert(question, value.to_string());
            match question {
                QuestionKey::Mood => {
                    snapshot.mood = Mood::from_label(value);
                    if snapshot.mood.is_none() {
                        debug!(mood = value, "Unrecognized mood, no genre constraint from mood");
                    }
                }
                QuestionKey::Genre => snapshot.genre = Some(value.to_string()),
                QuestionKey::Duration => {
                    snapshot.duration = Some(DurationPreference::from_label(value))
                }
                QuestionKey::Rating => {
                    snapshot.rating = RatingFloor::parse(value);
                    if snapshot.rating.is_none() {
                        debug!(rating = value, "Malformed rating preference, treated as unconstrained");
                    }
                }
            }
        }
        snapshot
    }

    pub fn with_mood(mut self, mood: Mood) -> Self {
        self.answers.insert(QuestionKey::Mood, mood.label().to_string());
        self.mood = Some(mood);
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        let genre = genre.into();
        self.answers.insert(QuestionKey::Genre, genre.clone());
        self.genre = Some(genre);
        self
    }

    pub fn with_duration(mut self, duration: DurationPreference) -> Self {
        self.answers
            .insert(QuestionKey::Duration, duration.label().to_string());
        self.duration = Some(duration);
        self
    }

    pub fn with_rating(mut self, rating: RatingFloor) -> Self {
        self.answers.insert(QuestionKey::Rating, rating.label());
        self.rating = Some(rating);
        self
    }

    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    pub fn genre(&self) -> Option<&str> {
        self.genre.as_deref()
    }

    pub fn duration(&self) -> Option<DurationPreference> {
        self.duration
    }

    pub fn rating(&self) -> Option<RatingFloor> {
        self.rating
    }

    /// The minimum rating to enforce, if any.
    pub fn min_rating(&self) -> Option<f32> {
        self.rating.and_then(RatingFloor::threshold)
    }

    /// The raw answers that were recorded, by question.
    pub fn answers(&self) -> &BTreeMap<QuestionKey, String> {
        &self.answers
    }

    /// Union of the chosen genre and the mood's genres, in that order.
    /// Empty means no genre constraint.
    pub fn allowed_genres(&self) -> Vec<&str> {
        let mut allowed: Vec<&str> = Vec::new();
        if let Some(genre) = self.genre.as_deref() {
            allowed.push(genre);
        }
        if let Some(mood) = self.mood {
            for genre in mood.genres() {
                if !allowed.contains(genre) {
                    allowed.push(genre);
                }
            }
        }
        allowed
    }

    /// True when no axis constrains anything.
    pub fn is_unconstrained(&self) -> bool {
        self.min_rating().is_none() && self.allowed_genres().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_rating_parse_known_options() {
        assert_eq!(RatingFloor::parse("Any rating"), Some(RatingFloor::Any));
        assert_eq!(RatingFloor::parse("Above 7"), Some(RatingFloor::Above7));
        assert_eq!(RatingFloor::parse("Above 8"), Some(RatingFloor::Above8));
    }

    #[test]
    fn test_rating_parse_free_text() {
        assert_eq!(RatingFloor::parse("Above 7.5"), Some(RatingFloor::Above7));
        assert_eq!(RatingFloor::parse("at least 5 stars"), Some(RatingFloor::AtLeast(5)));
        assert_eq!(RatingFloor::parse("9+"), Some(RatingFloor::AtLeast(9)));
        assert_eq!(RatingFloor::parse("Above seven"), None);
        assert_eq!(RatingFloor::parse(""), None);
    }

    #[test]
    fn test_thresholds() {
        assert_eq!(RatingFloor::Any.threshold(), None);
        assert_eq!(RatingFloor::Above6.threshold(), Some(6.0));
        assert_eq!(RatingFloor::AtLeast(4).threshold(), Some(4.0));
    }

    #[test]
    fn test_from_answers() {
        let answers = HashMap::from([
            ("mood", "Happy"),
            ("genre", "Drama"),
            ("duration", "90-120 mins"),
            ("rating", "Above 6"),
            ("snacks", "popcorn"),
        ]);
        let prefs = PreferenceSnapshot::from_answers(answers);

        assert_eq!(prefs.mood(), Some(Mood::Happy));
        assert_eq!(prefs.genre(), Some("Drama"));
        assert_eq!(prefs.duration(), Some(DurationPreference::Between90And120));
        assert_eq!(prefs.min_rating(), Some(6.0));
        assert_eq!(prefs.answers().len(), 4);
    }

    #[test]
    fn test_empty_and_malformed_answers_are_unconstrained() {
        let prefs = PreferenceSnapshot::from_answers([
            ("mood", ""),
            ("genre", "  "),
            ("rating", "pretty good"),
        ]);
        assert!(prefs.is_unconstrained());
        assert_eq!(prefs.rating(), None);
        // The malformed answer is still on record.
        assert_eq!(
            prefs.answers().get(&QuestionKey::Rating).map(String::as_str),
            Some("pretty good")
        );
    }

    #[test]
    fn test_unknown_mood_contributes_no_genres() {
        let prefs = PreferenceSnapshot::from_answers([("mood", "Sleepy")]);
        assert_eq!(prefs.mood(), None);
        assert!(prefs.allowed_genres().is_empty());
    }

    #[test]
    fn test_allowed_genres_union() {
        let prefs = PreferenceSnapshot::new()
            .with_genre("Drama")
            .with_mood(Mood::Happy);
        assert_eq!(
            prefs.allowed_genres(),
            vec!["Drama", "Comedy", "Animation", "Family"]
        );

        let overlapping = PreferenceSnapshot::new()
            .with_genre("Drama")
            .with_mood(Mood::Thoughtful);
        assert_eq!(overlapping.allowed_genres(), vec!["Drama", "Mystery"]);
    }

    #[test]
    fn test_duration_labels() {
        assert_eq!(
            DurationPreference::from_label("Over 2 hours"),
            DurationPreference::Over2Hours
        );
        assert_eq!(
            DurationPreference::from_label("a weekend"),
            DurationPreference::NoPreference
        );
    }
}
