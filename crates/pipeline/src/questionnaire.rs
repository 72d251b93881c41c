//! The four-question preference flow.
//!
//! Answers are collected one question at a time; answering the last
//! question yields the [`PreferenceSnapshot`].

use std::collections::BTreeMap;

use thiserror::Error;

use crate::preferences::{
    DurationPreference, Mood, PreferenceSnapshot, QuestionKey, RatingFloor,
};

/// A single question with its fixed options.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub key: QuestionKey,
    pub text: &'static str,
    pub description: &'static str,
    pub options: Vec<String>,
}

#[derive(Error, Debug, PartialEq)]
pub enum QuestionnaireError {
    #[error("'{option}' is not an option for question '{key}'")]
    UnknownOption { key: QuestionKey, option: String },

    #[error("Questionnaire is already complete")]
    AlreadyComplete,
}

/// What happens after an answer.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionnaireStep<'a> {
    /// Another question follows.
    Next(&'a Question),
    /// All questions answered.
    Complete(PreferenceSnapshot),
}

/// Genre options offered by the questionnaire.
pub const GENRE_OPTIONS: [&str; 8] = [
    "Action",
    "Comedy",
    "Drama",
    "Science Fiction",
    "Horror",
    "Romance",
    "Adventure",
    "Mystery",
];

/// The full question list, in the order it is asked.
pub fn questions() -> Vec<Question> {
    vec![
        Question {
            key: QuestionKey::Mood,
            text: "What's your current mood?",
            description: "We'll suggest movies that match your current state of mind",
            options: Mood::ALL.iter().map(|m| m.label().to_string()).collect(),
        },
        Question {
            key: QuestionKey::Genre,
            text: "What genres do you enjoy?",
            description: "Pick your favorite movie genre",
            options: GENRE_OPTIONS.iter().map(|g| g.to_string()).collect(),
        },
        Question {
            key: QuestionKey::Duration,
            text: "Preferred movie length?",
            description: "How much time do you have?",
            options: DurationPreference::ALL
                .iter()
                .map(|d| d.label().to_string())
                .collect(),
        },
        Question {
            key: QuestionKey::Rating,
            text: "Minimum rating you're looking for?",
            description: "Filter by movie ratings",
            options: RatingFloor::OPTIONS.iter().map(|r| r.label()).collect(),
        },
    ]
}

/// Stepper over [`questions`].
#[derive(Debug, Clone)]
pub struct Questionnaire {
    questions: Vec<Question>,
    current: usize,
    answers: BTreeMap<QuestionKey, String>,
}

impl Default for Questionnaire {
    fn default() -> Self {
        Self::new()
    }
}

impl Questionnaire {
    pub fn new() -> Self {
        Self {
            questions: questions(),
            current: 0,
            answers: BTreeMap::new(),
        }
    }

    /// The question awaiting an answer, `None` once complete.
    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// 1-based position and total, for "Question 2 of 4".
    pub fn progress(&self) -> (usize, usize) {
        ((self.current + 1).min(self.questions.len()), self.questions.len())
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.questions.len()
    }

    /// Record an answer for the current question.
    pub fn answer(&mut self, option: &str) -> Result<QuestionnaireStep<'_>, QuestionnaireError> {
        let question = self
            .questions
            .get(self.current)
            .ok_or(QuestionnaireError::AlreadyComplete)?;

        if !question.options.iter().any(|o| o == option) {
            return Err(QuestionnaireError::UnknownOption {
                key: question.key,
                option: option.to_string(),
            });
        }

        self.answers.insert(question.key, option.to_string());
        self.current += 1;

        match self.questions.get(self.current) {
            Some(next) => Ok(QuestionnaireStep::Next(next)),
            None => Ok(QuestionnaireStep::Complete(PreferenceSnapshot::from_answers(
                self.answers.iter().map(|(k, v)| (k.as_str(), v.as_str())),
            ))),
        }
    }

    /// Answer the current question by 0-based option index.
    pub fn answer_index(&mut self, index: usize) -> Result<QuestionnaireStep<'_>, QuestionnaireError> {
        let question = self.current().ok_or(QuestionnaireError::AlreadyComplete)?;
        let option = question.options.get(index).cloned().ok_or_else(|| {
            QuestionnaireError::UnknownOption {
                key: question.key,
                option: format!("#{}", index + 1),
            }
        })?;
        self.answer(&option)
    }

    /// Start over with no answers.
    pub fn reset(&mut self) {
        self.current = 0;
        self.answers.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_flow_produces_snapshot() {
        let mut questionnaire = Questionnaire::new();
        assert_eq!(questionnaire.progress(), (1, 4));

        assert!(matches!(
            questionnaire.answer("Excited").unwrap(),
            QuestionnaireStep::Next(q) if q.key == QuestionKey::Genre
        ));
        questionnaire.answer("Science Fiction").unwrap();
        questionnaire.answer("No preference").unwrap();

        let step = questionnaire.answer("Above 7").unwrap();
        let QuestionnaireStep::Complete(prefs) = step else {
            panic!("expected completion");
        };
        assert_eq!(prefs.mood(), Some(Mood::Excited));
        assert_eq!(prefs.genre(), Some("Science Fiction"));
        assert_eq!(prefs.min_rating(), Some(7.0));
        assert!(questionnaire.is_complete());
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let mut questionnaire = Questionnaire::new();
        let err = questionnaire.answer("Grumpy").unwrap_err();
        assert_eq!(
            err,
            QuestionnaireError::UnknownOption {
                key: QuestionKey::Mood,
                option: "Grumpy".to_string()
            }
        );
        // Still on the first question.
        assert_eq!(questionnaire.current().unwrap().key, QuestionKey::Mood);
    }

    #[test]
    fn test_answer_index_and_reset() {
        let mut questionnaire = Questionnaire::new();
        questionnaire.answer_index(4).unwrap();
        assert!(questionnaire.answer_index(99).is_err());
        questionnaire.reset();
        assert_eq!(questionnaire.progress(), (1, 4));
    }

    #[test]
    fn test_answering_after_completion_fails() {
        let mut questionnaire = Questionnaire::new();
        for _ in 0..4 {
            questionnaire.answer_index(0).unwrap();
        }
        assert_eq!(
            questionnaire.answer_index(0).unwrap_err(),
            QuestionnaireError::AlreadyComplete
        );
    }
}
