//! Quiz generation and scoring.
//!
//! The generator is a deliberately naive heuristic carried over from the
//! prototype: split the text on '.', keep fragments with more than 5
//! words, sample a handful at random, and mask the 6th word of each.
//! Sampled fragments of 6 words or fewer are dropped without a
//! replacement, so a quiz can come out shorter than the sample.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Marker substituted for the masked word in a question.
pub const BLANK: &str = "_";

/// One fill-in-the-blank question. Immutable once generated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizItem {
    pub id: usize,
    /// The sentence with exactly one word replaced by [`BLANK`].
    pub question: String,
    /// The word that was masked out.
    pub answer: String,
}

/// Outcome of scoring one submission.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub score: usize,
    pub total: usize,
    /// Missed questions with the blank resolved back to the answer.
    pub revision: Vec<String>,
}

/// Generate up to `max_items` questions from raw text.
///
/// Sampling is unseeded; two calls over the same text will usually
/// produce different quizzes.
pub fn generate_quiz(content: &str, max_items: usize) -> Vec<QuizItem> {
    let mut lines: Vec<&str> = content
        .split('.')
        .map(str::trim)
        .filter(|line| line.split_whitespace().count() > 5)
        .collect();

    let mut rng = rand::thread_rng();
    lines.shuffle(&mut rng);
    lines.truncate(max_items);

    let mut quiz = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let mut words: Vec<&str> = line.split_whitespace().collect();
        if words.len() > 6 {
            let answer = words[5].to_string();
            words[5] = BLANK;
            quiz.push(QuizItem {
                id: i,
                question: words.join(" "),
                answer,
            });
        }
    }
    quiz
}

/// Score a submission against the quiz.
///
/// Comparison is whitespace-trimmed and case-insensitive; an item with no
/// submitted answer counts as wrong.
pub fn score_quiz(quiz: &[QuizItem], answers: &HashMap<usize, String>) -> ScoreReport {
    let mut score = 0;
    let mut revision = Vec::new();

    for item in quiz {
        let given = answers
            .get(&item.id)
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_default();
        let correct = item.answer.trim().to_lowercase();
        if given == correct {
            score += 1;
        } else {
            revision.push(resolve_blank(&item.question, &item.answer));
        }
    }

    ScoreReport {
        score,
        total: quiz.len(),
        revision,
    }
}

/// Substitute the answer back into the blank token. Token-wise, so an
/// underscore inside a regular word (snake_case identifiers and the
/// like) is left alone.
fn resolve_blank(question: &str, answer: &str) -> String {
    question
        .split_whitespace()
        .map(|word| if word == BLANK { answer } else { word })
        .collect::<Vec<&str>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_TEXT: &str = "The quick brown fox jumps over the lazy dog every single morning. \
        A second sentence with more than six words sits right here. \
        Too short to keep. \
        Yet another long sentence that easily clears the word threshold today. \
        Climate patterns shift gradually over many decades of careful observation. \
        Reading comprehension improves when students revisit difficult material several times. \
        Small words count too when there are enough of them present.";

    fn item(id: usize, question: &str, answer: &str) -> QuizItem {
        QuizItem {
            id,
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn test_generates_at_most_max_items() {
        for _ in 0..20 {
            let quiz = generate_quiz(LONG_TEXT, 5);
            assert!(quiz.len() <= 5);
            assert!(!quiz.is_empty());
        }
    }

    #[test]
    fn test_each_item_has_one_blank_and_unique_id() {
        let quiz = generate_quiz(LONG_TEXT, 5);
        let mut seen = std::collections::HashSet::new();
        for item in &quiz {
            let blanks = item
                .question
                .split_whitespace()
                .filter(|w| *w == BLANK)
                .count();
            assert_eq!(blanks, 1, "question: {}", item.question);
            assert!(seen.insert(item.id), "duplicate id {}", item.id);
        }
    }

    #[test]
    fn test_answer_restores_sixth_word() {
        let quiz = generate_quiz(LONG_TEXT, 5);
        for item in &quiz {
            let words: Vec<&str> = item.question.split_whitespace().collect();
            assert_eq!(words[5], BLANK);
            assert!(!item.answer.is_empty());
            let restored = resolve_blank(&item.question, &item.answer);
            assert!(restored.split_whitespace().nth(5) == Some(item.answer.as_str()));
        }
    }

    #[test]
    fn test_two_sentence_example() {
        // Both candidates exceed 5 words, so sampling yields up to 2 items.
        let text = "The cat sat on the mat quietly. Dogs bark loudly outside.";
        let quiz = generate_quiz(text, 5);
        assert!(quiz.len() <= 2);
    }

    #[test]
    fn test_six_word_sentence_is_sampled_but_dropped() {
        // Passes the >5 word filter but fails the >6 word mask check.
        let text = "One two three four five six.";
        let quiz = generate_quiz(text, 5);
        assert!(quiz.is_empty());
    }

    #[test]
    fn test_short_text_yields_nothing() {
        assert!(generate_quiz("Too short.", 5).is_empty());
        assert!(generate_quiz("", 5).is_empty());
    }

    #[test]
    fn test_scoring_is_case_and_whitespace_insensitive() {
        let quiz = vec![item(0, "The capital of France is _ today", "paris")];
        let mut answers = HashMap::new();
        answers.insert(0, " Paris ".to_string());
        let report = score_quiz(&quiz, &answers);
        assert_eq!(report.score, 1);
        assert_eq!(report.total, 1);
        assert!(report.revision.is_empty());
    }

    #[test]
    fn test_missed_items_land_in_revision() {
        let quiz = vec![
            item(0, "Water boils at one _ degrees celsius", "hundred"),
            item(1, "The sun rises in the _ every day", "east"),
        ];
        let mut answers = HashMap::new();
        answers.insert(0, "hundred".to_string());
        answers.insert(1, "west".to_string());

        let report = score_quiz(&quiz, &answers);
        assert_eq!(report.score, 1);
        assert_eq!(report.revision.len(), 1);
        assert_eq!(report.revision[0], "The sun rises in the east every day");
    }

    #[test]
    fn test_revision_ignores_underscores_inside_words() {
        // An underscore-bearing word before the blank must not swallow
        // the answer; only the blank token gets resolved.
        let quiz = vec![item(
            0,
            "The snake_case convention appears often _ generated identifiers today",
            "in",
        )];
        let report = score_quiz(&quiz, &HashMap::new());
        assert_eq!(
            report.revision,
            vec!["The snake_case convention appears often in generated identifiers today"]
        );
    }

    #[test]
    fn test_missing_answer_counts_as_wrong() {
        let quiz = vec![item(3, "A _ in time saves nine", "stitch")];
        let report = score_quiz(&quiz, &HashMap::new());
        assert_eq!(report.score, 0);
        assert_eq!(report.revision, vec!["A stitch in time saves nine"]);
    }
}
