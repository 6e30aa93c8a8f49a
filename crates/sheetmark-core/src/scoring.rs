//! Answer reconciliation and scoring.
//!
//! [`score`] compares the user's selections with the answer key question by
//! question. Every question counts toward the denominator, so a question
//! left unanswered on either side scores the same as a wrong answer.

use std::collections::BTreeMap;

use crate::report::{display_line, QuestionResult, ScoreReport, Verdict};
use crate::sheet::{Mode, MAX_QUESTION_COUNT};

/// Selected labels keyed by 1-based question ordinal.
pub type Answers = BTreeMap<usize, String>;

/// Score `user` against `key` over ordinals `1..=question_count`.
///
/// Passing `None` for `key` scores in plain mode: every question is
/// recorded and the percentage stays 0.
///
/// No sheet has more than [`MAX_QUESTION_COUNT`] questions, so larger counts
/// are clamped to it.
pub fn score(user: &Answers, key: Option<&Answers>, question_count: usize) -> ScoreReport {
    let mode = if key.is_some() { Mode::Keyed } else { Mode::Plain };
    let question_count = question_count.min(MAX_QUESTION_COUNT);
    let mut correct = 0usize;
    let mut questions = Vec::with_capacity(question_count);

    for ordinal in 1..=question_count {
        let answer = user.get(&ordinal).cloned();
        let verdict = match key {
            None => Verdict::Recorded,
            Some(key) => match (&answer, key.get(&ordinal)) {
                (Some(given), Some(expected)) if given == expected => {
                    correct += 1;
                    Verdict::Correct
                }
                (Some(_), Some(expected)) => Verdict::Incorrect {
                    expected: expected.clone(),
                },
                _ => Verdict::Unanswered,
            },
        };
        let display = display_line(ordinal, answer.as_deref(), &verdict);
        questions.push(QuestionResult {
            ordinal,
            answer,
            verdict,
            display_line: display,
        });
    }

    let percentage = match mode {
        Mode::Keyed => percentage(correct, question_count),
        Mode::Plain => 0,
    };

    tracing::debug!(%mode, correct, question_count, percentage, "scored answer sheet");

    ScoreReport {
        mode,
        question_count,
        correct,
        percentage,
        questions,
    }
}

/// `correct / total` as a whole percentage, rounding halves up.
///
/// Returns 0 when `total` is 0.
pub fn percentage(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let correct = correct.min(total) as u128;
    let total = total as u128;
    // floor(100c/t + 1/2) without floating point
    ((200 * correct + total) / (2 * total)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(pairs: &[(usize, &str)]) -> Answers {
        pairs.iter().map(|(o, l)| (*o, l.to_string())).collect()
    }

    #[test]
    fn oversized_count_is_clamped() {
        let report = score(&Answers::new(), None, usize::MAX);
        assert_eq!(report.question_count, MAX_QUESTION_COUNT);
        assert_eq!(report.questions.len(), MAX_QUESTION_COUNT);

        let key = answers(&[(1, "A")]);
        let report = score(&answers(&[(1, "A")]), Some(&key), MAX_QUESTION_COUNT + 1);
        assert_eq!(report.correct, 1);
        assert_eq!(report.percentage, 0);
    }

    #[test]
    fn keyed_scenario() {
        let user = answers(&[(1, "2"), (2, "1")]);
        let key = answers(&[(1, "2"), (2, "3"), (3, "4")]);
        let report = score(&user, Some(&key), 3);

        assert_eq!(report.mode, Mode::Keyed);
        assert_eq!(report.correct, 1);
        assert_eq!(report.percentage, 33);
        assert_eq!(report.questions[0].verdict, Verdict::Correct);
        assert_eq!(
            report.questions[1].verdict,
            Verdict::Incorrect {
                expected: "3".into()
            }
        );
        assert_eq!(report.questions[2].verdict, Verdict::Unanswered);
        assert_eq!(report.questions[0].display_line, "Q 1: 2 (correct)");
        assert_eq!(
            report.questions[1].display_line,
            "Q 2: 1 (incorrect, correct answer: 3)"
        );
        assert_eq!(report.questions[2].display_line, "Q 3: unanswered");
    }

    #[test]
    fn zero_questions() {
        let report = score(&Answers::new(), Some(&Answers::new()), 0);
        assert_eq!(report.percentage, 0);
        assert!(report.questions.is_empty());
    }

    #[test]
    fn missing_key_is_never_correct() {
        let user = answers(&[(1, "A"), (2, "B")]);
        let key = answers(&[(2, "B")]);
        let report = score(&user, Some(&key), 2);
        assert_eq!(report.questions[0].verdict, Verdict::Unanswered);
        assert_eq!(report.questions[0].display_line, "Q 1: A");
        assert_eq!(report.correct, 1);
        assert_eq!(report.percentage, 50);
    }

    #[test]
    fn plain_mode_records_without_scoring() {
        let user = answers(&[(1, "A")]);
        let report = score(&user, None, 2);
        assert_eq!(report.mode, Mode::Plain);
        assert_eq!(report.percentage, 0);
        assert!(report
            .questions
            .iter()
            .all(|q| q.verdict == Verdict::Recorded));
        assert_eq!(report.questions[0].display_line, "Q 1: A");
        assert_eq!(report.questions[1].display_line, "Q 2: unanswered");
    }

    #[test]
    fn answers_beyond_question_count_are_ignored() {
        let user = answers(&[(1, "1"), (5, "1")]);
        let key = answers(&[(1, "1"), (5, "1")]);
        let report = score(&user, Some(&key), 2);
        assert_eq!(report.questions.len(), 2);
        assert_eq!(report.correct, 1);
        assert_eq!(report.percentage, 50);
    }

    #[test]
    fn scoring_is_idempotent() {
        let user = answers(&[(1, "ア"), (2, "イ")]);
        let key = answers(&[(1, "ア"), (2, "ウ")]);
        assert_eq!(score(&user, Some(&key), 4), score(&user, Some(&key), 4));
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13); // 12.5
        assert_eq!(percentage(1, 200), 1); // 0.5
        assert_eq!(percentage(0, 7), 0);
        assert_eq!(percentage(7, 7), 100);
        assert_eq!(percentage(3, 0), 0);
    }

    #[test]
    fn percentage_stays_in_bounds() {
        for total in 0..60 {
            for correct in 0..=total + 2 {
                assert!(percentage(correct, total) <= 100);
            }
        }
    }
}
