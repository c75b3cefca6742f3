use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::Discussion;

/// A vote string whose label has two or more letters, e.g. `"AC (60%)"`.
static MULTI_ANSWER_VOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{2,} \(\d+%\)$").expect("MULTI_ANSWER_VOTE is a valid regex"));

/// Tallies the selected answers of `discussions` into `"<label> (<pct>%)"`
/// strings sorted by label.
///
/// Returns `None` when no discussion selected an answer, so callers can tell
/// "nothing to show" apart from a real tally. Empty labels count as no
/// selection. Percentages use round-half-to-even on the exact ratio.
pub fn tally_votes(discussions: &[Discussion]) -> Option<Vec<String>> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for label in discussions
        .iter()
        .filter_map(|d| d.selected_answer.as_deref())
        .filter(|label| !label.is_empty())
    {
        *counts.entry(label).or_insert(0) += 1;
    }

    let total: u64 = counts.values().sum();
    if total == 0 {
        return None;
    }

    Some(
        counts
            .into_iter()
            .map(|(label, count)| format!("{} ({}%)", label, percentage(count, total)))
            .collect(),
    )
}

fn percentage(count: u64, total: u64) -> u64 {
    let scaled = count * 100;
    let quotient = scaled / total;
    let twice_remainder = (scaled % total) * 2;

    if twice_remainder > total || (twice_remainder == total && quotient % 2 == 1) {
        quotient + 1
    } else {
        quotient
    }
}

/// Heuristic: the first vote string carries a multi-letter label such as
/// `"AB (100%)"`, which implies the question has several correct options.
/// Only used when a question has no explicit `answerNum`.
pub fn implies_multiple_answers(votes: &[String]) -> bool {
    votes
        .first()
        .is_some_and(|vote| MULTI_ANSWER_VOTE.is_match(vote))
}
