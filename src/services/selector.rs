//! Reviewer selection rules.
//!
//! Pure functions over an in-memory team snapshot. The random source is
//! injected per call so callers control determinism; production passes
//! `rand::thread_rng()`.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Team;

/// Maximum reviewers assigned at pull request creation.
const MAX_REVIEWERS_AT_CREATION: usize = 2;

/// Pick up to two reviewers for a newly created pull request.
///
/// Candidates are the team's active members excluding the author. With two or
/// fewer candidates every one of them is assigned; with more, exactly two
/// distinct candidates are drawn uniformly without replacement. An empty
/// result is legal: a pull request may have zero reviewers.
pub fn pick_for_creation<R: Rng>(team: &Team, author_id: &str, rng: &mut R) -> Vec<String> {
    let candidates: Vec<&str> = team
        .members
        .iter()
        .filter(|m| m.is_active && m.id != author_id)
        .map(|m| m.id.as_str())
        .collect();

    if candidates.len() <= MAX_REVIEWERS_AT_CREATION {
        return candidates.into_iter().map(String::from).collect();
    }

    candidates
        .choose_multiple(rng, MAX_REVIEWERS_AT_CREATION)
        .map(|id| id.to_string())
        .collect()
}

/// Pick a replacement for a reviewer being rotated off a pull request.
///
/// Candidates are the team's active members excluding the outgoing reviewer,
/// the pull request author, and anyone already assigned. Returns `None` when
/// nobody is eligible; the caller decides what that means.
pub fn pick_replacement<R: Rng>(
    team: &Team,
    author_id: &str,
    assigned: &[String],
    old_reviewer_id: &str,
    rng: &mut R,
) -> Option<String> {
    let candidates: Vec<&str> = team
        .members
        .iter()
        .filter(|m| {
            m.is_active
                && m.id != old_reviewer_id
                && m.id != author_id
                && !assigned.iter().any(|a| a == &m.id)
        })
        .map(|m| m.id.as_str())
        .collect();

    candidates.choose(rng).map(|id| id.to_string())
}
