use crate::config::settings::{FormulaVersion, RatingSettings};
use crate::domain::SetScore;

use super::types::RatingChange;

/// Probability of the player beating the opponent under the logistic model.
/// The two sides' expected scores always sum to 1.
pub fn expected_score(rating: f64, opponent_rating: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((opponent_rating - rating) / 400.0))
}

/// Scores one finished match.
///
/// The base K is scaled by how long the match ran (relative to a three-set
/// reference) and how lopsided the sets were (average point margin relative
/// to a five-point reference, capped at 1.5x). An empty set list falls back
/// to both multipliers being 1, i.e. a reference-length match; legacy rows
/// without per-set scores take that path.
///
/// Pure and total: no validation happens here, callers reject tied sets and
/// winnerless matches first. The loser's loss always mirrors the winner's
/// gain because both sides share the same effective K.
pub fn compute_rating_change(
    winner_elo: f64,
    loser_elo: f64,
    sets: &[SetScore],
    settings: &RatingSettings,
) -> RatingChange {
    let k = settings.base_k * sets_multiplier(sets, settings) * margin_multiplier(sets, settings);

    let winner_expected = expected_score(winner_elo, loser_elo);
    let loser_expected = expected_score(loser_elo, winner_elo);

    let winner_new_elo = winner_elo + k * (1.0 - winner_expected);
    let loser_new_elo = loser_elo + k * (0.0 - loser_expected);

    RatingChange {
        winner_new_elo: round_tenth(winner_new_elo),
        loser_new_elo: round_tenth(loser_new_elo),
        elo_change: round_tenth(winner_new_elo - winner_elo),
    }
}

fn sets_multiplier(sets: &[SetScore], settings: &RatingSettings) -> f64 {
    if settings.formula == FormulaVersion::Classic || sets.is_empty() {
        return 1.0;
    }
    sets.len() as f64 / settings.reference_sets
}

fn margin_multiplier(sets: &[SetScore], settings: &RatingSettings) -> f64 {
    if settings.formula != FormulaVersion::MarginWeighted || sets.is_empty() {
        return 1.0;
    }
    let total_margin: i32 = sets.iter().map(SetScore::margin).sum();
    let average_margin = f64::from(total_margin) / sets.len() as f64;
    (average_margin / settings.reference_margin).min(settings.margin_cap)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
