use std::cmp::Ordering;

use crate::errors::ValidationError;

use super::models::{MatchSide, SetScore};

/// Checks a submitted set list and derives the match winner: the side that
/// took the strict majority of sets. A tied set, a negative score or an even
/// split of sets won all reject the submission.
pub fn validate_sets(sets: &[SetScore]) -> Result<MatchSide, ValidationError> {
    if sets.is_empty() {
        return Err(ValidationError::NoSets);
    }

    let mut player1_sets = 0;
    let mut player2_sets = 0;

    for (index, set) in sets.iter().enumerate() {
        if set.player1 < 0 || set.player2 < 0 {
            return Err(ValidationError::NegativeScore { index });
        }
        match set.player1.cmp(&set.player2) {
            Ordering::Equal => {
                return Err(ValidationError::TiedSet {
                    index,
                    score: set.player1,
                });
            }
            Ordering::Greater => player1_sets += 1,
            Ordering::Less => player2_sets += 1,
        }
    }

    match player1_sets.cmp(&player2_sets) {
        Ordering::Greater => Ok(MatchSide::Player1),
        Ordering::Less => Ok(MatchSide::Player2),
        Ordering::Equal => Err(ValidationError::NoMajorityWinner),
    }
}

pub fn validate_participants(player1_id: i64, player2_id: i64) -> Result<(), ValidationError> {
    if player1_id == player2_id {
        return Err(ValidationError::SamePlayer);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets(pairs: &[(i32, i32)]) -> Vec<SetScore> {
        pairs.iter().map(|&(a, b)| SetScore::new(a, b)).collect()
    }

    #[test]
    fn majority_winner_is_derived() {
        let winner = validate_sets(&sets(&[(11, 5), (9, 11), (11, 7)])).unwrap();
        assert_eq!(winner, MatchSide::Player1);

        let winner = validate_sets(&sets(&[(5, 11), (11, 9), (7, 11)])).unwrap();
        assert_eq!(winner, MatchSide::Player2);
    }

    #[test]
    fn empty_set_list_is_rejected() {
        assert_eq!(validate_sets(&[]), Err(ValidationError::NoSets));
    }

    #[test]
    fn tied_set_is_rejected() {
        let result = validate_sets(&sets(&[(11, 5), (10, 10)]));
        assert_eq!(
            result,
            Err(ValidationError::TiedSet {
                index: 1,
                score: 10
            })
        );
    }

    #[test]
    fn negative_score_is_rejected() {
        let result = validate_sets(&sets(&[(-1, 5)]));
        assert_eq!(result, Err(ValidationError::NegativeScore { index: 0 }));
    }

    #[test]
    fn even_split_of_sets_has_no_winner() {
        let result = validate_sets(&sets(&[(11, 5), (5, 11), (11, 9), (9, 11)]));
        assert_eq!(result, Err(ValidationError::NoMajorityWinner));
    }

    #[test]
    fn player_cannot_face_themselves() {
        assert_eq!(
            validate_participants(7, 7),
            Err(ValidationError::SamePlayer)
        );
        assert!(validate_participants(7, 8).is_ok());
    }
}
