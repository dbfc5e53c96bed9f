use rand::Rng;
use serde::{Deserialize, Serialize};

use super::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurpriseEffect {
    Good,
    Bad,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurpriseOutcome {
    /// `false` when the activation cost could not be paid, nothing else changed then.
    pub allowed: bool,
    pub effect: Option<SurpriseEffect>,
    /// Net change including the activation cost and converted lives.
    pub score_delta: i32,
    pub lives_delta: i32,
    pub converted_lives: i32,
    pub message: String,
}

impl SurpriseOutcome {
    fn rejected(cost: i32, score: i32) -> Self {
        Self {
            allowed: false,
            effect: None,
            score_delta: 0,
            lives_delta: 0,
            converted_lives: 0,
            message: format!("Not enough points for a surprise: {cost} needed, {score} available"),
        }
    }
}

/// Pays the activation cost and flips a fair coin for a bonus or a penalty.
pub fn process_surprise<R: Rng + ?Sized>(
    rules: &Rules,
    difficulty: Difficulty,
    score: i32,
    lives: i32,
    rng: &mut R,
) -> SurpriseOutcome {
    let profile = rules.profile(difficulty);
    let cost = profile.surprise_cost;
    if score < cost {
        log::debug!("Surprise rejected, score {} below cost {}", score, cost);
        return SurpriseOutcome::rejected(cost, score);
    }

    let bonus = profile.surprise_bonus;
    let (effect, points, life_change) = if rng.random_bool(0.5) {
        (SurpriseEffect::Good, bonus, 1)
    } else {
        (SurpriseEffect::Bad, -bonus, -1)
    };

    let settled = settle(rules, difficulty, score, lives, points - cost, life_change);
    let message = match effect {
        SurpriseEffect::Good => format!("Good surprise! +1 life, +{bonus} points (cost {cost})"),
        SurpriseEffect::Bad => format!("Bad surprise! -1 life, -{bonus} points (cost {cost})"),
    };
    log::debug!("{} on {} difficulty", message, difficulty);

    SurpriseOutcome {
        allowed: true,
        effect: Some(effect),
        score_delta: settled.score_delta,
        lives_delta: settled.lives_delta,
        converted_lives: settled.converted_lives,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    /// Finds a seed whose first coin flip lands on `effect`.
    fn rng_for(effect: SurpriseEffect) -> SmallRng {
        let rules = Rules::default();
        (0..)
            .map(SmallRng::seed_from_u64)
            .find(|rng| {
                let outcome = process_surprise(&rules, Difficulty::Easy, 50, 5, &mut rng.clone());
                outcome.effect == Some(effect)
            })
            .unwrap()
    }

    #[test]
    fn rejects_when_score_below_cost() {
        let mut rng = SmallRng::seed_from_u64(0);

        let outcome = process_surprise(&Rules::default(), Difficulty::Easy, 4, 3, &mut rng);

        assert!(!outcome.allowed);
        assert_eq!(outcome.effect, None);
        assert_eq!(outcome.score_delta, 0);
        assert_eq!(outcome.lives_delta, 0);
    }

    #[test]
    fn score_equal_to_cost_is_enough() {
        let mut rng = SmallRng::seed_from_u64(0);

        let outcome = process_surprise(&Rules::default(), Difficulty::Hard, 12, 3, &mut rng);

        assert!(outcome.allowed);
    }

    #[test]
    fn good_surprise_pays_bonus_minus_cost() {
        let outcome = process_surprise(
            &Rules::default(),
            Difficulty::Medium,
            20,
            5,
            &mut rng_for(SurpriseEffect::Good),
        );

        assert_eq!(outcome.effect, Some(SurpriseEffect::Good));
        assert_eq!(outcome.score_delta, 12 - 8);
        assert_eq!(outcome.lives_delta, 1);
    }

    #[test]
    fn bad_surprise_charges_bonus_and_cost() {
        let outcome = process_surprise(
            &Rules::default(),
            Difficulty::Hard,
            30,
            5,
            &mut rng_for(SurpriseEffect::Bad),
        );

        assert_eq!(outcome.effect, Some(SurpriseEffect::Bad));
        assert_eq!(outcome.score_delta, -16 - 12);
        assert_eq!(outcome.lives_delta, -1);
    }

    #[test]
    fn good_surprise_at_full_lives_converts_the_extra_life() {
        let outcome = process_surprise(
            &Rules::default(),
            Difficulty::Easy,
            10,
            10,
            &mut rng_for(SurpriseEffect::Good),
        );

        assert_eq!(outcome.lives_delta, 0);
        assert_eq!(outcome.converted_lives, 1);
        // bonus 8 plus one life at 5 points, minus the cost of 5
        assert_eq!(outcome.score_delta, 8 + 5 - 5);
    }

    #[test]
    fn same_seed_same_flip() {
        let rules = Rules::default();
        let a = process_surprise(&rules, Difficulty::Easy, 50, 5, &mut SmallRng::seed_from_u64(9));
        let b = process_surprise(&rules, Difficulty::Easy, 50, 5, &mut SmallRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
