//! Rolling parsed expressions and aggregating the results.

use serde::{Deserialize, Serialize};

use crate::error::DiceResult;
use crate::expr::{Sign, SignedTerm, Term, parse_expression};
use crate::random::RandomSource;

/// The result of rolling one term of an expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermResult {
    /// Whether the term was added or subtracted.
    pub sign: Sign,
    /// The term that was rolled.
    pub term: Term,
    /// Individual die values, in roll order. Empty for constants.
    pub rolls: Vec<u32>,
}

impl TermResult {
    /// Roll a single signed term.
    pub fn roll(signed: SignedTerm, rng: &mut impl RandomSource) -> Self {
        let rolls = match signed.term {
            Term::Constant(_) => Vec::new(),
            Term::Dice { count, sides } => (0..count).map(|_| rng.die(sides)).collect(),
        };
        Self {
            sign: signed.sign,
            term: signed.term,
            rolls,
        }
    }

    /// The unsigned magnitude of this term.
    pub fn magnitude(&self) -> u64 {
        match self.term {
            Term::Constant(n) => u64::from(n),
            Term::Dice { .. } => self.rolls.iter().map(|&r| u64::from(r)).sum(),
        }
    }

    /// The signed contribution of this term to the total.
    pub fn subtotal(&self) -> i64 {
        self.sign.apply(self.magnitude())
    }
}

impl std::fmt::Display for TermResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.term {
            Term::Constant(n) => write!(f, "{}{n}", self.sign),
            Term::Dice { count, sides } => {
                let values: Vec<String> = self.rolls.iter().map(|r| r.to_string()).collect();
                write!(f, "{}{count}d{sides}=[{}]", self.sign, values.join(", "))
            }
        }
    }
}

/// The result of evaluating a whole dice expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Per-term results, in expression order.
    pub terms: Vec<TermResult>,
}

impl RollOutcome {
    /// Signed sum of all term subtotals.
    pub fn total(&self) -> i64 {
        self.terms.iter().map(TermResult::subtotal).sum()
    }

    /// Human-readable breakdown, one entry per term joined by `" | "`.
    pub fn breakdown(&self) -> String {
        self.terms
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.breakdown(), self.total())
    }
}

/// Parse and roll an expression such as `2d6 + d4 + 3`.
pub fn evaluate(expr: &str, rng: &mut impl RandomSource) -> DiceResult<RollOutcome> {
    let terms = parse_expression(expr)?
        .into_iter()
        .map(|signed| TermResult::roll(signed, &mut *rng))
        .collect();
    let outcome = RollOutcome { terms };
    tracing::debug!(expr, total = outcome.total(), "evaluated dice expression");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiceError;
    use crate::random::{ScriptedRandom, StdRandom};
    use proptest::prelude::*;

    #[test]
    fn scripted_breakdown_and_total() {
        let mut rng = ScriptedRandom::new(vec![3, 5, 2]);
        let outcome = evaluate("2d6 + d4 + 3", &mut rng).unwrap();
        assert_eq!(outcome.total(), 13);
        insta::assert_snapshot!(outcome.breakdown(), @"+2d6=[3, 5] | +1d4=[2] | +3");
    }

    #[test]
    fn subtraction() {
        let mut rng = ScriptedRandom::new(vec![6, 4]);
        let outcome = evaluate("d20 - 1d6 - 2", &mut rng).unwrap();
        assert_eq!(outcome.total(), 6 - 4 - 2);
        assert_eq!(outcome.breakdown(), "+1d20=[6] | -1d6=[4] | -2");
    }

    #[test]
    fn negative_total() {
        let mut rng = ScriptedRandom::new(vec![6]);
        let outcome = evaluate("2 - 1d6", &mut rng).unwrap();
        assert_eq!(outcome.total(), -4);
    }

    #[test]
    fn leading_negative_dice_fails_before_rolling() {
        let mut rng = ScriptedRandom::new(vec![1]);
        assert_eq!(
            evaluate("-1d6", &mut rng),
            Err(DiceError::NonPositive("-1d6".into()))
        );
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn constant_only() {
        let mut rng = ScriptedRandom::default();
        let outcome = evaluate("7", &mut rng).unwrap();
        assert_eq!(outcome.total(), 7);
        assert_eq!(rng.consumed(), 0);
        assert_eq!(outcome.to_string(), "+7 = 7");
    }

    #[test]
    fn draws_one_value_per_die() {
        let mut rng = ScriptedRandom::new(vec![1]);
        let outcome = evaluate("4d8+2d10", &mut rng).unwrap();
        assert_eq!(rng.consumed(), 6);
        let dice: usize = outcome.terms.iter().map(|t| t.rolls.len()).sum();
        assert_eq!(dice, 6);
    }

    #[test]
    fn invalid_expression_propagates() {
        let mut rng = ScriptedRandom::default();
        assert!(matches!(
            evaluate("abc", &mut rng),
            Err(DiceError::InvalidExpression(_))
        ));
        assert!(matches!(evaluate("d0", &mut rng), Err(DiceError::NonPositive(_))));
    }

    #[test]
    fn outcome_serde_roundtrip() {
        let mut rng = ScriptedRandom::new(vec![2, 3]);
        let outcome = evaluate("2d4", &mut rng).unwrap();
        let json = serde_json::to_string(&outcome).unwrap();
        let back: RollOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }

    fn term_strategy() -> impl Strategy<Value = (bool, Option<u32>, u32)> {
        (any::<bool>(), prop::option::of(1u32..20), 1u32..100)
    }

    proptest! {
        #[test]
        fn total_is_signed_sum_within_bounds(
            terms in prop::collection::vec(term_strategy(), 1..8),
            seed in any::<u64>(),
        ) {
            // a negative dice term may not open the expression
            let mut terms = terms;
            if terms[0].1.is_some() {
                terms[0].0 = false;
            }
            let expr: String = terms
                .iter()
                .map(|(minus, count, n)| {
                    let sign = if *minus { "-" } else { "+" };
                    match count {
                        Some(c) => format!("{sign}{c}d{n}"),
                        None => format!("{sign}{n}"),
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");

            let mut rng = StdRandom::seeded(seed);
            let outcome = evaluate(&expr, &mut rng).unwrap();
            prop_assert_eq!(outcome.terms.len(), terms.len());

            let mut expected = 0i64;
            for (result, (minus, count, n)) in outcome.terms.iter().zip(&terms) {
                let sub = result.subtotal();
                let sign = if *minus { -1 } else { 1 };
                match count {
                    Some(c) => {
                        let (lo, hi) = (i64::from(*c), i64::from(c * n));
                        let (lo, hi) = if *minus { (-hi, -lo) } else { (lo, hi) };
                        prop_assert!(sub >= lo && sub <= hi, "{} out of [{}, {}]", sub, lo, hi);
                    }
                    None => prop_assert_eq!(sub, sign * i64::from(*n)),
                }
                expected += sub;
            }
            prop_assert_eq!(outcome.total(), expected);
        }
    }
}
