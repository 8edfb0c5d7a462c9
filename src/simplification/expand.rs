//! Distribution of products over sums.

use crate::Expr;

/// Expansion is abandoned when it would produce more addends than this
const MAX_EXPANDED_TERMS: usize = 256;

/// Largest positive integer power of a sum that is multiplied out
pub(crate) const MAX_EXPANDED_POWER: i64 = 8;

/// Multiply out `factors`, distributing over every sum among them.
///
/// Falls back to the plain product when the expansion would exceed
/// the addend limit.
pub(crate) fn expand_product(factors: Vec<Expr>) -> Expr {
    if !factors.iter().any(Expr::is_sum) {
        return Expr::product(factors);
    }

    let mut addends: Vec<Expr> = vec![Expr::one()];
    for factor in &factors {
        match factor.terms() {
            Some(terms) => {
                if addends.len() * terms.len() > MAX_EXPANDED_TERMS {
                    return Expr::product(factors);
                }
                addends = addends
                    .iter()
                    .flat_map(|a| {
                        terms
                            .iter()
                            .map(move |t| Expr::product(vec![a.clone(), (**t).clone()]))
                    })
                    .collect();
            }
            None => {
                for a in &mut addends {
                    *a = Expr::product(vec![a.clone(), factor.clone()]);
                }
            }
        }
    }
    Expr::sum(addends)
}

/// `base^n` multiplied out for a sum `base` and small positive integer `n`
pub(crate) fn expand_power(base: Expr, n: i64) -> Expr {
    if !base.is_sum() || !(2..=MAX_EXPANDED_POWER).contains(&n) {
        return base.pow(Expr::integer(n));
    }
    let copies = usize::try_from(n).unwrap_or(0);
    expand_product(vec![base; copies])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribute_over_sum() {
        let x = Expr::symbol("x");
        let e = expand_product(vec![Expr::integer(2), x.clone() + Expr::one()]);
        assert_eq!(e, Expr::integer(2) * x + Expr::integer(2));
    }

    #[test]
    fn test_binomial_square() {
        let x = Expr::symbol("x");
        let e = expand_power(x.clone() + Expr::one(), 2);
        let expected = x.clone().pow(Expr::integer(2)) + Expr::integer(2) * x + Expr::one();
        assert_eq!(e, expected);
    }

    #[test]
    fn test_large_power_kept() {
        let x = Expr::symbol("x");
        let e = expand_power(x + Expr::one(), 20);
        assert!(e.is_pow());
    }
}
