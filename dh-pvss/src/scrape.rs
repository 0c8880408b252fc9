//! SCRAPE dual-code encoding and scrape-sum aggregation.
//!
//! SCRAPE compresses `n` per-share correctness checks into a single aggregate check:
//! given a hash-derived random low-degree polynomial `m`, the weighted sum
//! `Σᵢ vᵢ·m(αᵢ)·σᵢ` is zero for every valid (degree-`t`) share vector and every `m` of
//! degree `≤ n-t-2`, with overwhelming probability zero only for malformed shares.
//! This lets one DLEQ or Reshare proof stand in for `n` individual share checks.

use std::collections::HashMap;

use ark_ff::PrimeField;

use crate::curve::Curve;
use crate::shamir::evaluate_poly;

/// The dual-code coefficients `{vᵢ}`, `{v′ᵢ}` for a committee of size `n`.
///
/// `v` is used to aggregate distribution checks (the index set is `{1,…,n}` against
/// itself); `v′` is used to aggregate reshare checks (the index set is `{1,…,n}`
/// against `{0,…,n}`, i.e. it also ranges over the dealer's own position `0`).
#[derive(Clone, Debug)]
pub struct ScrapeCode<G: Curve> {
    v: Vec<G::ScalarField>,
    v_prime: Vec<G::ScalarField>,
}

impl<G: Curve> ScrapeCode<G> {
    /// Computes the dual-code coefficients for a committee of size `n`.
    ///
    /// Precomputes a table of inverses of every nonzero integer in `-n..=n` (2n
    /// entries) up front, turning what would otherwise be `O(n²)` field inversions
    /// into `O(n)` inversions plus `O(n²)` multiplications.
    #[tracing::instrument(level = "trace", skip_all, fields(n))]
    pub fn setup(n: usize) -> Self {
        let inv_table = inverse_table::<G::ScalarField>(n);

        let v = (1..=n as i64)
            .map(|i| {
                (1..=n as i64)
                    .filter(|&j| j != i)
                    .fold(G::ScalarField::from(1u64), |prod, j| {
                        prod * inv_table[&(i - j)]
                    })
            })
            .collect();

        let v_prime = (1..=n as i64)
            .map(|i| {
                (0..=n as i64)
                    .filter(|&j| j != i)
                    .fold(G::ScalarField::from(1u64), |prod, j| {
                        prod * inv_table[&(i - j)]
                    })
            })
            .collect();

        ScrapeCode { v, v_prime }
    }

    /// The distribution-phase dual-code coefficients, one per committee member.
    pub fn v(&self) -> &[G::ScalarField] {
        &self.v
    }

    /// The reshare-phase dual-code coefficients, one per committee member.
    pub fn v_prime(&self) -> &[G::ScalarField] {
        &self.v_prime
    }
}

/// Computes the scrape terms `wᵢ = codeᵢ · m(i)` for `i = 1..=code.len()`, where `m`
/// is given by its coefficient vector (constant term first).
pub(crate) fn scrape_terms<G: Curve>(
    code: &[G::ScalarField],
    poly: &[G::ScalarField],
) -> Vec<G::ScalarField> {
    code.iter()
        .enumerate()
        .map(|(idx, coeff)| {
            let i = G::ScalarField::from((idx + 1) as u64);
            *coeff * evaluate_poly::<G>(poly, i)
        })
        .collect()
}

fn inverse_table<F: PrimeField>(n: usize) -> HashMap<i64, F> {
    let mut table = HashMap::with_capacity(2 * n);
    for k in 1..=n as i64 {
        let f = F::from(k as u64);
        let inv = f.inverse().expect("k in 1..=n is nonzero mod a prime q > n");
        table.insert(k, inv);
        table.insert(-k, -inv);
    }
    table
}
