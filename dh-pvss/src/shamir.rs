//! Shamir secret sharing in the exponent.
//!
//! The secret lives in the group, as a point `S`. Shares are `p(i)·G + S` for a
//! random degree-`t` polynomial `p` with `p(0) = 0`; reconstruction is the usual
//! Lagrange interpolation at `0`, lifted to points via a weighted sum.

use ark_ec::CurveGroup;
use ark_ff::Zero;
use rand::{CryptoRng, Rng};

use crate::curve::{Curve, bn_to_point, point_weighted_sum, scalar_random};
use crate::error::Error;

/// Generates `n` point-shares of `secret` under a degree-`t` polynomial, indexed
/// `1..=n`.
#[tracing::instrument(level = "trace", skip_all, fields(t, n))]
pub fn shares_generate<G: Curve>(
    secret: G,
    t: usize,
    n: usize,
    rng: &mut (impl Rng + CryptoRng),
) -> Vec<G::Affine> {
    let mut coeffs = Vec::with_capacity(t + 1);
    coeffs.push(G::ScalarField::zero());
    for _ in 0..t {
        coeffs.push(scalar_random::<G>(rng));
    }

    (1..=n)
        .map(|i| {
            let p_i = evaluate_poly::<G>(&coeffs, G::ScalarField::from(i as u64));
            (bn_to_point::<G>(p_i) + secret).into_affine()
        })
        .collect()
}

/// Reconstructs the secret from `t + 1` shares at the given indices.
///
/// `shares[k]` must be the share held by party `indices[k]`. Fails with
/// [`Error::BadCardinality`] unless `shares.len() == indices.len() == t + 1`.
#[tracing::instrument(level = "trace", skip_all, fields(t, len = shares.len()))]
pub fn shares_reconstruct<G: Curve>(
    shares: &[G::Affine],
    indices: &[u64],
    t: usize,
) -> Result<G, Error> {
    let expected = t + 1;
    if shares.len() != expected || indices.len() != expected {
        return Err(Error::BadCardinality {
            expected,
            got: shares.len().min(indices.len()),
        });
    }

    let lagrange = lagrange_coefficients_at_zero::<G>(indices);
    Ok(point_weighted_sum::<G>(&lagrange, shares))
}

/// Evaluates `Σⱼ coeffs[j]·xʲ`.
pub(crate) fn evaluate_poly<G: Curve>(coeffs: &[G::ScalarField], x: G::ScalarField) -> G::ScalarField {
    // Horner's method, evaluating highest-degree term first.
    coeffs
        .iter()
        .rev()
        .fold(G::ScalarField::zero(), |acc, coeff| acc * x + *coeff)
}

/// Computes the Lagrange basis coefficients `λᵢ = Πⱼ≠ᵢ (0 − indexⱼ)/(indexᵢ − indexⱼ)`
/// for interpolation at `0`, one per entry of `indices`.
pub(crate) fn lagrange_coefficients_at_zero<G: Curve>(indices: &[u64]) -> Vec<G::ScalarField> {
    let xs: Vec<G::ScalarField> = indices.iter().map(|&i| G::ScalarField::from(i)).collect();
    xs.iter()
        .enumerate()
        .map(|(i, &xi)| {
            xs.iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(G::ScalarField::from(1u64), |prod, (_, &xj)| {
                    let numerator = -xj;
                    let denominator = xi - xj;
                    prod * numerator
                        * denominator
                            .inverse()
                            .expect("distinct party indices give a nonzero denominator")
                })
        })
        .collect()
}
