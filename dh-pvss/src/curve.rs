//! Curve abstraction and scalar/point primitives.
//!
//! The engine is generic over any prime-order elliptic curve group exposed through
//! [`ark_ec::CurveGroup`]. [`P256`] is the default concrete instantiation.
//!
//! There is no separate modular-arithmetic façade here: `G::ScalarField` already
//! guarantees reduction mod the group order on every operation, and `G`'s own
//! `Group`/`CurveGroup` impls already guarantee point addition/scalar multiplication
//! in the correct subgroup. This module only adds the handful of helpers the rest of
//! the crate needs on top of those guarantees.

use ark_ec::{CurveGroup, Group, VariableBaseMSM};
use ark_ff::UniformRand;
use rand::{CryptoRng, Rng};

/// A prime-order curve usable throughout this crate.
///
/// Bundles the bounds every module needs (`CurveGroup` plus multi-scalar
/// multiplication with `Affine` bases) behind one name, the way `ice-frost`'s
/// `CipherSuite` trait bundles a curve choice for its own algebra — simplified here
/// to a blanket marker rather than a full cipher-suite abstraction, since this crate
/// has no hash-to-curve or signature-scheme choices to carry alongside the curve.
pub trait Curve: CurveGroup + VariableBaseMSM<MulBase = <Self as CurveGroup>::Affine> {}

impl<G> Curve for G where G: CurveGroup + VariableBaseMSM<MulBase = <G as CurveGroup>::Affine> {}

/// The default concrete curve: NIST P-256, via `ark-secp256r1`.
pub type P256 = ark_secp256r1::Projective;

/// Draws a uniform random scalar using a caller-supplied cryptographically secure RNG.
///
/// There is no library-internal deterministic fallback: every call site must supply
/// its own randomness source, so there is no switch that could accidentally ship a
/// fixed scalar in a release build.
pub fn scalar_random<G: Curve>(rng: &mut (impl Rng + CryptoRng)) -> G::ScalarField {
    G::ScalarField::rand(rng)
}

/// `s * G`, the group generator raised to `s`.
pub fn bn_to_point<G: Curve>(s: G::ScalarField) -> G {
    G::generator() * s
}

/// `Σ wᵢ·Pᵢ`, computed via variable-base multi-scalar multiplication.
///
/// Panics if `weights` and `points` differ in length; callers are expected to enforce
/// that invariant (both are always built from the same iteration in this crate).
pub fn point_weighted_sum<G: Curve>(weights: &[G::ScalarField], points: &[G::Affine]) -> G {
    assert_eq!(weights.len(), points.len());
    G::msm(points, weights).expect("msm: bases and scalars have equal length")
}
