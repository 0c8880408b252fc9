//! Fiat-Shamir transcript hashing.
//!
//! Produces a scalar challenge from an ordered sequence of points and scalars with a
//! bit-exact contract: SHA-256 over compressed points and minimal big-endian scalars,
//! concatenated in absorption order, reduced mod the scalar field's modulus. Two
//! implementations that absorb the same items in the same order derive the same
//! challenge.
//!
//! This replaces the fan of fixed-arity hashing helpers a C transliteration would
//! have (`hash_ppU2bn`, `hash_ppppppppp2bn`, ...) with one builder that takes an
//! ordered sequence of `{Point, Scalar}` items, mirroring how
//! `oprf_core::ddlog_equality::combine_two_nonce_randomness` builds its own
//! (Blake3-based) transcript by repeated `hasher.update(...)` calls.

use ark_ec::CurveGroup;
use ark_ff::{BigInteger, PrimeField};
use ark_serialize::CanonicalSerialize;
use sha2::{Digest, Sha256};

/// An ordered Fiat-Shamir transcript builder.
pub struct Transcript {
    hasher: Sha256,
}

impl Transcript {
    /// Starts a new, empty transcript.
    pub fn new() -> Self {
        Self {
            hasher: Sha256::new(),
        }
    }

    /// Absorbs a point, serialized in compressed form.
    pub fn absorb_point<G: CurveGroup>(&mut self, point: &G::Affine) -> &mut Self {
        let mut buf = Vec::with_capacity(point.compressed_size());
        point
            .serialize_compressed(&mut buf)
            .expect("compressed serialization of a valid curve point cannot fail");
        self.hasher.update(&buf);
        self
    }

    /// Absorbs every point in `points`, in order.
    pub fn absorb_points<'a, G: CurveGroup>(
        &mut self,
        points: impl IntoIterator<Item = &'a G::Affine>,
    ) -> &mut Self
    where
        G::Affine: 'a,
    {
        for point in points {
            self.absorb_point::<G>(point);
        }
        self
    }

    /// Absorbs a scalar, serialized as its minimal big-endian unsigned representation
    /// (no leading zero byte, no length prefix).
    pub fn absorb_scalar<F: PrimeField>(&mut self, scalar: &F) -> &mut Self {
        self.hasher.update(minimal_be_bytes(scalar));
        self
    }

    /// Finalizes the transcript: interprets the 32-byte SHA-256 digest as a
    /// big-endian unsigned integer and reduces it modulo the scalar field's order.
    pub fn challenge<F: PrimeField>(self) -> F {
        let digest = self.hasher.finalize();
        F::from_be_bytes_mod_order(&digest)
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

/// `hash(items...)` convenience for a single-shot challenge over a fixed point list,
/// matching the shape of the original's `hash_pp...p2bn` helpers.
pub fn hash_points<G: CurveGroup>(points: &[G::Affine]) -> G::ScalarField {
    let mut transcript = Transcript::new();
    transcript.absorb_points::<G>(points);
    transcript.challenge()
}

/// `hash_points_to_poly(num_coeffs, lists)`: derives `num_coeffs` pseudorandom scalar
/// coefficients from the transcript formed by a sequence of point lists.
///
/// 1. Each list in `lists` is hashed on its own (over just its points) to one scalar.
/// 2. `poly[0] = hash(h_list_1 || ... || h_list_k)`, scalars serialized minimally.
/// 3. `poly[i] = hash(poly[i-1])` for `i = 1..num_coeffs`.
///
/// Every output is already reduced mod the scalar field's order.
pub fn hash_points_to_poly<G: CurveGroup>(
    num_coeffs: usize,
    lists: &[&[G::Affine]],
) -> Vec<G::ScalarField> {
    let mut poly = Vec::with_capacity(num_coeffs);
    if num_coeffs == 0 {
        return poly;
    }

    let mut combine = Transcript::new();
    for list in lists {
        let h_list: G::ScalarField = hash_points::<G>(list);
        combine.absorb_scalar(&h_list);
    }
    poly.push(combine.challenge());

    for i in 1..num_coeffs {
        let mut next = Transcript::new();
        next.absorb_scalar(&poly[i - 1]);
        poly.push(next.challenge());
    }
    poly
}

fn minimal_be_bytes<F: PrimeField>(scalar: &F) -> Vec<u8> {
    let bytes = scalar.into_bigint().to_bytes_be();
    let first_nonzero = bytes.iter().position(|&b| b != 0);
    match first_nonzero {
        Some(idx) => bytes[idx..].to_vec(),
        None => vec![0],
    }
}
