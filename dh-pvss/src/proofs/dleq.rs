//! NIZK-DLEQ: proof that two points share the same discrete log across two bases.
//!
//! Statement: the prover knows `x` such that `A = x·a` and `B = x·b`.
//!
//! The response `z = r - c·x mod q` uses a subtraction (not the addition `DlProof`
//! uses); the verifier's check is shaped to match. Getting the sign wrong here is the
//! single easiest way to make this proof silently fail to interoperate, since both
//! sides must agree on it bit-for-bit.

use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::{CryptoRng, Rng};

use crate::curve::{Curve, scalar_random};
use crate::error::Error;
use crate::transcript::Transcript;

/// A non-interactive proof that `A` and `B` share a discrete log relative to bases
/// `a` and `b` respectively.
#[derive(Clone, Debug, CanonicalSerialize, CanonicalDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DleqProof<G: Curve> {
    ra: G::Affine,
    rb: G::Affine,
    z: G::ScalarField,
}

impl<G: Curve> DleqProof<G> {
    /// Proves that `x·a` and `x·b` share the discrete log `x`.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn prove(
        x: G::ScalarField,
        a: G::Affine,
        b: G::Affine,
        rng: &mut (impl Rng + CryptoRng),
    ) -> Self {
        let big_a = (a.into_group() * x).into_affine();
        let big_b = (b.into_group() * x).into_affine();
        let r = scalar_random::<G>(rng);
        let ra = (a.into_group() * r).into_affine();
        let rb = (b.into_group() * r).into_affine();
        let c = challenge::<G>(&a, &big_a, &b, &big_b, &ra, &rb);
        let z = r - c * x;
        DleqProof { ra, rb, z }
    }

    /// Verifies this proof against public bases `a`, `b` and public values `big_a`,
    /// `big_b`.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn verify(
        &self,
        a: G::Affine,
        big_a: G::Affine,
        b: G::Affine,
        big_b: G::Affine,
    ) -> Result<(), Error> {
        let c = challenge::<G>(&a, &big_a, &b, &big_b, &self.ra, &self.rb);

        let lhs_a = self.ra.into_group();
        let rhs_a = a.into_group() * self.z + big_a.into_group() * c;
        let lhs_b = self.rb.into_group();
        let rhs_b = b.into_group() * self.z + big_b.into_group() * c;

        if lhs_a == rhs_a && lhs_b == rhs_b {
            Ok(())
        } else {
            Err(Error::VerificationFailed)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn challenge<G: Curve>(
    a: &G::Affine,
    big_a: &G::Affine,
    b: &G::Affine,
    big_b: &G::Affine,
    ra: &G::Affine,
    rb: &G::Affine,
) -> G::ScalarField {
    let mut transcript = Transcript::new();
    transcript
        .absorb_point::<G>(a)
        .absorb_point::<G>(big_a)
        .absorb_point::<G>(b)
        .absorb_point::<G>(big_b)
        .absorb_point::<G>(ra)
        .absorb_point::<G>(rb);
    transcript.challenge()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::CurveGroup as _;
    use ark_secp256r1::{Fr, Projective as G};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn rand_affine(rng: &mut impl Rng) -> <G as CurveGroup>::Affine {
        use crate::curve::bn_to_point;
        bn_to_point::<G>(Fr::from(rng.r#gen::<u64>())).into_affine()
    }

    #[test]
    fn dleq_happy_path() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let x = Fr::from(7u64);
        let a = rand_affine(&mut rng);
        let b = rand_affine(&mut rng);
        let big_a = (a.into_group() * x).into_affine();
        let big_b = (b.into_group() * x).into_affine();

        let proof = DleqProof::<G>::prove(x, a, b, &mut rng);
        assert!(proof.verify(a, big_a, b, big_b).is_ok());
    }

    #[test]
    fn dleq_mismatched_b_is_rejected() {
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let x = Fr::from(7u64);
        let a = rand_affine(&mut rng);
        let b = rand_affine(&mut rng);
        let big_a = (a.into_group() * x).into_affine();
        let big_b_bad = (b.into_group() * Fr::from(6u64)).into_affine();

        let proof = DleqProof::<G>::prove(x, a, b, &mut rng);
        assert!(matches!(
            proof.verify(a, big_a, b, big_b_bad),
            Err(Error::VerificationFailed)
        ));
    }
}
