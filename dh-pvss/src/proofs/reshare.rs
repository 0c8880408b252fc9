//! NIZK-Reshare: joint knowledge of two discrete logs plus a Pedersen-style linear
//! relation.
//!
//! Statement: the prover knows `w1`, `w2` such that, for public points `ga, gb, gc,
//! Y1, Y2, Y3`:
//! - `Y1 = w1·ga`
//! - `Y2 = w2·ga`
//! - `Y3 = w2·gb - w1·gc`
//!
//! `Y3` is a Pedersen commitment to `w1` under base `gc` (negated) blinded by `w2`
//! under base `gb`; the third verification equation checks that relation directly
//! rather than treating it as a third independent discrete-log statement.
//!
//! The only complete version of this proof in the original source is a commented-out
//! Swift reference inside `nizk_reshare.c` — the shipped C `nizk_reshare_prove` never
//! finishes computing `R3` (`EC_POINT_sub` is left as a `TODO`) and
//! `nizk_reshare_verify` is a stub that always reports failure. This implementation
//! follows the Swift reference, which is internally consistent and matches the
//! algebra above.

use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::{CryptoRng, Rng};

use crate::curve::{Curve, scalar_random};
use crate::error::Error;
use crate::transcript::Transcript;

/// A non-interactive proof of joint knowledge of `w1`, `w2` satisfying the reshare
/// relation above.
#[derive(Clone, Debug, CanonicalSerialize, CanonicalDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReshareProof<G: Curve> {
    r1: G::Affine,
    r2: G::Affine,
    r3: G::Affine,
    z1: G::ScalarField,
    z2: G::ScalarField,
}

impl<G: Curve> ReshareProof<G> {
    /// Proves knowledge of `w1`, `w2` for the public points `ga, gb, gc, Y1, Y2, Y3`
    /// (with `Y1, Y2, Y3` implicitly `w1·ga`, `w2·ga`, `w2·gb - w1·gc`).
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn prove(
        w1: G::ScalarField,
        w2: G::ScalarField,
        ga: G::Affine,
        gb: G::Affine,
        gc: G::Affine,
        rng: &mut (impl Rng + CryptoRng),
    ) -> Self {
        let y1 = (ga.into_group() * w1).into_affine();
        let y2 = (ga.into_group() * w2).into_affine();
        let y3 = (gb.into_group() * w2 - gc.into_group() * w1).into_affine();

        let r1_scalar = scalar_random::<G>(rng);
        let r2_scalar = scalar_random::<G>(rng);
        let r1 = (ga.into_group() * r1_scalar).into_affine();
        let r2 = (ga.into_group() * r2_scalar).into_affine();
        let r3 = (gb.into_group() * r2_scalar - gc.into_group() * r1_scalar).into_affine();

        let c = challenge::<G>(&ga, &gb, &gc, &y1, &y2, &y3, &r1, &r2, &r3);
        let z1 = r1_scalar + c * w1;
        let z2 = r2_scalar + c * w2;

        ReshareProof { r1, r2, r3, z1, z2 }
    }

    /// Verifies this proof against the public points `ga, gb, gc, Y1, Y2, Y3`.
    #[allow(clippy::too_many_arguments)]
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn verify(
        &self,
        ga: G::Affine,
        gb: G::Affine,
        gc: G::Affine,
        y1: G::Affine,
        y2: G::Affine,
        y3: G::Affine,
    ) -> Result<(), Error> {
        let c = challenge::<G>(&ga, &gb, &gc, &y1, &y2, &y3, &self.r1, &self.r2, &self.r3);

        let dl1_ok = self.r1.into_group() + y1.into_group() * c == ga.into_group() * self.z1;
        let dl2_ok = self.r2.into_group() + y2.into_group() * c == ga.into_group() * self.z2;
        let pedersen_ok = self.r3.into_group() + y3.into_group() * c
            == gb.into_group() * self.z2 - gc.into_group() * self.z1;

        if dl1_ok && dl2_ok && pedersen_ok {
            Ok(())
        } else {
            Err(Error::VerificationFailed)
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn challenge<G: Curve>(
    ga: &G::Affine,
    gb: &G::Affine,
    gc: &G::Affine,
    y1: &G::Affine,
    y2: &G::Affine,
    y3: &G::Affine,
    r1: &G::Affine,
    r2: &G::Affine,
    r3: &G::Affine,
) -> G::ScalarField {
    let mut transcript = Transcript::new();
    transcript
        .absorb_point::<G>(ga)
        .absorb_point::<G>(gb)
        .absorb_point::<G>(gc)
        .absorb_point::<G>(y1)
        .absorb_point::<G>(y2)
        .absorb_point::<G>(y3)
        .absorb_point::<G>(r1)
        .absorb_point::<G>(r2)
        .absorb_point::<G>(r3);
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
    fn reshare_happy_path() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let w1 = Fr::from(11u64);
        let w2 = Fr::from(13u64);
        let ga = rand_affine(&mut rng);
        let gb = rand_affine(&mut rng);
        let gc = rand_affine(&mut rng);

        let y1 = (ga.into_group() * w1).into_affine();
        let y2 = (ga.into_group() * w2).into_affine();
        let y3 = (gb.into_group() * w2 - gc.into_group() * w1).into_affine();

        let proof = ReshareProof::<G>::prove(w1, w2, ga, gb, gc, &mut rng);
        assert!(proof.verify(ga, gb, gc, y1, y2, y3).is_ok());
    }

    #[test]
    fn reshare_wrong_public_value_is_rejected() {
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        let w1 = Fr::from(11u64);
        let w2 = Fr::from(13u64);
        let ga = rand_affine(&mut rng);
        let gb = rand_affine(&mut rng);
        let gc = rand_affine(&mut rng);

        let y1 = (ga.into_group() * w1).into_affine();
        let y2_wrong = (ga.into_group() * Fr::from(14u64)).into_affine();
        let y3 = (gb.into_group() * w2 - gc.into_group() * w1).into_affine();

        let proof = ReshareProof::<G>::prove(w1, w2, ga, gb, gc, &mut rng);
        assert!(matches!(
            proof.verify(ga, gb, gc, y1, y2_wrong, y3),
            Err(Error::VerificationFailed)
        ));
    }
}
