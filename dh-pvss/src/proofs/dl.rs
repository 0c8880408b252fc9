//! NIZK-DL: Schnorr proof of knowledge of a discrete log.
//!
//! Statement: the prover knows `x` such that `X = x·G`.

use ark_ec::{AffineRepr, CurveGroup, Group};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::{CryptoRng, Rng};

use crate::curve::{Curve, bn_to_point, scalar_random};
use crate::error::Error;
use crate::transcript::Transcript;

/// A non-interactive proof of knowledge of a discrete log.
#[derive(Clone, Debug, CanonicalSerialize, CanonicalDeserialize)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DlProof<G: Curve> {
    u: G::Affine,
    z: G::ScalarField,
}

impl<G: Curve> DlProof<G> {
    /// Proves knowledge of `x` for the public value `x * G`.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn prove(x: G::ScalarField, rng: &mut (impl Rng + CryptoRng)) -> Self {
        let x_pub = bn_to_point::<G>(x).into_affine();
        let r = scalar_random::<G>(rng);
        let u = bn_to_point::<G>(r).into_affine();
        let c = challenge::<G>(&u, &x_pub);
        let z = r + c * x;
        DlProof { u, z }
    }

    /// Verifies this proof against the public value `x_pub`.
    ///
    /// Returns `Ok(())` on acceptance, `Err(Error::VerificationFailed)` on rejection
    /// — rejection is a normal outcome, not logged as an error.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn verify(&self, x_pub: G::Affine) -> Result<(), Error> {
        let c = challenge::<G>(&self.u, &x_pub);
        let lhs = bn_to_point::<G>(self.z);
        let rhs = self.u.into_group() + x_pub.into_group() * c;
        if lhs == rhs {
            Ok(())
        } else {
            Err(Error::VerificationFailed)
        }
    }
}

fn challenge<G: Curve>(u: &G::Affine, x_pub: &G::Affine) -> G::ScalarField {
    let g = G::generator().into_affine();
    let mut transcript = Transcript::new();
    transcript
        .absorb_point::<G>(&g)
        .absorb_point::<G>(x_pub)
        .absorb_point::<G>(u);
    transcript.challenge()
}
