//! Committee and dealer key pairs.

use ark_ec::{AffineRepr, CurveGroup};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use rand::{CryptoRng, Rng};
use zeroize::Zeroize;

use crate::curve::{Curve, bn_to_point, scalar_random};
use crate::error::Error;

/// A key pair used by a dealer or committee member: a secret scalar and its image
/// under the generator.
///
/// The secret half is zeroized on drop, following `ice_frost::keys`'s
/// `DiffieHellmanPrivateKey`/`DiffieHellmanPublicKey` pairing, collapsed into one
/// owned struct since a DH-PVSS committee key has no separate verification-share
/// concept the way a FROST signing key does.
#[derive(Clone, Debug, CanonicalSerialize, CanonicalDeserialize, Zeroize)]
pub struct KeyPair<G: Curve> {
    secret: G::ScalarField,
    #[zeroize(skip)]
    public: G::Affine,
}

impl<G: Curve> Drop for KeyPair<G> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<G: Curve> KeyPair<G> {
    /// Generates a fresh key pair: a uniform secret scalar and its public image.
    pub fn generate(rng: &mut (impl Rng + CryptoRng)) -> Self {
        let secret = scalar_random::<G>(rng);
        let public = bn_to_point::<G>(secret).into_affine();
        KeyPair { secret, public }
    }

    /// The secret scalar.
    pub fn secret(&self) -> G::ScalarField {
        self.secret
    }

    /// The public point `secret · G`.
    pub fn public(&self) -> G::Affine {
        self.public
    }

    /// Serializes this key pair to its compressed-point-plus-fixed-width-scalar
    /// encoding.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        self.serialize_compressed(&mut bytes)
            .map_err(|e| Error::BackendFailure(e.to_string()))?;
        Ok(bytes)
    }

    /// Deserializes a key pair previously produced by [`Self::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Self::deserialize_compressed(bytes).map_err(|e| Error::BackendFailure(e.to_string()))
    }
}
