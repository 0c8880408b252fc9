//! The DH-PVSS engine: distribution, decryption, reshare, and reconstruction.
//!
//! This module composes the transcript hasher, the NIZK proof family, Shamir-in-
//! exponent sharing and the SCRAPE code into the operations a dealer and committee
//! actually run: `distribute_prove`/`distribute_verify`,
//! `decrypt_share_prove`/`decrypt_share_verify`, `reshare_prove`/`reshare_verify`,
//! and the two Lagrange-based reconstruction routines.

use ark_ec::{AffineRepr, CurveGroup, Group};
use itertools::izip;
use rand::{CryptoRng, Rng};

use crate::curve::{Curve, point_weighted_sum};
use crate::error::Error;
use crate::keys::KeyPair;
use crate::proofs::{DleqProof, ReshareProof};
use crate::scrape::{ScrapeCode, scrape_terms};
use crate::shamir;
use crate::transcript::hash_points_to_poly;

/// The public parameters of one committee's dealing session: threshold, size, and
/// the derived SCRAPE dual-code coefficients.
///
/// Immutable once constructed: every field is private, so a `PvssCtx` that exists is
/// guaranteed to satisfy `n - t - 2 > 0`.
#[derive(Clone, Debug)]
pub struct PvssCtx<G: Curve> {
    t: usize,
    n: usize,
    code: ScrapeCode<G>,
}

impl<G: Curve> PvssCtx<G> {
    /// Builds a new context for threshold `t` out of `n` committee members.
    ///
    /// Fails with [`Error::BadParameters`] unless `n - t - 2 > 0`.
    #[tracing::instrument(level = "debug", skip_all, fields(t, n))]
    pub fn setup(t: usize, n: usize) -> Result<Self, Error> {
        if t == 0 || n == 0 || n < t + 3 {
            return Err(Error::BadParameters { t, n });
        }
        Ok(PvssCtx {
            t,
            n,
            code: ScrapeCode::setup(n),
        })
    }

    /// The reconstruction threshold: `t + 1` shares are required to reconstruct.
    pub fn t(&self) -> usize {
        self.t
    }

    /// The committee size.
    pub fn n(&self) -> usize {
        self.n
    }
}

fn generator_affine<G: Curve>() -> G::Affine {
    G::generator().into_affine()
}

/// Dealer side of distribution: shares `secret` among `ctx.n()` committee members
/// under `ctx.t()`, encrypting each share to its member's public key and producing
/// one aggregate DLEQ proof of correct encryption.
#[tracing::instrument(level = "debug", skip_all, fields(t = ctx.t(), n = ctx.n()))]
pub fn distribute_prove<G: Curve>(
    ctx: &PvssCtx<G>,
    dealer: &KeyPair<G>,
    committee_pubs: &[G::Affine],
    secret: G,
    rng: &mut (impl Rng + CryptoRng),
) -> Result<(Vec<G::Affine>, DleqProof<G>), Error> {
    if committee_pubs.len() != ctx.n() {
        return Err(Error::BadCardinality {
            expected: ctx.n(),
            got: committee_pubs.len(),
        });
    }

    let sigma = shamir::shares_generate::<G>(secret, ctx.t(), ctx.n(), rng);
    let encrypted_shares: Vec<G::Affine> = izip!(committee_pubs.iter(), sigma.iter())
        .map(|(pk, sigma_i)| (pk.into_group() * dealer.secret() + *sigma_i).into_affine())
        .collect();

    let (u, _v) = distribution_scrape_sum(ctx, dealer.public(), committee_pubs, &encrypted_shares);

    let proof = DleqProof::prove(dealer.secret(), generator_affine::<G>(), u, rng);

    Ok((encrypted_shares, proof))
}

/// Verifier side of distribution: recomputes the aggregate scrape sum and checks the
/// dealer's DLEQ proof against it.
#[tracing::instrument(level = "debug", skip_all, fields(t = ctx.t(), n = ctx.n()))]
pub fn distribute_verify<G: Curve>(
    ctx: &PvssCtx<G>,
    proof: &DleqProof<G>,
    encrypted_shares: &[G::Affine],
    dealer_pub: G::Affine,
    committee_pubs: &[G::Affine],
) -> Result<(), Error> {
    if committee_pubs.len() != ctx.n() || encrypted_shares.len() != ctx.n() {
        return Err(Error::BadCardinality {
            expected: ctx.n(),
            got: committee_pubs.len().min(encrypted_shares.len()),
        });
    }

    let (u, v) = distribution_scrape_sum(ctx, dealer_pub, committee_pubs, encrypted_shares);
    proof.verify(generator_affine::<G>(), dealer_pub, u, v)
}

/// Shared recomputation of the distribution-phase scrape sum `(U, V)`, used by both
/// `distribute_prove` (to build the DLEQ witness) and `distribute_verify` (to check
/// it). Keeping this in one function is what makes prover and verifier agree: any
/// divergence here would silently break every proof.
fn distribution_scrape_sum<G: Curve>(
    ctx: &PvssCtx<G>,
    dealer_pub: G::Affine,
    committee_pubs: &[G::Affine],
    encrypted_shares: &[G::Affine],
) -> (G::Affine, G::Affine) {
    let num_coeffs = ctx.n() - ctx.t() - 1;
    let m = hash_points_to_poly::<G>(
        num_coeffs,
        &[&[dealer_pub], committee_pubs, encrypted_shares],
    );
    let e = scrape_terms::<G>(ctx.code.v(), &m);

    let u = point_weighted_sum::<G>(&e, committee_pubs);
    let v = point_weighted_sum::<G>(&e, encrypted_shares);
    (u.into_affine(), v.into_affine())
}

/// Member side of decryption: recovers the plain share from an encrypted share using
/// the DH key shared with the dealer, and proves correct decryption.
#[tracing::instrument(level = "debug", skip_all)]
pub fn decrypt_share_prove<G: Curve>(
    dealer_pub: G::Affine,
    member: &KeyPair<G>,
    encrypted_share: G::Affine,
    rng: &mut (impl Rng + CryptoRng),
) -> (G::Affine, DleqProof<G>) {
    let shared_key = dealer_pub.into_group() * member.secret();
    let share = (encrypted_share.into_group() - shared_key).into_affine();
    let proof = DleqProof::prove(member.secret(), generator_affine::<G>(), dealer_pub, rng);
    (share, proof)
}

/// Verifier side of decryption: recomputes the claimed DH key from the public
/// encrypted share and plain share, and checks the member's DLEQ proof against it.
#[tracing::instrument(level = "debug", skip_all)]
pub fn decrypt_share_verify<G: Curve>(
    dealer_pub: G::Affine,
    member_pub: G::Affine,
    encrypted_share: G::Affine,
    share: G::Affine,
    proof: &DleqProof<G>,
) -> Result<(), Error> {
    let diff = (encrypted_share.into_group() - share.into_group()).into_affine();
    proof.verify(generator_affine::<G>(), member_pub, dealer_pub, diff)
}

/// Reconstructs a secret from `t + 1` plain shares via Lagrange interpolation at 0.
pub fn reconstruct<G: Curve>(
    shares: &[G::Affine],
    indices: &[u64],
    t: usize,
) -> Result<G, Error> {
    shamir::shares_reconstruct::<G>(shares, indices, t)
}

/// Computes the committee's joint distribution key from `t + 1` members' public
/// keys — the same Lagrange routine as [`reconstruct`], applied to public keys
/// instead of shares, used to derive the "dealer pub" the next epoch sees.
pub fn committee_dist_key<G: Curve>(
    pks: &[G::Affine],
    indices: &[u64],
    t: usize,
) -> Result<G, Error> {
    shamir::shares_reconstruct::<G>(pks, indices, t)
}

/// One current-committee member's reshare step: decrypts its own share, reshares it
/// to the next committee under `(t', n')`, and proves (in one aggregate proof)
/// knowledge of both its committee secret and its per-session dealer secret, plus the
/// Pedersen-style linear relation SCRAPE needs to verify the whole batch at once.
#[allow(clippy::too_many_arguments)]
#[tracing::instrument(level = "debug", skip_all, fields(party_index, t2 = next_ctx.t(), n2 = next_ctx.n()))]
pub fn reshare_prove<G: Curve>(
    next_ctx: &PvssCtx<G>,
    party_index: usize,
    committee_kp: &KeyPair<G>,
    dealer_kp: &KeyPair<G>,
    prev_dealer_pub: G::Affine,
    current_encrypted_shares: &[G::Affine],
    next_committee_pubs: &[G::Affine],
    rng: &mut (impl Rng + CryptoRng),
) -> Result<(Vec<G::Affine>, ReshareProof<G>), Error> {
    if next_committee_pubs.len() != next_ctx.n() {
        return Err(Error::BadCardinality {
            expected: next_ctx.n(),
            got: next_committee_pubs.len(),
        });
    }
    let own_share = *party_index
        .checked_sub(1)
        .and_then(|i| current_encrypted_shares.get(i))
        .ok_or(Error::BadCardinality {
            expected: party_index,
            got: current_encrypted_shares.len(),
        })?;

    // 1. decrypt own share
    let sigma = (own_share.into_group() - prev_dealer_pub.into_group() * committee_kp.secret())
        .into_affine();

    // 2. reshare it to the next committee
    let rho = shamir::shares_generate::<G>(
        sigma.into_group(),
        next_ctx.t(),
        next_ctx.n(),
        rng,
    );

    // 3. encrypt each reshared sub-share to the next committee's public keys
    let encrypted_reshares: Vec<G::Affine> = izip!(next_committee_pubs.iter(), rho.iter())
        .map(|(pk, rho_k)| (pk.into_group() * dealer_kp.secret() + *rho_k).into_affine())
        .collect();

    let (_u_prime, v_prime, w_prime) = reshare_scrape_sum(
        next_ctx,
        prev_dealer_pub,
        current_encrypted_shares,
        own_share,
        next_committee_pubs,
        &encrypted_reshares,
    );

    let proof = ReshareProof::prove(
        committee_kp.secret(),
        dealer_kp.secret(),
        generator_affine::<G>(),
        v_prime,
        w_prime,
        rng,
    );

    Ok((encrypted_reshares, proof))
}

/// Verifies one current-committee member's reshare output against its public
/// long-term committee key `Y1` and per-session dealer key `Y2`.
#[allow(clippy::too_many_arguments)]
#[tracing::instrument(level = "debug", skip_all, fields(party_index, t2 = next_ctx.t(), n2 = next_ctx.n()))]
pub fn reshare_verify<G: Curve>(
    next_ctx: &PvssCtx<G>,
    party_index: usize,
    prev_dealer_pub: G::Affine,
    current_encrypted_shares: &[G::Affine],
    encrypted_reshares: &[G::Affine],
    next_committee_pubs: &[G::Affine],
    member_committee_pub: G::Affine,
    member_dealer_pub: G::Affine,
    proof: &ReshareProof<G>,
) -> Result<(), Error> {
    if next_committee_pubs.len() != next_ctx.n() || encrypted_reshares.len() != next_ctx.n() {
        return Err(Error::BadCardinality {
            expected: next_ctx.n(),
            got: next_committee_pubs.len().min(encrypted_reshares.len()),
        });
    }
    let own_share = *party_index
        .checked_sub(1)
        .and_then(|i| current_encrypted_shares.get(i))
        .ok_or(Error::BadCardinality {
            expected: party_index,
            got: current_encrypted_shares.len(),
        })?;

    let (y3, v_prime, w_prime) = reshare_scrape_sum(
        next_ctx,
        prev_dealer_pub,
        current_encrypted_shares,
        own_share,
        next_committee_pubs,
        encrypted_reshares,
    );

    proof.verify(
        generator_affine::<G>(),
        v_prime,
        w_prime,
        member_committee_pub,
        member_dealer_pub,
        y3,
    )
}

/// Shared recomputation of the reshare-phase scrape sum `(U', V', W')`.
#[allow(clippy::too_many_arguments)]
fn reshare_scrape_sum<G: Curve>(
    next_ctx: &PvssCtx<G>,
    prev_dealer_pub: G::Affine,
    current_encrypted_shares: &[G::Affine],
    own_share: G::Affine,
    next_committee_pubs: &[G::Affine],
    encrypted_reshares: &[G::Affine],
) -> (G::Affine, G::Affine, G::Affine) {
    let num_coeffs = next_ctx.n() - next_ctx.t();
    let m = hash_points_to_poly::<G>(num_coeffs, &[&[prev_dealer_pub], current_encrypted_shares]);
    let f = scrape_terms::<G>(next_ctx.code.v_prime(), &m);

    let deltas: Vec<G::Affine> = encrypted_reshares
        .iter()
        .map(|r_j| (r_j.into_group() - own_share.into_group()).into_affine())
        .collect();

    let u_prime = point_weighted_sum::<G>(&f, &deltas);
    let v_prime = point_weighted_sum::<G>(&f, next_committee_pubs);
    let f_sum: G::ScalarField = f.iter().copied().sum();
    let w_prime = prev_dealer_pub.into_group() * f_sum;

    (u_prime.into_affine(), v_prime.into_affine(), w_prime.into_affine())
}

/// Reconstructs one next-epoch encrypted share from `t + 1` reshare outputs — the
/// same Lagrange routine as [`reconstruct`], applied to a column of per-producer
/// reshare outputs for a fixed next-committee member index.
pub fn reconstruct_reshare<G: Curve>(
    encrypted_reshares: &[G::Affine],
    indices: &[u64],
    t: usize,
) -> Result<G, Error> {
    shamir::shares_reconstruct::<G>(encrypted_reshares, indices, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_secp256r1::{Fr, Projective as G};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn keypairs(n: usize, rng: &mut ChaCha20Rng) -> Vec<KeyPair<G>> {
        (0..n).map(|_| KeyPair::<G>::generate(rng)).collect()
    }

    fn indices(n: usize) -> Vec<u64> {
        (1..=n as u64).collect()
    }

    fn pvss_roundtrip(t: usize, n: usize) {
        let mut rng = ChaCha20Rng::seed_from_u64(100 + t as u64 + n as u64);
        let ctx = PvssCtx::<G>::setup(t, n).unwrap();

        let dealer = KeyPair::<G>::generate(&mut rng);
        let committee = keypairs(n, &mut rng);
        let committee_pubs: Vec<_> = committee.iter().map(|kp| kp.public()).collect();

        let secret = crate::curve::bn_to_point::<G>(Fr::from(777u64));

        let (encrypted_shares, dist_proof) =
            distribute_prove(&ctx, &dealer, &committee_pubs, secret, &mut rng).unwrap();
        distribute_verify(
            &ctx,
            &dist_proof,
            &encrypted_shares,
            dealer.public(),
            &committee_pubs,
        )
        .unwrap();

        let mut shares = Vec::with_capacity(n);
        for (member, encrypted) in committee.iter().zip(encrypted_shares.iter()) {
            let (share, proof) =
                decrypt_share_prove(dealer.public(), member, *encrypted, &mut rng);
            decrypt_share_verify(dealer.public(), member.public(), *encrypted, share, &proof)
                .unwrap();
            shares.push(share);
        }

        let idx = indices(n);
        let reconstructed =
            reconstruct::<G>(&shares[..t + 1], &idx[..t + 1], t).unwrap();
        assert_eq!(
            reconstructed.into_affine(),
            secret.into_affine(),
            "pvss round-trip must recover the original secret"
        );
    }

    #[test]
    fn pvss_small() {
        pvss_roundtrip(1, 4);
    }

    #[test]
    fn pvss_t50_n100() {
        pvss_roundtrip(50, 100);
    }

    #[test]
    fn distribute_verify_rejects_tampered_share() {
        let mut rng = ChaCha20Rng::seed_from_u64(200);
        let (t, n) = (1, 4);
        let ctx = PvssCtx::<G>::setup(t, n).unwrap();
        let dealer = KeyPair::<G>::generate(&mut rng);
        let committee = keypairs(n, &mut rng);
        let committee_pubs: Vec<_> = committee.iter().map(|kp| kp.public()).collect();
        let secret = crate::curve::bn_to_point::<G>(Fr::from(9u64));

        let (mut encrypted_shares, proof) =
            distribute_prove(&ctx, &dealer, &committee_pubs, secret, &mut rng).unwrap();
        encrypted_shares[0] = crate::curve::bn_to_point::<G>(Fr::from(1234u64)).into_affine();

        assert!(matches!(
            distribute_verify(&ctx, &proof, &encrypted_shares, dealer.public(), &committee_pubs),
            Err(Error::VerificationFailed)
        ));
    }

    fn reshare_roundtrip(t: usize, n: usize, t2: usize, n2: usize) {
        let mut rng = ChaCha20Rng::seed_from_u64(300 + t as u64 + n as u64 + t2 as u64 + n2 as u64);
        let ctx = PvssCtx::<G>::setup(t, n).unwrap();
        let next_ctx = PvssCtx::<G>::setup(t2, n2).unwrap();

        let dealer = KeyPair::<G>::generate(&mut rng);
        let committee = keypairs(n, &mut rng);
        let committee_pubs: Vec<_> = committee.iter().map(|kp| kp.public()).collect();
        let next_committee = keypairs(n2, &mut rng);
        let next_committee_pubs: Vec<_> = next_committee.iter().map(|kp| kp.public()).collect();

        let secret = crate::curve::bn_to_point::<G>(Fr::from(555u64));
        let (encrypted_shares, _dist_proof) =
            distribute_prove(&ctx, &dealer, &committee_pubs, secret, &mut rng).unwrap();

        // each current-committee member gets its own per-session dealer key and
        // reshares its (still-encrypted) share to the next committee
        let dealer_kps: Vec<_> = (0..n).map(|_| KeyPair::<G>::generate(&mut rng)).collect();
        let mut all_reshares = Vec::with_capacity(n);
        for (i, (member, dealer_kp)) in committee.iter().zip(dealer_kps.iter()).enumerate() {
            let party_index = i + 1;
            let (reshares, proof) = reshare_prove(
                &next_ctx,
                party_index,
                member,
                dealer_kp,
                dealer.public(),
                &encrypted_shares,
                &next_committee_pubs,
                &mut rng,
            )
            .unwrap();
            reshare_verify(
                &next_ctx,
                party_index,
                dealer.public(),
                &encrypted_shares,
                &reshares,
                &next_committee_pubs,
                member.public(),
                dealer_kp.public(),
                &proof,
            )
            .unwrap();
            all_reshares.push(reshares);
        }

        // reconstruct the next epoch's encrypted shares, one next-committee member at a time
        let producer_indices: Vec<u64> = (1..=(t + 1) as u64).collect();
        let mut next_encrypted_shares = Vec::with_capacity(n2);
        for j in 0..n2 {
            let column: Vec<_> = all_reshares[..t + 1].iter().map(|r| r[j]).collect();
            let reconstructed =
                reconstruct_reshare::<G>(&column, &producer_indices, t).unwrap();
            next_encrypted_shares.push(reconstructed.into_affine());
        }

        // the next epoch's "dealer pub" is the reconstructed joint key of the
        // resharing committee's per-session dealer keys
        let dealer_pubs: Vec<_> = dealer_kps.iter().map(|kp| kp.public()).collect();
        let next_dealer_pub =
            committee_dist_key::<G>(&dealer_pubs[..t + 1], &producer_indices, t).unwrap();

        let mut next_shares = Vec::with_capacity(n2);
        for (member, encrypted) in next_committee.iter().zip(next_encrypted_shares.iter()) {
            let (share, proof) = decrypt_share_prove(
                next_dealer_pub.into_affine(),
                member,
                *encrypted,
                &mut rng,
            );
            decrypt_share_verify(
                next_dealer_pub.into_affine(),
                member.public(),
                *encrypted,
                share,
                &proof,
            )
            .unwrap();
            next_shares.push(share);
        }

        let next_idx: Vec<u64> = (1..=(t2 + 1) as u64).collect();
        let reconstructed =
            reconstruct::<G>(&next_shares[..t2 + 1], &next_idx, t2).unwrap();
        assert_eq!(
            reconstructed.into_affine(),
            secret.into_affine(),
            "reshare round-trip must recover the original secret"
        );
    }

    #[test]
    fn reshare_small() {
        reshare_roundtrip(1, 4, 1, 4);
    }

    #[test]
    fn reshare_t5_n10() {
        reshare_roundtrip(5, 10, 5, 10);
    }

    #[test]
    fn reshare_verify_rejects_wrong_party_public_key() {
        let mut rng = ChaCha20Rng::seed_from_u64(400);
        let (t, n, t2, n2) = (1, 4, 1, 4);
        let ctx = PvssCtx::<G>::setup(t, n).unwrap();
        let next_ctx = PvssCtx::<G>::setup(t2, n2).unwrap();

        let dealer = KeyPair::<G>::generate(&mut rng);
        let committee = keypairs(n, &mut rng);
        let committee_pubs: Vec<_> = committee.iter().map(|kp| kp.public()).collect();
        let next_committee_pubs: Vec<_> = keypairs(n2, &mut rng)
            .iter()
            .map(|kp| kp.public())
            .collect();
        let secret = crate::curve::bn_to_point::<G>(Fr::from(3u64));
        let (encrypted_shares, _) =
            distribute_prove(&ctx, &dealer, &committee_pubs, secret, &mut rng).unwrap();

        let member = &committee[0];
        let dealer_kp = KeyPair::<G>::generate(&mut rng);
        let (reshares, proof) = reshare_prove(
            &next_ctx,
            1,
            member,
            &dealer_kp,
            dealer.public(),
            &encrypted_shares,
            &next_committee_pubs,
            &mut rng,
        )
        .unwrap();

        let wrong_member_pub = KeyPair::<G>::generate(&mut rng).public();
        assert!(matches!(
            reshare_verify(
                &next_ctx,
                1,
                dealer.public(),
                &encrypted_shares,
                &reshares,
                &next_committee_pubs,
                wrong_member_pub,
                dealer_kp.public(),
                &proof,
            ),
            Err(Error::VerificationFailed)
        ));
    }
}
