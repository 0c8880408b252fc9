#![deny(missing_docs, clippy::unwrap_used)]
//! Diffie-Hellman based publicly verifiable secret sharing, with re-sharing to
//! successor committees.
//!
//! A dealer splits a group-element secret into Shamir-in-exponent shares, masks each
//! one under a Diffie-Hellman key shared with its recipient, and publishes one
//! aggregate NIZK proof that every share is well-formed (`distribute_prove` /
//! `distribute_verify`). Any `t + 1` committee members can jointly decrypt and
//! reconstruct the secret (`decrypt_share_prove` / `decrypt_share_verify` /
//! `reconstruct`), or the committee can re-share the secret to a successor committee
//! under a new threshold without ever reconstructing it in the clear
//! (`reshare_prove` / `reshare_verify` / `reconstruct_reshare`).
//!
//! The engine is generic over any prime-order curve group exposed through
//! [`Curve`]; [`P256`] is the default instantiation.

mod curve;
mod error;
mod keys;
mod proofs;
mod pvss;
mod scrape;
mod shamir;
mod transcript;

pub use curve::{Curve, P256};
pub use error::Error;
pub use keys::KeyPair;
pub use proofs::{DlProof, DleqProof, ReshareProof};
pub use pvss::{
    PvssCtx, committee_dist_key, decrypt_share_prove, decrypt_share_verify, distribute_prove,
    distribute_verify, reconstruct, reconstruct_reshare, reshare_prove, reshare_verify,
};
