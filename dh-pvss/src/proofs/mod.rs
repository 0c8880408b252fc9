//! The NIZK proof family: DL, DLEQ and Reshare.

mod dl;
mod dleq;
mod reshare;

pub use dl::DlProof;
pub use dleq::DleqProof;
pub use reshare::ReshareProof;
