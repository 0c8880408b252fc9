//! Error taxonomy for the DH-PVSS engine.

/// Errors returned by this crate's operations.
///
/// `BadParameters`, `BadCardinality` and `BackendFailure` are programmer-error
/// conditions: a caller that hits one of these has violated a precondition it was
/// responsible for upholding. `VerificationFailed` is the one normal, expected
/// outcome among these variants — a rejected proof is not a bug, so no call site in
/// this crate logs when it is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `setup(t, n)` was called with parameters that do not satisfy `n - t - 2 > 0`,
    /// or with a non-positive `t`/`n`.
    #[error("bad parameters: setup requires n - t - 2 > 0, got t={t}, n={n}")]
    BadParameters {
        /// the threshold that was requested
        t: usize,
        /// the committee size that was requested
        n: usize,
    },
    /// A reconstruction routine was called with a number of shares other than `t + 1`.
    #[error("bad cardinality: reconstruction requires exactly {expected} shares, got {got}")]
    BadCardinality {
        /// the number of shares required (`t + 1`)
        expected: usize,
        /// the number of shares actually supplied
        got: usize,
    },
    /// A proof was rejected by its verifier. This is a normal outcome, not a bug.
    #[error("verification failed")]
    VerificationFailed,
    /// An underlying elliptic-curve or field primitive reported failure (e.g. a
    /// decoded point that is not in the prime-order subgroup). Fatal: indicates
    /// corruption or programmer misuse rather than a recoverable condition.
    #[error("backend failure: {0}")]
    BackendFailure(String),
    /// The supplied group does not have the prime order this crate's algebra
    /// assumes.
    #[error("unsupported curve: group order is not prime")]
    UnsupportedCurve,
}
