//! The echo server: work cost model, conjugate transform, and echo verifier.

use crate::config::EchoConfig;
use nsigii_core::{Message, NoiseSource, Result, SparsePattern, TrinaryValue};
use serde::Serialize;

/// Why an echo was accepted or rejected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum EchoVerdict {
    Verified { work_delta: f64 },
    LengthMismatch { sent: usize, echoed: usize },
    InvalidPair {
        index: usize,
        sent: TrinaryValue,
        echoed: TrinaryValue,
    },
    WorkOutOfTolerance { work_delta: f64 },
}

impl EchoVerdict {
    pub fn is_verified(&self) -> bool {
        matches!(self, EchoVerdict::Verified { .. })
    }
}

impl std::fmt::Display for EchoVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EchoVerdict::Verified { work_delta } => write!(f, "verified (work delta {work_delta:.4} J)"),
            EchoVerdict::LengthMismatch { sent, echoed } => {
                write!(f, "length mismatch: sent {sent}, echoed {echoed}")
            }
            EchoVerdict::InvalidPair { index, sent, echoed } => {
                write!(f, "invalid pair at {index}: {sent} -> {echoed}")
            }
            EchoVerdict::WorkOutOfTolerance { work_delta } => {
                write!(f, "work delta {work_delta:.4} J out of tolerance")
            }
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct EchoServer {
    config: EchoConfig,
}

impl EchoServer {
    pub fn new(config: EchoConfig) -> Self {
        Self { config }
    }

    /// `F * d * cos(theta)`, independent of any message.
    pub fn base_work(&self) -> f64 {
        self.config.force_newtons * self.config.distance_meters * self.config.theta_radians.cos()
    }

    /// Base work plus the scaled sum of the message's cost contributions.
    /// An unencoded message simply costs the base work.
    pub fn calculate_work(&self, message: &Message) -> f64 {
        let entropy_cost = self.config.entropy_scale * message.costs().iter().sum::<f64>();
        self.base_work() + entropy_cost
    }

    /// Conjugate every symbol. The echo carries no cost contributions.
    pub fn apply_isomorphism(&self, message: &Message) -> Message {
        Message::new(
            message
                .symbols()
                .iter()
                .map(|s| s.conjugate())
                .collect::<Vec<_>>(),
        )
    }

    /// Sparse-encode `message` with the configured estimator.
    pub fn encode<N: NoiseSource + ?Sized>(&self, message: &mut Message, source: &mut N) -> Result<Vec<SparsePattern>> {
        message.encode_sparse_using(self.config.estimator, source)
    }

    pub fn verify_echo(&self, sent: &Message, echoed: &Message) -> bool {
        self.inspect_echo(sent, echoed).is_verified()
    }

    /// Check that `echoed` conjugates `sent` symbol by symbol and that both
    /// carry the same work within tolerance. Stops at the first bad pair.
    pub fn inspect_echo(&self, sent: &Message, echoed: &Message) -> EchoVerdict {
        let verdict = self.judge(sent, echoed);
        tracing::debug!(%verdict, "echo inspected");
        verdict
    }

    fn judge(&self, sent: &Message, echoed: &Message) -> EchoVerdict {
        if sent.len() != echoed.len() {
            return EchoVerdict::LengthMismatch {
                sent: sent.len(),
                echoed: echoed.len(),
            };
        }

        let pairs = sent.symbols().iter().zip(echoed.symbols());
        if let Some((index, (&s, &e))) = pairs.enumerate().find(|(_, (s, e))| !s.pairs_with(**e)) {
            return EchoVerdict::InvalidPair {
                index,
                sent: s,
                echoed: e,
            };
        }

        let work_delta = (self.calculate_work(sent) - self.calculate_work(echoed)).abs();
        if work_delta < self.config.work_tolerance {
            EchoVerdict::Verified { work_delta }
        } else {
            EchoVerdict::WorkOutOfTolerance { work_delta }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsigii_core::TrinaryValue::*;

    #[test]
    fn test_base_work_default() {
        let server = EchoServer::default();
        let expected = 1.25 * 15.0 * 30f64.to_radians().cos();
        assert!((server.base_work() - expected).abs() < 1e-12);
        assert!((server.base_work() - 16.238).abs() < 1e-3);
    }

    #[test]
    fn test_first_bad_pair_reported() {
        let server = EchoServer::default();
        let sent = Message::new(vec![Affirmative, Affirmative, Negative]);
        let echoed = Message::new(vec![Negative, Affirmative, Negative]);
        assert_eq!(
            server.inspect_echo(&sent, &echoed),
            EchoVerdict::InvalidPair { index: 1, sent: Affirmative, echoed: Affirmative }
        );
    }

    #[test]
    fn test_verdict_display() {
        let v = EchoVerdict::LengthMismatch { sent: 3, echoed: 4 };
        assert_eq!(v.to_string(), "length mismatch: sent 3, echoed 4");
    }
}
