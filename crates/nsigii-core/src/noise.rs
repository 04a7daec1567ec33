//! Random byte sources feeding the channel entropy measurement.
//!
//! Production code draws from the OS CSPRNG through `ring`. Tests swap in
//! [`ScriptedNoise`] to replay a fixed byte sequence.

use crate::error::{Error, Result};
use ring::rand::{SecureRandom, SystemRandom};
use std::collections::VecDeque;

/// A source of uniformly distributed random bytes.
pub trait NoiseSource {
    /// Fill `dest` completely or fail.
    fn fill(&mut self, dest: &mut [u8]) -> Result<()>;
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        (**self).fill(dest)
    }
}

/// Cryptographically secure noise from the operating system.
#[derive(Debug)]
pub struct SystemNoise {
    rng: SystemRandom,
}

impl SystemNoise {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for SystemNoise {
    fn default() -> Self {
        Self::new()
    }
}

impl NoiseSource for SystemNoise {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        self.rng
            .fill(dest)
            .map_err(|_| Error::noise_unavailable("system random source failed"))
    }
}

/// Replays a fixed byte sequence, front to back.
#[derive(Debug, Clone, Default)]
pub struct ScriptedNoise {
    bytes: VecDeque<u8>,
}

impl ScriptedNoise {
    pub fn new(bytes: impl IntoIterator<Item = u8>) -> Self {
        Self {
            bytes: bytes.into_iter().collect(),
        }
    }

    /// Bytes not yet handed out.
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

impl NoiseSource for ScriptedNoise {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        let requested = dest.len();
        if requested > self.bytes.len() {
            return Err(Error::NoiseExhausted {
                requested,
                available: self.bytes.len(),
            });
        }
        for (slot, byte) in dest.iter_mut().zip(self.bytes.drain(..requested)) {
            *slot = byte;
        }
        Ok(())
    }
}
