//! Core types for NSIGII

use crate::entropy::Estimator;
use crate::error::{Error, Result};
use crate::noise::{NoiseSource, SystemNoise};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Four-cell sparse encoding of one symbol.
pub type SparsePattern = [u8; 4];

pub const AFFIRMATIVE_PATTERN: SparsePattern = [1, 1, 0, 0];
pub const NEGATIVE_PATTERN: SparsePattern = [0, 0, 1, 1];
pub const INDETERMINATE_PATTERN: SparsePattern = [1, 0, 1, 0];

/// Register code reserved for a clear channel. Never decodes to a symbol.
pub const CHANNEL_CLEAR: u8 = 0b11;

/// A trinary symbol
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrinaryValue {
    #[serde(rename = "YES")]
    Affirmative,
    #[serde(rename = "NO")]
    Negative,
    #[serde(rename = "MAYBE")]
    Indeterminate,
}

impl TrinaryValue {
    pub fn name(&self) -> &'static str {
        match self {
            TrinaryValue::Affirmative => "YES",
            TrinaryValue::Negative => "NO",
            TrinaryValue::Indeterminate => "MAYBE",
        }
    }

    /// YES and NO swap, MAYBE is a fixed point.
    pub fn conjugate(self) -> Self {
        match self {
            TrinaryValue::Affirmative => TrinaryValue::Negative,
            TrinaryValue::Negative => TrinaryValue::Affirmative,
            TrinaryValue::Indeterminate => TrinaryValue::Indeterminate,
        }
    }

    /// Whether `echoed` is a valid echo of `self`.
    pub fn pairs_with(self, echoed: Self) -> bool {
        matches!(
            (self, echoed),
            (TrinaryValue::Indeterminate, TrinaryValue::Indeterminate)
                | (TrinaryValue::Affirmative, TrinaryValue::Negative)
                | (TrinaryValue::Negative, TrinaryValue::Affirmative)
        )
    }

    pub fn pattern(&self) -> SparsePattern {
        match self {
            TrinaryValue::Affirmative => AFFIRMATIVE_PATTERN,
            TrinaryValue::Negative => NEGATIVE_PATTERN,
            TrinaryValue::Indeterminate => INDETERMINATE_PATTERN,
        }
    }

    /// Two-bit register code: NO `0b00`, YES `0b01`, MAYBE `0b10`.
    pub fn register(&self) -> u8 {
        match self {
            TrinaryValue::Negative => 0b00,
            TrinaryValue::Affirmative => 0b01,
            TrinaryValue::Indeterminate => 0b10,
        }
    }
}

impl std::fmt::Display for TrinaryValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for TrinaryValue {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0b00 => Ok(TrinaryValue::Negative),
            0b01 => Ok(TrinaryValue::Affirmative),
            0b10 => Ok(TrinaryValue::Indeterminate),
            CHANNEL_CLEAR => Err(Error::ChannelClear),
            other => Err(Error::InvalidRegister(other)),
        }
    }
}

impl FromStr for TrinaryValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        match token.to_ascii_lowercase().as_str() {
            "yes" | "affirmative" | "1" => Ok(TrinaryValue::Affirmative),
            "no" | "negative" | "0" => Ok(TrinaryValue::Negative),
            "maybe" | "indeterminate" | "-1" | "theta" | "θ" => Ok(TrinaryValue::Indeterminate),
            _ => Err(Error::invalid_symbol(token)),
        }
    }
}

/// Parse a comma-separated symbol list, e.g. `YES,MAYBE,NO`.
/// Blank input yields an empty sequence.
pub fn parse_symbols(list: &str) -> Result<Vec<TrinaryValue>> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }
    list.split(',').map(|token| token.parse::<TrinaryValue>()).collect()
}

/// An ordered run of trinary symbols with per-symbol cost contributions.
///
/// Costs start empty and are filled by [`Message::encode_sparse`] (or
/// [`Message::set_costs`]). Once filled there is exactly one cost per symbol.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMessage")]
pub struct Message {
    symbols: Vec<TrinaryValue>,
    costs: Vec<f64>,
}

#[derive(Deserialize)]
struct RawMessage {
    symbols: Vec<TrinaryValue>,
    #[serde(default)]
    costs: Vec<f64>,
}

impl TryFrom<RawMessage> for Message {
    type Error = Error;

    fn try_from(raw: RawMessage) -> Result<Self> {
        let mut message = Message::new(raw.symbols);
        if !raw.costs.is_empty() {
            message.set_costs(raw.costs)?;
        }
        Ok(message)
    }
}

impl Message {
    pub fn new(symbols: impl Into<Vec<TrinaryValue>>) -> Self {
        Self {
            symbols: symbols.into(),
            costs: Vec::new(),
        }
    }

    pub fn symbols(&self) -> &[TrinaryValue] {
        &self.symbols
    }

    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.symbols.iter().map(TrinaryValue::name).collect()
    }

    /// Install externally measured costs. Must be one per symbol.
    pub fn set_costs(&mut self, costs: Vec<f64>) -> Result<()> {
        if costs.len() != self.symbols.len() {
            return Err(Error::CostLengthMismatch {
                expected: self.symbols.len(),
                actual: costs.len(),
            });
        }
        self.costs = costs;
        Ok(())
    }

    /// Entropy of one fresh noise byte per symbol, drawn from the OS CSPRNG.
    pub fn measure_channel_entropy(&self) -> Result<f64> {
        self.measure_channel_entropy_with(&mut SystemNoise::new())
    }

    pub fn measure_channel_entropy_with<N: NoiseSource + ?Sized>(&self, source: &mut N) -> Result<f64> {
        Estimator::Normalized.measure(self.symbols.len(), source)
    }

    /// Sparse-encode every symbol and record its cost contribution.
    /// Each MAYBE gets its own fresh entropy measurement.
    pub fn encode_sparse(&mut self) -> Result<Vec<SparsePattern>> {
        self.encode_sparse_with(&mut SystemNoise::new())
    }

    pub fn encode_sparse_with<N: NoiseSource + ?Sized>(&mut self, source: &mut N) -> Result<Vec<SparsePattern>> {
        self.encode_sparse_using(Estimator::Normalized, source)
    }

    /// Like [`Message::encode_sparse_with`] but with an explicit estimator
    /// for the MAYBE measurements. Replaces any previously recorded costs.
    pub fn encode_sparse_using<N: NoiseSource + ?Sized>(
        &mut self,
        estimator: Estimator,
        source: &mut N,
    ) -> Result<Vec<SparsePattern>> {
        let mut patterns = Vec::with_capacity(self.symbols.len());
        let mut costs = Vec::with_capacity(self.symbols.len());

        for (index, symbol) in self.symbols.iter().enumerate() {
            let cost = match symbol {
                TrinaryValue::Indeterminate => {
                    let entropy = estimator.measure(self.symbols.len(), source)?;
                    tracing::debug!(index, entropy, %estimator, "theta entropy measured");
                    entropy
                }
                TrinaryValue::Affirmative | TrinaryValue::Negative => 0.0,
            };
            patterns.push(symbol.pattern());
            costs.push(cost);
        }

        self.costs = costs;
        Ok(patterns)
    }
}
