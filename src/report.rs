use nsigii_core::{Error, Message, NoiseSource, Result, SparsePattern, TrinaryValue};
use nsigii_echo::{EchoServer, EchoVerdict};
use serde::Serialize;

pub const BANNER: &str = "=== NSIGII Echo Verification ===";

/// Symbols used when none are given on the command line.
pub const DEMO_SYMBOLS: [TrinaryValue; 4] = [
    TrinaryValue::Affirmative,
    TrinaryValue::Indeterminate,
    TrinaryValue::Negative,
    TrinaryValue::Indeterminate,
];

pub struct DemoOptions {
    pub symbols: Vec<TrinaryValue>,
    /// Sparse-encode the original before computing work, so MAYBE
    /// measurements feed into its cost.
    pub encode: bool,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            symbols: DEMO_SYMBOLS.to_vec(),
            encode: false,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct EncodedSymbol {
    pub index: usize,
    pub symbol: TrinaryValue,
    pub pattern: SparsePattern,
    pub cost: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct DemoReport {
    pub original: Vec<TrinaryValue>,
    pub channel_entropy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded: Option<Vec<EncodedSymbol>>,
    pub work_joules: f64,
    pub echoed: Vec<TrinaryValue>,
    pub verified: bool,
    pub verdict: EchoVerdict,
    pub bit_rate: f64,
}

/// Messages per joule: `symbols / (work / 10)`.
/// Zero or non-finite work is an error, not infinity.
pub fn effective_bit_rate(symbol_count: usize, work: f64) -> Result<f64> {
    if work == 0.0 || !work.is_finite() {
        return Err(Error::ZeroWork);
    }
    Ok(symbol_count as f64 / (work / 10.0))
}

/// Run the demo once: measure, (optionally) encode, price, echo, verify.
pub fn run_demo<N: NoiseSource + ?Sized>(
    server: &EchoServer,
    options: &DemoOptions,
    source: &mut N,
) -> Result<DemoReport> {
    let mut message = Message::new(options.symbols.clone());

    let channel_entropy = message.measure_channel_entropy_with(source)?;

    let encoded = if options.encode {
        let patterns = server.encode(&mut message, source)?;
        let encoded: Vec<EncodedSymbol> = message
            .symbols()
            .iter()
            .zip(patterns)
            .zip(message.costs())
            .enumerate()
            .map(|(index, ((&symbol, pattern), &cost))| EncodedSymbol {
                index,
                symbol,
                pattern,
                cost,
            })
            .collect();
        Some(encoded)
    } else {
        None
    };

    let work_joules = server.calculate_work(&message);
    let echo = server.apply_isomorphism(&message);
    let verdict = server.inspect_echo(&message, &echo);
    let bit_rate = effective_bit_rate(message.len(), work_joules)?;

    tracing::info!(
        symbols = message.len(),
        channel_entropy,
        work_joules,
        verified = verdict.is_verified(),
        "demo complete"
    );

    Ok(DemoReport {
        original: message.symbols().to_vec(),
        channel_entropy,
        encoded,
        work_joules,
        echoed: echo.symbols().to_vec(),
        verified: verdict.is_verified(),
        verdict,
        bit_rate,
    })
}

/// `['YES', 'MAYBE']`
pub fn format_names(symbols: &[TrinaryValue]) -> String {
    let quoted: Vec<String> = symbols.iter().map(|s| format!("'{}'", s.name())).collect();
    format!("[{}]", quoted.join(", "))
}

impl DemoReport {
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(BANNER);
        out.push('\n');
        out.push_str(&format!("Original: {}\n", format_names(&self.original)));
        out.push_str(&format!("Channel Entropy: {:.4} bits/symbol\n", self.channel_entropy));

        if let Some(encoded) = &self.encoded {
            for e in encoded {
                let cells: Vec<String> = e.pattern.iter().map(u8::to_string).collect();
                out.push_str(&format!("Sparse[{}]: {} [{}]", e.index, e.symbol, cells.join(",")));
                if e.symbol == TrinaryValue::Indeterminate {
                    out.push_str(&format!("  θ entropy: {:.4} bits", e.cost));
                }
                out.push('\n');
            }
        }

        out.push_str(&format!("Work Required: {:.4} Joules\n", self.work_joules));
        out.push_str(&format!("Echoed: {}\n", format_names(&self.echoed)));
        let status = if self.verified { "✓ VERIFIED" } else { "✗ FAILED" };
        out.push_str(&format!("Verification: {}\n", status));
        out.push_str(&format!("Effective Bit Rate: {:.2} messages/Joule\n", self.bit_rate));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names() {
        assert_eq!(format_names(&DEMO_SYMBOLS), "['YES', 'MAYBE', 'NO', 'MAYBE']");
        assert_eq!(format_names(&[]), "[]");
    }

    #[test]
    fn test_bit_rate_zero_work() {
        assert!(matches!(effective_bit_rate(4, 0.0), Err(Error::ZeroWork)));
        assert!(matches!(effective_bit_rate(4, f64::NAN), Err(Error::ZeroWork)));
    }
}
