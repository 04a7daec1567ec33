//! NSIGII demo: trinary echo verification run end to end

pub mod report;

pub use report::{effective_bit_rate, run_demo, DemoOptions, DemoReport};
