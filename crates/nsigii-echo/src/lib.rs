//! NSIGII Echo - work cost model, conjugate transform, echo verification

pub mod config;
pub mod server;

pub use config::EchoConfig;
pub use server::{EchoServer, EchoVerdict};
