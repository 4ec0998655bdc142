//! Readiness probing: a bounded-retry Prober plus the dependency probes
//! used to gate startup on MySQL and on the items API.

pub mod error;
pub mod gate;
pub mod http;
pub mod mysql;
pub mod prober;

pub use error::ProbeError;
pub use gate::wait_for;
pub use http::HttpHealthProbe;
pub use mysql::MySqlProbe;
pub use prober::{
    AttemptReport, DependencyProbe, Pause, ProbeConfig, ProbeOutcome, Prober, TokioPause,
};
