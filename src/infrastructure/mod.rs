//! Infrastructure layer: clocks, configuration, logging and wiring.

pub mod clock;
pub mod config;
pub mod logging;
pub mod setup;

pub use clock::{ManualClock, SystemClock};
pub use config::{ConfigError, ConfigLoader};
pub use logging::{AuditLogger, LogConfig, LoggerImpl, MemoryAuditSink};
pub use setup::{build_runtime, init_project, GovernanceRuntime};
