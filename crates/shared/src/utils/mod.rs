mod logs;
mod metrics;
mod otel;

pub use self::logs::init_logger;
pub use self::metrics::{Labels, Metrics, Operation, Status};
pub use self::otel::{Telemetry, TracingContext};
