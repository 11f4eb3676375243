//! HTTP middleware components.

pub mod logging;
pub mod metrics;
pub mod timeout;
pub mod trace_id;

pub use metrics::{init_metrics, metrics_handler, metrics_middleware};
pub use timeout::timeout_envelope;
pub use trace_id::{trace_id, RequestId, REQUEST_ID_HEADER};
