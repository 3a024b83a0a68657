/*!
 * Monitoring
 * Tracing setup shared by the binary and the server
 */

mod tracer;

pub use tracer::{generate_request_id, init_tracing, request_span, ENV_TRACE_JSON};
