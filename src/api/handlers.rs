/*!
 * Request Handlers
 * Map a decoded request onto the service and wrap the outcome in an envelope
 */

use super::service::SimulatorService;
use super::types::{
    ApiResponse, Request, ScheduleResponse, CODE_BAD_REQUEST, CODE_INTERNAL_ERROR,
};
use crate::core::errors::{KernelError, SerializableError};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

pub type Reply = ApiResponse<Value>;

/// Execute one request against the service
pub fn dispatch(service: &SimulatorService, request: Request) -> Reply {
    info!(op = request.name(), "Handling request");

    match request {
        Request::AddProcess { process } => match service.create_process(process) {
            Ok(pcb) => respond("Process added", &pcb),
            Err(e) => rejected("Memory allocation failed", e),
        },
        Request::Status => respond("Status retrieved", &service.status()),
        Request::Schedule => {
            let (report, queue) = service.schedule();
            respond("Schedule executed", &ScheduleResponse { report, queue })
        }
        Request::Suspend { pid } => match service.suspend(pid) {
            Ok(()) => ApiResponse::ok_empty(format!("Process {} suspended", pid)),
            Err(e) => rejected("Failed to suspend process", e),
        },
        Request::Resume { pid } => match service.resume(pid) {
            Ok(()) => ApiResponse::ok_empty(format!("Process {} resumed", pid)),
            Err(e) => rejected("Failed to resume process", e),
        },
        Request::ProcessorStatus => {
            respond("Processor status retrieved", &service.processor_status())
        }
        Request::Stats => respond("Statistics retrieved", &service.stats()),
        Request::Reset => match service.reset() {
            Ok(()) => ApiResponse::ok_empty("System reset"),
            Err(e) => rejected("Reset failed", e),
        },
    }
}

/// Decode a request line and execute it; undecodable lines get a 400 envelope
pub fn dispatch_line(service: &SimulatorService, line: &str) -> Reply {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => dispatch(service, request),
        Err(e) => rejected("Invalid request parameters", KernelError::from(e)),
    }
}

fn respond<T: Serialize>(message: &str, data: &T) -> Reply {
    match serde_json::to_value(data) {
        Ok(value) => ApiResponse::ok(message, value),
        Err(e) => {
            error!(error = %e, "Failed to serialize response");
            ApiResponse {
                code: CODE_INTERNAL_ERROR,
                message: format!("Failed to serialize response: {}", e),
                data: None,
            }
        }
    }
}

pub(super) fn rejected(message: &str, error: impl Into<SerializableError>) -> Reply {
    let error = error.into();
    info!(error_type = %error.error_type, "Request rejected: {}", error.message);
    ApiResponse {
        code: CODE_BAD_REQUEST,
        message: message.to_string(),
        data: serde_json::to_value(&error).ok(),
    }
}
