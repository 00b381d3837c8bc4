//! Error handling and exit codes.

use factcalc_core::exit_codes;
use factcalc_orchestration::ComputeError;

/// Map a computation error to the process exit code.
pub fn exit_code(err: &ComputeError) -> i32 {
    match err {
        ComputeError::Cluster(_) => exit_codes::ERROR_TRANSPORT,
        ComputeError::Tree(_) => exit_codes::ERROR_GENERIC,
    }
}
