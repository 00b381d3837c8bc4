//! Orchestration interfaces.

use std::time::Duration;

use num_bigint::BigInt;

/// Trait for presenting results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present a computed factorial.
    fn present_result(&self, n: i64, result: &BigInt, duration: Duration);

    /// Present an error.
    fn present_error(&self, error: &str);
}

/// Null presenter (does nothing).
pub struct NullResultPresenter;

impl ResultPresenter for NullResultPresenter {
    fn present_result(&self, _n: i64, _result: &BigInt, _duration: Duration) {}
    fn present_error(&self, _error: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_presenter() {
        let presenter = NullResultPresenter;
        presenter.present_result(10, &BigInt::from(3_628_800), Duration::from_millis(1));
        presenter.present_error("nothing");
    }
}
