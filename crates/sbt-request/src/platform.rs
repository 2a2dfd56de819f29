//! Browser capabilities the components need besides rendering.

use crate::SbtError;
use std::future::Future;
use std::time::Duration;

/// System clipboard.
pub trait Clipboard {
    fn write_text(&self, text: &str) -> impl Future<Output = Result<(), SbtError>>;
}

/// Timer. Resolves after at least `duration`.
pub trait Sleep {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}
