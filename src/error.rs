use serde::{Serialize, Serializer};

use crate::activity::platform::PlatformError;

pub type Result<T> = std::result::Result<T, Error>;

/// Caller-visible failures. Benign lifecycle no-ops (double create, update
/// with nothing live, update during teardown) are absorbed by the
/// coordinator and never surface here; only a platform rejection while
/// creating the activity does, since at that point no record exists to
/// represent a half-created state.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("platform rejected the live activity request: {0}")]
    PlatformRejected(#[from] PlatformError),
}

impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}
