//! Protected-call boundary.
//!
//! Wrapper functions return [`BridgeResult`]. A recoverable construction
//! failure is an ordinary value the script branches on; an access fault
//! (use-after-free, wrong kind) aborts the current script call. The
//! boundary below turns either into a [`ScriptFault`] without taking the
//! host down with it.

use thiserror::Error;
use tracing::debug;

use legato_core::{AccessError, Bridge, BridgeError, BridgeResult, WrapError};

/// A failure surfaced to script code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptFault {
    /// A native constructor failed; scripts see `nil, message`.
    #[error("{0}")]
    Recoverable(WrapError),

    /// A programmer error caught at the boundary.
    #[error("{0}")]
    Raised(BridgeError),
}

impl ScriptFault {
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ScriptFault::Recoverable(_))
    }

    /// The access fault behind a raised error, if that is what it was.
    pub fn access_error(&self) -> Option<&AccessError> {
        match self {
            ScriptFault::Raised(BridgeError::Access(err)) => Some(err),
            _ => None,
        }
    }
}

impl From<BridgeError> for ScriptFault {
    fn from(err: BridgeError) -> Self {
        match err {
            BridgeError::Wrap(err) => ScriptFault::Recoverable(err),
            other => ScriptFault::Raised(other),
        }
    }
}

/// Run a script-facing call, catching bridge errors at the boundary.
pub fn protected_call<T>(
    bridge: &mut Bridge,
    call: impl FnOnce(&mut Bridge) -> BridgeResult<T>,
) -> Result<T, ScriptFault> {
    call(bridge).map_err(|err| {
        let fault = ScriptFault::from(err);
        debug!(error = %fault, recoverable = fault.is_recoverable(), "protected call failed");
        fault
    })
}
