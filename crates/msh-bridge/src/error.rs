//! Bridge errors and their status codes

use msh_dom::EngineError;

use crate::ElementKind;

/// Status codes of the external contract
pub mod hresult {
    pub const S_OK: i32 = 0;
    pub const E_NOTIMPL: i32 = 0x8000_4001_u32 as i32;
    pub const E_FAIL: i32 = 0x8000_4005_u32 as i32;
    pub const E_OUTOFMEMORY: i32 = 0x8007_000E_u32 as i32;
    pub const E_INVALIDARG: i32 = 0x8007_0057_u32 as i32;
    pub const DISP_E_UNKNOWNNAME: i32 = 0x8002_0006_u32 as i32;
}

/// Error returned by every bridge operation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
    #[error("Node does not support the {0:?} interface")]
    UnsupportedKind(ElementKind),

    #[error("Engine call failed: {0}")]
    BackendFailure(String),

    #[error("Out of memory")]
    OutOfMemory,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("Unknown name: {0}")]
    NameNotFound(String),
}

impl BridgeError {
    /// Status code reported across the external contract
    pub fn hresult(&self) -> i32 {
        match self {
            Self::UnsupportedKind(_) | Self::BackendFailure(_) => hresult::E_FAIL,
            Self::OutOfMemory => hresult::E_OUTOFMEMORY,
            Self::InvalidArgument(_) => hresult::E_INVALIDARG,
            Self::NotImplemented(_) => hresult::E_NOTIMPL,
            Self::NameNotFound(_) => hresult::DISP_E_UNKNOWNNAME,
        }
    }

    /// Build a `NotImplemented` error, logging the entry point
    pub(crate) fn not_implemented(op: &'static str) -> Self {
        tracing::warn!(op, "not implemented");
        Self::NotImplemented(op)
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::warn!(%message, "invalid argument");
        Self::InvalidArgument(message)
    }

    pub(crate) fn backend(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(%message, "engine call failed");
        Self::BackendFailure(message)
    }
}

impl From<EngineError> for BridgeError {
    fn from(err: EngineError) -> Self {
        Self::backend(err.to_string())
    }
}

/// Result of a bridge operation
pub type BridgeResult<T> = Result<T, BridgeError>;

/// Map a result onto the status-code space
pub fn status<T>(result: &BridgeResult<T>) -> i32 {
    match result {
        Ok(_) => hresult::S_OK,
        Err(e) => e.hresult(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(status(&Ok::<(), BridgeError>(())), hresult::S_OK);
        assert_eq!(BridgeError::OutOfMemory.hresult(), hresult::E_OUTOFMEMORY);
        assert_eq!(
            BridgeError::NameNotFound("x".into()).hresult(),
            hresult::DISP_E_UNKNOWNNAME
        );
        assert_eq!(BridgeError::NotImplemented("dir").hresult(), hresult::E_NOTIMPL);
        assert_eq!(hresult::E_FAIL as u32, 0x8000_4005);
    }

    #[test]
    fn test_engine_error_is_backend_failure() {
        let err: BridgeError = EngineError::Failure("boom".into()).into();
        assert!(matches!(err, BridgeError::BackendFailure(_)));
        assert_eq!(err.hresult(), hresult::E_FAIL);
    }
}
