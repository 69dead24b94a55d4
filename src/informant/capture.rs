use serde::Serialize;
use serde_json::Value;

use crate::error::ValueError;

/// Turns an informed method's return value into the done record's `result`.
///
/// Picked at declaration time: `OmitResult` puts no bound on the return type,
/// `SerializeResult` needs it to be `Serialize`.
pub trait ResultCapture<R: ?Sized> {
    fn capture(&self, result: &R) -> Option<Result<Value, ValueError>>;
}

/// Never records the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct OmitResult;

impl<R: ?Sized> ResultCapture<R> for OmitResult {
    fn capture(&self, _result: &R) -> Option<Result<Value, ValueError>> {
        None
    }
}

/// Records the result through serde.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerializeResult;

impl<R: Serialize + ?Sized> ResultCapture<R> for SerializeResult {
    fn capture(&self, result: &R) -> Option<Result<Value, ValueError>> {
        Some(serde_json::to_value(result).map_err(ValueError::from))
    }
}
