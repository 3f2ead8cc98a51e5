//! Plain data row written by [`CsvTraceWriter`](crate::CsvTraceWriter).

/// One device's state at one tick, flattened for columnar output.
///
/// `pending_client`, `assigned_train` use `u32::MAX` as the "none" sentinel
/// (matching `trainsim_core::ids::DeviceId::INVALID`) so the row stays a
/// plain fixed-width record rather than growing an `Option` column.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceTraceRow {
    pub tick: u64,
    pub elapsed_secs: f32,
    pub device_id: u32,
    pub kind: &'static str,
    pub mode: String,
    /// Train-only: the client id of its in-flight election, if any.
    pub pending_client: u32,
    /// Train-only: `;`-joined vertex indices still to traverse.
    pub path: String,
    /// Train-only: `;`-joined client ids in `client_queue`, in order.
    pub client_queue: String,
    /// Client-only: the train id assigned to it, if any.
    pub assigned_train: u32,
}

impl DeviceTraceRow {
    pub const NONE: u32 = u32::MAX;
}
