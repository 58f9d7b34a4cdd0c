//! Tagged status/error taxonomy returned by every fallible operation.

/// Every kind of outcome a fallible core operation can produce.
///
/// `IN_PROGRESS` and `BUSY` are reserved for a future asynchronous variant
/// (see design note in spec): this synchronous core never constructs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusKind {
    /// The operation completed successfully.
    Ok,
    /// Reserved for a future asynchronous variant; never produced here.
    InProgress,
    /// An operation touching the bus was attempted before `begin` succeeded.
    NotInitialized,
    /// `begin` was called a second time without an intervening `end`.
    AlreadyInitialized,
    /// The supplied `Config` violates one of its validation rules.
    InvalidConfig,
    /// A caller-supplied parameter is structurally invalid (e.g. nibble > 0x0F).
    InvalidParam,
    /// A caller-supplied value is out of its documented range.
    OutOfRange,
    /// The device's cached feature bits do not support the requested operation.
    NotSupported,
    /// The device-layer catch-all, including write-verify mismatch.
    E2Error,
    /// A bit/byte stretch deadline, or clock-rise wait, was exceeded.
    Timeout,
    /// The device refused (NACKed) a specific byte of the transaction.
    Nack,
    /// The computed PEC did not match the PEC the device sent.
    PecMismatch,
    /// An identity read produced an unexpected value.
    DeviceNotFound,
    /// A bus line remained low after rescue, or both lines were low at entry.
    BusStuck,
    /// Reserved for a future asynchronous variant; never produced here.
    Busy,
}

/// Outcome of a fallible core operation: kind, an informative detail, and a
/// short static message suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    pub kind: StatusKind,
    /// Carries the offending value, elapsed microseconds, received PEC, etc.
    /// Meaning is kind-specific; `0` when there is nothing more to say.
    pub detail: i32,
    pub message: &'static str,
}

impl Status {
    pub const fn new(kind: StatusKind, detail: i32, message: &'static str) -> Self {
        Self { kind, detail, message }
    }

    pub const fn ok() -> Self {
        Self::new(StatusKind::Ok, 0, "ok")
    }

    /// True iff `kind == StatusKind::Ok`.
    pub const fn is_ok(&self) -> bool {
        matches!(self.kind, StatusKind::Ok)
    }

    /// True iff `kind == StatusKind::InProgress`.
    pub const fn is_in_progress(&self) -> bool {
        matches!(self.kind, StatusKind::InProgress)
    }
}

impl From<StatusKind> for Status {
    fn from(kind: StatusKind) -> Self {
        let message = match kind {
            StatusKind::Ok => "ok",
            StatusKind::InProgress => "in progress",
            StatusKind::NotInitialized => "driver not initialized",
            StatusKind::AlreadyInitialized => "driver already initialized",
            StatusKind::InvalidConfig => "invalid config",
            StatusKind::InvalidParam => "invalid parameter",
            StatusKind::OutOfRange => "value out of range",
            StatusKind::NotSupported => "operation not supported by device",
            StatusKind::E2Error => "e2 protocol error",
            StatusKind::Timeout => "e2 bus timeout",
            StatusKind::Nack => "e2 bus nack",
            StatusKind::PecMismatch => "pec mismatch",
            StatusKind::DeviceNotFound => "device not found",
            StatusKind::BusStuck => "bus stuck",
            StatusKind::Busy => "busy",
        };
        Self::new(kind, 0, message)
    }
}

/// Which byte of a write transaction was refused, for `StatusKind::Nack` detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NackedByte {
    Control,
    Address,
    Data,
    Pec,
}

impl NackedByte {
    pub const fn detail(self) -> i32 {
        match self {
            NackedByte::Control => 0,
            NackedByte::Address => 1,
            NackedByte::Data => 2,
            NackedByte::Pec => 3,
        }
    }
}
