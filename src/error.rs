use thiserror::Error;

/// Errors returned by the value accessors. Callers usually only care whether an access
/// succeeded. The variant is kept for diagnostics and logging.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[non_exhaustive]
pub enum Error {
    /// `Nvm::init` has not completed successfully yet.
    #[error("store not started")]
    NotStarted,

    /// No source or destination buffer was given.
    #[error("null buffer")]
    NullBuffer,

    /// A maximum length of zero leaves no room for the terminator.
    #[error("zero length")]
    ZeroLength,

    /// The string including its terminator doesn't fit the given maximum length, the
    /// destination buffer or the declared slot capacity.
    #[error("value too long")]
    ValueTooLong,

    /// No terminator was found inside the string slot, e.g. because it was never written.
    #[error("unterminated string")]
    Unterminated,

    /// The internal error value is returned from the provided medium.
    #[error("internal medium error")]
    MediumError,

    /// A flash backed medium has to start at a sector boundary.
    #[error("invalid partition offset")]
    InvalidPartitionOffset,

    /// A flash backed medium has to span a non-zero multiple of the sector size and fit the flash.
    #[error("invalid partition size")]
    InvalidPartitionSize,
}

/// Outcome of `Nvm::init`.
#[derive(strum::FromRepr, strum::Display, Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StartCode {
    /// The medium was brought up and the store is ready.
    Ok = 0,

    /// The store was started before. Nothing changed.
    AlreadyStarted = 1,

    /// The medium refused to start. The store is left in `State::Failed`.
    Failed = 2,

    /// The capacity is zero, too small for the layout or larger than the medium.
    InvalidSize = 3,

    /// The medium started but doesn't report the requested capacity afterwards.
    Unknown = 4,
}

/// Outcome of `Nvm::set_defaults`. Any code other than `Ok` means the contents must not be
/// assumed to be fully reset.
#[derive(strum::FromRepr, strum::Display, Debug, PartialEq, Eq, Copy, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DefaultCode {
    Ok = 0,

    /// The layout needs more bytes than the medium provides.
    SizeTooBig = 1,

    /// The usable size can't be determined because the store isn't started.
    FailMaxSize = 2,

    /// The store is started but the medium failed to report its usable size.
    FailMaxSizeUnknown = 3,

    /// Erasing the medium failed.
    FailClear = 4,

    /// Writing a default value failed.
    FailWrite = 5,

    /// Reserved for a failure while stopping the medium after provisioning. Never returned.
    FailStop = 6,

    /// Reserved for a failure while restarting the medium after provisioning. Never returned.
    FailInit = 7,
}
