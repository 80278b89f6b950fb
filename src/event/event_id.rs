//! Stable event identifiers.
//!
//! Ids are grouped into ranges by subsystem purely for readability. They are
//! backed by `u16` because that is the narrowest width any sink accepts, so an
//! out-of-range id cannot be constructed.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Identifier of a message template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum EventId {
    // General (1000 - 1004)
    /// Unrecoverable application failure.
    CatastrophicError = 1000,
    /// General application message.
    GeneralMessage = 1001,

    // Logging (1005 - 1009)
    /// The system log rejected a write.
    UnableToWriteToEventLog = 1005,
    /// The structured trace rejected a write.
    UnableToWriteToTraceLog = 1006,
    /// A message named a category that is not registered.
    UndefinedLogCategory = 1007,
    /// Logging configuration could not be found.
    ConfigNotFound = 1008,
    /// No policy scope could be determined.
    UnableToCheckLogConfiguration = 1009,

    // Caching (1010 - 1014)
    /// A caching pass started.
    CachingProcessStart = 1010,
    /// A caching pass finished.
    CachingProcessEnd = 1011,
    /// The cache returned an empty object.
    NullCacheObject = 1012,
    /// A key was not in the cache.
    CacheMiss = 1013,
    /// A value was written to the cache.
    CacheAdded = 1014,
}

/// Subsystem an event id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventRange {
    /// 1000 - 1004
    General,
    /// 1005 - 1009
    Logging,
    /// 1010 - 1014
    Caching,
}

impl EventId {
    /// Every registered id, in numeric order.
    pub const ALL: [EventId; 12] = [
        EventId::CatastrophicError,
        EventId::GeneralMessage,
        EventId::UnableToWriteToEventLog,
        EventId::UnableToWriteToTraceLog,
        EventId::UndefinedLogCategory,
        EventId::ConfigNotFound,
        EventId::UnableToCheckLogConfiguration,
        EventId::CachingProcessStart,
        EventId::CachingProcessEnd,
        EventId::NullCacheObject,
        EventId::CacheMiss,
        EventId::CacheAdded,
    ];

    /// Numeric code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Look up an id by its numeric code.
    pub fn from_code(code: u16) -> Option<EventId> {
        Self::ALL.into_iter().find(|id| id.code() == code)
    }

    /// Subsystem range this id belongs to.
    pub fn range(self) -> EventRange {
        match self.code() {
            1000..=1004 => EventRange::General,
            1005..=1009 => EventRange::Logging,
            _ => EventRange::Caching,
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error returned when an event id cannot be parsed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseEventIdError {
    /// Not a number that fits in 16 bits.
    #[error("Event id '{0}' is not a valid 16-bit number")]
    NotANumber(String),

    /// A number, but no event is registered under it.
    #[error("Event id {0} is not registered")]
    Unregistered(u16),
}

impl TryFrom<u16> for EventId {
    type Error = ParseEventIdError;

    fn try_from(code: u16) -> Result<Self, Self::Error> {
        EventId::from_code(code).ok_or(ParseEventIdError::Unregistered(code))
    }
}

impl FromStr for EventId {
    type Err = ParseEventIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code: u16 = s
            .trim()
            .parse()
            .map_err(|_| ParseEventIdError::NotANumber(s.to_string()))?;
        EventId::try_from(code)
    }
}
