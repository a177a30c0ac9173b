//! Value-semantic scalar types handled by the codec

pub mod date;
pub mod date_time;
pub mod decimal64;
pub mod time;
pub mod variant;

pub use date::{Date, DateTz};
pub use date_time::{Datetime, DatetimeTz};
pub use decimal64::Decimal64;
pub use time::{Time, TimeTz};
pub use variant::{DateOrDateTz, DatetimeOrDatetimeTz, TimeOrTimeTz};

/// Largest magnitude of a timezone offset, in minutes (one minute short of
/// 24 hours in either direction).
pub const MAX_TIMEZONE_OFFSET_MINUTES: i16 = 1439;

pub(crate) fn validate_timezone_offset(offset_minutes: i16) -> crate::BerResult<()> {
    if offset_minutes < -MAX_TIMEZONE_OFFSET_MINUTES || offset_minutes > MAX_TIMEZONE_OFFSET_MINUTES
    {
        return Err(crate::BerError::InvalidData(format!(
            "Timezone offset is out of range [-1439, 1439], got {}",
            offset_minutes
        )));
    }
    Ok(())
}
