//! Pluggable processing hooks: a small trait a caller can override to
//! transform decoded values as they're produced, rather than post-processing
//! the finished message tree. Rust has no runtime method-name dispatch, so a
//! per-message-name hook takes the name as a plain string argument
//! (`process_message_named`) instead of being resolved by reflection.

use chrono::{DateTime, TimeZone, Utc};

use crate::error::Result;
use crate::message::{FieldValue, Message};

/// FIT epoch: 1989-12-31T00:00:00Z, in Unix seconds.
const FIT_EPOCH_UNIX_SECONDS: i64 = 631_065_600;

/// Extension point for transforming decoded values. Every hook has a
/// pass-through default, so implementors override only what they need.
pub trait Processor {
    /// Called once per field, after subfield/component expansion and
    /// scale/offset have already been applied.
    fn process_field(&self, message_name: &str, field_name: &str, value: FieldValue) -> Result<FieldValue> {
        let _ = (message_name, field_name);
        Ok(value)
    }

    /// Called for a field whose profile type is a named overlay (an enum or
    /// `date_time`/`local_date_time`), before `process_field`.
    fn process_type(&self, type_name: &str, value: FieldValue) -> Result<FieldValue> {
        let _ = type_name;
        Ok(value)
    }

    /// Called once per fully-assembled message.
    fn process_message(&self, message: &mut Message) -> Result<()> {
        let _ = message;
        Ok(())
    }

    /// Called once per fully-assembled message, named after the message.
    fn process_message_named(&self, name: &str, message: &mut Message) -> Result<()> {
        let _ = (name, message);
        Ok(())
    }
}

/// Converts FIT epoch seconds to a wall-clock instant.
pub fn fit_epoch_to_datetime(seconds: u32) -> DateTime<Utc> {
    Utc.timestamp_opt(FIT_EPOCH_UNIX_SECONDS + seconds as i64, 0)
        .single()
        .unwrap_or_else(|| Utc.timestamp_opt(FIT_EPOCH_UNIX_SECONDS, 0).unwrap())
}

/// The processor used when a caller doesn't supply one: resolves
/// `date_time`/`local_date_time` to a wall-clock `DateTime<Utc>` and leaves
/// everything else untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultProcessor;

impl Processor for DefaultProcessor {
    fn process_type(&self, type_name: &str, value: FieldValue) -> Result<FieldValue> {
        if type_name != "date_time" && type_name != "local_date_time" {
            return Ok(value);
        }
        let seconds = match &value {
            FieldValue::Base(base) => base.as_i64(),
            FieldValue::Scaled(v) => Some(*v as i64),
            _ => None,
        };
        Ok(match seconds {
            Some(s) if s >= 0 => FieldValue::Timestamp(fit_epoch_to_datetime(s as u32)),
            _ => value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_zero_is_fit_epoch() {
        let dt = fit_epoch_to_datetime(0);
        assert_eq!(dt.to_rfc3339(), "1989-12-31T00:00:00+00:00");
    }

    #[test]
    fn default_processor_converts_date_time_field() {
        let processor = DefaultProcessor;
        let result = processor
            .process_type("date_time", FieldValue::Base(crate::basetype::BaseValue::Uint32(vec![0])))
            .unwrap();
        assert!(matches!(result, FieldValue::Timestamp(_)));
    }
}
