// LogFeed - core/envelope.rs
//
// Envelope decoding: turns a raw WebSocket text frame into either a batch
// of log records or an explicit "ignore" outcome.
//
// Malformed-frame policy: a frame that is not valid JSON, lacks the
// envelope shape, or carries a "logs" payload that does not deserialise
// as records is reported as a DecodeError. The caller drops the single
// frame and keeps the connection; one bad message must never terminate
// the stream.

use crate::core::model::{Envelope, LogRecord, ENVELOPE_TYPE_LOGS};
use crate::util::error::DecodeError;

/// Outcome of decoding one text frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    /// A recognised "logs" envelope carrying records in delivery order.
    Logs(Vec<LogRecord>),

    /// A well-formed envelope of an unrecognised type. Silently ignored
    /// by contract; carried here so callers can trace it if they care.
    Ignored { kind: String },
}

/// Decode one raw text frame into a `Decoded` outcome.
///
/// Only `type == "logs"` is recognised; its `data` must be an array of
/// records. Every other well-formed envelope type is `Ignored`.
pub fn decode_frame(raw: &str) -> Result<Decoded, DecodeError> {
    let envelope: Envelope =
        serde_json::from_str(raw).map_err(|source| DecodeError::InvalidJson { source })?;

    if envelope.kind != ENVELOPE_TYPE_LOGS {
        return Ok(Decoded::Ignored {
            kind: envelope.kind,
        });
    }

    let records: Vec<LogRecord> = serde_json::from_value(envelope.data)
        .map_err(|source| DecodeError::InvalidLogsPayload { source })?;

    Ok(Decoded::Logs(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGS_ENVELOPE: &str = r#"{"type":"logs","data":[
        {"timestamp":"T1","level":"Error","message":"boom","crew_name":"Alpha"}
    ]}"#;

    #[test]
    fn decodes_logs_envelope() {
        let decoded = decode_frame(LOGS_ENVELOPE).unwrap();
        let Decoded::Logs(records) = decoded else {
            panic!("expected Logs, got {decoded:?}");
        };
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].timestamp, "T1");
        assert_eq!(records[0].level, "Error");
        assert_eq!(records[0].message, "boom");
        assert_eq!(records[0].crew_name.as_deref(), Some("Alpha"));
    }

    #[test]
    fn decodes_multi_record_batch_in_order() {
        let raw = r#"{"type":"logs","data":[
            {"timestamp":"T1","level":"Info","message":"first"},
            {"timestamp":"T2","level":"Info","message":"second"}
        ]}"#;
        let Decoded::Logs(records) = decode_frame(raw).unwrap() else {
            panic!("expected Logs");
        };
        assert_eq!(records[0].message, "first");
        assert_eq!(records[1].message, "second");
    }

    #[test]
    fn unrecognised_envelope_type_is_ignored() {
        let decoded = decode_frame(r#"{"type":"ping","data":{}}"#).unwrap();
        assert_eq!(
            decoded,
            Decoded::Ignored {
                kind: "ping".to_string()
            }
        );
    }

    #[test]
    fn unrecognised_type_with_garbage_data_is_still_ignored() {
        // The payload of an unrecognised type is never deserialised, so an
        // arbitrarily-shaped data field cannot produce an error.
        let decoded = decode_frame(r#"{"type":"metrics","data":[1,"mixed",null]}"#).unwrap();
        assert!(matches!(decoded, Decoded::Ignored { .. }));
    }

    #[test]
    fn missing_data_field_on_ignored_type_is_ok() {
        let decoded = decode_frame(r#"{"type":"heartbeat"}"#).unwrap();
        assert!(matches!(decoded, Decoded::Ignored { .. }));
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let err = decode_frame("{not json").unwrap_err();
        assert!(matches!(err, DecodeError::InvalidJson { .. }));
    }

    #[test]
    fn logs_envelope_with_non_array_data_is_a_decode_error() {
        let err = decode_frame(r#"{"type":"logs","data":{"nope":true}}"#).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidLogsPayload { .. }));
    }

    #[test]
    fn logs_record_missing_required_field_is_a_decode_error() {
        let err =
            decode_frame(r#"{"type":"logs","data":[{"timestamp":"T1","level":"Info"}]}"#)
                .unwrap_err();
        assert!(matches!(err, DecodeError::InvalidLogsPayload { .. }));
    }

    #[test]
    fn empty_logs_batch_decodes_to_zero_records() {
        let Decoded::Logs(records) = decode_frame(r#"{"type":"logs","data":[]}"#).unwrap() else {
            panic!("expected Logs");
        };
        assert!(records.is_empty());
    }
}
