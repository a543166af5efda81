use super::{ProbeError, ProbeReading, ReadingField};

/// Marker emitted by the storage service while a copy is queued but not yet started.
pub const PENDING_COPY_MARKER: &str = "ErrorCode:PendingCopyOperation";

/// Copy statuses that mean the reading can be trusted.
pub const ACCEPTED_STATUSES: [&str; 2] = ["pending", "success"];

/// Interpret the combined output of a status command together with its exit status.
///
/// A queued marker wins over the exit status, since the service reports a queued copy as an error.
pub fn interpret_output(succeeded: bool, exit_description: &str, output: &str) -> Result<ProbeReading, ProbeError> {
    if output.contains(PENDING_COPY_MARKER) {
        return Ok(ProbeReading::queued());
    }

    if !succeeded {
        return Err(ProbeError::invocation(exit_description, output));
    }

    parse_output(output)
}

/// Parse `<actual>/<total>` optionally followed by a status line.
pub fn parse_output(output: &str) -> Result<ProbeReading, ProbeError> {
    if output.contains(PENDING_COPY_MARKER) {
        return Ok(ProbeReading::queued());
    }

    let mut parts = output.split('/');
    let (Some(actual), Some(rest), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ProbeError::Format { output: output.to_string() });
    };

    let actual = parse_number(actual, ReadingField::Actual)?;

    let mut lines = rest.lines();
    let total = parse_number(lines.next().unwrap_or_default(), ReadingField::Total)?;

    if let Some(status) = lines.next().map(str::trim)
        && !status.is_empty()
        && !ACCEPTED_STATUSES.contains(&status)
    {
        return Err(ProbeError::Status { status: status.to_string() });
    }

    Ok(ProbeReading::new(actual, total))
}

fn parse_number(text: &str, field: ReadingField) -> Result<u64, ProbeError> {
    text.trim().parse::<u64>().map_err(|_| ProbeError::Number {
        field,
        value: text.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::ProbeErrorKind;

    #[test]
    fn test_parse_two_fields() {
        let reading = parse_output("512/1024\n").unwrap();
        assert_eq!(reading, ProbeReading::new(512, 1024));
    }

    #[test]
    fn test_parse_with_status() {
        let reading = parse_output("1024/1024\nsuccess\n").unwrap();
        assert_eq!(reading, ProbeReading::new(1024, 1024));

        let reading = parse_output(" 10 / 20 \n pending \n").unwrap();
        assert_eq!(reading, ProbeReading::new(10, 20));
    }

    #[test]
    fn test_parse_rejects_unknown_status() {
        let err = parse_output("10/20\nfailed\n").unwrap_err();
        assert_eq!(err, ProbeError::Status { status: "failed".into() });
    }

    #[test]
    fn test_parse_ignores_blank_status_line() {
        let reading = parse_output("10/20\n\n").unwrap();
        assert_eq!(reading, ProbeReading::new(10, 20));
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        let err = parse_output("1024\n").unwrap_err();
        assert_eq!(err.kind(), ProbeErrorKind::Format);
    }

    #[test]
    fn test_parse_rejects_extra_separator() {
        let err = parse_output("1/2/3").unwrap_err();
        assert_eq!(err.kind(), ProbeErrorKind::Format);
    }

    #[test]
    fn test_parse_rejects_bad_actual() {
        let err = parse_output("abc/100").unwrap_err();
        assert_eq!(
            err,
            ProbeError::Number {
                field: ReadingField::Actual,
                value: "abc".into()
            }
        );
    }

    #[test]
    fn test_parse_rejects_negative_numbers() {
        let err = parse_output("-1/100").unwrap_err();
        assert_eq!(err.kind(), ProbeErrorKind::Number);
    }

    #[test]
    fn test_parse_rejects_bad_total() {
        let err = parse_output("1/\nsuccess").unwrap_err();
        assert_eq!(
            err,
            ProbeError::Number {
                field: ReadingField::Total,
                value: String::new()
            }
        );
    }

    #[test]
    fn test_parse_zero_total() {
        let reading = parse_output("0/0").unwrap();
        assert_eq!(reading, ProbeReading::new(0, 0));
        assert!(!reading.is_queued());
    }

    #[test]
    fn test_parse_pending_marker() {
        let output = "ERROR: The blob copy is pending.\nErrorCode:PendingCopyOperation\n";
        assert_eq!(parse_output(output).unwrap(), ProbeReading::queued());
    }

    #[test]
    fn test_interpret_marker_beats_failed_exit() {
        let output = "ErrorCode:PendingCopyOperation";
        assert_eq!(interpret_output(false, "exit status: 3", output).unwrap(), ProbeReading::queued());
    }

    #[test]
    fn test_interpret_failed_exit() {
        let err = interpret_output(false, "exit status: 1", "42/100").unwrap_err();
        assert_eq!(err, ProbeError::invocation("exit status: 1", "42/100"));
    }

    #[test]
    fn test_interpret_success_parses() {
        assert_eq!(interpret_output(true, "exit status: 0", "42/100").unwrap(), ProbeReading::new(42, 100));
    }
}
