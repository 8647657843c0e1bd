use crate::sheets::UpstreamError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchSheets,
    FetchHeaders,
    FetchData,
    TestAccess,
}

impl Operation {
    fn targets_range(self) -> bool {
        matches!(self, Operation::FetchHeaders | Operation::FetchData)
    }

    fn fallback_message(self) -> &'static str {
        match self {
            Operation::FetchSheets => "Failed to fetch sheets",
            Operation::FetchHeaders => "Failed to fetch headers",
            Operation::FetchData => "Failed to fetch data",
            Operation::TestAccess => "Failed to access spreadsheet",
        }
    }
}

/// Turn an upstream failure into guidance for the caller.
pub fn translate(operation: Operation, err: &UpstreamError, client_email: &str) -> String {
    match err.code {
        Some(403) => format!(
            "Permission denied. Share the spreadsheet with {} (Viewer access is enough).",
            client_email
        ),
        Some(404) if operation.targets_range() => {
            "Spreadsheet or sheet not found. Check the spreadsheet ID and sheet name.".to_string()
        }
        Some(404) => "Spreadsheet not found. Check the spreadsheet ID.".to_string(),
        Some(400) if operation.targets_range() => {
            "Invalid range. Check the sheet name and range format (for example A1:ZZ1)."
                .to_string()
        }
        _ => err
            .message
            .clone()
            .unwrap_or_else(|| operation.fallback_message().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL: &str = "svc@project.iam.gserviceaccount.com";

    #[test]
    fn test_permission_denied_names_identity() {
        let err = UpstreamError::new(Some(403), Some("The caller does not have permission"));
        let message = translate(Operation::FetchSheets, &err, EMAIL);

        assert!(message.starts_with("Permission denied"));
        assert!(message.contains(EMAIL));
    }

    #[test]
    fn test_not_found_wording_depends_on_operation() {
        let err = UpstreamError::new(Some(404), Some("Requested entity was not found."));

        assert_eq!(
            translate(Operation::FetchSheets, &err, EMAIL),
            "Spreadsheet not found. Check the spreadsheet ID."
        );
        assert_eq!(
            translate(Operation::FetchData, &err, EMAIL),
            "Spreadsheet or sheet not found. Check the spreadsheet ID and sheet name."
        );
    }

    #[test]
    fn test_bad_request_only_mapped_for_ranges() {
        let err = UpstreamError::new(Some(400), Some("Unable to parse range: Nope!A1"));

        assert!(translate(Operation::FetchHeaders, &err, EMAIL).starts_with("Invalid range"));
        assert_eq!(
            translate(Operation::FetchSheets, &err, EMAIL),
            "Unable to parse range: Nope!A1"
        );
    }

    #[test]
    fn test_unknown_code_passes_message_through() {
        let err = UpstreamError::new(Some(429), Some("Quota exceeded"));
        assert_eq!(translate(Operation::FetchData, &err, EMAIL), "Quota exceeded");
    }

    #[test]
    fn test_fallback_without_message() {
        let err = UpstreamError::new(None, None);
        assert_eq!(
            translate(Operation::TestAccess, &err, EMAIL),
            "Failed to access spreadsheet"
        );
    }
}
