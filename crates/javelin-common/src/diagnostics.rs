use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticCategory {
    Warning,
}

/// A finding reported by a check against one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub category: DiagnosticCategory,
    /// Name of the check that produced the finding, e.g. `JavaDurationGetSecondsGetNano`.
    pub check_name: String,
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
}

impl Diagnostic {
    pub fn warning(
        check_name: impl Into<String>,
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category: DiagnosticCategory::Warning,
            check_name: check_name.into(),
            file: file.into(),
            start,
            length,
            message_text: message.into(),
        }
    }

    /// Message prefixed with the check name, e.g. `[CheckName] message`.
    pub fn formatted_message(&self) -> String {
        format!("[{}] {}", self.check_name, self.message_text)
    }
}
