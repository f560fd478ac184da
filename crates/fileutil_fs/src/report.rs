//! Copy outcome report.

use std::fmt;

use crate::spec::EnumCopyOutcome;

/// Terminal state of one successful `copy` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportCopy {
    /// Branch that produced the destination.
    pub outcome: EnumCopyOutcome,
    /// Bytes streamed into the destination (`0` unless streamed).
    pub n_bytes_copied: u64,
    /// Destination was flushed to stable storage.
    pub if_synced: bool,
    /// Source permissions/timestamps were applied to the destination.
    pub if_metadata_preserved: bool,
}

impl ReportCopy {
    pub(crate) fn same_file() -> Self {
        Self {
            outcome: EnumCopyOutcome::SameFile,
            n_bytes_copied: 0,
            if_synced: false,
            if_metadata_preserved: false,
        }
    }

    pub(crate) fn linked() -> Self {
        Self {
            outcome: EnumCopyOutcome::Linked,
            ..Self::same_file()
        }
    }

    /// Destination shares storage with the source.
    pub fn is_shared(&self) -> bool {
        matches!(
            self.outcome,
            EnumCopyOutcome::SameFile | EnumCopyOutcome::Linked
        )
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} outcome={} bytes={} synced={} metadata={}",
            self.outcome.as_str(),
            self.n_bytes_copied,
            self.if_synced,
            self.if_metadata_preserved
        )
    }
}

impl fmt::Display for ReportCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[COPY]"))
    }
}

#[cfg(test)]
mod tests {
    use super::ReportCopy;
    use crate::spec::EnumCopyOutcome;

    #[test]
    fn report_copy_format_lists_outcome_and_counters() {
        let report = ReportCopy {
            outcome: EnumCopyOutcome::Streamed,
            n_bytes_copied: 5,
            if_synced: true,
            if_metadata_preserved: false,
        };

        let txt = report.format("[COPY]");
        assert_eq!(
            txt,
            "[COPY] outcome=streamed bytes=5 synced=true metadata=false"
        );
        assert_eq!(report.to_string(), txt);
        assert!(!report.is_shared());
        assert!(ReportCopy::linked().is_shared());
        assert!(ReportCopy::same_file().is_shared());
    }
}
