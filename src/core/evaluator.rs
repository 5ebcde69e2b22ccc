use crate::api::models::{ConnectorRecord, ConnectorType};

/// Summary signals computed over one collection run. Consumed by a human
/// operator or an external alerting hook; nothing here dispatches alerts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusSummary {
    /// Windows connectors with an expected version assigned but no current
    /// version reported — a proxy for "upgrade assigned, not completed".
    pub pending_upgrade_count: usize,
    /// Any connector holds a maintenance lock.
    pub site_in_maintenance: bool,
    /// Connectors reporting status "Disconnected".
    pub disconnected_count: usize,
}

impl StatusSummary {
    pub fn attention_required(&self) -> bool {
        self.disconnected_count > 0 || self.pending_upgrade_count > 0 || self.site_in_maintenance
    }

    /// Operator-facing lines, one per firing condition.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if self.attention_required() {
            lines.push("Connectors in maintenance or require attention!".to_string());
        }
        if self.pending_upgrade_count > 0 {
            lines.push(format!(
                "A site upgrade is pending, {} connector(s) are marked for upgrade",
                self.pending_upgrade_count
            ));
        }
        if self.site_in_maintenance {
            lines.push("A connector currently has a maintenance lock on the site".to_string());
        }
        if self.disconnected_count > 0 {
            lines.push(format!(
                "There are {} disconnected Connectors in the site",
                self.disconnected_count
            ));
        }

        lines
    }
}

/// Single pass over the collected records. Pure: no I/O, no hidden state.
pub fn evaluate(records: &[ConnectorRecord]) -> StatusSummary {
    let mut summary = StatusSummary::default();

    for record in records {
        if record.connector_type == ConnectorType::Windows
            && is_blank(&record.current_version)
            && !is_blank(&record.expected_version)
        {
            summary.pending_upgrade_count += 1;
        }
        if record.in_maintenance {
            summary.site_in_maintenance = true;
        }
        if record.status == "Disconnected" {
            summary.disconnected_count += 1;
        }
    }

    summary
}

/// Empty string and `null` both count as "no value reported".
fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        id: &str,
        connector_type: ConnectorType,
        current_version: Option<&str>,
        expected_version: Option<&str>,
        in_maintenance: bool,
        status: &str,
    ) -> ConnectorRecord {
        ConnectorRecord {
            id: id.to_string(),
            fqdn: format!("cc-{id}.corp.example"),
            connector_type,
            location: "HQ".to_string(),
            role: "Primary".to_string(),
            current_version: current_version.map(str::to_string),
            expected_version: expected_version.map(str::to_string),
            current_bootstrapper_version: Some("6.70.0.35".to_string()),
            expected_boot_strapper_version: Some("6.70.0.35".to_string()),
            version_state: "UpToDate".to_string(),
            upgrading_version: None,
            upgrading_status: None,
            last_upgrade_date: None,
            last_upgrade_completed_date: None,
            failed_upgrade_reason: None,
            status: status.to_string(),
            in_maintenance,
            upgrade_disabled: false,
            last_contact_date: Some("2023-04-20T11:59:00Z".to_string()),
            windows_sid: None,
            lease_end_date_time: None,
        }
    }

    #[test]
    fn test_empty_sequence_yields_default_summary() {
        let summary = evaluate(&[]);
        assert_eq!(summary, StatusSummary::default());
        assert!(!summary.site_in_maintenance);
        assert!(!summary.attention_required());
        assert!(summary.summary_lines().is_empty());
    }

    #[test]
    fn test_pending_upgrade_requires_windows_blank_current_and_set_expected() {
        let records = vec![
            // Counts: Windows, no current, expected set
            record("c1", ConnectorType::Windows, None, Some("16.5"), false, "Connected"),
            // Counts: empty string behaves like absent
            record("c2", ConnectorType::Windows, Some(""), Some("16.5"), false, "Connected"),
            // Does not count: current version reported
            record("c3", ConnectorType::Windows, Some("16.4"), Some("16.5"), false, "Connected"),
            // Does not count: expected version empty
            record("c4", ConnectorType::Windows, None, Some(""), false, "Connected"),
            // Does not count: expected version absent
            record("c5", ConnectorType::Windows, None, None, false, "Connected"),
            // Does not count: wrong connector type
            record("c6", ConnectorType::Unified, None, Some("16.5"), false, "Connected"),
        ];

        let summary = evaluate(&records);
        assert_eq!(summary.pending_upgrade_count, 2);
    }

    #[test]
    fn test_site_in_maintenance_iff_any_record_locked() {
        let clean = vec![
            record("c1", ConnectorType::Windows, Some("16.4"), Some("16.4"), false, "Connected"),
        ];
        assert!(!evaluate(&clean).site_in_maintenance);

        let locked = vec![
            record("c1", ConnectorType::Windows, Some("16.4"), Some("16.4"), false, "Connected"),
            record("c2", ConnectorType::Unified, Some("16.4"), Some("16.4"), true, "Connected"),
        ];
        assert!(evaluate(&locked).site_in_maintenance);
    }

    #[test]
    fn test_disconnected_count() {
        let records = vec![
            record("c1", ConnectorType::Windows, Some("16.4"), Some("16.4"), false, "Connected"),
            record("c2", ConnectorType::Windows, Some("16.4"), Some("16.4"), false, "Disconnected"),
            record("c3", ConnectorType::Unified, Some("16.4"), Some("16.4"), false, "Disconnected"),
        ];

        let summary = evaluate(&records);
        assert_eq!(summary.disconnected_count, 2);
        assert!(summary.attention_required());
    }

    #[test]
    fn test_evaluation_is_idempotent() {
        let records = vec![
            record("c1", ConnectorType::Windows, None, Some("16.5"), true, "Disconnected"),
            record("c2", ConnectorType::Unified, Some("16.4"), Some("16.4"), false, "Connected"),
        ];

        let first = evaluate(&records);
        let second = evaluate(&records);
        assert_eq!(first, second);
    }

    #[test]
    fn test_summary_lines_cover_each_firing_condition() {
        let summary = StatusSummary {
            pending_upgrade_count: 3,
            site_in_maintenance: true,
            disconnected_count: 1,
        };

        let lines = summary.summary_lines();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Connectors in maintenance or require attention!");
        assert!(lines[1].contains("3 connector(s) are marked for upgrade"));
        assert!(lines[2].contains("maintenance lock"));
        assert!(lines[3].contains("1 disconnected Connectors"));
    }

    #[test]
    fn test_healthy_site_produces_no_lines() {
        let summary = StatusSummary::default();
        assert!(summary.summary_lines().is_empty());
    }
}
