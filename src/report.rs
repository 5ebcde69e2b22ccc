//! CSV report emitter
//!
//! Projects collected connector records onto the fixed 18-column report
//! shape and hands formatting to the csv crate.

use crate::api::models::{ConnectorRecord, ConnectorType};
use crate::error::ReportError;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Default relative output path, next to wherever the tool was launched.
pub const DEFAULT_REPORT_PATH: &str = "Connector_status.csv";

/// One report row. Field order here is the column order in the file; the
/// serde rename gives the exact header names.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub fqdn: String,
    pub connector_type: ConnectorType,
    pub location: String,
    pub current_version: Option<String>,
    pub expected_version: Option<String>,
    pub current_bootstrapper_version: Option<String>,
    pub expected_boot_strapper_version: Option<String>,
    pub version_state: String,
    pub in_maintenance: bool,
    pub upgrade_disabled: bool,
    pub last_contact_date: Option<String>,
    pub id: String,
    pub status: String,
    pub role: String,
    pub upgrading_version: Option<String>,
    pub upgrading_status: Option<String>,
    pub last_upgrade_date: Option<String>,
    pub last_upgrade_completed_date: Option<String>,
}

impl From<&ConnectorRecord> for ReportRow {
    fn from(record: &ConnectorRecord) -> Self {
        Self {
            fqdn: record.fqdn.clone(),
            connector_type: record.connector_type,
            location: record.location.clone(),
            current_version: record.current_version.clone(),
            expected_version: record.expected_version.clone(),
            current_bootstrapper_version: record.current_bootstrapper_version.clone(),
            expected_boot_strapper_version: record.expected_boot_strapper_version.clone(),
            version_state: record.version_state.clone(),
            in_maintenance: record.in_maintenance,
            upgrade_disabled: record.upgrade_disabled,
            last_contact_date: record.last_contact_date.clone(),
            id: record.id.clone(),
            status: record.status.clone(),
            role: record.role.clone(),
            upgrading_version: record.upgrading_version.clone(),
            upgrading_status: record.upgrading_status.clone(),
            last_upgrade_date: record.last_upgrade_date.clone(),
            last_upgrade_completed_date: record.last_upgrade_completed_date.clone(),
        }
    }
}

/// Write a header row followed by one row per record.
pub fn write_report<W: Write>(records: &[ConnectorRecord], writer: W) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);

    for record in records {
        let row = ReportRow::from(record);
        wtr.serialize(&row)
            .map_err(|e| ReportError::Csv(e.to_string()))?;
    }

    // serialize() only emits the header once a row exists; an empty run
    // still gets a header row.
    if records.is_empty() {
        wtr.write_record(HEADER)
            .map_err(|e| ReportError::Csv(e.to_string()))?;
    }

    wtr.flush().map_err(|e| ReportError::Csv(e.to_string()))?;

    Ok(())
}

/// Write the report to a file path, creating or truncating it.
pub fn write_report_file(path: &Path, records: &[ConnectorRecord]) -> Result<(), ReportError> {
    let file = File::create(path).map_err(|source| ReportError::Io {
        path: path.to_string_lossy().to_string(),
        source,
    })?;
    write_report(records, file)
}

const HEADER: [&str; 18] = [
    "fqdn",
    "connectorType",
    "location",
    "currentVersion",
    "expectedVersion",
    "currentBootstrapperVersion",
    "expectedBootStrapperVersion",
    "versionState",
    "inMaintenance",
    "upgradeDisabled",
    "lastContactDate",
    "id",
    "status",
    "role",
    "upgradingVersion",
    "upgradingStatus",
    "lastUpgradeDate",
    "lastUpgradeCompletedDate",
];

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, status: &str) -> ConnectorRecord {
        ConnectorRecord {
            id: id.to_string(),
            fqdn: format!("cc-{id}.corp.example"),
            connector_type: ConnectorType::Windows,
            location: "HQ".to_string(),
            role: "Primary".to_string(),
            current_version: Some("16.4.0.7".to_string()),
            expected_version: Some("16.4.0.7".to_string()),
            current_bootstrapper_version: Some("6.70.0.35".to_string()),
            expected_boot_strapper_version: Some("6.70.0.35".to_string()),
            version_state: "UpToDate".to_string(),
            upgrading_version: None,
            upgrading_status: None,
            last_upgrade_date: Some("2023-04-01T02:00:00Z".to_string()),
            last_upgrade_completed_date: Some("2023-04-01T02:21:00Z".to_string()),
            failed_upgrade_reason: None,
            status: status.to_string(),
            in_maintenance: false,
            upgrade_disabled: false,
            last_contact_date: Some("2023-04-20T11:59:00Z".to_string()),
            windows_sid: Some("S-1-5-21-1111".to_string()),
            lease_end_date_time: None,
        }
    }

    #[test]
    fn test_header_row_and_column_order() {
        let mut output = Vec::new();
        write_report(&[record("c1", "Connected")], &mut output).unwrap();
        let csv_string = String::from_utf8(output).unwrap();

        let header = csv_string.lines().next().unwrap();
        assert_eq!(header, HEADER.join(","));
    }

    #[test]
    fn test_one_row_per_record() {
        let records = vec![record("c1", "Connected"), record("c2", "Disconnected")];

        let mut output = Vec::new();
        write_report(&records, &mut output).unwrap();
        let csv_string = String::from_utf8(output).unwrap();

        let lines: Vec<&str> = csv_string.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("cc-c1.corp.example,Windows,HQ,"));
        assert!(lines[2].contains(",Disconnected,"));
    }

    #[test]
    fn test_absent_values_serialize_as_empty_fields() {
        let mut rec = record("c1", "Connected");
        rec.current_version = None;

        let mut output = Vec::new();
        write_report(&[rec], &mut output).unwrap();
        let csv_string = String::from_utf8(output).unwrap();

        let row = csv_string.lines().nth(1).unwrap();
        assert!(row.contains("HQ,,16.4.0.7"));
    }

    #[test]
    fn test_empty_run_still_writes_header() {
        let mut output = Vec::new();
        write_report(&[], &mut output).unwrap();
        let csv_string = String::from_utf8(output).unwrap();

        assert_eq!(csv_string.lines().count(), 1);
        assert_eq!(csv_string.lines().next().unwrap(), HEADER.join(","));
    }

    #[test]
    fn test_report_excludes_unprojected_fields() {
        let mut output = Vec::new();
        write_report(&[record("c1", "Connected")], &mut output).unwrap();
        let csv_string = String::from_utf8(output).unwrap();

        // windowsSid, failedUpgradeReason, and leaseEndDateTime are
        // collected but not reported.
        assert!(!csv_string.contains("windowsSid"));
        assert!(!csv_string.contains("S-1-5-21-1111"));
    }

    #[test]
    fn test_write_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Connector_status.csv");

        write_report_file(&path, &[record("c1", "Connected")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
