//! JSON backup/restore and CSV export of stored records.

use cars_core::models::record::AssessmentRecord;
use cars_core::models::subscale::SubscaleKey;

use crate::error::StorageError;

/// Pretty JSON array of records, suitable for [`from_json`].
pub fn to_json(records: &[AssessmentRecord]) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Parse a backup produced by [`to_json`]. The document must be an array.
pub fn from_json(input: &str) -> Result<Vec<AssessmentRecord>, StorageError> {
    let value: serde_json::Value = serde_json::from_str(input)?;
    if !value.is_array() {
        return Err(StorageError::InvalidImport(
            "expected a JSON array of assessment records".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}

fn csv_headers() -> Vec<String> {
    let mut headers = vec![
        "Date".to_string(),
        "Risk Level".to_string(),
        "Self Harm Override".to_string(),
    ];
    for key in SubscaleKey::ALL {
        let name = match key {
            SubscaleKey::Academic => "Academic",
            other => other.label(),
        };
        headers.push(format!("{name} Raw"));
        headers.push(format!("{name} T"));
    }
    headers
}

/// One row per record with raw and T scores per subscale. CRLF line endings.
pub fn to_csv(records: &[AssessmentRecord]) -> Result<String, StorageError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(Vec::new());
    writer.write_record(csv_headers())?;

    let score = |value: Option<i32>| value.map(|v| v.to_string()).unwrap_or_default();

    for record in records {
        let result = &record.result;
        let mut row = vec![
            result.taken_at().to_string(),
            result.risk_level().label().to_string(),
            result.self_harm_flagged().to_string(),
        ];
        for key in SubscaleKey::ALL {
            row.push(score(result.raw_scores().get(key)));
            row.push(score(result.standard_scores().get(key)));
        }
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| StorageError::Io(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| StorageError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

pub fn backup_file_name(date: jiff::civil::Date) -> String {
    format!("cars_backup_{date}.json")
}

pub fn export_file_name(date: jiff::civil::Date) -> String {
    format!("cars_export_{date}.csv")
}
