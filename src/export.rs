//! The export operation: encode, deliver, notify.
//!
//! `export_to_csv` is the single entry point tying the projector, encoder
//! and delivery sink together. Whatever happens, the notification sink hears
//! about it exactly once, and the failure is handed back as an
//! [`ExportError`] instead of escaping as a panic.

use crate::delivery::FileDeliverySink;
use crate::encoder;
use crate::error::ExportError;
use crate::notify::{Notification, NotificationSink};
use crate::types::{ColumnSpec, CsvArtifact, Delivered, Record};
use log::debug;

pub const SUCCESS_MESSAGE: &str = "Export completed successfully";

/// Export `records` as `filename` through `sink`, reporting to `notifier`.
///
/// # Arguments
/// * `records` - Rows to export, in output order
/// * `columns` - Column labels and field paths, in output order
/// * `filename` - Name of the file the sink should produce
/// * `sink` - Host-specific delivery mechanism
/// * `notifier` - Receives exactly one success or error notification
///
/// # Returns
/// Where the artifact was delivered, or why it was not.
pub fn export_to_csv(
    records: &[Record],
    columns: &[ColumnSpec],
    filename: &str,
    sink: &dyn FileDeliverySink,
    notifier: &dyn NotificationSink,
) -> Result<Delivered, ExportError> {
    let outcome = run_export(records, columns, filename, sink);

    let notification = match &outcome {
        Ok(_) => Notification::success(SUCCESS_MESSAGE),
        Err(ExportError::EmptyInput) => Notification::error(ExportError::EmptyInput.to_string()),
        Err(e) => Notification::error(format!("Failed to export data: {}", e)),
    };
    notifier.notify(notification);

    outcome
}

fn run_export(
    records: &[Record],
    columns: &[ColumnSpec],
    filename: &str,
    sink: &dyn FileDeliverySink,
) -> Result<Delivered, ExportError> {
    if records.is_empty() {
        return Err(ExportError::EmptyInput);
    }

    let text = encoder::encode(records, columns)?;
    debug!("Encoded {} records x {} columns into {} bytes", records.len(), columns.len(), text.len());

    let artifact = CsvArtifact::new(filename, text);
    sink.deliver(&artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Variant;
    use crate::types::Value;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingNotifier {
        seen: RefCell<Vec<Notification>>,
    }

    impl NotificationSink for RecordingNotifier {
        fn notify(&self, notification: Notification) {
            self.seen.borrow_mut().push(notification);
        }
    }

    #[derive(Default)]
    struct MemorySink {
        delivered: RefCell<Vec<CsvArtifact>>,
    }

    impl FileDeliverySink for MemorySink {
        fn deliver(&self, artifact: &CsvArtifact) -> Result<Delivered, ExportError> {
            self.delivered.borrow_mut().push(artifact.clone());
            Ok(Delivered::File(std::path::PathBuf::from(&artifact.filename)))
        }
    }

    struct FailingSink(ExportError);

    impl FileDeliverySink for FailingSink {
        fn deliver(&self, _artifact: &CsvArtifact) -> Result<Delivered, ExportError> {
            Err(self.0.clone())
        }
    }

    fn sample_records() -> Vec<Record> {
        let mut r = Record::new();
        r.insert("Company__c".to_string(), Value::from("Acme"));
        r.insert("Status__c".to_string(), Value::from("Submitted"));
        vec![r]
    }

    fn sample_columns() -> Vec<ColumnSpec> {
        vec![ColumnSpec::new("Company", "Company__c"), ColumnSpec::new("Status", "Status__c")]
    }

    #[test]
    fn test_success_delivers_once_and_notifies_once() {
        let sink = MemorySink::default();
        let notifier = RecordingNotifier::default();

        let result = export_to_csv(&sample_records(), &sample_columns(), "apps.csv", &sink, &notifier);

        assert_eq!(result, Ok(Delivered::File(std::path::PathBuf::from("apps.csv"))));
        let delivered = sink.delivered.borrow();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].filename, "apps.csv");
        assert_eq!(delivered[0].mime_type, "text/csv;charset=utf-8");
        assert_eq!(
            String::from_utf8(delivered[0].bytes.clone()).unwrap(),
            "\"Company\",\"Status\"\n\"Acme\",\"Submitted\""
        );

        let seen = notifier.seen.borrow();
        assert_eq!(*seen, vec![Notification::new("Success", SUCCESS_MESSAGE, Variant::Success)]);
    }

    #[test]
    fn test_empty_input_notifies_error_without_delivery() {
        let sink = MemorySink::default();
        let notifier = RecordingNotifier::default();

        let result = export_to_csv(&[], &sample_columns(), "apps.csv", &sink, &notifier);

        assert_eq!(result, Err(ExportError::EmptyInput));
        assert!(sink.delivered.borrow().is_empty(), "No artifact should be produced");
        assert_eq!(*notifier.seen.borrow(), vec![Notification::error("No data to export")]);
    }

    #[test]
    fn test_sink_failure_is_reported_with_message() {
        let sink = FailingSink(ExportError::serialization("disk full"));
        let notifier = RecordingNotifier::default();

        let result = export_to_csv(&sample_records(), &sample_columns(), "apps.csv", &sink, &notifier);

        assert_eq!(result, Err(ExportError::serialization("disk full")));
        assert_eq!(*notifier.seen.borrow(), vec![Notification::error("Failed to export data: disk full")]);
    }

    #[test]
    fn test_host_unsupported_is_surfaced() {
        let sink = FailingSink(ExportError::host_unsupported("no download support"));
        let notifier = RecordingNotifier::default();

        let result = export_to_csv(&sample_records(), &sample_columns(), "apps.csv", &sink, &notifier);

        assert!(matches!(result, Err(ExportError::HostUnsupported { .. })));
        let seen = notifier.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].variant, Variant::Error);
        assert!(seen[0].message.contains("no download support"));
    }
}
