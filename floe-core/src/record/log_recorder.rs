use super::{AggregateRecorder, Record, RecordStorage, RecordValue, Recorder};
use log::info;

/// Writes records through the `log` facade at `info` level.
///
/// Keys are written in alphabetical order so that lines of successive
/// flushes line up.
#[derive(Default)]
pub struct LogRecorder {
    storage: RecordStorage,
}

impl LogRecorder {
    /// Construct the recorder.
    pub fn new() -> Self {
        Self::default()
    }

    fn format(record: &Record) -> String {
        let mut items: Vec<_> = record.iter().collect();
        items.sort_by(|a, b| a.0.cmp(b.0));
        items
            .into_iter()
            .map(|(k, v)| match v {
                RecordValue::Scalar(v) => format!("{}: {:.4}", k, v),
                RecordValue::String(s) => format!("{}: {}", k, s),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Recorder for LogRecorder {
    fn write(&mut self, record: Record) {
        info!("{}", Self::format(&record));
    }
}

impl AggregateRecorder for LogRecorder {
    fn store(&mut self, record: Record) {
        self.storage.store(record);
    }

    fn flush(&mut self, step: i64) {
        if self.storage.is_empty() {
            return;
        }
        let record = self.storage.aggregate();
        info!("episode {}: {}", step, Self::format(&record));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_format_is_sorted() {
        let r = Record::from_slice(&[
            ("b", RecordValue::Scalar(1.0)),
            ("a", RecordValue::String("x".into())),
        ]);
        assert_eq!(LogRecorder::format(&r), "a: x, b: 1.0000");
    }
}
