//! Types and traits for recording training metrics.
//!
//! The [`Trainer`](crate::Trainer) emits one [`Record`] per episode
//! (`"episode_return"`, `"episode_steps"`) and one per report
//! (`"average_return"`, `"epsilon"`, and `"eval_return"` when an evaluation ran).
//! Records are handed to an [`AggregateRecorder`], which decides what to do with them.
//!
//! # Basic Usage
//!
//! ```rust
//! use floe_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("episode_return", RecordValue::Scalar(1.0));
//! record.insert("agent", RecordValue::String("td_lambda".to_string()));
//! assert_eq!(record.get_scalar("episode_return").unwrap(), 1.0);
//! ```
//!
//! # Recorders
//!
//! * [`NullRecorder`] - discards all records
//! * [`BufferedRecorder`] - keeps records in memory, useful in tests
//! * [`LogRecorder`] - writes aggregated records through the `log` facade
mod base;
mod buffered_recorder;
mod log_recorder;
mod null_recorder;
mod recorder;
mod storage;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use log_recorder::LogRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::{AggregateRecorder, Recorder};
pub use storage::RecordStorage;
