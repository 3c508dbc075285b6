//! Types and traits for recording values measured during interaction with an environment.
//!
//! Every call of [`Env::step`](crate::Env::step) returns a [`Record`] next to the
//! [`Step`](crate::Step). For the hover environments it holds the distance to
//! the goal, the speed, the height and the simulator time at the end of the
//! step, and the termination reason on the last step of an episode.
//!
//! ```rust
//! use quadhover_core::record::{Record, RecordValue};
//!
//! let mut record = Record::from_scalar("reward", 0.35);
//! record.insert("termination", RecordValue::String("TimeLimit".to_string()));
//! assert_eq!(record.get_scalar("reward").unwrap(), 0.35);
//! assert_eq!(record.get_string("termination").unwrap(), "TimeLimit");
//! ```
//!
//! Records can be written to a [`Recorder`]: [`BufferedRecorder`] keeps them in
//! memory, [`NullRecorder`] discards them.
mod base;
mod buffered_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
