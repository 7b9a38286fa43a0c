#![allow(missing_docs)]

pub mod attachments;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod preview;
pub mod transfer;

pub use attachments::{
    AttachmentChange, AttachmentKind, AttachmentManager, AttachmentRecord, ChangeSink,
};
pub use debounce::{CommitSink, DEFAULT_QUIESCENCE_WINDOW, DebouncedCommitter};
pub use engine::{CloseHandler, EngineHooks, EngineOptions, FormEngine, SubmitHandler, ValueSink};
pub use error::TransferError;
pub use preview::PreviewHandle;
pub use transfer::{FetchedFile, LocalFile, TransferService};
