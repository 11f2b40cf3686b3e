pub mod selector;
pub mod topic;
pub mod transcript;

pub use selector::{classify, ResponseSelector, Route};
pub use topic::{Topic, TopicTable};
pub use transcript::{Role, Transcript, TranscriptEntry};
