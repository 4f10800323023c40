pub mod language;
pub mod loaders;
pub mod metadata;
pub mod question;
pub mod question_type;
pub mod stats;

pub use language::Language;
pub use loaders::{load_documents, LoadedDocuments, MarkupDocument};
pub use metadata::MetadataMap;
pub use question::{Choice, ChoiceKind, Part, PartBody, QuestionRecord};
pub use question_type::QuestionType;
pub use stats::{FailedQuestion, ProcessingStats};
