pub mod failure_writer;
pub mod glyph_map;
pub mod html_renderer;
pub mod math_field;
pub mod metadata_validator;
pub mod record_writer;

pub use failure_writer::FailureWriter;
pub use glyph_map::GlyphSubstitution;
pub use html_renderer::TextRenderer;
pub use math_field::MathFieldRenderer;
pub use metadata_validator::validate_metadata;
pub use record_writer::{JsonFileWriter, MemorySink, RecordSink};
