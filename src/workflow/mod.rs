pub mod markup;
pub mod part_builders;
pub mod part_parser;
pub mod question_ctx;
pub mod question_flow;

pub use markup::{split_document, QuestionBlock};
pub use question_ctx::QuestionCtx;
pub use question_flow::{AssembledQuestion, QuestionFlow};
