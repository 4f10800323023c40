pub mod markup_loader;

pub use markup_loader::{
    load_all_markup_files, load_documents, load_markup_document, LoadedDocuments, MarkupDocument,
};
