pub use crate::document::{Chapter, Document, DocumentBuilder, DocumentFormat, Line};
pub use crate::errors::{ErrorKind, Result, TextbitesError};
pub use crate::library::Library;
pub use crate::reference::{Reference, ReferenceKind, Scope};
pub use crate::resource::Resource;
pub use crate::search::SearchFilter;

pub mod cli;
pub mod document;
pub mod errors;
pub mod library;
pub mod reference;
pub mod resource;
pub mod search;
pub mod syntax;
