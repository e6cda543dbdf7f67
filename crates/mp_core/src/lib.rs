pub mod document;
pub mod error;
pub mod history;
pub mod image_tag;
pub mod models;
pub mod storage;
pub mod themes;
pub mod types;

pub use document::{decode_data_url, load_image_file, Document, ImageTable};
pub use error::Error;
pub use history::{History, HISTORY_CAPACITY};
pub use models::{CredentialSelector, ImageRequest, InferenceModel, WriteRequest};
pub use storage::HistoryStore;
pub use types::*;

pub type Result<T> = std::result::Result<T, Error>;
