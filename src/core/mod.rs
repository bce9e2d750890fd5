pub mod classifier;
pub mod error;
pub mod fetcher;
pub mod link;
pub mod storage;
pub mod store;
pub mod theme;
pub mod validator;

pub use classifier::{classify, resolve_embed};
pub use error::{AddError, FetchError, StorageError, ValidationError};
pub use fetcher::{ExtractResponse, JsonLinkFetcher, MetadataFetcher};
pub use link::{Category, LinkMetadata, LinkRecord, NO_DESCRIPTION, UNTITLED};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::{AddState, AddTicket, LinkStore, LINKS_KEY, THEME_KEY};
pub use theme::Theme;
pub use validator::{is_valid_url, validate};
