pub mod error;
pub mod preprocess;
pub mod session;
pub mod storage;
pub mod store;

pub use error::StoreError;
pub use session::{
    EnglishDefinitionLookup, EnglishDefinitionResult, ExampleSentenceLookup,
    JapaneseDefinitionLookup, JapaneseDefinitionResult, LookupKind, LookupSession, SessionState,
    Settlement, Ticket,
};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::WordStore;
