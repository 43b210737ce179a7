// Adapters layer: concrete implementations for external systems (decoder, converter, filesystem).

pub mod convert;
pub mod medet;
pub mod storage;

pub use convert::ConvertTool;
pub use medet::MedetDecoder;
pub use storage::LocalStorage;
