mod backend;
mod config;
mod storage;
mod ui;

pub use backend::BackendConfig;
pub use config::Config;
pub use storage::StorageConfig;
pub use ui::UiConfig;
