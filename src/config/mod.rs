mod filesystem;
mod loader;
mod model;
mod settings;

pub use filesystem::{FileSystem, RealFileSystem};
pub use loader::{ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME, LoadResult};
pub use model::{CONFIG_VERSION, ProfileConfig, ProviderConfig, SettingsConfig};
pub use settings::{ResolveContext, Settings};
