mod auth;
mod cache;
mod store;

pub use auth::TokenManager;
pub use cache::ResponseCache;
pub use store::AuthorizationStore;
pub use store::FileStore;
pub use store::MemoryStore;
pub use store::PreferencesStore;
pub use store::TransientStore;
