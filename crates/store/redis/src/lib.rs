mod config;
mod key_render;
mod store;

pub use config::RedisConfig;
pub use key_render::render_key;
pub use store::RedisVconStore;
