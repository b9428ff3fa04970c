mod store;

pub use store::MemoryVconStore;
