// Adapters layer: concrete implementations of the ports (host library, page markup, storage).

pub mod memory;
pub mod page;
pub mod storage;
