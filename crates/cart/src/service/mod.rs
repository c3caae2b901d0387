mod sync;

pub use self::sync::{CartSyncService, CartSyncServiceDeps};
