mod client;
mod service;

pub use self::client::{CartApiClientTrait, DynCartApiClient};
pub use self::service::{CartSyncServiceTrait, DynCartSyncService};
