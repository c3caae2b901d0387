mod cart;

pub use self::cart::CartApiClient;
