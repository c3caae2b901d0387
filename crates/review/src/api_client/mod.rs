mod review;

pub use self::review::ReviewApiClient;
