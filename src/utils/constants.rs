/// localStorage key holding the session token
pub const STORAGE_KEY_TOKEN: &str = "token";
