#[derive(Clone, Debug)]
pub struct User {
    /// Login name, unique across the directory
    pub username: String,
    /// E-mail address, unique across the directory
    pub email: String,
    /// Steam account ID (numeric string), unique across the directory
    pub steamid: String,
    /// bcrypt hash of the password, never the plaintext
    pub password_hash: String,
}

impl User {
    pub fn new(username: String, email: String, steamid: String, password_hash: String) -> Self {
        Self {
            username,
            email,
            steamid,
            password_hash,
        }
    }
}
