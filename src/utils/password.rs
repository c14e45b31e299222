/// Hash a raw password with bcrypt at the given cost factor.
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    bcrypt::hash(password, cost)
}

/// Check a raw password against a stored bcrypt hash.
///
/// A malformed stored hash counts as a mismatch; the caller only ever learns
/// match/no-match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}
