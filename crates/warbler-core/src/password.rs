//! Warbler password hashing.
//!
//! Hashes are bcrypt in the modular crypt format with the `$2b$` version
//! prefix. The cost factor is configurable (see [`crate::config::Config`])
//! so tests can run with the minimum cost.

use bcrypt::Version;

/// Version marker every stored hash starts with.
pub const HASH_PREFIX: &str = "$2b$";

/// Cheapest cost bcrypt accepts.
pub const MIN_COST: u32 = 4;

/// Most expensive cost bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Reject cost factors bcrypt cannot use.
pub fn check_cost(cost: u32) -> anyhow::Result<()> {
    if !(MIN_COST..=MAX_COST).contains(&cost) {
        anyhow::bail!("bcrypt cost must be between {MIN_COST} and {MAX_COST}, got {cost}");
    }
    Ok(())
}

/// Hash a plaintext password and return a `$2b$` bcrypt hash string.
pub fn hash_password(password: &str, cost: u32) -> anyhow::Result<String> {
    check_cost(cost)?;

    let hashed = bcrypt::hash_with_result(password, cost)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hashed.format_for_version(Version::TwoB))
}

/// Verify a plaintext password against a stored bcrypt hash.
///
/// Returns:
/// - Ok(true)  if password matches
/// - Ok(false) if password does not match
/// - Err(_)    if the stored hash is malformed
pub fn verify_password(password: &str, password_hash: &str) -> anyhow::Result<bool> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash: {e}"))
}
