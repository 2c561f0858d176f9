/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id credential hashing and verification
///
/// # Example
///
/// ```
/// use routinely_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
/// # Ok(())
/// # }
/// ```

pub mod password;
