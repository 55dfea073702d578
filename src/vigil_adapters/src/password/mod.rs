use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core},
};
use vigil_core::{CredentialError, CredentialHasher, Password};

/// Argon2id parameters: 15 MiB memory, 2 iterations, 1 lane.
const M_COST: u32 = 15000;
const T_COST: u32 = 2;
const P_COST: u32 = 1;

/// A syntactically valid hash that no real password produced. Verified
/// against on the unknown-account login path so that path runs the same
/// argon2 work as a genuine mismatch.
const DUMMY_HASH: &str = "$argon2id$v=19$m=15000,t=2,p=1$c29tZXNhbHRzb21lc2FsdA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

/// [`CredentialHasher`] backed by argon2id.
///
/// Hashing and verification run on the blocking pool; argon2 is tuned to be
/// slow on purpose and must not stall the async executor.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2CredentialHasher;

fn hasher() -> Result<Argon2<'static>, CredentialError> {
    let params = Params::new(M_COST, T_COST, P_COST, None)
        .map_err(|e| CredentialError::Unexpected(e.to_string()))?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

#[async_trait::async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    #[tracing::instrument(name = "Computing password hash", skip_all)]
    async fn hash(&self, password: Password) -> Result<String, CredentialError> {
        let current_span: tracing::Span = tracing::Span::current();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(move || {
                let salt = SaltString::generate(rand_core::OsRng);
                hasher()?
                    .hash_password(password.expose().as_bytes(), &salt)
                    .map(|hash| hash.to_string())
                    .map_err(|e| CredentialError::Unexpected(e.to_string()))
            })
        })
        .await
        .map_err(|e| CredentialError::Unexpected(e.to_string()))?
    }

    #[tracing::instrument(name = "Verifying password hash", skip_all)]
    async fn verify(
        &self,
        expected_hash: &str,
        candidate: Password,
    ) -> Result<(), CredentialError> {
        let current_span: tracing::Span = tracing::Span::current();
        let expected_hash = expected_hash.to_string();

        tokio::task::spawn_blocking(move || {
            current_span.in_scope(|| {
                let expected = PasswordHash::new(&expected_hash)
                    .map_err(|e| CredentialError::Unexpected(e.to_string()))?;

                hasher()?
                    .verify_password(candidate.expose().as_bytes(), &expected)
                    .map_err(|e| match e {
                        argon2::password_hash::Error::Password => CredentialError::Mismatch,
                        other => CredentialError::Unexpected(other.to_string()),
                    })
            })
        })
        .await
        .map_err(|e| CredentialError::Unexpected(e.to_string()))?
    }

    async fn verify_dummy(&self, candidate: Password) {
        let _ = self.verify(DUMMY_HASH, candidate).await;
    }
}
