use tokio_util::sync::CancellationToken;
use vouch_audit::{AuditRecord, AuditSink};
use vouch_store::{ArtifactKey, ArtifactResolver, ResolveError};
use vouch_verify::ContentDigest;

use crate::error::{Result, VerifyError};
use crate::payload::{VerificationRequest, VerificationResponse};

/// Runs one verification request end to end: resolve, digest, gate
/// disclosure, journal.
///
/// Holds no mutable state; share it behind an `Arc` and call
/// [`verify`](Self::verify) concurrently.
pub struct Verifier<R, S> {
    resolver: R,
    audit:    S,
}

impl<R, S> Verifier<R, S> {
    pub fn new(resolver: R, audit: S) -> Self { Self { resolver, audit } }

    pub fn resolver(&self) -> &R { &self.resolver }

    pub fn audit(&self) -> &S { &self.audit }
}

impl<R: ArtifactResolver, S: AuditSink> Verifier<R, S> {
    /// Verify the artifact named by `request`.
    ///
    /// The audit record is durable before this returns `Ok`. If `cancel`
    /// fires before the record is written, the call fails with
    /// [`VerifyError::Cancelled`] and nothing is journaled.
    ///
    /// The append itself is not interrupted: a cancellation that lands while
    /// the sink is writing is ignored and the call still returns `Ok`, so a
    /// journaled record always has a delivered response.
    pub async fn verify(
        &self,
        request: VerificationRequest,
        cancel: &CancellationToken,
    ) -> Result<VerificationResponse> {
        let key = ArtifactKey::new(request.kind_or_default(), request.version_or_default())
            .map_err(VerifyError::from_resolve)?;

        let resolved = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(VerifyError::Cancelled),
            resolved = self.resolver.resolve(&key) => resolved,
        };
        let content = resolved.map_err(|err| {
            match &err {
                ResolveError::NotFound { .. } => tracing::warn!(%key, "artifact not found"),
                other => tracing::warn!(%key, error = %other, "artifact store unavailable"),
            }
            VerifyError::from_resolve(err)
        })?;

        let digest = ContentDigest::of(&content);
        let disclosed = match request.pinned_hash() {
            Some(expected) if !digest.matches(expected) => {
                tracing::info!(%key, %digest, expected, "digest mismatch, withholding content");
                None
            }
            _ => Some(String::from_utf8_lossy(&content).into_owned()),
        };

        let response = VerificationResponse {
            kind:    key.kind().to_owned(),
            version: key.version().to_owned(),
            hash:    digest.into_string(),
            content: disclosed,
        };

        if cancel.is_cancelled() {
            return Err(VerifyError::Cancelled);
        }

        let record = AuditRecord::from(&response);
        let id = self.audit.append(&record).await.map_err(|err| {
            tracing::error!(%key, error = %err, "failed to journal verification");
            VerifyError::AuditWriteFailed(err)
        })?;

        tracing::debug!(
            %key,
            hash = %response.hash,
            disclosed = response.is_disclosed(),
            audit_id = id,
            "artifact verified"
        );
        Ok(response)
    }
}
