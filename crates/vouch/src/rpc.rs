//! JSON-in/JSON-out endpoints and the registry that names them.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use vouch_audit::AuditSink;
use vouch_store::ArtifactResolver;

use crate::error::{RegistryError, RpcError, VerifyError};
use crate::payload::VerificationRequest;
use crate::verifier::Verifier;

pub const CHECKSUM_RPC: &str = "checksum";

/// Per-call context handed in by the host.
#[derive(Clone, Debug, Default)]
pub struct RpcContext {
    pub cancel:  CancellationToken,
    pub timeout: Option<Duration>,
}

impl RpcContext {
    pub fn new() -> Self { Self::default() }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run `f` with a token that fires on host cancellation or when the
    /// deadline passes, whichever comes first.
    pub async fn scoped<F, Fut, T>(&self, f: F) -> T
    where
        F: FnOnce(CancellationToken) -> Fut,
        Fut: Future<Output = T>,
    {
        let token = self.cancel.child_token();
        let timer = self.timeout.map(|timeout| {
            let token = token.clone();
            tokio::spawn(async move {
                tokio::select! {
                    _ = tokio::time::sleep(timeout) => token.cancel(),
                    _ = token.cancelled() => {}
                }
            })
        });

        let output = f(token).await;
        if let Some(timer) = timer {
            timer.abort();
        }
        output
    }
}

/// The `checksum` endpoint: decode the payload, verify, encode the response.
pub async fn rpc_checksum<R, S>(
    verifier: &Verifier<R, S>,
    ctx: &RpcContext,
    payload: &str,
) -> Result<String, RpcError>
where
    R: ArtifactResolver,
    S: AuditSink,
{
    let request: VerificationRequest = serde_json::from_str(payload).map_err(|err| {
        tracing::debug!(error = %err, "rejecting malformed payload");
        VerifyError::InvalidRequest(err.to_string())
    })?;

    let response = ctx
        .scoped(|cancel| async move { verifier.verify(request, &cancel).await })
        .await?;

    let body = serde_json::to_string(&response).map_err(VerifyError::SerializationFailed)?;
    Ok(body)
}

type Handler =
    Arc<dyn Fn(RpcContext, String) -> BoxFuture<'static, Result<String, RpcError>> + Send + Sync>;

/// Named endpoints callable with a raw string payload.
#[derive(Default)]
pub struct RpcRegistry {
    handlers: HashMap<String, Handler>,
}

impl RpcRegistry {
    pub fn new() -> Self { Self::default() }

    pub fn register<F, Fut>(&mut self, name: &str, handler: F) -> Result<(), RegistryError>
    where
        F: Fn(RpcContext, String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, RpcError>> + Send + 'static,
    {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.handlers.contains_key(name) {
            return Err(RegistryError::Duplicate(name.to_owned()));
        }

        let boxed: Handler =
            Arc::new(move |ctx: RpcContext, payload: String| handler(ctx, payload).boxed());
        self.handlers.insert(name.to_owned(), boxed);
        Ok(())
    }

    pub async fn call(
        &self,
        name: &str,
        ctx: RpcContext,
        payload: String,
    ) -> Result<String, RpcError> {
        let Some(handler) = self.handlers.get(name) else {
            return Err(RpcError::not_found_rpc());
        };
        handler(ctx, payload).await
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Register every endpoint this service exposes.
pub fn init_module<R, S>(
    registry: &mut RpcRegistry,
    verifier: Arc<Verifier<R, S>>,
) -> Result<(), RegistryError>
where
    R: ArtifactResolver + 'static,
    S: AuditSink + 'static,
{
    let started = Instant::now();

    registry.register(CHECKSUM_RPC, move |ctx, payload| {
        let verifier = Arc::clone(&verifier);
        async move { rpc_checksum(&verifier, &ctx, &payload).await }
    })?;

    tracing::info!(elapsed_ms = started.elapsed().as_millis() as u64, "module loaded");
    Ok(())
}
