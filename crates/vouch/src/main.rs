use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use vouch::{
    CHECKSUM_RPC, Config, RpcContext, RpcError, RpcRegistry, VerificationRequest, Verifier,
    init_module,
};
use vouch_audit::SledAuditLog;
use vouch_store::{ArtifactResolver, CachedResolver};

use crate::cli::{App, Commands};

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    let app = App::parse();
    match run(app).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<RpcError>() {
                Some(rpc) => match serde_json::to_string(rpc) {
                    Ok(json) => eprintln!("{json}"),
                    Err(_) => eprintln!("{rpc}"),
                },
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(app: App) -> anyhow::Result<()> {
    let config = Config::load(app.config.as_deref()).context("failed to load configuration")?;
    vouch::logging::init(app.log.as_deref().unwrap_or(&config.log));
    tracing::debug!(base_path = ?config.file_base_path, cache = config.cache, "configuration loaded");

    match app.cmd {
        Commands::Rpc(arg) => {
            let payload = match arg.payload {
                Some(payload) => payload,
                None => read_stdin()?,
            };
            call(&config, &arg.name, payload).await
        }
        Commands::Checksum(arg) => {
            let request = VerificationRequest {
                kind:          arg.kind,
                version:       arg.version,
                expected_hash: arg.hash,
            };
            let payload = serde_json::to_string(&request)?;
            call(&config, CHECKSUM_RPC, payload).await
        }
        Commands::Audit(arg) => {
            let log = open_journal(&config)?;
            for entry in log.recent(arg.limit)? {
                println!("{}", serde_json::to_string(&entry)?);
            }
            Ok(())
        }
    }
}

async fn call(config: &Config, name: &str, payload: String) -> anyhow::Result<()> {
    let registry = build_registry(config)?;

    let ctx = RpcContext::new().timeout(config.request_timeout());
    let cancel = ctx.cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupted, cancelling request");
            cancel.cancel();
        }
    });

    let body = registry.call(name, ctx, payload).await?;
    println!("{body}");
    Ok(())
}

fn build_registry(config: &Config) -> anyhow::Result<RpcRegistry> {
    let store = config.artifact_store().map_err(RpcError::from)?;
    let audit = open_journal(config)?;

    let mut registry = RpcRegistry::new();
    if config.cache {
        register(&mut registry, CachedResolver::new(store), audit)?;
    } else {
        register(&mut registry, store, audit)?;
    }
    Ok(registry)
}

fn register<R>(registry: &mut RpcRegistry, resolver: R, audit: SledAuditLog) -> anyhow::Result<()>
where
    R: ArtifactResolver + 'static,
{
    init_module(registry, Arc::new(Verifier::new(resolver, audit)))?;
    Ok(())
}

fn open_journal(config: &Config) -> anyhow::Result<SledAuditLog> {
    SledAuditLog::open(&config.audit_path).with_context(|| {
        format!("failed to open audit journal at {}", config.audit_path.display())
    })
}

fn read_stdin() -> anyhow::Result<String> {
    let mut payload = String::new();
    std::io::stdin()
        .read_to_string(&mut payload)
        .context("failed to read payload from stdin")?;
    Ok(payload)
}
