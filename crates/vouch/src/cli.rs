use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Clone, Debug, Parser)]
#[command(name = "vouch", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// Configuration file (defaults to ./vouch.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Tracing filter, overrides the configured one
    #[arg(long, global = true)]
    pub log: Option<String>,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    #[command(name = "rpc", about = "Call a registered endpoint with a raw JSON payload")]
    Rpc(RpcArg),
    #[command(alias = "c", name = "checksum", about = "Verify an artifact", disable_version_flag = true)]
    Checksum(ChecksumArg),
    #[command(alias = "a", name = "audit", about = "Show recent audit records")]
    Audit(AuditArg),
}

#[derive(Clone, Debug, Args)]
pub struct RpcArg {
    pub name:    String,
    /// Payload; read from stdin when omitted
    pub payload: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ChecksumArg {
    #[arg(long = "type")]
    pub kind:    Option<String>,
    #[arg(long)]
    pub version: Option<String>,
    /// Expected digest; content is withheld unless it matches
    #[arg(long)]
    pub hash:    Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AuditArg {
    #[arg(long, short = 'n', default_value_t = 20)]
    pub limit: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        use clap::CommandFactory;
        App::command().debug_assert();
    }

    #[test]
    fn test_checksum_flags() {
        let app = App::parse_from(["vouch", "checksum", "--type", "core", "--hash", "abc"]);
        let Commands::Checksum(arg) = app.cmd else {
            panic!("expected checksum");
        };
        assert_eq!(arg.kind.as_deref(), Some("core"));
        assert_eq!(arg.version, None);
        assert_eq!(arg.hash.as_deref(), Some("abc"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let app = App::parse_from(["vouch", "audit", "-n", "5", "--config", "x.toml"]);
        assert_eq!(app.config, Some(PathBuf::from("x.toml")));
        assert!(matches!(app.cmd, Commands::Audit(AuditArg { limit: 5 })));
    }
}
