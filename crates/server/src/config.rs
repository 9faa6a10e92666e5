use anyhow::Result;
use apphub_aggregator::{RootLayout, WalkOrder};
use clap::{Args, ValueEnum};
use std::env;
use std::path::PathBuf;

pub(crate) const BIND_ENV: &str = "APPHUB_BIND";
pub(crate) const APPS_PATH_ENV: &str = "APPHUB_APPS_PATH";
pub(crate) const DATA_PATH_ENV: &str = "APPHUB_DATA_PATH";
pub(crate) const STATIC_PATH_ENV: &str = "APPHUB_STATIC_PATH";

const DEFAULT_BIND: &str = "0.0.0.0:8080";
const DEFAULT_APPS_PATH: &str = "./apps";
const DEFAULT_STATIC_PATH: &str = "./static";

#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    /// HTTP listen address (overrides APPHUB_BIND)
    #[arg(long)]
    pub bind: Option<String>,

    /// Apps directory, one subdirectory per application (overrides APPHUB_APPS_PATH)
    #[arg(long)]
    pub apps_path: Option<PathBuf>,

    /// Serve every app from this single directory instead (overrides APPHUB_DATA_PATH)
    #[arg(long)]
    pub data_path: Option<PathBuf>,

    /// Path to static web UI content (overrides APPHUB_STATIC_PATH)
    #[arg(long)]
    pub static_path: Option<PathBuf>,

    /// Sibling order used when walking fragment trees
    #[arg(long, value_enum, default_value_t = WalkOrderArg::Lexicographic)]
    pub walk_order: WalkOrderArg,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum WalkOrderArg {
    #[default]
    Lexicographic,
    Filesystem,
}

impl WalkOrderArg {
    fn as_str(self) -> &'static str {
        match self {
            Self::Lexicographic => "lexicographic",
            Self::Filesystem => "filesystem",
        }
    }
}

impl From<WalkOrderArg> for WalkOrder {
    fn from(value: WalkOrderArg) -> Self {
        match value {
            WalkOrderArg::Lexicographic => WalkOrder::Lexicographic,
            WalkOrderArg::Filesystem => WalkOrder::Filesystem,
        }
    }
}

/// Startup configuration, fixed for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub layout: RootLayout,
    pub static_path: PathBuf,
    pub walk_order: WalkOrder,
    walk_order_name: &'static str,
}

impl ServerConfig {
    pub fn new(bind: impl Into<String>, layout: RootLayout, static_path: impl Into<PathBuf>) -> Self {
        Self {
            bind: bind.into(),
            layout,
            static_path: static_path.into(),
            walk_order: WalkOrder::Lexicographic,
            walk_order_name: WalkOrderArg::Lexicographic.as_str(),
        }
    }

    /// Flags win over environment variables, which win over defaults.
    pub fn from_args(args: ServeArgs) -> Result<Self> {
        let bind = args
            .bind
            .or_else(|| env_value(BIND_ENV))
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        if bind.trim().is_empty() {
            anyhow::bail!("bind address must be non-empty");
        }

        let data_path = args
            .data_path
            .or_else(|| env_value(DATA_PATH_ENV).map(PathBuf::from));
        let layout = match data_path {
            Some(data_root) => RootLayout::SingleTenant { data_root },
            None => RootLayout::MultiTenant {
                apps_root: args
                    .apps_path
                    .or_else(|| env_value(APPS_PATH_ENV).map(PathBuf::from))
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_APPS_PATH)),
            },
        };

        let static_path = args
            .static_path
            .or_else(|| env_value(STATIC_PATH_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_PATH));

        Ok(Self {
            bind,
            layout,
            static_path,
            walk_order: args.walk_order.into(),
            walk_order_name: args.walk_order.as_str(),
        })
    }

    /// Effective settings as `(flag, value)` pairs, for the startup log.
    pub fn describe(&self) -> Vec<(&'static str, String)> {
        let mut out = vec![("bind", self.bind.clone())];
        match &self.layout {
            RootLayout::MultiTenant { apps_root } => {
                out.push(("apps-path", apps_root.display().to_string()));
            }
            RootLayout::SingleTenant { data_root } => {
                out.push(("data-path", data_root.display().to_string()));
            }
        }
        out.push(("static-path", self.static_path.display().to_string()));
        out.push(("walk-order", self.walk_order_name.to_string()));
        out
    }
}

fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
