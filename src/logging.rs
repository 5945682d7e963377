//! ログ初期化
//!
//! `RUST_LOG` があればそれに従い、なければ info（`--verbose` で debug）。
//! 画面向けの出力は stdout、ログは stderr に分ける。

use crate::error::{LabError, Result};
use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|e| LabError::Logging(e.to_string()))
}
