//! `lizlint lsp`: serves the language server over stdio.

use miette::{IntoDiagnostic, Result};

pub fn run_lsp() -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("lizlint-lsp")
        .build()
        .into_diagnostic()?;

    runtime.block_on(lizlint_lsp::run());
    Ok(())
}
