use std::path::PathBuf;

use bitlang_bytecode::ContainerError;
use bitlang_vm::RuntimeError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Assemble(#[from] bitlang_compiler::Error),

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error(transparent)]
    Vm(#[from] RuntimeError),

    #[error("failed to serialize listing: {0}")]
    Json(#[from] serde_json::Error),
}
