use std::path::PathBuf;

use bitlang_bytecode::Container;

use super::{CliError, fail, read_source};

pub struct AsmArgs {
    pub source_path: PathBuf,
    pub output: PathBuf,
}

pub fn run(args: AsmArgs) {
    if let Err(e) = assemble_file(&args) {
        fail(e);
    }
}

pub fn assemble_file(args: &AsmArgs) -> Result<Container, CliError> {
    let source = read_source(&args.source_path)?;
    let container = bitlang_compiler::assemble(&source)?;

    std::fs::write(&args.output, container.to_bytes()).map_err(|source| CliError::Write {
        path: args.output.clone(),
        source,
    })?;
    tracing::info!(
        output = %args.output.display(),
        instructions = container.instruction_count(),
        "wrote container"
    );
    Ok(container)
}
