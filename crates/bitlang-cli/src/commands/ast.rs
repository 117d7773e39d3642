use std::path::PathBuf;

use bitlang_compiler::Assembly;

use super::{CliError, fail, read_source};

pub struct AstArgs {
    pub source_path: PathBuf,
}

pub fn run(args: AstArgs) {
    match render(&args) {
        Ok(text) => print!("{}", text),
        Err(e) => fail(e),
    }
}

pub fn render(args: &AstArgs) -> Result<String, CliError> {
    let source = read_source(&args.source_path)?;
    let assembly = Assembly::parse(&source)?;
    Ok(assembly.render())
}
