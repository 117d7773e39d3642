use std::path::PathBuf;

use bitlang_bytecode::{Container, dump, listing};

use super::{CliError, fail, read_bytes};

pub struct DumpArgs {
    pub bytecode_path: PathBuf,
    pub json: bool,
}

pub fn run(args: DumpArgs) {
    match render(&args) {
        Ok(text) => print!("{}", text),
        Err(e) => fail(e),
    }
}

pub fn render(args: &DumpArgs) -> Result<String, CliError> {
    let bytes = read_bytes(&args.bytecode_path)?;
    let container = Container::from_bytes(&bytes)?;

    if args.json {
        let mut text = serde_json::to_string_pretty(&listing(&container))?;
        text.push('\n');
        return Ok(text);
    }
    Ok(dump(&container))
}
