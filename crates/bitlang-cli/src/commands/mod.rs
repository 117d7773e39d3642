pub mod asm;
pub mod ast;
pub mod dump;
mod error;
pub mod run;


pub use error::CliError;

use std::path::Path;

fn read_source(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::Read {
        path: path.to_owned(),
        source,
    })
}

/// Report a command error and exit. VM setup errors exit with their code.
fn fail(err: CliError) -> ! {
    eprintln!("error: {}", err);
    let status = match &err {
        CliError::Vm(e) => e.code().as_u8().into(),
        _ => 1,
    };
    std::process::exit(status);
}
