//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use crate::commands::asm::AsmArgs;
use crate::commands::ast::AstArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::run::RunArgs;

/// Extension given to assembled containers when `-o` is absent.
const BYTECODE_EXTENSION: &str = "bc";

pub struct AsmParams {
    pub source_path: PathBuf,
    pub output: Option<PathBuf>,
}

impl AsmParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: required_path(m, "source_path"),
            output: m.get_one::<PathBuf>("output").cloned(),
        }
    }
}

impl From<AsmParams> for AsmArgs {
    fn from(p: AsmParams) -> Self {
        let output = p
            .output
            .unwrap_or_else(|| p.source_path.with_extension(BYTECODE_EXTENSION));
        Self {
            source_path: p.source_path,
            output,
        }
    }
}

pub struct RunParams {
    pub bytecode_path: PathBuf,
    pub fuel: Option<u32>,
    pub trace: bool,
}

impl RunParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            bytecode_path: required_path(m, "bytecode_path"),
            fuel: m.get_one::<u32>("fuel").copied(),
            trace: m.get_flag("trace"),
        }
    }
}

impl From<RunParams> for RunArgs {
    fn from(p: RunParams) -> Self {
        Self {
            bytecode_path: p.bytecode_path,
            fuel: p.fuel,
            trace: p.trace,
        }
    }
}

pub struct DumpParams {
    pub bytecode_path: PathBuf,
    pub json: bool,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            bytecode_path: required_path(m, "bytecode_path"),
            json: m.get_flag("json"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            bytecode_path: p.bytecode_path,
            json: p.json,
        }
    }
}

pub struct AstParams {
    pub source_path: PathBuf,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: required_path(m, "source_path"),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            source_path: p.source_path,
        }
    }
}

/// Positional paths are `.required(true)`, so clap has already rejected a
/// missing one.
fn required_path(m: &ArgMatches, id: &str) -> PathBuf {
    m.get_one::<PathBuf>(id)
        .cloned()
        .unwrap_or_else(|| unreachable!("clap enforces required `{id}`"))
}
