//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("bitlang")
        .about("Assembler and register VM for bitlang bytecode")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(asm_command())
        .subcommand(run_command())
        .subcommand(dump_command())
        .subcommand(ast_command())
}

pub fn asm_command() -> Command {
    Command::new("asm")
        .about("Assemble source into a bytecode container")
        .after_help(
            r#"EXAMPLES:
  bitlang asm hello.s                 # writes hello.bc
  bitlang asm hello.s -o out.bc"#,
        )
        .arg(source_path_arg())
        .arg(output_arg())
}

pub fn run_command() -> Command {
    Command::new("run")
        .about("Execute a bytecode container")
        .after_help(
            r#"EXAMPLES:
  bitlang run hello.bc
  bitlang run hello.bc --fuel 10000   # stop runaway loops
  bitlang run hello.bc --trace        # instruction trace on stderr

On a VM fault the process exits with the fault code."#,
        )
        .arg(bytecode_path_arg())
        .arg(fuel_arg())
        .arg(trace_arg())
}

pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Disassemble a bytecode container")
        .arg(bytecode_path_arg())
        .arg(json_arg())
}

pub fn ast_command() -> Command {
    Command::new("ast")
        .about("Show the parsed program")
        .arg(source_path_arg())
}
