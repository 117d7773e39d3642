use std::io::Write;
use std::path::PathBuf;

use bitlang_vm::{Fault, NoopTracer, PrintTracer, Tracer, Vm};

use super::{CliError, fail, read_bytes};

pub struct RunArgs {
    pub bytecode_path: PathBuf,
    pub fuel: Option<u32>,
    pub trace: bool,
}

/// Program output goes to stdout. A fault exits the process with its code.
pub fn run(args: RunArgs) {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = if args.trace {
        let mut tracer = PrintTracer::new();
        let result = execute(&args, &mut out, &mut tracer);
        tracer.print();
        result
    } else {
        execute(&args, &mut out, &mut NoopTracer)
    };

    match result {
        Ok(Ok(())) => {}
        Ok(Err(fault)) => {
            let _ = out.flush();
            tracing::debug!(pc = fault.pc, code = fault.code().as_u8(), "vm fault");
            eprintln!("error: {}", fault);
            std::process::exit(fault.code().as_u8().into());
        }
        Err(e) => fail(e),
    }
}

/// Load and run. The outer error is a setup failure, the inner one a fault
/// raised by the program.
pub fn execute<W: Write, T: Tracer>(
    args: &RunArgs,
    out: &mut W,
    tracer: &mut T,
) -> Result<Result<(), Fault>, CliError> {
    let bytes = read_bytes(&args.bytecode_path)?;

    let mut builder = Vm::builder();
    if let Some(fuel) = args.fuel {
        builder = builder.exec_fuel(fuel);
    }
    let mut vm = builder.build()?;
    vm.load(&bytes)?;

    Ok(vm.run_with(out, tracer))
}
