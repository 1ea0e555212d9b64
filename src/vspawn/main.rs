mod cli;

use cli::{Cmd, RunOpts, USAGE};
use vspawn::coordinator::{Coordinator, ExecArgs};
use vspawn::err::*;
use vspawn::os::*;
use vspawn::spawn::SpawnMode;

const EXIT_USAGE: i32 = 2;

fn main() {
    let cmd = match Cmd::parse(std::env::args_os().skip(1)) {
        Ok(cmd) => cmd,
        Err(msg) => {
            eprint("ERROR: ");
            eprintln(msg);
            exit(EXIT_USAGE);
        }
    };

    match cmd {
        Cmd::Help => println(USAGE),
        Cmd::Run(opts) => cmd_run(opts),
    }
}

fn cmd_run(opts: RunOpts) {
    let args = opts.exec_args().or_abort("Argument contains a NUL byte");

    if opts.verbose {
        eprint_request(&args, opts.mode);
    }

    // Nothing else to do while the helper runs; join right away
    let status = Coordinator::start(args, opts.mode)
        .or_abort("Unable to start helper")
        .join()
        .or_abort("Unable to join helper")
        .or_abort("Unable to run helper");

    print("Helper: ");
    println(status);
}

fn eprint_request(args: &ExecArgs, mode: SpawnMode) {
    eprint("vspawn: ");
    eprint(mode.name());
    eprint(" ");
    eprintln(args.path());

    for (i, arg) in args.args().enumerate() {
        eprint("  argv[");
        eprint(i);
        eprint("] = ");
        eprintln(arg);
    }
    for entry in args.env() {
        eprint("  env ");
        eprintln(entry);
    }
    if let Some(cwd) = args.cwd() {
        eprint("  cwd ");
        eprintln(cwd);
    }
}
