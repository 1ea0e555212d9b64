use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;
use vspawn::constants::DEFAULT_PROGRAM;
use vspawn::coordinator::ExecArgs;
use vspawn::err::*;
use vspawn::spawn::SpawnMode;

pub const USAGE: &str = r#"Usage: vspawn [OPTIONS] [--] [PROGRAM [ARG]...]

Runs PROGRAM from a dedicated spawner thread through vfork, waits for it, and
reports how it terminated.  Without PROGRAM, runs /bin/ls with an empty
environment.

OPTIONS:
-v, --verbose        Print the request and spawn mode to stderr before running
    --fork           Use fork instead of vfork
-C, --cwd DIR        Change to DIR in the child before executing PROGRAM
-e, --env KEY=VALUE  Add KEY=VALUE to the environment of PROGRAM (repeatable)
    --inherit-env    Start from this process's environment instead of an empty one
-h, --help           Print this help

EXIT STATUS:
0  PROGRAM ran and its termination was reported
1  The spawn protocol or the spawner thread failed
2  Invalid usage"#;

pub enum Cmd {
    Help,
    Run(RunOpts),
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunOpts {
    pub verbose: bool,
    pub mode: SpawnMode,
    pub cwd: Option<OsString>,
    pub env: Vec<OsString>,
    pub inherit_env: bool,
    pub program: Option<OsString>,
    pub args: Vec<OsString>,
}

impl Cmd {
    /// Parse everything after argv[0]
    ///
    /// The first non-option argument (or anything after `--`) is the program; the rest of the
    /// command line belongs to it untouched.
    pub fn parse(mut argv: impl Iterator<Item = OsString>) -> Result<Self, &'static str> {
        let mut opts = RunOpts::default();

        while let Some(arg) = argv.next() {
            match arg.as_encoded_bytes() {
                b"-h" | b"--help" => return Ok(Self::Help),
                b"-v" | b"--verbose" => opts.verbose = true,
                b"--fork" => opts.mode = SpawnMode::Fork,
                b"--inherit-env" => opts.inherit_env = true,
                b"-C" | b"--cwd" => {
                    opts.cwd = Some(argv.next().ok_or("-C requires a directory")?);
                }
                b"-e" | b"--env" => {
                    let entry = argv.next().ok_or("-e requires KEY=VALUE")?;
                    if !entry.as_encoded_bytes().contains(&b'=') {
                        return Err("-e value must be KEY=VALUE");
                    }
                    opts.env.push(entry);
                }
                b"--" => {
                    opts.program = argv.next();
                    break;
                }
                [b'-', _, ..] => return Err("Unknown option.  See `--help`"),
                _ => {
                    opts.program = Some(arg);
                    break;
                }
            }
        }

        opts.args.extend(argv);
        Ok(Self::Run(opts))
    }
}

impl RunOpts {
    /// Owned exec arguments: inherited environment first, so `-e` entries come later and win
    pub fn exec_args(&self) -> Result<ExecArgs, Errno> {
        let mut exec_args = match &self.program {
            Some(program) => ExecArgs::new(program.clone().into_vec())?,
            None => ExecArgs::new(DEFAULT_PROGRAM.to_bytes())?,
        };

        for arg in &self.args {
            exec_args.push_arg(arg.clone().into_vec())?;
        }

        if self.inherit_env {
            for (key, value) in std::env::vars_os() {
                let mut entry = key.into_vec();
                entry.push(b'=');
                entry.extend(value.into_vec());
                exec_args.push_env(entry)?;
            }
        }

        for entry in &self.env {
            exec_args.push_env(entry.clone().into_vec())?;
        }

        if let Some(cwd) = &self.cwd {
            exec_args.set_cwd(cwd.clone().into_vec())?;
        }

        Ok(exec_args)
    }
}
