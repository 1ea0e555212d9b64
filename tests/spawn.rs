use std::ffi::CStr;
use std::iter::once;
use std::ptr::null;
use vspawn::coordinator::{Coordinator, ExecArgs};
use vspawn::err::{Errno, SpawnError};
use vspawn::os::{
    Disposition, ForkResult, block_signals, current_signal_mask, exit, fork, query_disposition,
    set_signal_mask, waitpid,
};
use vspawn::spawn::*;
use vspawn::types::{Signal, c_char, sigset_t};

fn run_in(
    mode: SpawnMode,
    program: &CStr,
    args: &[&CStr],
    cwd: Option<&CStr>,
) -> Result<ExitStatus, SpawnError> {
    let argv: Vec<*const c_char> = once(program)
        .chain(args.iter().copied())
        .map(CStr::as_ptr)
        .chain(once(null()))
        .collect();
    let envp = [null()];

    let mut request = unsafe { SpawnRequest::new(program, &argv, &envp) }.unwrap();
    if let Some(cwd) = cwd {
        request = request.with_cwd(cwd);
    }
    spawn_and_wait_in(&LinuxOs, &request, mode)
}

fn run(program: &CStr, args: &[&CStr]) -> Result<ExitStatus, SpawnError> {
    run_in(SpawnMode::Vfork, program, args, None)
}

fn sh(script: &CStr) -> Result<ExitStatus, SpawnError> {
    run(c"/bin/sh", &[c"-c", script])
}

#[test]
fn test_true_with_empty_environment() {
    assert_eq!(run(c"/bin/true", &[]), Ok(ExitStatus::Exited(0)));
}

#[test]
fn test_exit_codes_pass_through() {
    for (script, code) in [(c"exit 1", 1), (c"exit 2", 2), (c"exit 3", 3), (c"exit 255", 255)] {
        assert_eq!(sh(script), Ok(ExitStatus::Exited(code)));
    }
}

#[test]
fn test_killed_by_signal() {
    assert_eq!(sh(c"kill -TERM $$"), Ok(ExitStatus::Signaled(15)));
    assert_eq!(sh(c"kill -KILL $$"), Ok(ExitStatus::Signaled(9)));
}

#[test]
fn test_missing_program_is_replace_failure() {
    let failure = ChildFailure::new(ChildStage::Replace, Errno::ENOENT);
    let outcome = run(c"/nonexistent/vspawn-helper", &[]);
    assert_eq!(outcome, Err(SpawnError::ChildSetupFailed(failure)));
    assert!(outcome.unwrap_err().is_replace_failure());
}

#[test]
fn test_not_executable_is_replace_failure() {
    let failure = ChildFailure::new(ChildStage::Replace, Errno::EACCES);
    assert_eq!(
        run(c"/etc/passwd", &[]),
        Err(SpawnError::ChildSetupFailed(failure))
    );
}

#[test]
fn test_cwd_is_applied() {
    let outcome = run_in(
        SpawnMode::Vfork,
        c"/bin/sh",
        &[c"-c", c"test \"$(pwd)\" = /"],
        Some(c"/"),
    );
    assert_eq!(outcome, Ok(ExitStatus::Exited(0)));
}

#[test]
fn test_bad_cwd_is_prepare_failure() {
    let failure = ChildFailure::new(ChildStage::Prepare, Errno::ENOENT);
    let outcome = run_in(SpawnMode::Vfork, c"/bin/true", &[], Some(c"/nonexistent/dir"));
    assert_eq!(outcome, Err(SpawnError::ChildSetupFailed(failure)));
}

#[test]
fn test_fork_mode() {
    assert_eq!(
        run_in(SpawnMode::Fork, c"/bin/sh", &[c"-c", c"exit 4"], None),
        Ok(ExitStatus::Exited(4))
    );
    let failure = ChildFailure::new(ChildStage::Replace, Errno::ENOENT);
    assert_eq!(
        run_in(SpawnMode::Fork, c"/nonexistent/vspawn-helper", &[], None),
        Err(SpawnError::ChildSetupFailed(failure))
    );
}

#[test]
fn test_mask_unchanged_on_every_path() {
    // Each test has its own thread; blocking here does not leak into other tests.
    let usr1 = sigset_t::new_empty_set() | Signal::SIGUSR1;
    let original = block_signals(&usr1).unwrap();
    let before = current_signal_mask().unwrap();

    let _ = run(c"/bin/true", &[]);
    assert_eq!(current_signal_mask().unwrap(), before);

    let _ = run(c"/nonexistent/vspawn-helper", &[]);
    assert_eq!(current_signal_mask().unwrap(), before);

    let _ = run_in(SpawnMode::Vfork, c"/bin/true", &[], Some(c"/nonexistent/dir"));
    assert_eq!(current_signal_mask().unwrap(), before);

    set_signal_mask(&original).unwrap();
}

#[test]
fn test_ignored_signal_stays_ignored_in_target() {
    // Process-wide; no other test in this binary relies on SIGUSR2.
    unsafe { libc::signal(libc::SIGUSR2, libc::SIG_IGN) };

    // An ignored SIGUSR2 cannot kill the shell, so it reaches `exit 5`
    assert_eq!(sh(c"kill -USR2 $$; exit 5"), Ok(ExitStatus::Exited(5)));
}

extern "C" fn on_signal(_: libc::c_int) {}

#[test]
fn test_reset_turns_handlers_into_default() {
    // Introspect in a forked copy so the handlers never touch the test process
    match unsafe { fork() }.unwrap() {
        ForkResult::Child => {
            let handler = on_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
            unsafe {
                libc::signal(libc::SIGUSR1, handler);
                libc::signal(libc::SIGHUP, handler);
                libc::signal(libc::SIGPIPE, libc::SIG_IGN);
            }

            let installed = query_disposition(libc::SIGUSR1).is_ok_and(Disposition::is_handler);
            let reset = reset_dispositions(&LinuxOs).is_ok();
            let usr1 = query_disposition(libc::SIGUSR1);
            let hup = query_disposition(libc::SIGHUP);
            let pipe = query_disposition(libc::SIGPIPE);

            let ok = installed
                && reset
                && usr1 == Ok(Disposition::Default)
                && hup == Ok(Disposition::Default)
                && pipe == Ok(Disposition::Ignore);
            exit(if ok { 0 } else { 1 })
        }
        ForkResult::Parent(pid) => {
            let status = waitpid(pid).unwrap();
            assert_eq!(ExitStatus::from_raw(status), Some(ExitStatus::Exited(0)));
        }
    }
}

#[test]
fn test_concurrent_spawners() {
    let coordinators: Vec<Coordinator> = (0..4)
        .map(|_| Coordinator::start(ExecArgs::new("/bin/true").unwrap(), SpawnMode::Vfork).unwrap())
        .collect();

    for coordinator in coordinators {
        assert_eq!(coordinator.join(), Ok(Ok(ExitStatus::Exited(0))));
    }
}

#[test]
fn test_spawner_holds_permit_during_cycle() {
    let mut args = ExecArgs::new("/bin/sh").unwrap();
    args.push_arg("-c").unwrap();
    args.push_arg("sleep 1").unwrap();

    let (seen, outcome) = Coordinator::run_concurrently(args, SpawnMode::Vfork, || {
        // Poll until the spawner is in its cycle
        (0..200).any(|_| {
            std::thread::sleep(std::time::Duration::from_millis(5));
            SPAWN_LOCK.spawns_in_flight() > 0
        })
    })
    .unwrap();

    assert!(seen);
    assert_eq!(outcome, Ok(ExitStatus::Exited(0)));
}
