use crate::err::*;
use crate::types::*;

/// Everything the child needs to replace its image
///
/// Borrowed and pre-built: the child of vfork cannot allocate, so the null-terminated pointer
/// arrays execve() wants must exist before the spawn starts.
#[derive(Clone, Copy, Debug)]
pub struct SpawnRequest<'a> {
    path: &'a CStr,
    argv: &'a [*const c_char],
    envp: &'a [*const c_char],
    cwd: Option<&'a CStr>,
}

impl<'a> SpawnRequest<'a> {
    /// Returns EINVAL unless both `argv` and `envp` end with a null pointer.
    ///
    /// # Safety
    ///
    /// Every pointer in `argv` and `envp` before the terminating null must point to a
    /// null-terminated string that stays valid for `'a`.
    pub unsafe fn new(
        path: &'a CStr,
        argv: &'a [*const c_char],
        envp: &'a [*const c_char],
    ) -> Result<Self, Errno> {
        if !is_null_terminated(argv) || !is_null_terminated(envp) {
            return Err(Errno::EINVAL);
        }

        Ok(Self {
            path,
            argv,
            envp,
            cwd: None,
        })
    }

    /// Working directory the child switches to right before execve()
    pub fn with_cwd(mut self, cwd: &'a CStr) -> Self {
        self.cwd = Some(cwd);
        self
    }

    pub fn path(&self) -> &'a CStr {
        self.path
    }

    pub fn cwd(&self) -> Option<&'a CStr> {
        self.cwd
    }

    pub fn argv_ptr(&self) -> *const *const c_char {
        self.argv.as_ptr()
    }

    pub fn envp_ptr(&self) -> *const *const c_char {
        self.envp.as_ptr()
    }

    pub fn args(&self) -> impl Iterator<Item = &'a CStr> + 'a {
        cstrs(self.argv)
    }

    pub fn env(&self) -> impl Iterator<Item = &'a CStr> + 'a {
        cstrs(self.envp)
    }
}

fn is_null_terminated(ptrs: &[*const c_char]) -> bool {
    ptrs.last().is_some_and(|p| p.is_null())
}

fn cstrs<'a>(ptrs: &'a [*const c_char]) -> impl Iterator<Item = &'a CStr> + 'a {
    ptrs.iter()
        .take_while(|p| !p.is_null())
        // SAFETY: SpawnRequest::new's contract covers every pointer before the null
        .map(|&p| unsafe { CStr::from_ptr(p) })
}
