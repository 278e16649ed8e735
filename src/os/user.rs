//! Identity of the user running the current process.

use std::io;

use thiserror::Error;

use crate::os::env::{EnvSource, ProcessEnv};

/// Home directory and user identifier of the current user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrentUser {
    /// Home directory, as reported by the host.
    pub home_dir: String,
    /// Numeric user id on Unix-like systems, `None` where there is no such thing.
    pub uid: Option<String>,
}

impl CurrentUser {
    pub fn new(home_dir: impl Into<String>, uid: Option<impl Into<String>>) -> Self {
        Self {
            home_dir: home_dir.into(),
            uid: uid.map(Into::into),
        }
    }
}

/// Errors encountered when looking up the current user.
#[derive(Debug, Error)]
pub enum UserError {
    /// There is no password database entry for `uid`.
    #[error("no user entry for uid {uid}")]
    NotFound { uid: String },

    /// The host lookup itself failed.
    #[error("failed to look up current user: {0}")]
    Lookup(#[from] io::Error),

    /// The password database entry has a home directory which is not UTF-8.
    #[error("home directory of uid {uid} is not an UTF-8 string")]
    NonUtf8Home { uid: String },

    /// Environment-based lookup found no home directory.
    #[error("neither `$HOME` nor `$USERPROFILE` is set")]
    NoHome,
}

/// Capability to report the current user's identity.
pub trait UserLookup {
    fn current_user(&self) -> Result<CurrentUser, UserError>;
}

/// A fixed identity looks itself up.
impl UserLookup for CurrentUser {
    fn current_user(&self) -> Result<CurrentUser, UserError> {
        Ok(self.clone())
    }
}

impl<L: UserLookup + ?Sized> UserLookup for &L {
    fn current_user(&self) -> Result<CurrentUser, UserError> {
        (**self).current_user()
    }
}

/// Lookup through the host's user database.
///
/// On Unix this is `getpwuid_r(getuid())`. Elsewhere it falls back to [`EnvUser`] over the
/// process environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SystemUser;

impl UserLookup for SystemUser {
    #[cfg(unix)]
    fn current_user(&self) -> Result<CurrentUser, UserError> {
        // SAFETY: `getuid` is always successful.
        let uid = unsafe { libc::getuid() };
        let home_dir = passwd_home(uid)?;
        tracing::debug!(uid, home_dir = %home_dir, "resolved current user");
        Ok(CurrentUser {
            home_dir,
            uid: Some(uid.to_string()),
        })
    }

    #[cfg(not(unix))]
    fn current_user(&self) -> Result<CurrentUser, UserError> {
        EnvUser::new(ProcessEnv).current_user()
    }
}

#[cfg(unix)]
fn passwd_home(uid: libc::uid_t) -> Result<String, UserError> {
    use std::ffi::CStr;
    use std::mem::MaybeUninit;

    let mut buf: Vec<libc::c_char> = Vec::with_capacity(suggested_buffer_size());
    loop {
        let mut pwd = MaybeUninit::<libc::passwd>::uninit();
        let mut result: *mut libc::passwd = std::ptr::null_mut();
        // SAFETY: `buf` holds `buf.capacity()` writable bytes and outlives `pwd`, whose string
        // fields point into it.
        let rc = unsafe {
            libc::getpwuid_r(
                uid,
                pwd.as_mut_ptr(),
                buf.as_mut_ptr(),
                buf.capacity(),
                &mut result,
            )
        };
        match rc {
            0 if result.is_null() => {
                return Err(UserError::NotFound {
                    uid: uid.to_string(),
                });
            }
            0 => {
                // SAFETY: `result` is non-null, so `pwd` was initialised by `getpwuid_r`.
                let pwd = unsafe { pwd.assume_init() };
                if pwd.pw_dir.is_null() {
                    return Ok(String::new());
                }
                // SAFETY: `pw_dir` is a NUL terminated string inside `buf`.
                let dir = unsafe { CStr::from_ptr(pwd.pw_dir) };
                return home_from_passwd(dir, uid);
            }
            libc::ERANGE => match grown_buffer_size(buf.capacity()) {
                Some(size) => buf.reserve_exact(size),
                None => return Err(io::Error::from_raw_os_error(libc::ERANGE).into()),
            },
            libc::EINTR => continue,
            errno => return Err(io::Error::from_raw_os_error(errno).into()),
        }
    }
}

/// Largest buffer handed to `getpwuid_r`.
#[cfg(unix)]
const MAX_PASSWD_BUFFER: usize = 1 << 20;

/// Capacity to retry with after `ERANGE`, or `None` once [`MAX_PASSWD_BUFFER`] is reached.
#[cfg(unix)]
fn grown_buffer_size(current: usize) -> Option<usize> {
    if current >= MAX_PASSWD_BUFFER {
        return None;
    }
    Some((current.max(512) * 2).min(MAX_PASSWD_BUFFER))
}

#[cfg(unix)]
fn home_from_passwd(dir: &std::ffi::CStr, uid: libc::uid_t) -> Result<String, UserError> {
    dir.to_str()
        .map(str::to_owned)
        .map_err(|_| UserError::NonUtf8Home {
            uid: uid.to_string(),
        })
}

#[cfg(unix)]
fn suggested_buffer_size() -> usize {
    // SAFETY: `sysconf` has no preconditions.
    match unsafe { libc::sysconf(libc::_SC_GETPW_R_SIZE_MAX) } {
        n if n > 0 => n as usize,
        _ => 1024,
    }
}

/// Lookup using environmental variables only, for hosts without a user database.
///
/// The home directory is `$HOME`, then `$USERPROFILE`. There is no uid.
#[derive(Debug, Clone, Default)]
pub struct EnvUser<E = ProcessEnv> {
    env: E,
}

impl<E: EnvSource> EnvUser<E> {
    pub fn new(env: E) -> Self {
        Self { env }
    }
}

impl<E: EnvSource> UserLookup for EnvUser<E> {
    fn current_user(&self) -> Result<CurrentUser, UserError> {
        let home_dir = self
            .env
            .var_non_empty("HOME")
            .or_else(|| self.env.var_non_empty("USERPROFILE"))
            .ok_or(UserError::NoHome)?;
        Ok(CurrentUser {
            home_dir,
            uid: None,
        })
    }
}
