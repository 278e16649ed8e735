//! XDG Base Directory Specification support.
//!
//! [`BaseDirs`] resolves each base directory from its environmental variable, falling back to
//! a default computed from the current user's home directory or uid when the variable is unset
//! or empty. Values are returned verbatim: lists are not split, paths are not validated.
//!
//! ```rust
//! use basedirs::os::env::Env;
//! use basedirs::os::user::CurrentUser;
//! use basedirs::xdg::{BaseDirs, Platform};
//!
//! let env = Env::empty().with("XDG_CONFIG_HOME", "/custom/cfg");
//! let dirs = BaseDirs::with_user(env, CurrentUser::new("/home/alice", Some("1000")))
//!     .with_platform(Platform::Unix);
//!
//! assert_eq!(dirs.config_home(), "/custom/cfg");
//! assert_eq!(dirs.cache_home(), "/home/alice/.cache");
//! assert_eq!(dirs.runtime_dir(), "run/user/1000");
//! ```

use std::sync::OnceLock;

use crate::os::env::{EnvSource, ProcessEnv};
use crate::os::user::{CurrentUser, SystemUser, UserError, UserLookup};

mod global;
mod platform;

pub use global::{
    cache_home, config_dirs, config_home, data_dirs, data_home, global, init_or_exit, runtime_dir,
    state_home,
};
pub use platform::{Platform, SystemDefaults};

/// Resolver for XDG base directories.
///
/// The user identity is looked up once, on construction. The home directory is seeded from
/// `$HOME` at that point and cached once it is non-empty, so later changes to the environment
/// do not move it. Everything else is read from `E` on every call.
#[derive(Debug)]
pub struct BaseDirs<E = ProcessEnv> {
    env: E,
    user: CurrentUser,
    platform: Platform,
    defaults: SystemDefaults,
    home: OnceLock<String>,
}

impl BaseDirs<ProcessEnv> {
    /// Resolver over the process environment and the host's user database.
    pub fn new() -> Result<Self, UserError> {
        Self::from_lookup(ProcessEnv, &SystemUser)
    }
}

impl<E: EnvSource> BaseDirs<E> {
    /// Resolver over `env`, with the identity reported by `lookup`.
    pub fn from_lookup(env: E, lookup: &impl UserLookup) -> Result<Self, UserError> {
        let user = lookup.current_user()?;
        Ok(Self::with_user(env, user))
    }

    /// Resolver over `env` with an already known identity.
    pub fn with_user(env: E, user: CurrentUser) -> Self {
        let home = OnceLock::new();
        if let Some(seed) = env.var_non_empty("HOME") {
            let _ = home.set(seed);
        }
        Self {
            env,
            user,
            platform: Platform::current(),
            defaults: SystemDefaults::default(),
            home,
        }
    }

    /// Resolve paths using `platform` conventions.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Root system-wide and runtime defaults according to `defaults`.
    pub fn with_system_defaults(mut self, defaults: SystemDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn user(&self) -> &CurrentUser {
        &self.user
    }

    /// `$XDG_DATA_HOME`, defaulting to `$HOME/.local/share`.
    pub fn data_home(&self) -> String {
        self.lookup("XDG_DATA_HOME", || self.under_home(&[".local", "share"]))
    }

    /// `$XDG_CONFIG_HOME`, defaulting to `$HOME/.config`.
    pub fn config_home(&self) -> String {
        self.lookup("XDG_CONFIG_HOME", || self.under_home(&[".config"]))
    }

    /// `$XDG_DATA_DIRS`, defaulting to `usr/local/share:usr/share`.
    ///
    /// The list is returned as one string, joined with the platform list separator.
    pub fn data_dirs(&self) -> String {
        self.lookup("XDG_DATA_DIRS", || {
            let mut list = String::new();
            list.push_str(&self.system(&["usr", "local", "share"]));
            list.push(self.platform.list_separator());
            list.push_str(&self.system(&["usr", "share"]));
            list
        })
    }

    /// `$XDG_CONFIG_DIRS`, defaulting to `etc/xdg`.
    pub fn config_dirs(&self) -> String {
        self.lookup("XDG_CONFIG_DIRS", || self.system(&["etc", "xdg"]))
    }

    /// `$XDG_CACHE_HOME`, defaulting to `$HOME/.cache`.
    pub fn cache_home(&self) -> String {
        self.lookup("XDG_CACHE_HOME", || self.under_home(&[".cache"]))
    }

    /// `$XDG_STATE_HOME`, defaulting to `$HOME/.local/state`.
    pub fn state_home(&self) -> String {
        self.lookup("XDG_STATE_HOME", || self.under_home(&[".local", "state"]))
    }

    /// `$XDG_RUNTIME_DIR`, defaulting to `run/user/$UID`.
    ///
    /// Ownership and the `0700` mode required by XDG are not checked.
    pub fn runtime_dir(&self) -> String {
        self.lookup("XDG_RUNTIME_DIR", || {
            let uid = self.user.uid.as_deref().unwrap_or_default();
            self.system(&["run", "user", uid])
        })
    }

    fn lookup(&self, key: &str, fallback: impl FnOnce() -> String) -> String {
        self.env.var_non_empty(key).unwrap_or_else(|| {
            let path = fallback();
            tracing::debug!(key, path = %path, "environmental variable unset, using default");
            path
        })
    }

    fn under_home(&self, parts: &[&str]) -> String {
        let home = self.home_dir();
        self.platform
            .join(std::iter::once(home.as_str()).chain(parts.iter().copied()))
    }

    fn system(&self, parts: &[&str]) -> String {
        let root = match self.defaults {
            SystemDefaults::Relative => "",
            SystemDefaults::Absolute => match self.platform {
                Platform::Unix => "/",
                Platform::Windows => "\\",
            },
        };
        self.platform
            .join(std::iter::once(root).chain(parts.iter().copied()))
    }

    fn home_dir(&self) -> String {
        if let Some(home) = self.home.get() {
            return home.clone();
        }

        let home = match self.platform {
            Platform::Windows => {
                let drive = self.env.var_non_empty("HOMEDRIVE").unwrap_or_default();
                let path = self.env.var_non_empty("HOMEPATH").unwrap_or_default();
                let joined = self.platform.join([drive.as_str(), path.as_str()]);
                if joined.is_empty() {
                    self.env.var_non_empty("USERPROFILE").unwrap_or_default()
                } else {
                    joined
                }
            }
            Platform::Unix => self.user.home_dir.clone(),
        };

        if home.is_empty() {
            return home;
        }
        self.home.get_or_init(|| home).clone()
    }
}
