//! Process-wide resolver behind the free functions.

use std::sync::OnceLock;

use crate::os::env::ProcessEnv;
use crate::os::user::UserError;

use super::BaseDirs;

static GLOBAL: OnceLock<BaseDirs<ProcessEnv>> = OnceLock::new();

/// Process-wide [`BaseDirs`] over the live process environment.
///
/// Built on first use. If the current user cannot be determined the error is logged and the
/// process exits with status 1, since no base directory can be trusted without it.
pub fn global() -> &'static BaseDirs<ProcessEnv> {
    GLOBAL.get_or_init(|| init_or_exit(BaseDirs::new()))
}

/// Unwrap a freshly built resolver, or log `err` and exit the process with status 1.
pub fn init_or_exit<E>(result: Result<BaseDirs<E>, UserError>) -> BaseDirs<E> {
    match result {
        Ok(dirs) => dirs,
        Err(err) => {
            tracing::error!(%err, "cannot determine current user");
            eprintln!("fatal: {err}");
            std::process::exit(1)
        }
    }
}

/// See [`BaseDirs::data_home`].
pub fn data_home() -> String {
    global().data_home()
}

/// See [`BaseDirs::config_home`].
pub fn config_home() -> String {
    global().config_home()
}

/// See [`BaseDirs::data_dirs`].
pub fn data_dirs() -> String {
    global().data_dirs()
}

/// See [`BaseDirs::config_dirs`].
pub fn config_dirs() -> String {
    global().config_dirs()
}

/// See [`BaseDirs::cache_home`].
pub fn cache_home() -> String {
    global().cache_home()
}

/// See [`BaseDirs::runtime_dir`].
pub fn runtime_dir() -> String {
    global().runtime_dir()
}

/// See [`BaseDirs::state_home`].
pub fn state_home() -> String {
    global().state_home()
}
