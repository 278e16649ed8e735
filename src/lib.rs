//! Basedirs - XDG Base Directory resolution.
//!
//! Each base directory comes from its `XDG_*` environmental variable, or from a default derived
//! from the current user's home directory and uid when the variable is unset or empty.
//!
//! ```rust,no_run
//! let config = basedirs::xdg::config_home();
//! let runtime = basedirs::xdg::runtime_dir();
//! println!("{config} {runtime}");
//! ```
//!
//! Nothing is created or checked on disk.

pub mod os;
pub mod xdg;
