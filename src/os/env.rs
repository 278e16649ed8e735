use std::collections::HashMap;
use std::ffi::{OsStr, OsString};

/// Source of environmental variables.
///
/// Implemented by [`ProcessEnv`] (live reads) and [`Env`] (a snapshot), so resolvers can be
/// pointed at a fake environment in tests.
pub trait EnvSource {
    /// Raw value of `key`, or `None` if it is unset.
    fn var_os(&self, key: &str) -> Option<OsString>;

    /// Value of `key` as UTF-8, treating empty and non-UTF-8 values as unset.
    fn var_non_empty(&self, key: &str) -> Option<String> {
        let value = self.var_os(key)?;
        if value.is_empty() {
            return None;
        }
        match value.into_string() {
            Ok(value) => Some(value),
            Err(raw) => {
                tracing::warn!(key, value = ?raw, "ignoring non UTF-8 environmental variable");
                None
            }
        }
    }
}

impl<E: EnvSource + ?Sized> EnvSource for &E {
    fn var_os(&self, key: &str) -> Option<OsString> {
        (**self).var_os(key)
    }
}

/// Environment of the current process, read at call time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

/// Snapshot of environmental variables, which is safe to access on Windows: its
/// environmental variables are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct Env {
    keys: HashMap<OsString, OsString>,

    normalised_keys: HashMap<OsString, OsString>,
}

impl Env {
    /// Environment without any variables.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create new [`Env`] using `env` as existing environmental variables.
    pub fn new_from(env: HashMap<OsString, OsString>) -> Self {
        Self {
            normalised_keys: Env::normalize_map(&env),
            keys: env,
        }
    }

    /// Return `self` with `key` set to `value`.
    ///
    /// ```rust
    /// use std::ffi::OsStr;
    /// use basedirs::os::env::Env;
    ///
    /// let env = Env::empty().with("XDG_CONFIG_HOME", "/custom/cfg");
    /// assert_eq!(env.get_os("XDG_CONFIG_HOME"), Some(OsStr::new("/custom/cfg")));
    /// ```
    pub fn with(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        let key = key.into();
        let value = value.into();
        self.normalised_keys
            .insert(Env::normalize_key(&key), value.clone());
        self.keys.insert(key, value);
        self
    }

    /// Return `self` with `key` removed.
    pub fn without(mut self, key: impl AsRef<OsStr>) -> Self {
        let key = key.as_ref();
        self.keys.remove(key);
        self.normalised_keys.remove(&Env::normalize_key(key));
        self
    }

    fn normalize_key(key: impl AsRef<OsStr>) -> OsString {
        key.as_ref().to_ascii_uppercase()
    }

    fn normalize_map(keys: &HashMap<OsString, OsString>) -> HashMap<OsString, OsString> {
        keys.iter()
            .map(|(key, value)| (Env::normalize_key(key), value.clone()))
            .collect()
    }

    /// Get environmental variable pointed by `key`.
    ///
    /// # Returns
    /// `None` variant indicates missing key, `Some`: existing key.
    pub fn get_os(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        let key = key.as_ref();
        match self.keys.get(key) {
            Some(x) => Some(x),
            None if cfg!(windows) => self
                .normalised_keys
                .get(&Env::normalize_key(key))
                .map(|x| x.as_ref()),
            None => None,
        }
    }
}

impl EnvSource for Env {
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.get_os(key).map(OsStr::to_os_string)
    }
}

impl<K, V> FromIterator<(K, V)> for Env
where
    K: Into<OsString>,
    V: Into<OsString>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Env::new_from(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::{assert_none, assert_some_eq};

    #[test]
    fn missing_key_is_unset() {
        let env = Env::empty();
        assert_none!(env.get_os("HOME"));
        assert_none!(env.var_non_empty("HOME"));
    }

    #[test]
    fn builder_sets_and_removes() {
        let env = Env::empty().with("HOME", "/home/alice").with("SHELL", "/bin/sh");
        assert_some_eq!(env.var_non_empty("HOME"), "/home/alice");

        let env = env.without("HOME");
        assert_none!(env.get_os("HOME"));
        assert_some_eq!(env.var_non_empty("SHELL"), "/bin/sh");
    }

    #[test]
    fn empty_value_is_unset() {
        let env = Env::empty().with("XDG_CACHE_HOME", "");
        assert_some_eq!(env.get_os("XDG_CACHE_HOME"), OsStr::new(""));
        assert_none!(env.var_non_empty("XDG_CACHE_HOME"));
    }

    #[test]
    fn value_is_returned_verbatim() {
        let env: Env = [("XDG_DATA_DIRS", " /a:/b ")].into_iter().collect();
        assert_some_eq!(env.var_non_empty("XDG_DATA_DIRS"), " /a:/b ");
    }

    #[test]
    fn snapshot_from_map() {
        let env = Env::new_from(HashMap::from([("HOME".into(), "/home/alice".into())]));
        assert_some_eq!(env.var_non_empty("HOME"), "/home/alice");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_value_is_unset() {
        use std::os::unix::ffi::OsStringExt;

        let env = Env::empty().with("XDG_DATA_HOME", OsString::from_vec(vec![0x66, 0xff]));
        assert!(env.get_os("XDG_DATA_HOME").is_some());
        assert_none!(env.var_non_empty("XDG_DATA_HOME"));
    }

    #[cfg(windows)]
    #[test]
    fn keys_are_case_insensitive() {
        let env = Env::empty().with("UserProfile", r"C:\Users\alice");
        assert_some_eq!(env.var_non_empty("USERPROFILE"), r"C:\Users\alice");
    }

    #[cfg(unix)]
    #[test]
    fn keys_are_case_sensitive() {
        let env = Env::empty().with("Home", "/home/alice");
        assert_none!(env.get_os("HOME"));
    }
}
