/// Path conventions a [`BaseDirs`](super::BaseDirs) resolves for.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Platform {
    /// `/` separated paths, `:` separated lists.
    Unix,
    /// `\` separated paths, `;` separated lists, home from `HOMEDRIVE`/`HOMEPATH`.
    Windows,
}

impl Platform {
    /// Platform this crate was compiled for.
    pub const fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    pub const fn path_separator(self) -> char {
        match self {
            Platform::Unix => '/',
            Platform::Windows => '\\',
        }
    }

    pub const fn list_separator(self) -> char {
        match self {
            Platform::Unix => ':',
            Platform::Windows => ';',
        }
    }

    /// Join `parts` with [`path_separator`](Self::path_separator).
    ///
    /// Empty parts are skipped, runs of separators collapse to one and a trailing separator is
    /// dropped, so `["/", "etc"]` gives `/etc` and `["/home/alice//", ".cache"]` gives
    /// `/home/alice/.cache`. A leading `\\` on Windows is kept for UNC paths.
    pub fn join<'a>(self, parts: impl IntoIterator<Item = &'a str>) -> String {
        let sep = self.path_separator();
        let mut out = String::new();
        for part in parts.into_iter().filter(|part| !part.is_empty()) {
            if !out.is_empty() && !out.ends_with(sep) {
                out.push(sep);
            }
            for ch in part.chars() {
                let unc_prefix = self == Platform::Windows && out.len() == 1;
                if ch == sep && out.ends_with(sep) && !unc_prefix {
                    continue;
                }
                out.push(ch);
            }
        }
        while out.len() > 1 && out.ends_with(sep) {
            out.pop();
        }
        out
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

/// How system-wide and runtime defaults are rooted.
///
/// `Relative` yields `usr/local/share`, `etc/xdg` and `run/user/{uid}` exactly as older
/// releases of this resolver did. `Absolute` yields `/usr/local/share`, `/etc/xdg` and
/// `/run/user/{uid}`, which is what the XDG Base Directory Specification prescribes.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum SystemDefaults {
    #[default]
    Relative,
    Absolute,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_skips_empty_parts() {
        assert_eq!(Platform::Unix.join(["run", "user", ""]), "run/user");
        assert_eq!(Platform::Unix.join(["", "etc", "xdg"]), "etc/xdg");
        assert_eq!(Platform::Unix.join(std::iter::empty()), "");
    }

    #[test]
    fn join_does_not_double_separators() {
        assert_eq!(Platform::Unix.join(["/home/alice/", ".config"]), "/home/alice/.config");
        assert_eq!(Platform::Unix.join(["/", "usr", "share"]), "/usr/share");
        assert_eq!(Platform::Unix.join(["/home", "/alice"]), "/home/alice");
        assert_eq!(Platform::Unix.join(["/home/a//", ".config"]), "/home/a/.config");
        assert_eq!(Platform::Unix.join(["//home///alice", "//.cache//"]), "/home/alice/.cache");
        assert_eq!(Platform::Unix.join(["/home/alice/"]), "/home/alice");
        assert_eq!(Platform::Unix.join(["/"]), "/");
    }

    #[test]
    fn join_keeps_unc_prefix() {
        assert_eq!(
            Platform::Windows.join([r"\\server\\share", "home"]),
            r"\\server\share\home"
        );
    }

    #[test]
    fn join_windows_drive_and_path() {
        assert_eq!(Platform::Windows.join(["C:", r"\Users\alice"]), r"C:\Users\alice");
        assert_eq!(Platform::Windows.join(["etc", "xdg"]), r"etc\xdg");
    }

    #[test]
    fn separators() {
        assert_eq!(Platform::Unix.list_separator(), ':');
        assert_eq!(Platform::Windows.list_separator(), ';');
    }
}
