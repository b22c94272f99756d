//! A subprocess invocation: program, ordered arguments and an optional
//! environment override.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment handed to a child process.
///
/// Built from a snapshot of the parent environment plus explicit overrides.
/// The parent process environment is never written to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    base: BTreeMap<OsString, OsString>,
    overrides: BTreeMap<OsString, OsString>,
}

impl Environment {
    /// Start from a snapshot of an existing environment.
    pub fn inherit(base: BTreeMap<OsString, OsString>) -> Self {
        Self {
            base,
            overrides: BTreeMap::new(),
        }
    }

    pub fn set(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        self.overrides.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        let key = key.as_ref();
        self.overrides
            .get(key)
            .or_else(|| self.base.get(key))
            .map(OsString::as_os_str)
    }

    /// Variables whose value differs from the inherited snapshot.
    pub fn overrides(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        self.overrides
            .iter()
            .filter(|(k, v)| self.base.get(*k) != Some(*v))
            .map(|(k, v)| (k.as_os_str(), v.as_os_str()))
    }

    /// The full variable set the child will see.
    pub fn resolved(&self) -> BTreeMap<OsString, OsString> {
        let mut vars = self.base.clone();
        vars.extend(
            self.overrides
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        vars
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
    env: Option<Environment>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Replace the inherited environment for this invocation only.
    pub fn with_env(mut self, env: Environment) -> Self {
        self.env = Some(env);
        self
    }

    pub fn get_program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    pub fn get_env(&self) -> Option<&Environment> {
        self.env.as_ref()
    }

    /// Program followed by its arguments, as the child sees `argv`.
    pub fn argv(&self) -> Vec<OsString> {
        std::iter::once(self.program.clone().into_os_string())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

impl fmt::Display for Invocation {
    /// Renders as a shell command line, prefixed by any environment overrides.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut words: Vec<String> = Vec::new();
        if let Some(env) = &self.env {
            for (key, value) in env.overrides() {
                words.push(format!(
                    "{}={}",
                    key.to_string_lossy(),
                    shell_quote(&value.to_string_lossy())
                ));
            }
        }
        for word in self.argv() {
            words.push(shell_quote(&word.to_string_lossy()).into_owned());
        }
        write!(f, "{}", words.join(" "))
    }
}

fn shell_quote(word: &str) -> Cow<'_, str> {
    let is_plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if is_plain {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(format!("'{}'", word.replace('\'', r"'\''")))
    }
}
