use std::path::{Component, Path};

use regex::Regex;
use walkdir::WalkDir;

use crate::domain::Config;

/// Marker file that makes a directory a package.
const PACKAGE_MARKER: &str = "__init__.py";

/// Patterns excluded from every discovery, on top of the configured ones.
const ALWAYS_EXCLUDED: [&str; 2] = ["ez_setup", "*__pycache__"];

/// Include and exclude patterns for package discovery.
///
/// Patterns are shell-style wildcards (`*` matches any run of characters,
/// `?` a single character, `[...]` a character class) matched against the
/// full dotted package name. Excluding `tests` removes only the `tests`
/// package itself; use `tests.*` to exclude its children too. `ez_setup` and
/// `*__pycache__` are always excluded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    include: Vec<String>,
    exclude: Vec<String>,
}

impl Default for Discovery {
    fn default() -> Self {
        Self {
            include: vec!["*".to_string()],
            exclude: vec!["tests".to_string()],
        }
    }
}

impl Discovery {
    /// Creates a discovery with the given patterns.
    #[must_use]
    pub const fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    /// Takes the patterns from a project configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.include.clone(), config.exclude.clone())
    }
}

/// Compiled wildcard patterns.
struct Patterns(Vec<Regex>);

impl Patterns {
    fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self, DiscoveryError> {
        patterns
            .iter()
            .map(|pattern| {
                let pattern = pattern.as_ref();
                Regex::new(&wildcard_to_regex(pattern)).map_err(|source| {
                    DiscoveryError::InvalidPattern {
                        pattern: pattern.to_string(),
                        source,
                    }
                })
            })
            .collect::<Result<_, _>>()
            .map(Self)
    }

    fn matches(&self, name: &str) -> bool {
        self.0.iter().any(|re| re.is_match(name))
    }

    /// Whether the walk can skip everything below `package`.
    ///
    /// Holds when these exclude patterns match the literal strings
    /// `package*` or `package.*`.
    fn prunes(&self, package: &str) -> bool {
        self.matches(&format!("{package}*")) || self.matches(&format!("{package}.*"))
    }
}

/// Translates a shell-style wildcard into an anchored regex.
///
/// Supports `*`, `?`, and `[...]` classes (`[!...]` negates, a leading `]`
/// is literal). A `[` without a closing `]` matches itself, and everything
/// else matches literally.
fn wildcard_to_regex(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut translated = String::with_capacity(pattern.len() + 2);
    translated.push('^');

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;
        match c {
            '*' => translated.push_str(".*"),
            '?' => translated.push('.'),
            '[' => {
                let mut end = i;
                if chars.get(end) == Some(&'!') {
                    end += 1;
                }
                if chars.get(end) == Some(&']') {
                    end += 1;
                }
                while chars.get(end).is_some_and(|c| *c != ']') {
                    end += 1;
                }

                if end >= chars.len() {
                    translated.push_str(r"\[");
                    continue;
                }

                translated.push('[');
                let mut class = &chars[i..end];
                if let Some((&'!', rest)) = class.split_first() {
                    translated.push('^');
                    class = rest;
                }
                for c in class {
                    if matches!(c, '\\' | '[' | ']' | '^' | '&' | '~') {
                        translated.push('\\');
                    }
                    translated.push(*c);
                }
                translated.push(']');
                i = end + 1;
            }
            _ => translated.push_str(&regex::escape(c.encode_utf8(&mut [0; 4]))),
        }
    }

    translated.push('$');
    translated
}

/// Finds the Python packages below `root`.
///
/// A directory is a package if it contains an `__init__.py` file and its
/// name has no `.` in it. The walk only descends through packages. Names are
/// returned depth-first in file name order, as dotted paths relative to
/// `root` (`app/sub` becomes `app.sub`).
///
/// Unreadable directories are logged and skipped, so a missing root yields no
/// packages.
///
/// # Errors
///
/// Returns an error if an include or exclude pattern is malformed, such as a
/// character class with a reversed range.
pub fn find_packages(root: &Path, discovery: &Discovery) -> Result<Vec<String>, DiscoveryError> {
    let include = Patterns::compile(&discovery.include)?;
    let exclude = Patterns::compile(
        &ALWAYS_EXCLUDED
            .iter()
            .map(ToString::to_string)
            .chain(discovery.exclude.iter().cloned())
            .collect::<Vec<_>>(),
    )?;

    let mut packages = Vec::new();
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Skipping unreadable path during package discovery: {e}");
                continue;
            }
        };

        if !entry.file_type().is_dir() {
            continue;
        }

        let Some(package) = package_name(entry.path(), root) else {
            walker.skip_current_dir();
            continue;
        };

        if !entry.path().join(PACKAGE_MARKER).is_file() {
            walker.skip_current_dir();
            continue;
        }

        if include.matches(&package) && !exclude.matches(&package) {
            tracing::debug!("Found package {package}");
            packages.push(package.clone());
        }

        if exclude.prunes(&package) {
            walker.skip_current_dir();
        }
    }

    Ok(packages)
}

/// The dotted package name for a directory, or `None` if the directory can't
/// be a package.
fn package_name(path: &Path, root: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;

    let dir_name = relative.file_name()?.to_str()?;
    if dir_name.contains('.') {
        return None;
    }

    let segments = relative
        .components()
        .map(|component| match component {
            Component::Normal(segment) => segment.to_str(),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    Some(segments.join("."))
}

/// Failure to run package discovery.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    /// A wildcard pattern could not be compiled.
    #[error("invalid package pattern '{pattern}'")]
    InvalidPattern {
        /// The pattern as written.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: regex::Error,
    },
}
