use std::ops::Deref;

use serde::Serialize;

/// Line prefixes that mark a requirements-file line as something other than a
/// dependency specifier: quoted lines, comments, pip options (`-r`, `-e`,
/// `--index-url`, ...) and VCS URLs.
const EXCLUDED_PREFIXES: [&str; 4] = ["\"", "#", "-", "git+"];

/// Returns `true` if `line` should be kept as a dependency specifier.
///
/// The prefix test is applied to the raw line, before any trimming. Blank
/// lines are kept.
#[must_use]
pub fn is_requirement_line(line: &str) -> bool {
    !EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| line.starts_with(prefix))
}

/// An ordered list of dependency specifiers taken from a requirements file.
///
/// File order is preserved and duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RequirementList(Vec<String>);

impl RequirementList {
    /// Parses the contents of a requirements file.
    ///
    /// The content is split on `\n`, lines rejected by
    /// [`is_requirement_line`] are dropped, and the surviving lines are
    /// trimmed.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        content
            .split('\n')
            .filter(|line| is_requirement_line(line))
            .map(str::trim)
            .collect()
    }

    /// Consumes the list, returning the specifiers.
    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for RequirementList {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for RequirementList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for RequirementList {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RequirementList {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
