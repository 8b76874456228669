//! Text assets read from the project root
//!
//! The [`ProjectRoot`] resolves paths against an explicit root directory, so
//! nothing depends on the working directory or the location of the binary.

use std::{
    io,
    path::{Path, PathBuf},
};

use crate::domain::{DecodeError, Encoding, RequirementList};

/// The root directory of a Python project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    root: PathBuf,
}

impl ProjectRoot {
    /// Opens a project rooted at the given path.
    #[must_use]
    pub const fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// The root directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Joins path segments onto the root.
    #[must_use]
    pub fn resolve<I, P>(&self, segments: I) -> PathBuf
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut path = self.root.clone();
        for segment in segments {
            path.push(segment);
        }
        path
    }

    /// Reads a text asset, decoding it with the given encoding.
    ///
    /// The whole file is read in one call, decoded, has its line endings
    /// normalised to `\n`, and is stripped of leading and trailing whitespace.
    ///
    /// # Errors
    ///
    /// - [`AssetError::Missing`] if the path does not exist
    /// - [`AssetError::Decode`] if the bytes are not valid under `encoding`
    /// - [`AssetError::Io`] for any other read failure
    pub fn read_text_asset<I, P>(&self, segments: I, encoding: Encoding) -> Result<String, AssetError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let path = self.resolve(segments);

        let bytes = std::fs::read(&path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => AssetError::Missing { path: path.clone() },
            _ => AssetError::Io {
                path: path.clone(),
                source,
            },
        })?;

        let content = encoding
            .decode(bytes)
            .map_err(|source| AssetError::Decode {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Read {} ({encoding})", path.display());
        Ok(normalise_newlines(&content).trim().to_string())
    }

    /// Reads a UTF-8 text asset.
    ///
    /// # Errors
    ///
    /// See [`Self::read_text_asset`].
    pub fn read_text<I, P>(&self, segments: I) -> Result<String, AssetError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.read_text_asset(segments, Encoding::default())
    }

    /// Reads and filters a requirements file.
    ///
    /// # Errors
    ///
    /// See [`Self::read_text_asset`].
    pub fn read_requirement_list(&self, path: &Path) -> Result<RequirementList, AssetError> {
        let content = self.read_text([path])?;
        let list = RequirementList::parse(&content);
        tracing::debug!("{} requirements in {}", list.len(), path.display());
        Ok(list)
    }
}

/// Converts `\r\n` and lone `\r` line endings to `\n`.
fn normalise_newlines(content: &str) -> String {
    content.replace("\r\n", "\n").replace('\r', "\n")
}

/// Failure to read a text asset.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The asset does not exist.
    #[error("asset not found: {}", path.display())]
    Missing {
        /// The resolved path.
        path: PathBuf,
    },

    /// The asset's bytes are not valid under the declared encoding.
    #[error("failed to decode {}", path.display())]
    Decode {
        /// The resolved path.
        path: PathBuf,
        /// The underlying decoding error.
        #[source]
        source: DecodeError,
    },

    /// Any other I/O failure, such as a permission error.
    #[error("failed to read {}", path.display())]
    Io {
        /// The resolved path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

impl AssetError {
    /// The resolved path of the asset that failed.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Missing { path } | Self::Decode { path, .. } | Self::Io { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;
    use test_case::test_case;

    use super::*;

    fn project(files: &[(&str, &[u8])]) -> (TempDir, ProjectRoot) {
        let tmp = tempfile::tempdir().unwrap();
        for (name, content) in files {
            let path = tmp.path().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(path, content).unwrap();
        }
        let root = ProjectRoot::new(tmp.path().to_path_buf());
        (tmp, root)
    }

    #[test]
    fn reads_version() {
        let (_tmp, root) = project(&[("VERSION", b"0.1.0\n".as_slice())]);
        assert_eq!(root.read_text(["VERSION"]).unwrap(), "0.1.0");
    }

    #[test_case(Encoding::Utf8, "  \n\t caf\u{e9} au lait \r\n\n".as_bytes(), "caf\u{e9} au lait"; "utf8")]
    #[test_case(Encoding::Latin1, b"  \n\t caf\xe9 au lait \r\n\n", "caf\u{e9} au lait"; "latin1")]
    #[test_case(Encoding::Ascii, b"  \n\t cafe au lait \r\n\n", "cafe au lait"; "ascii")]
    fn strips_surrounding_whitespace(encoding: Encoding, bytes: &[u8], expected: &str) {
        let (_tmp, root) = project(&[("README.md", bytes)]);
        let content = root.read_text_asset(["README.md"], encoding).unwrap();
        assert_eq!(content, expected);
    }

    #[test]
    fn crlf_line_endings_become_newlines() {
        let (_tmp, root) = project(&[("README.md", b"# Title\r\n\r\nBody\r\n".as_slice())]);
        assert_eq!(root.read_text(["README.md"]).unwrap(), "# Title\n\nBody");
    }

    #[test]
    fn carriage_return_requirements_are_split() {
        let (_tmp, root) = project(&[(
            "requirements.txt",
            b"requests\r# pinned\rnumpy\r".as_slice(),
        )]);

        let list = root
            .read_requirement_list(Path::new("requirements.txt"))
            .unwrap();

        assert_eq!(&*list, ["requests", "numpy"]);
    }

    #[test]
    fn joins_multiple_segments() {
        let (_tmp, root) = project(&[("docs/intro.md", b"hello".as_slice())]);
        assert_eq!(root.read_text(["docs", "intro.md"]).unwrap(), "hello");
    }

    #[test]
    fn missing_asset_is_an_error() {
        let (tmp, root) = project(&[]);

        let error = root.read_text(["VERSION"]).unwrap_err();

        assert!(matches!(error, AssetError::Missing { .. }));
        assert_eq!(error.path(), tmp.path().join("VERSION"));
    }

    #[test]
    fn invalid_utf8_is_a_decode_error() {
        let (_tmp, root) = project(&[("README.md", b"caf\xe9".as_slice())]);

        let error = root.read_text(["README.md"]).unwrap_err();

        let AssetError::Decode { source, .. } = &error else {
            panic!("expected decode error, got {error:?}");
        };
        assert_eq!(source.offset, 3);
    }

    #[test]
    fn directory_is_an_io_error() {
        let (_tmp, root) = project(&[("docs/intro.md", b"hello".as_slice())]);

        let error = root.read_text(["docs"]).unwrap_err();

        assert!(matches!(error, AssetError::Io { .. }));
    }

    #[test]
    fn reads_requirement_list() {
        let (_tmp, root) = project(&[("requirements.txt", b"requests\n# pinned\nnumpy\n".as_slice())]);

        let list = root
            .read_requirement_list(Path::new("requirements.txt"))
            .unwrap();

        assert_eq!(&*list, ["requests", "numpy"]);
    }

    #[test]
    fn interior_blank_lines_are_kept() {
        let (_tmp, root) = project(&[("requirements.txt", b"nipype\n\nnumpy\n\n".as_slice())]);

        let list = root
            .read_requirement_list(Path::new("requirements.txt"))
            .unwrap();

        assert_eq!(&*list, ["nipype", "", "numpy"]);
    }

    #[test]
    fn missing_requirement_list_is_an_error() {
        let (_tmp, root) = project(&[]);

        let error = root
            .read_requirement_list(Path::new("requirements.txt"))
            .unwrap_err();

        assert!(matches!(error, AssetError::Missing { .. }));
    }
}
