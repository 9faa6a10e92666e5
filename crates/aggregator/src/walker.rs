use crate::error::{AggregateError, FragmentError, Result};
use std::cmp::Ordering;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A discovered file, owned by the aggregation pass that walked it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub path: PathBuf,
    /// File name including the suffix, exactly as the filesystem reports it.
    pub name: OsString,
    pub content: Vec<u8>,
}

impl Fragment {
    pub fn name_bytes(&self) -> &[u8] {
        self.name.as_encoded_bytes()
    }
}

/// Sibling order applied at every directory level of the depth-first walk.
#[derive(Clone, Copy, Default)]
pub enum WalkOrder {
    /// Siblings sorted by file name. Reproducible across platforms.
    #[default]
    Lexicographic,
    /// Whatever order the OS hands back from `read_dir`.
    Filesystem,
    /// Caller-supplied comparison of sibling paths.
    Custom(fn(&Path, &Path) -> Ordering),
}

impl std::fmt::Debug for WalkOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexicographic => f.write_str("Lexicographic"),
            Self::Filesystem => f.write_str("Filesystem"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl WalkOrder {
    fn apply(self, walker: WalkDir) -> WalkDir {
        match self {
            Self::Lexicographic => walker.sort_by_file_name(),
            Self::Filesystem => walker,
            Self::Custom(cmp) => walker.sort_by(move |a, b| cmp(a.path(), b.path())),
        }
    }
}

/// Starts a lazy walk of `root`, yielding every regular file whose full path ends with `suffix`.
///
/// The root is validated eagerly: a missing root or a non-directory fails the whole walk
/// before any fragment is produced. Everything after that is reported per entry.
pub fn walk(root: impl AsRef<Path>, suffix: &str, order: WalkOrder) -> Result<Walk> {
    let root = root.as_ref();
    if suffix.is_empty() {
        return Err(AggregateError::EmptySuffix);
    }

    let meta = fs::metadata(root).map_err(|err| AggregateError::InvalidRoot {
        path: root.to_path_buf(),
        reason: err.to_string(),
    })?;
    if !meta.is_dir() {
        return Err(AggregateError::InvalidRoot {
            path: root.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    let walker = order.apply(WalkDir::new(root).follow_links(false));
    Ok(Walk {
        root: root.to_path_buf(),
        suffix: suffix.to_string(),
        inner: walker.into_iter(),
    })
}

/// Single-use iterator over the fragments under one root.
pub struct Walk {
    root: PathBuf,
    suffix: String,
    inner: walkdir::IntoIter,
}

impl Walk {
    fn matches_suffix(&self, path: &Path) -> bool {
        path.as_os_str()
            .as_encoded_bytes()
            .ends_with(self.suffix.as_bytes())
    }

    fn read_entry(&self, entry: &DirEntry) -> Option<std::result::Result<Fragment, FragmentError>> {
        let file_type = entry.file_type();
        if file_type.is_dir() || !self.matches_suffix(entry.path()) {
            return None;
        }

        let path = entry.path();
        if file_type.is_symlink() {
            match fs::metadata(path) {
                Ok(meta) if meta.is_file() => {}
                Ok(_) => return None,
                Err(source) => {
                    return Some(Err(FragmentError::Read {
                        path: path.to_path_buf(),
                        source,
                    }))
                }
            }
        } else if !file_type.is_file() {
            return None;
        }

        Some(match fs::read(path) {
            Ok(content) => Ok(Fragment {
                path: path.to_path_buf(),
                name: entry.file_name().to_os_string(),
                content,
            }),
            Err(source) => Err(FragmentError::Read {
                path: path.to_path_buf(),
                source,
            }),
        })
    }
}

impl Iterator for Walk {
    type Item = std::result::Result<Fragment, FragmentError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    return Some(Err(FragmentError::Read {
                        path,
                        source: std::io::Error::from(err),
                    }));
                }
            };
            if let Some(item) = self.read_entry(&entry) {
                return Some(item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn names(walk: Walk) -> Vec<String> {
        walk.map(|item| item.expect("fragment").name.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn yields_only_exact_suffix_matches() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join("style.css"), b"a{}").unwrap();
        fs::write(temp.path().join("style.css.bak"), b"b{}").unwrap();
        fs::write(temp.path().join("notes.txt"), b"n").unwrap();

        let walk = walk(temp.path(), ".css", WalkOrder::Lexicographic).unwrap();
        assert_eq!(names(walk), vec!["style.css".to_string()]);
    }

    #[test]
    fn never_yields_directories_even_when_suffix_matches() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("nested.json");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("inner.json"), b"1").unwrap();

        let walk = walk(temp.path(), ".json", WalkOrder::Lexicographic).unwrap();
        assert_eq!(names(walk), vec!["inner.json".to_string()]);
    }

    #[test]
    fn lexicographic_order_is_depth_first_by_name() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("b")).unwrap();
        fs::create_dir_all(temp.path().join("a")).unwrap();
        fs::write(temp.path().join("b").join("two.js"), b"2").unwrap();
        fs::write(temp.path().join("a").join("one.js"), b"1").unwrap();
        fs::write(temp.path().join("c.js"), b"3").unwrap();

        let walk = walk(temp.path(), ".js", WalkOrder::Lexicographic).unwrap();
        let paths: Vec<PathBuf> = walk
            .map(|item| item.unwrap().path.strip_prefix(temp.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("a/one.js"),
                PathBuf::from("b/two.js"),
                PathBuf::from("c.js"),
            ]
        );
    }

    #[test]
    fn custom_order_controls_sibling_sequence() {
        fn reverse(a: &Path, b: &Path) -> Ordering {
            b.file_name().cmp(&a.file_name())
        }

        let temp = tempdir().unwrap();
        for name in ["p.css", "q.css", "r.css"] {
            fs::write(temp.path().join(name), name).unwrap();
        }

        let walk = walk(temp.path(), ".css", WalkOrder::Custom(reverse)).unwrap();
        assert_eq!(names(walk), vec!["r.css", "q.css", "p.css"]);
    }

    #[test]
    fn missing_root_is_invalid() {
        let temp = tempdir().unwrap();
        let err = walk(temp.path().join("absent"), ".json", WalkOrder::default())
            .err()
            .expect("missing root must fail");
        assert!(matches!(err, AggregateError::InvalidRoot { .. }));
    }

    #[test]
    fn file_root_is_invalid() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("plain.json");
        fs::write(&file, b"{}").unwrap();
        let err = walk(&file, ".json", WalkOrder::default())
            .err()
            .expect("file root must fail");
        assert!(matches!(err, AggregateError::InvalidRoot { .. }));
    }

    #[test]
    fn empty_suffix_is_rejected() {
        let temp = tempdir().unwrap();
        let err = walk(temp.path(), "", WalkOrder::default())
            .err()
            .expect("empty suffix must fail");
        assert!(matches!(err, AggregateError::EmptySuffix));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_reported_and_walk_continues() {
        let temp = tempdir().unwrap();
        std::os::unix::fs::symlink(temp.path().join("gone.js"), temp.path().join("a.js")).unwrap();
        fs::write(temp.path().join("b.js"), b"ok").unwrap();

        let items: Vec<_> = walk(temp.path(), ".js", WalkOrder::Lexicographic)
            .unwrap()
            .collect();
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], Err(FragmentError::Read { .. })));
        assert_eq!(items[1].as_ref().unwrap().name, OsString::from("b.js"));
    }
}
