use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A text file read from a cloned repo
#[derive(Debug, Clone)]
pub struct RepoFile {
    pub path: PathBuf,
    /// Path relative to the repo root, always `/`-separated
    pub relative_path: String,
    pub file_name: String,
    pub content: String,
}

/// Result of reading one file during the walk
#[derive(Debug)]
pub enum FileRead {
    Text(RepoFile),
    /// The file is not valid UTF-8
    NotUtf8(PathBuf),
    /// The file (or its directory entry) could not be read
    Unreadable(PathBuf, std::io::Error),
}

/// Walk every file under `repo_dir`, reading each as UTF-8 text.
///
/// Entries come back sorted by file name within each directory. Symlinks to
/// files are read through the link; dangling links come back as
/// [`FileRead::Unreadable`]. Links to directories are not descended into.
/// The `.git` directory is skipped when `include_git_dir` is false.
pub fn walk_repo_files(
    repo_dir: &Path,
    include_git_dir: bool,
) -> impl Iterator<Item = FileRead> + '_ {
    WalkDir::new(repo_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| include_git_dir || !is_git_dir(e))
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_file() || is_file_link(&entry) => {
                Some(read_file(repo_dir, entry.path()))
            }
            Ok(_) => None,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                let io = e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop"));
                Some(FileRead::Unreadable(path, io))
            }
        })
}

fn read_file(repo_dir: &Path, path: &Path) -> FileRead {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => return FileRead::Unreadable(path.to_path_buf(), e),
    };

    let Ok(content) = String::from_utf8(bytes) else {
        return FileRead::NotUtf8(path.to_path_buf());
    };

    let relative_path = path
        .strip_prefix(repo_dir)
        .unwrap_or(path)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().to_string())
        .unwrap_or_default();

    FileRead::Text(RepoFile {
        path: path.to_path_buf(),
        relative_path,
        file_name,
        content,
    })
}

/// A symlink whose target is not a directory, including dangling links.
fn is_file_link(entry: &walkdir::DirEntry) -> bool {
    entry.path_is_symlink() && !entry.path().is_dir()
}

fn is_git_dir(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0 && entry.file_type().is_dir() && entry.file_name() == ".git"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_paths(reads: &[FileRead]) -> Vec<&str> {
        reads
            .iter()
            .filter_map(|r| match r {
                FileRead::Text(f) => Some(f.relative_path.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_walk_reads_nested_files_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src/util")).unwrap();
        std::fs::write(dir.path().join("b.py"), "print(2)").unwrap();
        std::fs::write(dir.path().join("a.py"), "print(1)").unwrap();
        std::fs::write(dir.path().join("src/util/helpers.rs"), "fn help() {}").unwrap();

        let reads: Vec<_> = walk_repo_files(dir.path(), false).collect();
        assert_eq!(text_paths(&reads), vec!["a.py", "b.py", "src/util/helpers.rs"]);

        let FileRead::Text(first) = &reads[0] else {
            panic!("expected text file");
        };
        assert_eq!(first.file_name, "a.py");
        assert_eq!(first.content, "print(1)");
    }

    #[test]
    fn test_walk_flags_non_utf8_files() {
        let dir = tempfile::tempdir().unwrap();
        let png = [0x89u8, 0x50, 0x4e, 0x47, 0xff, 0xfe];
        std::fs::write(dir.path().join("image.png"), png).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();

        let reads: Vec<_> = walk_repo_files(dir.path(), false).collect();
        assert_eq!(reads.len(), 2);
        assert!(matches!(&reads[0], FileRead::NotUtf8(p) if p.ends_with("image.png")));
        assert_eq!(text_paths(&reads), vec!["notes.txt"]);
    }

    #[test]
    fn test_walk_skips_git_dir_by_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join(".git/HEAD"), "ref: refs/heads/main\n").unwrap();
        std::fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();

        let reads: Vec<_> = walk_repo_files(dir.path(), false).collect();
        assert_eq!(text_paths(&reads), vec!["main.rs"]);

        let reads: Vec<_> = walk_repo_files(dir.path(), true).collect();
        assert_eq!(text_paths(&reads), vec![".git/HEAD", "main.rs"]);
    }

    #[test]
    fn test_walk_keeps_other_dotfiles() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".gitignore"), "target/\n").unwrap();

        let reads: Vec<_> = walk_repo_files(dir.path(), false).collect();
        assert_eq!(text_paths(&reads), vec![".gitignore"]);
    }

    #[test]
    fn test_walk_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(walk_repo_files(dir.path(), false).count(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_follows_file_symlinks_and_reports_dangling_ones() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.py"), "print(1)").unwrap();
        symlink(dir.path().join("a.py"), dir.path().join("link.py")).unwrap();
        symlink(dir.path().join("missing.py"), dir.path().join("dangling.py")).unwrap();

        let reads: Vec<_> = walk_repo_files(dir.path(), false).collect();
        assert_eq!(reads.len(), 3);
        assert_eq!(text_paths(&reads), vec!["a.py", "link.py"]);
        assert!(matches!(
            &reads[1],
            FileRead::Unreadable(p, _) if p.ends_with("dangling.py")
        ));

        let FileRead::Text(linked) = &reads[2] else {
            panic!("expected text file");
        };
        assert_eq!(linked.content, "print(1)");
        assert_eq!(linked.file_name, "link.py");
    }

    #[cfg(unix)]
    #[test]
    fn test_walk_does_not_descend_into_dir_symlinks() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src/lib.rs"), "pub fn f() {}").unwrap();
        symlink(dir.path().join("src"), dir.path().join("src-link")).unwrap();

        let reads: Vec<_> = walk_repo_files(dir.path(), false).collect();
        assert_eq!(text_paths(&reads), vec!["src/lib.rs"]);
    }
}
