//! Project root discovery
//!
//! Walks from a file's directory towards the filesystem root looking for
//! marker files. Version-control and IDE metadata directories are checked
//! before build descriptors at every level, and the first directory that
//! carries any marker is the project root.

use std::path::Path;
use tracing::{debug, trace};

use crate::types::{MarkerTier, ProjectRoot};

/// Maximum number of directories inspected, including the file's own directory
pub const DEFAULT_MAX_DEPTH: usize = 15;

/// Strong project-boundary evidence
pub const HIGH_PRIORITY_MARKERS: &[&str] = &[
    ".git",
    ".idea", // IntelliJ project configuration
];

/// Build descriptors
pub const NORMAL_PRIORITY_MARKERS: &[&str] = &[
    "pom.xml",
    "build.gradle",
    "package.json",
    "tsconfig.json",
    "Cargo.toml",
    "go.mod",
    "CMakeLists.txt",
    "build.sbt",
    "Makefile",
    "settings.gradle",
    "gradlew",
    "mvnw",
    "build.xml", // Ant
];

/// Marker lists plus the depth bound used by the ancestor walk.
#[derive(Debug, Clone)]
pub struct RootLocator {
    high: Vec<String>,
    normal: Vec<String>,
    max_depth: usize,
}

impl Default for RootLocator {
    fn default() -> Self {
        Self {
            high: HIGH_PRIORITY_MARKERS.iter().map(|m| m.to_string()).collect(),
            normal: NORMAL_PRIORITY_MARKERS
                .iter()
                .map(|m| m.to_string())
                .collect(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl RootLocator {
    /// Append high-tier markers after the built-in ones.
    pub fn with_high_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        append_unique(&mut self.high, markers);
        self
    }

    /// Append normal-tier markers after the built-in ones.
    pub fn with_normal_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        append_unique(&mut self.normal, markers);
        self
    }

    /// Lower the number of directories inspected.
    ///
    /// Clamped to `1..=DEFAULT_MAX_DEPTH`; the walk never goes further up
    /// than the default bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.clamp(1, DEFAULT_MAX_DEPTH);
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Find the project root for `file_path` using the real filesystem.
    pub fn find(&self, file_path: &Path) -> Option<ProjectRoot> {
        self.find_with(file_path, |candidate| candidate.exists())
    }

    /// Find the project root using `exists` to probe marker paths.
    ///
    /// `exists` receives `<directory>/<marker>` paths only; directories are
    /// visited from the file's parent upwards and at most `max_depth` of them
    /// are probed.
    pub fn find_with<F>(&self, file_path: &Path, exists: F) -> Option<ProjectRoot>
    where
        F: FnMut(&Path) -> bool,
    {
        let root = self.walk(file_path.parent()?, exists);
        if root.is_none() {
            debug!("No project root found for {:?}", file_path);
        }
        root
    }

    /// Find the project root enclosing `dir`, starting with `dir` itself.
    pub fn find_for_dir(&self, dir: &Path) -> Option<ProjectRoot> {
        self.walk(dir, |candidate| candidate.exists())
    }

    fn walk<F>(&self, start: &Path, mut exists: F) -> Option<ProjectRoot>
    where
        F: FnMut(&Path) -> bool,
    {
        let mut current = start.to_path_buf();

        for level in 0..self.max_depth {
            trace!("Checking {:?} for project markers (level {})", current, level);

            if let Some(marker) = self.high.iter().find(|m| exists(&current.join(m))) {
                debug!("Project root {:?} (found {})", current, marker);
                return Some(ProjectRoot::new(current, MarkerTier::High, marker.as_str()));
            }

            if let Some(marker) = self.normal.iter().find(|m| exists(&current.join(m))) {
                debug!("Project root {:?} (found {})", current, marker);
                return Some(ProjectRoot::new(current, MarkerTier::Normal, marker.as_str()));
            }

            match current.parent() {
                Some(parent) if parent != current => current = parent.to_path_buf(),
                _ => {
                    trace!("Reached filesystem root at {:?}", current);
                    break;
                }
            }
        }

        None
    }
}

fn append_unique<I, S>(list: &mut Vec<String>, markers: I)
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    for marker in markers {
        let marker = marker.into();
        if !marker.is_empty() && !list.contains(&marker) {
            list.push(marker);
        }
    }
}

/// Find the project root for `file_path` with the built-in markers.
pub fn find_project_root(file_path: &Path) -> Option<ProjectRoot> {
    RootLocator::default().find(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Probe that ignores everything outside the temp dir so markers in the
    /// real ancestors (e.g. a Makefile in /tmp) cannot leak into results.
    fn scoped(root: &Path) -> impl FnMut(&Path) -> bool + '_ {
        move |p: &Path| p.starts_with(root) && p.exists()
    }

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_git_dir_in_file_directory() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        let file = repo.join("Main.java");
        touch(&file);

        let root = RootLocator::default()
            .find_with(&file, scoped(temp.path()))
            .unwrap();
        assert_eq!(root.path, repo);
        assert_eq!(root.tier, MarkerTier::High);
        assert_eq!(root.marker, ".git");
    }

    #[test]
    fn test_closer_vcs_marker_beats_farther_manifest() {
        let temp = TempDir::new().unwrap();
        let outer = temp.path().join("outer");
        touch(&outer.join("pom.xml"));
        let inner = outer.join("module");
        fs::create_dir_all(inner.join(".git")).unwrap();
        let file = inner.join("src/Main.java");
        touch(&file);

        let root = RootLocator::default()
            .find_with(&file, scoped(temp.path()))
            .unwrap();
        assert_eq!(root.path, inner);
        assert_eq!(root.tier, MarkerTier::High);
    }

    #[test]
    fn test_closer_manifest_wins_over_farther_git() {
        // /repo/.git and /repo/src/pkg/package.json, file in /repo/src/pkg/a
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        let pkg = repo.join("src/pkg");
        touch(&pkg.join("package.json"));
        let file = pkg.join("a/File.ext");
        touch(&file);

        let root = RootLocator::default()
            .find_with(&file, scoped(temp.path()))
            .unwrap();
        assert_eq!(root.path, pkg);
        assert_eq!(root.tier, MarkerTier::Normal);
        assert_eq!(root.marker, "package.json");
    }

    #[test]
    fn test_high_tier_checked_before_normal_at_same_level() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("proj");
        touch(&dir.join("Cargo.toml"));
        fs::create_dir_all(dir.join(".idea")).unwrap();
        let file = dir.join("lib.rs");
        touch(&file);

        let root = RootLocator::default()
            .find_with(&file, scoped(temp.path()))
            .unwrap();
        assert_eq!(root.tier, MarkerTier::High);
        assert_eq!(root.marker, ".idea");
    }

    #[test]
    fn test_no_markers_returns_none() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a/b/c/notes.txt");
        touch(&file);

        assert!(RootLocator::default()
            .find_with(&file, scoped(temp.path()))
            .is_none());
    }

    #[test]
    fn test_marker_at_depth_limit_is_found() {
        let temp = TempDir::new().unwrap();
        let top = temp.path().join("top");
        fs::create_dir_all(top.join(".git")).unwrap();

        // File directory plus 13 ancestors below `top`: `top` is the 15th
        let mut dir = top.clone();
        for i in 1..=14 {
            dir = dir.join(format!("n{}", i));
        }
        let file = dir.join("Deep.java");
        touch(&file);

        let root = RootLocator::default()
            .find_with(&file, scoped(temp.path()))
            .unwrap();
        assert_eq!(root.path, top);
    }

    #[test]
    fn test_marker_beyond_depth_limit_is_ignored() {
        let temp = TempDir::new().unwrap();
        let top = temp.path().join("top");
        fs::create_dir_all(top.join(".git")).unwrap();

        // `top` would be the 16th directory inspected
        let mut dir = top.clone();
        for i in 1..=15 {
            dir = dir.join(format!("n{}", i));
        }
        let file = dir.join("Deep.java");
        touch(&file);

        assert!(RootLocator::default()
            .find_with(&file, scoped(temp.path()))
            .is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_never_inspects_more_than_max_depth_directories() {
        let mut path = PathBuf::from("/");
        for i in 0..30 {
            path.push(format!("d{}", i));
        }
        path.push("File.ext");

        let mut visited: Vec<PathBuf> = Vec::new();
        let result = RootLocator::default().find_with(&path, |candidate| {
            let dir = candidate.parent().unwrap().to_path_buf();
            if visited.last() != Some(&dir) {
                visited.push(dir);
            }
            false
        });

        assert!(result.is_none());
        assert_eq!(visited.len(), DEFAULT_MAX_DEPTH);
        assert_eq!(visited[0], path.parent().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_stops_at_filesystem_root() {
        let mut visited: Vec<PathBuf> = Vec::new();
        let result = RootLocator::default().find_with(Path::new("/a/File.ext"), |candidate| {
            let dir = candidate.parent().unwrap().to_path_buf();
            if visited.last() != Some(&dir) {
                visited.push(dir);
            }
            false
        });

        assert!(result.is_none());
        assert_eq!(visited, vec![PathBuf::from("/a"), PathBuf::from("/")]);
    }

    #[test]
    fn test_extra_markers_are_honoured() {
        let temp = TempDir::new().unwrap();
        let proj = temp.path().join("proj");
        touch(&proj.join("WORKSPACE"));
        let file = proj.join("x/y.py");
        touch(&file);

        let locator = RootLocator::default().with_normal_markers(["WORKSPACE"]);
        let root = locator.find_with(&file, scoped(temp.path())).unwrap();
        assert_eq!(root.path, proj);
        assert_eq!(root.marker, "WORKSPACE");
    }

    #[test]
    fn test_extra_markers_are_deduplicated() {
        let locator = RootLocator::default().with_high_markers([".git", ".hg", ""]);
        assert_eq!(locator.high, vec![".git", ".idea", ".hg"]);
    }

    #[test]
    fn test_max_depth_is_clamped_to_default_bound() {
        assert_eq!(RootLocator::default().with_max_depth(0).max_depth(), 1);
        assert_eq!(RootLocator::default().with_max_depth(4).max_depth(), 4);
        assert_eq!(
            RootLocator::default().with_max_depth(40).max_depth(),
            DEFAULT_MAX_DEPTH
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_raised_max_depth_still_stops_at_default_bound() {
        let mut path = PathBuf::from("/");
        for i in 0..40 {
            path.push(format!("d{}", i));
        }
        path.push("F.ext");

        let mut visited: Vec<PathBuf> = Vec::new();
        let result = RootLocator::default()
            .with_max_depth(40)
            .find_with(&path, |candidate| {
                let dir = candidate.parent().unwrap().to_path_buf();
                if visited.last() != Some(&dir) {
                    visited.push(dir);
                }
                false
            });

        assert!(result.is_none());
        assert_eq!(visited.len(), DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_find_project_root_uses_real_filesystem() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        let file = repo.join("src/main.go");
        touch(&file);

        let root = find_project_root(&file).unwrap();
        assert_eq!(root.path, repo);
    }

    #[test]
    fn test_find_for_dir_checks_the_directory_itself() {
        let temp = TempDir::new().unwrap();
        let repo = temp.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();
        fs::create_dir_all(repo.join("src")).unwrap();

        assert_eq!(RootLocator::default().find_for_dir(&repo).unwrap().path, repo);
        assert_eq!(
            RootLocator::default()
                .find_for_dir(&repo.join("src"))
                .unwrap()
                .path,
            repo
        );
    }
}
