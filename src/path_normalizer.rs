//! Rewrites absolute paths found in `#line` directives into short, project-relative names.
//!
//! The shader toolchain reports every file by its absolute path, which makes for very long
//! and very repetitive labels. Known roots (the editor install, its built-in include folder,
//! the package cache and the project's asset folder) are stripped, and package cache entries
//! lose their version suffix, so `…/Library/PackageCache/com.vendor.pkg@1.2.3/Runtime/x.shader`
//! becomes `Packages/com.vendor.pkg/Runtime/x.shader`.

use serde::Deserialize;

const PACKAGES_PREFIX: &str = "Packages/";

/// Absolute roots used for path normalization.
///
/// Any root may be missing, in which case paths under it are passed through unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RootPaths {
    /// Editor/toolchain install folder
    pub install_root: Option<String>,

    /// Built-in shader include folder; lives inside `install_root`
    pub include_root: Option<String>,

    /// Folder holding downloaded packages, one `<name>@<version>` folder each
    pub package_cache_root: Option<String>,

    /// The project's asset folder
    pub asset_root: Option<String>,
}

impl RootPaths {
    /// Derive all four roots from the install and project folders.
    pub fn for_install(install_dir: &str, project_dir: &str) -> Self {
        let install = as_dir(install_dir);
        let project = as_dir(project_dir);

        RootPaths {
            include_root: Some(format!("{}Data/CGIncludes/", install)),
            install_root: Some(install),
            package_cache_root: Some(format!("{}Library/PackageCache/", project)),
            asset_root: Some(format!("{}Assets/", project)),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RootKind {
    Install,
    Include,
    PackageCache,
    Asset,
}

#[derive(Clone, Debug)]
pub struct PathNormalizer {
    roots: Vec<(RootKind, String)>,
}

impl PathNormalizer {
    pub fn new(roots: &RootPaths) -> Self {
        let roots = [
            (RootKind::Include, &roots.include_root),
            (RootKind::Install, &roots.install_root),
            (RootKind::PackageCache, &roots.package_cache_root),
            (RootKind::Asset, &roots.asset_root),
        ]
        .iter()
        .filter_map(|(kind, root)| {
            root.as_deref()
                .filter(|root| !root.is_empty())
                .map(|root| (*kind, as_dir(root)))
        })
        .collect();

        PathNormalizer { roots }
    }

    /// Map `absolute_path` to its display name. Paths outside every known root are
    /// returned unmodified.
    pub fn normalize(&self, absolute_path: &str) -> String {
        let matched = self
            .roots
            .iter()
            .filter(|(_, root)| starts_with_ignore_case(absolute_path, root))
            .max_by_key(|(_, root)| root.len());

        match matched {
            Some((RootKind::PackageCache, root)) => {
                rewrite_package_path(&absolute_path[root.len()..])
            }
            Some((_, root)) => absolute_path[root.len()..].to_string(),
            None => absolute_path.to_string(),
        }
    }
}

/// `com.vendor.pkg@1.2.3/Runtime/x.shader` -> `Packages/com.vendor.pkg/Runtime/x.shader`
fn rewrite_package_path(sub_path: &str) -> String {
    match (sub_path.find('/'), sub_path.find('@')) {
        (Some(slash), Some(at)) if at < slash => format!(
            "{}{}{}",
            PACKAGES_PREFIX,
            &sub_path[..at],
            &sub_path[slash..]
        ),
        _ => sub_path.to_string(),
    }
}

fn starts_with_ignore_case(path: &str, prefix: &str) -> bool {
    path.get(..prefix.len())
        .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
}

fn as_dir(path: &str) -> String {
    let mut dir = path.replace('\\', "/");
    if !dir.ends_with('/') {
        dir.push('/');
    }
    dir
}
