//! Files produced for packaging: the build sidecar and the changelog.

use crate::domain::ResolvedBuild;
use crate::error::Result;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Path of the JSON sidecar holding a variant's resolved build
pub fn sidecar_path(output_dir: &Path, variant: &str) -> PathBuf {
    output_dir.join(format!("tag-build-{}.json", variant))
}

/// Path of a variant's rendered changelog
pub fn changelog_path(output_dir: &Path, variant: &str) -> PathBuf {
    output_dir.join(format!("changelog-{}.txt", variant))
}

/// File name of the packaged artifact, e.g. `app-release-vc42.apk`
pub fn artifact_file_name(base_file_name: &str, variant: &str, version_code: u64) -> String {
    format!("{}-{}-vc{}.apk", base_file_name, variant, version_code)
}

/// Persist a resolved build as pretty-printed JSON
///
/// The file is written next to its destination and renamed into place, so a
/// reader never observes a partially written sidecar.
pub fn write_build(output_dir: &Path, build: &ResolvedBuild) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;

    let path = sidecar_path(output_dir, &build.build_variant);
    let tmp_path = path.with_extension("json.tmp");

    let json = serde_json::to_string_pretty(build)?;
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, &path)?;

    debug!("wrote build '{}' to {}", build.name, path.display());
    Ok(path)
}

/// Read a variant's sidecar back
pub fn read_build(output_dir: &Path, variant: &str) -> Result<ResolvedBuild> {
    let content = fs::read_to_string(sidecar_path(output_dir, variant))?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a variant's rendered changelog
pub fn write_changelog(output_dir: &Path, variant: &str, changelog: &str) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)?;

    let path = changelog_path(output_dir, variant);
    fs::write(&path, changelog)?;

    debug!("wrote changelog for '{}' to {}", variant, path.display());
    Ok(path)
}
