//! Association of skin names with files that actually exist
//!
//! Skin paths stored in MD2 files often point at `.pcx` images that were
//! converted to other formats, or at locations that no longer exist. For
//! directory-backed archives each stored name is tried with the extensions in
//! [`SKIN_EXTENSIONS`], first at the stored path and then next to the model.
//! Every extension is tried at the stored path before the sibling, so a stored
//! `skin.jpg` wins over a sibling `skin.pcx`. When nothing resolves, any `.png`
//! in the model's directory is offered as a skin instead.

use log::{debug, warn};

use crate::archive::ModelArchive;
use crate::chunks::Md2Skin;
use crate::error::Result;

/// Skin image extensions, in priority order
pub const SKIN_EXTENSIONS: [&str; 3] = ["pcx", "png", "jpg"];

/// A skin as presented to the render side
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkinRef {
    /// Display name (file stem)
    pub name: String,
    /// Archive-relative path of the image
    pub path: String,
}

impl SkinRef {
    fn from_path(path: String) -> Self {
        Self {
            name: file_stem(&path).to_string(),
            path,
        }
    }
}

/// Skin list taken verbatim from the file
pub fn header_skins(skins: &[Md2Skin]) -> Vec<SkinRef> {
    skins
        .iter()
        .map(|skin| SkinRef::from_path(normalize(&skin.name)))
        .collect()
}

/// Resolves skin names against an archive
#[derive(Debug)]
pub struct SkinResolver<'a, A: ModelArchive + ?Sized> {
    archive: &'a A,
}

impl<'a, A: ModelArchive + ?Sized> SkinResolver<'a, A> {
    pub fn new(archive: &'a A) -> Self {
        Self { archive }
    }

    /// Produce the skin list for the model at `model_path`
    ///
    /// Packed archives get the stored names unchanged. Directory archives get
    /// only skins that exist, falling back to a directory scan.
    pub fn resolve(&self, model_path: &str, skins: &[Md2Skin]) -> Result<Vec<SkinRef>> {
        if !self.archive.is_directory() {
            return Ok(header_skins(skins));
        }

        let model_dir = parent_dir(&normalize(model_path)).to_string();

        let resolved: Vec<SkinRef> = skins
            .iter()
            .filter_map(|skin| {
                let found = self.find_skin(&model_dir, &skin.name);
                if found.is_none() {
                    warn!("Skin '{}' not found", skin.name);
                }
                found
            })
            .collect();

        if !resolved.is_empty() {
            return Ok(resolved);
        }

        debug!("No stored skin resolved, scanning '{model_dir}' for png files");
        self.scan_directory(&model_dir)
    }

    fn find_skin(&self, model_dir: &str, name: &str) -> Option<SkinRef> {
        let name = normalize(name);
        if name.is_empty() {
            return None;
        }

        let stored = strip_extension(&name).to_string();
        let sibling = join(model_dir, file_stem(&name));

        let path = [stored, sibling]
            .iter()
            .flat_map(|base| SKIN_EXTENSIONS.iter().map(move |ext| format!("{base}.{ext}")))
            .find(|candidate| self.archive.exists(candidate))?;

        debug!("Skin '{name}' resolved to '{path}'");
        Some(SkinRef {
            name: file_stem(&name).to_string(),
            path,
        })
    }

    fn scan_directory(&self, model_dir: &str) -> Result<Vec<SkinRef>> {
        let skins: Vec<SkinRef> = self
            .archive
            .list_dir(model_dir)?
            .into_iter()
            .filter(|file| {
                file.rsplit_once('.')
                    .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("png"))
            })
            .map(|file| SkinRef::from_path(join(model_dir, &file)))
            .collect();

        if skins.is_empty() {
            warn!("No skins found for model in '{model_dir}'");
        }
        Ok(skins)
    }
}

fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map_or("", |(dir, _)| dir)
}

fn file_name(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}

fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

fn strip_extension(path: &str) -> &str {
    let stem = file_stem(path);
    let dir = parent_dir(path);
    if dir.is_empty() {
        stem
    } else {
        &path[..dir.len() + 1 + stem.len()]
    }
}

fn join(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}
