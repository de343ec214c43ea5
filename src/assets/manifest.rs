//! Resource manifests (JSON or XML) and loading them into a [`ResourceCache`].

use std::path::{Path, PathBuf};

use crate::assets::loader::ResourceLoader;
use crate::assets::store::ResourceCache;
use crate::foundation::error::{TableauError, TableauResult};

/// Manifest format versions understood by the loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ManifestVersion {
    /// The `0.1` layout, which is also `latest`.
    V0_1,
}

impl ManifestVersion {
    /// Resolve a version string. Missing or empty means latest; unknown versions fail.
    pub fn parse(version: Option<&str>) -> TableauResult<Self> {
        match version.map(str::trim) {
            None | Some("") | Some("latest") | Some("0.1") => Ok(Self::V0_1),
            Some(other) => Err(TableauError::resource(format!(
                "unknown manifest version '{other}'"
            ))),
        }
    }
}

/// One entry of the `images` list.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct ImageEntry {
    /// Cache id.
    pub id: String,
    /// Optional image type hint.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Single image file.
    pub file: Option<String>,
    /// Files of a frame sequence.
    pub files: Vec<String>,
    /// Grid rows when slicing `file`.
    pub rows: u32,
    /// Grid columns when slicing `file`.
    pub cols: u32,
    /// Horizontal gap between grid cells.
    #[serde(rename = "padding-x")]
    pub padding_x: f64,
    /// Vertical gap between grid cells.
    #[serde(rename = "padding-y")]
    pub padding_y: f64,
}

/// One entry of the `fonts` list.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct FontEntry {
    /// Cache id.
    pub id: String,
    /// Font files.
    pub files: Vec<String>,
}

/// A parsed manifest.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Declared version string, if any.
    pub version: Option<String>,
    /// Prefix joined to every file path.
    pub path: Option<String>,
    /// Image entries.
    pub images: Vec<ImageEntry>,
    /// Font entries.
    pub fonts: Vec<FontEntry>,
}

/// Counts of what a manifest added to the cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManifestReport {
    /// Single frames.
    pub frames: usize,
    /// Frame sequences (file lists and grids).
    pub sequences: usize,
    /// Total frames across sequences.
    pub sequence_frames: usize,
    /// Font collections.
    pub fonts: usize,
}

impl Manifest {
    /// Parse a JSON manifest and check its version.
    pub fn from_json_str(src: &str) -> TableauResult<Self> {
        let manifest: Self =
            serde_json::from_str(src).map_err(|e| TableauError::serde(e.to_string()))?;
        ManifestVersion::parse(manifest.version.as_deref())?;
        Ok(manifest)
    }

    /// Parse an XML manifest (`<resources>` root) and check its version.
    pub fn from_xml_str(src: &str) -> TableauResult<Self> {
        let doc = roxmltree::Document::parse(src)
            .map_err(|e| TableauError::serde(format!("xml: {e}")))?;
        let root = doc.root_element();
        if !root.has_tag_name("resources") {
            return Err(TableauError::resource(format!(
                "manifest root must be <resources>, found <{}>",
                root.tag_name().name()
            )));
        }

        let child_text = |name: &str| {
            root.children()
                .find(|n| n.has_tag_name(name))
                .and_then(|n| n.text())
                .map(|t| t.trim().to_owned())
        };
        let version = child_text("version");
        ManifestVersion::parse(version.as_deref())?;

        let mut manifest = Self {
            version,
            path: child_text("path"),
            ..Self::default()
        };

        let file_paths = |node: roxmltree::Node<'_, '_>| -> Vec<String> {
            node.children()
                .filter(roxmltree::Node::is_element)
                .filter_map(|f| f.attribute("path").map(str::to_owned))
                .collect()
        };

        if let Some(images) = root.children().find(|n| n.has_tag_name("images")) {
            for image in images.children().filter(roxmltree::Node::is_element) {
                manifest.images.push(ImageEntry {
                    id: image.attribute("id").unwrap_or_default().to_owned(),
                    kind: image.attribute("type").map(str::to_owned),
                    file: image.attribute("file").map(str::to_owned),
                    files: file_paths(image),
                    rows: parse_attr(image, "rows")?.unwrap_or(0),
                    cols: parse_attr(image, "cols")?.unwrap_or(0),
                    padding_x: parse_attr(image, "padding-x")?.unwrap_or(0.0),
                    padding_y: parse_attr(image, "padding-y")?.unwrap_or(0.0),
                });
            }
        }

        if let Some(fonts) = root.children().find(|n| n.has_tag_name("fonts")) {
            for font in fonts.children().filter(roxmltree::Node::is_element) {
                manifest.fonts.push(FontEntry {
                    id: font.attribute("id").unwrap_or_default().to_owned(),
                    files: file_paths(font),
                });
            }
        }

        Ok(manifest)
    }

    /// Read a manifest file, choosing the parser from the extension (`.xml`, otherwise JSON).
    pub fn from_path(path: &Path) -> TableauResult<Self> {
        let src = std::fs::read_to_string(path).map_err(|e| {
            TableauError::resource(format!("read manifest '{}': {e}", path.display()))
        })?;
        let is_xml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
        if is_xml {
            Self::from_xml_str(&src)
        } else {
            Self::from_json_str(&src)
        }
    }

    fn resolve(&self, base_dir: &Path, file: &str) -> PathBuf {
        let prefix = self.path.as_deref().unwrap_or_default();
        base_dir.join(format!("{prefix}{file}"))
    }
}

fn parse_attr<T: std::str::FromStr>(
    node: roxmltree::Node<'_, '_>,
    name: &str,
) -> TableauResult<Option<T>> {
    node.attribute(name)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|_| {
                TableauError::resource(format!("attribute '{name}' has invalid value '{raw}'"))
            })
        })
        .transpose()
}

impl ResourceCache {
    /// Load every entry of `manifest`, resolving files against `base_dir` and the manifest's
    /// `path` prefix. Stops at the first failing entry.
    #[tracing::instrument(skip(self, manifest, loader), fields(images = manifest.images.len(), fonts = manifest.fonts.len()))]
    pub fn load_manifest(
        &mut self,
        manifest: &Manifest,
        loader: &dyn ResourceLoader,
        base_dir: &Path,
    ) -> TableauResult<ManifestReport> {
        ManifestVersion::parse(manifest.version.as_deref())?;
        let mut report = ManifestReport::default();

        for image in &manifest.images {
            let entry_err = |e: TableauError| {
                TableauError::resource(format!("image entry '{}': {e}", image.id))
            };
            if image.id.is_empty() {
                return Err(TableauError::resource("image entry without an id"));
            }
            if let Some(kind) = image.kind.as_deref()
                && kind != "image"
            {
                tracing::warn!(id = %image.id, kind, "unsupported image type, loading as a still image");
            }

            if image.rows > 0 || image.cols > 0 {
                let file = image
                    .file
                    .as_deref()
                    .filter(|f| !f.is_empty())
                    .ok_or_else(|| entry_err(TableauError::resource("grid needs a 'file'")))?;
                let seq = self
                    .load_grid(
                        loader,
                        &image.id,
                        &manifest.resolve(base_dir, file),
                        image.rows.max(1),
                        image.cols.max(1),
                        (image.padding_x, image.padding_y),
                    )
                    .map_err(entry_err)?;
                report.sequences += 1;
                report.sequence_frames += seq.len();
            } else if !image.files.is_empty() {
                let paths: Vec<_> = image
                    .files
                    .iter()
                    .map(|f| manifest.resolve(base_dir, f))
                    .collect();
                let seq = self
                    .load_sequence(loader, &image.id, &paths)
                    .map_err(entry_err)?;
                report.sequences += 1;
                report.sequence_frames += seq.len();
            } else {
                let file = image
                    .file
                    .as_deref()
                    .filter(|f| !f.is_empty())
                    .ok_or_else(|| entry_err(TableauError::resource("no 'file' or 'files'")))?;
                self.load_frame(loader, &image.id, &manifest.resolve(base_dir, file))
                    .map_err(entry_err)?;
                report.frames += 1;
            }
        }

        for font in &manifest.fonts {
            let paths: Vec<_> = font
                .files
                .iter()
                .map(|f| manifest.resolve(base_dir, f))
                .collect();
            self.load_fonts(loader, &font.id, &paths).map_err(|e| {
                TableauError::resource(format!("font entry '{}': {e}", font.id))
            })?;
            report.fonts += 1;
        }

        tracing::debug!(?report, "manifest loaded");
        Ok(report)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/manifest.rs"]
mod tests;
