//! Asset manifest and texture handle registry.
//!
//! Textures are identified by content-addressed handles derived from their
//! logical path. The renderer consumes textures by handle, never by raw file
//! path. Decoding image data is left to the platform layer.
//!
//! # Layout
//! The manifest can be persisted to disk as JSON so a build can ship with a
//! different set of files.

use lander_common::TextureHandle;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("texture not registered: {0:?}")]
    NotFound(TextureHandle),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Logical texture paths, one per role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TexturePaths {
    pub player: String,
    pub rock: String,
    pub victory: String,
    pub start: String,
    pub win: String,
    pub lose: String,
    pub font: String,
    pub flame: String,
    pub background: String,
}

impl Default for TexturePaths {
    fn default() -> Self {
        Self {
            player: "assets/alis.png".into(),
            rock: "assets/rock.png".into(),
            victory: "assets/mars.png".into(),
            start: "assets/earth.png".into(),
            win: "assets/youwin.jpg".into(),
            lose: "assets/youdied.jpg".into(),
            font: "assets/font1.png".into(),
            flame: "assets/fire.png".into(),
            background: "assets/space.jpg".into(),
        }
    }
}

impl TexturePaths {
    fn iter(&self) -> impl Iterator<Item = &str> {
        [
            &self.player,
            &self.rock,
            &self.victory,
            &self.start,
            &self.win,
            &self.lose,
            &self.font,
            &self.flame,
            &self.background,
        ]
        .into_iter()
        .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderPaths {
    pub vertex: String,
    pub fragment: String,
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self {
            vertex: "shaders/vertex_textured.glsl".into(),
            fragment: "shaders/fragment_textured.glsl".into(),
        }
    }
}

/// Every file the game needs, relative to the asset root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetManifest {
    #[serde(default)]
    pub textures: TexturePaths,
    #[serde(default)]
    pub shaders: ShaderPaths,
}

impl AssetManifest {
    /// All paths in the manifest, textures first.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.textures
            .iter()
            .chain([self.shaders.vertex.as_str(), self.shaders.fragment.as_str()])
    }

    /// Files listed in the manifest that do not exist under `root`.
    pub fn missing_files(&self, root: impl AsRef<Path>) -> Vec<PathBuf> {
        let root = root.as_ref();
        self.paths()
            .map(|p| root.join(p))
            .filter(|p| !p.is_file())
            .collect()
    }

    /// Save the manifest to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AssetError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a manifest from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let file = std::fs::File::open(path)?;
        let manifest: Self = serde_json::from_reader(file)?;
        Ok(manifest)
    }
}

/// Content-addressed texture registry.
///
/// Handles are derived from the path alone, so registering the same path
/// twice yields the same handle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextureRegistry {
    textures: BTreeMap<TextureHandle, String>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture path and return its handle.
    pub fn register(&mut self, path: &str) -> TextureHandle {
        let handle = content_hash(path);
        if self.textures.insert(handle, path.to_string()).is_none() {
            tracing::debug!(path, handle = handle.0, "texture registered");
        }
        handle
    }

    /// The path behind `handle`, if registered.
    pub fn resolve(&self, handle: TextureHandle) -> Option<&str> {
        self.textures.get(&handle).map(String::as_str)
    }

    pub fn require(&self, handle: TextureHandle) -> Result<&str, AssetError> {
        self.resolve(handle).ok_or(AssetError::NotFound(handle))
    }

    /// Number of distinct textures.
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

fn content_hash(path: &str) -> TextureHandle {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    let result = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&result[..8]);
    TextureHandle(u64::from_le_bytes(bytes))
}

/// Resolved handles for every texture role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureSet {
    pub player: TextureHandle,
    pub rock: TextureHandle,
    pub victory: TextureHandle,
    pub start: TextureHandle,
    pub win: TextureHandle,
    pub lose: TextureHandle,
    pub font: TextureHandle,
    pub flame: TextureHandle,
    pub background: TextureHandle,
}

impl TextureSet {
    /// Register every texture in `manifest` and collect the handles.
    pub fn register(manifest: &AssetManifest, registry: &mut TextureRegistry) -> Self {
        let t = &manifest.textures;
        Self {
            player: registry.register(&t.player),
            rock: registry.register(&t.rock),
            victory: registry.register(&t.victory),
            start: registry.register(&t.start),
            win: registry.register(&t.win),
            lose: registry.register(&t.lose),
            font: registry.register(&t.font),
            flame: registry.register(&t.flame),
            background: registry.register(&t.background),
        }
    }
}

pub fn crate_info() -> &'static str {
    "lander-assets v0.1.0"
}
