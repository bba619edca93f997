//! In-memory scene source for pipeline tests.

use image::{Rgb, RgbImage};
use sfmprep_data::PinholeIntrinsics;
use sfmprep_ingest::{Frame, Scene, SceneEntry, SceneSource, SourceError};
use std::collections::HashMap;
use std::path::PathBuf;

/// How a scripted scene behaves when loaded.
#[derive(Debug, Clone)]
pub enum Script {
    /// Yield these frame ids in order.
    Frames(Vec<String>),
    /// Yield this many frames, then fail.
    FailAfter(usize),
    /// Fail in `load` itself.
    FailLoad,
}

#[derive(Debug, Clone)]
struct ScriptedScene {
    intrinsics: PinholeIntrinsics,
    script: Script,
}

/// Scene source backed by scripts, with 8x4 solid-colour frames.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    order: Vec<String>,
    scenes: HashMap<String, ScriptedScene>,
    pub allow_validation: bool,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self {
            allow_validation: true,
            ..Self::default()
        }
    }

    /// Scene with `count` frames named `000000`, `000001`, ...
    pub fn with_frames(self, rel_path: &str, count: usize) -> Self {
        let ids = (0..count).map(|n| format!("{:06}", n)).collect();
        self.with_script(rel_path, Script::Frames(ids))
    }

    pub fn with_script(mut self, rel_path: &str, script: Script) -> Self {
        self.order.push(rel_path.to_string());
        self.scenes.insert(
            rel_path.to_string(),
            ScriptedScene {
                intrinsics: PinholeIntrinsics::new(500.0, 500.0, 320.0, 128.0),
                script,
            },
        );
        self
    }

    pub fn with_intrinsics(mut self, rel_path: &str, intrinsics: PinholeIntrinsics) -> Self {
        if let Some(scene) = self.scenes.get_mut(rel_path) {
            scene.intrinsics = intrinsics;
        }
        self
    }
}

pub fn test_frame(id: &str) -> Frame {
    Frame::new(RgbImage::from_pixel(8, 4, Rgb([200, 100, 50])), id)
}

impl SceneSource for ScriptedSource {
    fn enumerate(&self) -> Result<Vec<SceneEntry>, SourceError> {
        Ok(self
            .order
            .iter()
            .map(|name| SceneEntry::new("memory", "0", name))
            .collect())
    }

    fn load(&self, entry: &SceneEntry) -> Result<Scene<'_>, SourceError> {
        let name = entry.rel_path.to_string_lossy().into_owned();
        let scene = self
            .scenes
            .get(&name)
            .ok_or_else(|| SourceError::NoFrames(PathBuf::from(&name)))?;

        let frames: Vec<Result<Frame, SourceError>> = match &scene.script {
            Script::Frames(ids) => ids.iter().map(|id| Ok(test_frame(id))).collect(),
            Script::FailAfter(ok) => (0..*ok)
                .map(|n| Ok(test_frame(&format!("{:06}", n))))
                .chain(std::iter::once(Err(SourceError::NoFrames(PathBuf::from(&name)))))
                .collect(),
            Script::FailLoad => return Err(SourceError::DatasetNotFound(PathBuf::from(&name))),
        };

        Ok(Scene::new(
            &entry.rel_path,
            scene.intrinsics.to_matrix(),
            Box::new(frames.into_iter()),
        ))
    }

    fn allows_random_validation(&self) -> bool {
        self.allow_validation
    }
}
