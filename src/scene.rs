// The externally rendered 3D scene. We never render it ourselves; a scene
// implementation only has to attach to a URL and detach again. Failures leave
// the layer empty without touching anything else.

use crate::error::SceneError;

pub trait ExternalScene {
    fn mount(&mut self, url: &str) -> Result<(), SceneError>;

    fn unmount(&mut self);
}

pub struct SceneLayer<T> {
    scene: T,
    visible: bool,
}

impl<T: ExternalScene> SceneLayer<T> {
    pub fn new(scene: T) -> SceneLayer<T> {
        SceneLayer {
            scene,
            visible: false,
        }
    }

    /// Attaches the scene at `url`. A missing URL or a failing scene leaves
    /// the layer empty; the result says whether the scene is showing.
    pub fn activate(&mut self, url: Option<&str>) -> bool {
        if self.visible {
            return true;
        }
        let url = match url {
            Some(url) => url,
            None => {
                log::debug!("no scene url configured, scene layer disabled");
                return false;
            }
        };
        if url.trim().is_empty() {
            log::warn!("scene layer left empty: {}", SceneError::EmptyUrl);
            return false;
        }
        match self.scene.mount(url) {
            Ok(()) => {
                log::info!("scene layer attached: {}", url);
                self.visible = true;
            }
            Err(err) => {
                log::warn!("scene layer left empty: {}", err);
                self.scene.unmount();
            }
        }
        self.visible
    }

    pub fn deactivate(&mut self) {
        if self.visible {
            self.scene.unmount();
            self.visible = false;
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn scene(&self) -> &T {
        &self.scene
    }
}
