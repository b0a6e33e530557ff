use crate::{error::GeometryError, Camera, Light, Orientation, TorusGeometry};

#[derive(Clone, Copy, Debug)]
pub struct Scene {
    pub geometry: TorusGeometry,
    pub camera: Camera,
    pub light: Light,
    pub orientation: Orientation,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(TorusGeometry::default(), Camera::default())
    }
}

impl Scene {
    pub fn new(geometry: TorusGeometry, camera: Camera) -> Self {
        Self {
            geometry,
            camera,
            light: Light::default(),
            orientation: Orientation::default(),
        }
    }

    pub fn with_light(mut self, light: Light) -> Self {
        self.light = light;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        self.geometry.validate()?;
        self.camera.validate(self.geometry.extent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_checks_viewer_against_extent() {
        assert!(Scene::default().validate().is_ok());
        let crowded = Scene::new(TorusGeometry::new(2.0, 3.0), Camera::new(5.0));
        assert!(matches!(
            crowded.validate(),
            Err(GeometryError::ViewerTooClose { .. })
        ));
    }
}
