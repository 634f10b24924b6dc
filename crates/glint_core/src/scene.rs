//! Scene description and JSON loading.
//!
//! The on-disk format is a single JSON document: render mode and bounce
//! budget at the top level, a camera block, and a scene block with the
//! background color, light sources and shapes. Everything is validated
//! here, at load time; unknown modes, light types or shape types abort
//! setup instead of degrading mid-render.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use glint_math::Vec3;
use serde::Deserialize;

use crate::{
    Color, Cylinder, Light, Material, Primitive, SceneError, Sphere, Texture, Triangle,
};

/// How primary rays are shaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// Flat hit/miss visualization, no lighting
    Binary,
    /// Blinn-Phong shading with shadows, reflection and refraction
    Phong,
}

/// Tone mapping operator applied to the linear frame before quantization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToneMap {
    Linear,
    Reinhard,
    Exposure,
    Aces,
}

/// Pinhole camera description, consumed by the renderer's camera.
#[derive(Clone, Debug)]
pub struct CameraSettings {
    pub width: u32,
    pub height: u32,
    pub position: Vec3,
    pub look_at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub exposure: f32,
}

/// A finalized scene: shape table, lights, background and render settings.
///
/// Shapes are owned by the table; the BVH and any hit results refer to
/// them by index.
#[derive(Debug)]
pub struct Scene {
    pub shapes: Vec<Primitive>,
    pub lights: Vec<Light>,
    pub background: Color,
    pub render_mode: RenderMode,
    pub tone_map: ToneMap,
    pub camera: CameraSettings,
    /// Maximum secondary-ray recursion depth
    pub nbounces: u32,
    /// Use the BVH for intersection queries (linear scan otherwise)
    pub use_bvh: bool,
    /// Multiple jittered samples per pixel
    pub antialiasing: bool,
}

impl Scene {
    /// Load a scene from a JSON file. Relative texture paths are
    /// resolved against the scene file's directory.
    pub fn load(path: &Path) -> Result<Scene, SceneError> {
        let text = std::fs::read_to_string(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::parse(&text, base)
    }

    /// Parse a scene from JSON text. Relative texture paths are resolved
    /// against the current directory.
    pub fn from_json(text: &str) -> Result<Scene, SceneError> {
        Self::parse(text, Path::new("."))
    }

    fn parse(text: &str, base: &Path) -> Result<Scene, SceneError> {
        let file: SceneFile = serde_json::from_str(text)?;

        let render_mode = match file.rendermode.as_str() {
            "binary" => RenderMode::Binary,
            "phong" => RenderMode::Phong,
            other => return Err(SceneError::UnknownRenderMode(other.to_string())),
        };

        let tone_map = match file.tonemapping.as_deref() {
            None | Some("linear") => ToneMap::Linear,
            Some("reinhard") => ToneMap::Reinhard,
            Some("exposure") => ToneMap::Exposure,
            Some("aces") => ToneMap::Aces,
            Some(other) => return Err(SceneError::UnknownToneMap(other.to_string())),
        };

        let camera = convert_camera(&file.camera)?;

        let mut lights = Vec::with_capacity(file.scene.lightsources.len());
        for light in &file.scene.lightsources {
            lights.push(convert_light(light)?);
        }

        let mut textures = TextureCache::new(base);
        let mut shapes = Vec::with_capacity(file.scene.shapes.len());
        for shape in &file.scene.shapes {
            shapes.push(convert_shape(shape, &mut textures)?);
        }

        log::info!(
            "loaded scene: {} shapes, {} lights, {:?} mode",
            shapes.len(),
            lights.len(),
            render_mode
        );

        Ok(Scene {
            shapes,
            lights,
            background: vec3(file.scene.backgroundcolor),
            render_mode,
            tone_map,
            camera,
            nbounces: file.nbounces.unwrap_or(8),
            use_bvh: file.usebvh.unwrap_or(true),
            antialiasing: file.antialiasing.unwrap_or(false),
        })
    }
}

// ============================================================================
// Raw JSON layer
// ============================================================================

#[derive(Deserialize)]
struct SceneFile {
    nbounces: Option<u32>,
    rendermode: String,
    tonemapping: Option<String>,
    usebvh: Option<bool>,
    antialiasing: Option<bool>,
    camera: CameraDesc,
    scene: SceneDesc,
}

#[derive(Deserialize)]
struct CameraDesc {
    width: u32,
    height: u32,
    position: [f32; 3],
    #[serde(rename = "lookAt")]
    look_at: [f32; 3],
    #[serde(rename = "upVector")]
    up_vector: [f32; 3],
    fov: f32,
    exposure: Option<f32>,
}

#[derive(Deserialize)]
struct SceneDesc {
    backgroundcolor: [f32; 3],
    #[serde(default)]
    lightsources: Vec<LightDesc>,
    #[serde(default)]
    shapes: Vec<ShapeDesc>,
}

#[derive(Deserialize)]
struct LightDesc {
    #[serde(rename = "type")]
    kind: String,
    intensity: [f32; 3],
    position: Option<[f32; 3]>,
    center: Option<[f32; 3]>,
    #[serde(rename = "uAxis")]
    u_axis: Option<[f32; 3]>,
    #[serde(rename = "vAxis")]
    v_axis: Option<[f32; 3]>,
    width: Option<f32>,
    height: Option<f32>,
}

#[derive(Deserialize)]
struct ShapeDesc {
    #[serde(rename = "type")]
    kind: String,
    material: Option<MaterialDesc>,
    center: Option<[f32; 3]>,
    radius: Option<f32>,
    v0: Option<[f32; 3]>,
    v1: Option<[f32; 3]>,
    v2: Option<[f32; 3]>,
    axis: Option<[f32; 3]>,
    height: Option<f32>,
}

#[derive(Deserialize)]
struct MaterialDesc {
    kd: f32,
    ks: f32,
    specularexponent: f32,
    diffusecolor: [f32; 3],
    specularcolor: [f32; 3],
    isreflective: bool,
    reflectivity: f32,
    isrefractive: bool,
    refractiveindex: f32,
    transparency: Option<f32>,
    texture: Option<String>,
}

// ============================================================================
// Conversion and validation
// ============================================================================

/// Loads each texture file once, shared across shapes.
struct TextureCache<'a> {
    base: &'a Path,
    loaded: HashMap<String, Arc<Texture>>,
}

impl<'a> TextureCache<'a> {
    fn new(base: &'a Path) -> Self {
        Self {
            base,
            loaded: HashMap::new(),
        }
    }

    fn get(&mut self, path: &str) -> Result<Arc<Texture>, SceneError> {
        if let Some(texture) = self.loaded.get(path) {
            return Ok(texture.clone());
        }

        let resolved = self.base.join(path);
        let texture =
            Arc::new(
                Texture::open(&resolved).map_err(|source| SceneError::Texture {
                    path: path.to_string(),
                    source,
                })?,
            );
        self.loaded.insert(path.to_string(), texture.clone());
        Ok(texture)
    }
}

fn vec3(a: [f32; 3]) -> Vec3 {
    Vec3::new(a[0], a[1], a[2])
}

fn require<T: Copy>(
    field: Option<T>,
    shape: &'static str,
    name: &'static str,
) -> Result<T, SceneError> {
    field.ok_or(SceneError::MissingField { shape, field: name })
}

fn positive(value: f32, what: &'static str) -> Result<f32, SceneError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(SceneError::InvalidValue { what, value })
    }
}

fn convert_camera(desc: &CameraDesc) -> Result<CameraSettings, SceneError> {
    if desc.width == 0 || desc.height == 0 {
        return Err(SceneError::InvalidValue {
            what: "camera resolution",
            value: 0.0,
        });
    }
    if !(desc.fov > 0.0 && desc.fov < 180.0) {
        return Err(SceneError::InvalidValue {
            what: "camera fov",
            value: desc.fov,
        });
    }

    Ok(CameraSettings {
        width: desc.width,
        height: desc.height,
        position: vec3(desc.position),
        look_at: vec3(desc.look_at),
        up: vec3(desc.up_vector),
        fov: desc.fov,
        exposure: desc.exposure.unwrap_or(1.0),
    })
}

fn convert_light(desc: &LightDesc) -> Result<Light, SceneError> {
    match desc.kind.as_str() {
        "pointlight" => Ok(Light::Point {
            position: vec3(require(desc.position, "pointlight", "position")?),
            intensity: vec3(desc.intensity),
        }),
        "arealight" => Ok(Light::Area {
            center: vec3(require(desc.center, "arealight", "center")?),
            intensity: vec3(desc.intensity),
            u_axis: vec3(require(desc.u_axis, "arealight", "uAxis")?).normalize(),
            v_axis: vec3(require(desc.v_axis, "arealight", "vAxis")?).normalize(),
            width: positive(require(desc.width, "arealight", "width")?, "arealight width")?,
            height: positive(
                require(desc.height, "arealight", "height")?,
                "arealight height",
            )?,
        }),
        other => Err(SceneError::UnknownLightType(other.to_string())),
    }
}

fn convert_material(
    desc: Option<&MaterialDesc>,
    textures: &mut TextureCache,
) -> Result<Material, SceneError> {
    let Some(desc) = desc else {
        return Ok(Material::default());
    };

    let texture = match &desc.texture {
        Some(path) => Some(textures.get(path)?),
        None => None,
    };

    Ok(Material {
        kd: desc.kd,
        ks: desc.ks,
        specular_exponent: desc.specularexponent,
        diffuse_color: vec3(desc.diffusecolor),
        specular_color: vec3(desc.specularcolor),
        is_reflective: desc.isreflective,
        reflectivity: desc.reflectivity,
        is_refractive: desc.isrefractive,
        refractive_index: desc.refractiveindex,
        transparency: desc.transparency.unwrap_or(0.5),
        texture,
    })
}

fn convert_shape(desc: &ShapeDesc, textures: &mut TextureCache) -> Result<Primitive, SceneError> {
    let material = convert_material(desc.material.as_ref(), textures)?;

    match desc.kind.as_str() {
        "sphere" => Ok(Primitive::Sphere(Sphere::new(
            vec3(require(desc.center, "sphere", "center")?),
            positive(require(desc.radius, "sphere", "radius")?, "sphere radius")?,
            material,
        ))),
        "triangle" => Ok(Primitive::Triangle(Triangle::new(
            vec3(require(desc.v0, "triangle", "v0")?),
            vec3(require(desc.v1, "triangle", "v1")?),
            vec3(require(desc.v2, "triangle", "v2")?),
            material,
        ))),
        "cylinder" => Ok(Primitive::Cylinder(Cylinder::new(
            vec3(require(desc.center, "cylinder", "center")?),
            vec3(require(desc.axis, "cylinder", "axis")?),
            positive(require(desc.radius, "cylinder", "radius")?, "cylinder radius")?,
            positive(require(desc.height, "cylinder", "height")?, "cylinder height")?,
            material,
        ))),
        other => Err(SceneError::UnknownShapeType(other.to_string())),
    }
}
