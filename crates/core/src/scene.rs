//! Scene registry: named shader source pairs with a fixed uniform contract.
//!
//! A scene is pure configuration -- two GLSL source strings selected by name
//! at host startup. Every scene declares the same interface so the render
//! context can drive any of them with one code path: uniforms
//! [`UNIFORM_RESOLUTION`] (vec2) and [`UNIFORM_TIME`] (float), attribute
//! [`ATTRIB_POSITION`] (vec2).

use crate::error::RenderError;
use serde::{Deserialize, Serialize};

/// Name of the position attribute every scene's vertex shader declares.
pub const ATTRIB_POSITION: &str = "a_position";

/// Name of the vec2 resolution uniform.
pub const UNIFORM_RESOLUTION: &str = "u_resolution";

/// Name of the float time uniform.
pub const UNIFORM_TIME: &str = "u_time";

/// The two shader stages a scene supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShaderStage {
    /// Vertex stage.
    Vertex,
    /// Fragment stage.
    Fragment,
}

impl ShaderStage {
    /// Lowercase stage name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// All registered scene names.
const SCENE_NAMES: &[&str] = &["ember", "plasma"];

/// A named, immutable vertex + fragment source pair.
///
/// Use [`Scene::from_name`] for the built-in registry, or [`Scene::new`]
/// to supply arbitrary GLSL that honors the same uniform contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    name: String,
    vertex: String,
    fragment: String,
}

impl Scene {
    /// Wraps custom shader sources as a scene.
    ///
    /// The sources are treated as opaque text; they are only validated by
    /// the driver at compile time. They must declare the standard contract
    /// (`a_position`, `u_resolution`, `u_time`) to animate correctly, but a
    /// missing uniform is tolerated at render time and simply never set.
    pub fn new(
        name: impl Into<String>,
        vertex: impl Into<String>,
        fragment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Looks up a built-in scene by name.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::UnknownScene` if the name is not registered.
    pub fn from_name(name: &str) -> Result<Self, RenderError> {
        match name {
            "ember" => Ok(Self::new("ember", VERTEX_SHADER, EMBER_FRAGMENT)),
            "plasma" => Ok(Self::new("plasma", VERTEX_SHADER, PLASMA_FRAGMENT)),
            _ => Err(RenderError::UnknownScene(name.to_string())),
        }
    }

    /// Returns a slice of all registered scene names.
    pub fn list_names() -> &'static [&'static str] {
        SCENE_NAMES
    }

    /// The scene's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// GLSL source for the vertex stage.
    pub fn vertex_source(&self) -> &str {
        &self.vertex
    }

    /// GLSL source for the fragment stage.
    pub fn fragment_source(&self) -> &str {
        &self.fragment
    }
}

/// Shared pass-through vertex shader: positions arrive already in clip space.
const VERTEX_SHADER: &str = "\
attribute vec2 a_position;

void main() {
    gl_Position = vec4(a_position.x, a_position.y, 1.0, 1.0);
}
";

/// Domain-warped fbm noise blended between two moving color ramps.
const EMBER_FRAGMENT: &str = "\
#ifdef GL_ES
precision highp float;
#endif

uniform vec2 u_resolution;
uniform float u_time;

float random(in vec2 st) {
    return fract(sin(dot(st.xy, vec2(12.9898, 78.233))) * 43758.5453123);
}

float noise(in vec2 st) {
    vec2 i = floor(st);
    vec2 f = fract(st);

    float a = random(i);
    float b = random(i + vec2(1.0, 0.0));
    float c = random(i + vec2(0.0, 1.0));
    float d = random(i + vec2(1.0, 1.0));

    vec2 u = f * f * (3.0 - 2.0 * f);

    return mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y;
}

#define NUM_OCTAVES 8

float fbm(in vec2 st) {
    float v = 0.0;
    float a = 0.5;
    vec2 shift = vec2(100.0);
    mat2 rot = mat2(cos(0.5), sin(0.5), -sin(0.5), cos(0.5));
    for (int i = 0; i < NUM_OCTAVES; ++i) {
        v += a * noise(st);
        st = rot * st * 2.0 + shift;
        a *= 0.5;
    }
    return v;
}

void main() {
    vec2 st = gl_FragCoord.xy / u_resolution.y * 4.;
    vec3 color = vec3(0.0);

    vec2 q = vec2(0.);
    q.x = fbm(st + 0.00 * u_time);
    q.y = fbm(st + vec2(1.0));

    vec2 r = vec2(0.);
    r.x = fbm(st + 1.0 * q + vec2(1.7, 9.2) + 0.15 * u_time * 10.);
    r.y = fbm(st + 1.0 * q + vec2(8.3, 2.8) + 0.126 * u_time * 10.);

    float f = fbm(st + r);

    color = mix(vec3(st.x, cos(u_time / 10.), sin(u_time / 10.)),
                vec3(st.y, sin(u_time / 10.), sin(u_time / 10.) * cos(u_time / 10.)),
                clamp((f * f) * 4.0, 0.0, 1.0));

    color = mix(color,
                vec3(0., 0., 0.164706),
                clamp(length(q), 0., 1.));

    color = mix(color,
                vec3(0.666667, 1., 1.),
                clamp(length(r.x), 0., 1.));

    gl_FragColor = vec4((f * f * f + .6 * f * f + .5 * f) * color, 1.);
}
";

/// Classic additive-sine plasma with a drifting radial term.
const PLASMA_FRAGMENT: &str = "\
#ifdef GL_ES
precision highp float;
#endif

uniform vec2 u_resolution;
uniform float u_time;

void main() {
    vec2 st = gl_FragCoord.xy / u_resolution.xy;
    vec2 p = st * 8.0 - vec2(4.0);

    float v = sin(p.x + u_time);
    v += sin(0.5 * (p.y + u_time));
    v += sin(0.5 * (p.x + p.y + u_time));

    p += 2.0 * vec2(sin(u_time * 0.5), cos(u_time * 0.3));
    v += sin(sqrt(p.x * p.x + p.y * p.y + 1.0) + u_time);

    vec3 color = vec3(sin(v * 3.14159),
                      sin(v * 3.14159 + 2.09439),
                      sin(v * 3.14159 + 4.18879));

    gl_FragColor = vec4(color * 0.5 + 0.5, 1.0);
}
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_resolves_every_listed_scene() {
        for name in Scene::list_names() {
            let scene = Scene::from_name(name).expect("listed scene must resolve");
            assert_eq!(scene.name(), *name);
        }
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = Scene::from_name("nonexistent");
        assert!(matches!(result, Err(RenderError::UnknownScene(_))));
    }

    #[test]
    fn list_names_includes_both_builtins() {
        let names = Scene::list_names();
        assert!(names.contains(&"ember"));
        assert!(names.contains(&"plasma"));
    }

    #[test]
    fn every_fragment_declares_the_uniform_contract() {
        for name in Scene::list_names() {
            let scene = Scene::from_name(name).unwrap();
            let frag = scene.fragment_source();
            assert!(
                frag.contains(UNIFORM_RESOLUTION),
                "{name} fragment missing {UNIFORM_RESOLUTION}"
            );
            assert!(
                frag.contains(UNIFORM_TIME),
                "{name} fragment missing {UNIFORM_TIME}"
            );
            assert!(
                frag.contains("gl_FragColor"),
                "{name} fragment never writes gl_FragColor"
            );
        }
    }

    #[test]
    fn vertex_shader_declares_position_attribute() {
        let scene = Scene::from_name("ember").unwrap();
        assert!(scene.vertex_source().contains(ATTRIB_POSITION));
        assert!(scene.vertex_source().contains("gl_Position"));
    }

    #[test]
    fn builtin_scenes_share_the_vertex_shader() {
        let ember = Scene::from_name("ember").unwrap();
        let plasma = Scene::from_name("plasma").unwrap();
        assert_eq!(ember.vertex_source(), plasma.vertex_source());
    }

    #[test]
    fn custom_scene_keeps_its_sources() {
        let scene = Scene::new("mine", "vert src", "frag src");
        assert_eq!(scene.name(), "mine");
        assert_eq!(scene.vertex_source(), "vert src");
        assert_eq!(scene.fragment_source(), "frag src");
    }

    #[test]
    fn shader_stage_names_are_lowercase() {
        assert_eq!(ShaderStage::Vertex.name(), "vertex");
        assert_eq!(ShaderStage::Fragment.name(), "fragment");
        assert_eq!(format!("{}", ShaderStage::Fragment), "fragment");
    }
}
