//! Hillshade Shaders
//!
//! WGSL source for the two hillshade programs:
//! 1. Prepare - Sobel derivative of the padded DEM, written to an
//!    offscreen texture once per tile
//! 2. Hillshade - composites the prepared derivatives against the light
//!
//! Both programs share one bind group layout:
//!
//! ```text
//! @group(0) @binding(0)  uniform block
//! @group(0) @binding(1)  texture_2d<f32>
//! @group(0) @binding(2)  sampler
//! ```
//!
//! and the [`RasterVertex`] layout. `8192.0` in both sources is `EXTENT`.

use super::uniforms::{HillshadePrepareUniforms, HillshadeUniforms};
use crate::gfx::{ProgramDescriptor, RasterVertex};

/// The prepare program.
pub const HILLSHADE_PREPARE_PROGRAM: ProgramDescriptor = ProgramDescriptor {
    name: "hillshade_prepare",
    source: HILLSHADE_PREPARE_WGSL,
    vertex_entry: "vs_main",
    fragment_entry: "fs_main",
    attributes: &RasterVertex::ATTRIBS,
    uniform_size: std::mem::size_of::<HillshadePrepareUniforms>(),
};

/// The shade program.
pub const HILLSHADE_PROGRAM: ProgramDescriptor = ProgramDescriptor {
    name: "hillshade",
    source: HILLSHADE_WGSL,
    vertex_entry: "vs_main",
    fragment_entry: "fs_main",
    attributes: &RasterVertex::ATTRIBS,
    uniform_size: std::mem::size_of::<HillshadeUniforms>(),
};

const HILLSHADE_PREPARE_WGSL: &str = r#"
struct PrepareUniforms {
    matrix: mat4x4<f32>,
    dimension: vec2<f32>,
    zoom: f32,
    maxzoom: f32,
    unpack: vec4<f32>,
};

@group(0) @binding(0) var<uniform> u: PrepareUniforms;
@group(0) @binding(1) var u_image: texture_2d<f32>;
@group(0) @binding(2) var u_sampler: sampler;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) pos: vec2<f32>,
};

@vertex
fn vs_main(@location(0) a_pos: vec2<i32>, @location(1) a_texture_pos: vec2<u32>) -> VertexOutput {
    var out: VertexOutput;
    out.position = u.matrix * vec4<f32>(vec2<f32>(a_pos), 0.0, 1.0);

    // Skip the one-texel border: sample the tile interior only.
    let epsilon = 1.0 / u.dimension;
    let scale = (u.dimension.x - 2.0) / u.dimension.x;
    out.pos = (vec2<f32>(a_texture_pos) / 8192.0) * scale + epsilon;
    return out;
}

fn get_elevation(coord: vec2<f32>) -> f32 {
    var data = textureSampleLevel(u_image, u_sampler, coord, 0.0) * 255.0;
    data.a = -1.0;
    return dot(data, u.unpack) / 4.0;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let e = 1.0 / u.dimension;

    // a b c
    // d   f
    // g h i
    let a = get_elevation(in.pos + vec2<f32>(-e.x, -e.y));
    let b = get_elevation(in.pos + vec2<f32>(0.0, -e.y));
    let c = get_elevation(in.pos + vec2<f32>(e.x, -e.y));
    let d = get_elevation(in.pos + vec2<f32>(-e.x, 0.0));
    let f = get_elevation(in.pos + vec2<f32>(e.x, 0.0));
    let g = get_elevation(in.pos + vec2<f32>(-e.x, e.y));
    let h = get_elevation(in.pos + vec2<f32>(0.0, e.y));
    let i = get_elevation(in.pos + vec2<f32>(e.x, e.y));

    // Overzoomed tiles flatten out without this.
    var exaggeration = 0.3;
    if (u.zoom < 2.0) {
        exaggeration = 0.4;
    } else if (u.zoom < 4.5) {
        exaggeration = 0.35;
    }

    let deriv = vec2<f32>(
        (c + f + f + i) - (a + d + d + g),
        (g + h + h + i) - (a + b + b + c)
    ) / pow(2.0, (u.zoom - u.maxzoom) * exaggeration + 19.2562 - u.zoom);

    return clamp(
        vec4<f32>(deriv.x / 2.0 + 0.5, deriv.y / 2.0 + 0.5, 1.0, 1.0),
        vec4<f32>(0.0),
        vec4<f32>(1.0)
    );
}
"#;

const HILLSHADE_WGSL: &str = r#"
const PI: f32 = 3.141592653589793;

struct HillshadeUniforms {
    matrix: mat4x4<f32>,
    highlight: vec4<f32>,
    shadow: vec4<f32>,
    accent: vec4<f32>,
    light: vec2<f32>,
    latrange: vec2<f32>,
};

@group(0) @binding(0) var<uniform> u: HillshadeUniforms;
@group(0) @binding(1) var u_image: texture_2d<f32>;
@group(0) @binding(2) var u_sampler: sampler;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) pos: vec2<f32>,
};

@vertex
fn vs_main(@location(0) a_pos: vec2<i32>, @location(1) a_texture_pos: vec2<u32>) -> VertexOutput {
    var out: VertexOutput;
    out.position = u.matrix * vec4<f32>(vec2<f32>(a_pos), 0.0, 1.0);
    out.pos = vec2<f32>(a_texture_pos) / 8192.0;
    return out;
}

fn floor_mod(x: f32, y: f32) -> f32 {
    return x - y * floor(x / y);
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let pixel = textureSampleLevel(u_image, u_sampler, in.pos, 0.0);
    let deriv = (pixel.rg * 2.0) - 1.0;

    // Mercator stretches slopes towards the poles.
    let scale_factor = cos(radians((u.latrange.x - u.latrange.y) * (1.0 - in.pos.y) + u.latrange.y));
    let slope = atan(1.25 * length(deriv) / scale_factor);

    var aspect = PI / 2.0;
    if (deriv.x != 0.0) {
        aspect = atan2(deriv.y, -deriv.x);
    } else if (deriv.y <= 0.0) {
        aspect = -PI / 2.0;
    }

    let intensity = u.light.x;
    let azimuth = u.light.y + PI;

    let base = 1.875 - intensity * 1.75;
    let max_value = 0.5 * PI;
    var scaled_slope = slope;
    if (intensity != 0.5) {
        scaled_slope = ((pow(base, slope) - 1.0) / (pow(base, max_value) - 1.0)) * max_value;
    }

    let accent = cos(scaled_slope);
    let accent_color = (1.0 - accent) * u.accent * clamp(intensity * 2.0, 0.0, 1.0);
    let shade = abs(floor_mod((aspect + azimuth) / PI + 0.5, 2.0) - 1.0);
    let shade_color = mix(u.shadow, u.highlight, shade) * sin(scaled_slope) * clamp(intensity * 2.0, 0.0, 1.0);
    return accent_color * (1.0 - shade_color.a) + shade_color;
}
"#;
