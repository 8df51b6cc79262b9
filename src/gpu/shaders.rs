//! WGSL sources for the three draw-command pipelines.
//!
//! All three share the same scheme: a unit quad expanded per instance in
//! the vertex shader, shaped analytically in the fragment shader. Positions
//! are surface pixels; `view_proj` is an orthographic matrix.

/// Instanced filled disc with a soft halo past the rim.
pub const DISC_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    time: f32,
    delta_time: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VsIn {
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec2<f32>,
    @location(1) radii: vec2<f32>,
    @location(2) fill: vec4<f32>,
    @location(3) glow: vec4<f32>,
};

struct VsOut {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) offset: vec2<f32>,
    @location(1) radii: vec2<f32>,
    @location(2) fill: vec4<f32>,
    @location(3) glow: vec4<f32>,
};

@vertex
fn vs_main(in: VsIn) -> VsOut {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let corner = quad_vertices[in.vertex_index];
    let half = in.radii.x + in.radii.y;

    var out: VsOut;
    out.offset = corner * half;
    out.clip_position = uniforms.view_proj * vec4<f32>(in.center + out.offset, 0.0, 1.0);
    out.radii = in.radii;
    out.fill = in.fill;
    out.glow = in.glow;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let d = length(in.offset);
    let radius = in.radii.x;
    let glow = in.radii.y;

    let edge = 1.0 - smoothstep(radius - 0.8, radius + 0.4, d);
    var color = vec4<f32>(in.fill.rgb, in.fill.a * edge);
    if d > radius {
        let t = clamp((d - radius) / max(glow, 0.001), 0.0, 1.0);
        let halo = (1.0 - t) * (1.0 - t);
        color = vec4<f32>(in.glow.rgb, in.glow.a * halo);
    }
    if color.a <= 0.002 {
        discard;
    }
    return color;
}
"#;

/// Instanced stroke segment: a thin quad between two points, extended by
/// half a thickness at both ends to close polyline joints.
pub const SEGMENT_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    time: f32,
    delta_time: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VsIn {
    @builtin(vertex_index) vertex_index: u32,
    @location(0) p0: vec2<f32>,
    @location(1) p1: vec2<f32>,
    @location(2) width: vec2<f32>,
    @location(3) color: vec4<f32>,
};

struct VsOut {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) across: f32,
    @location(1) color: vec4<f32>,
};

@vertex
fn vs_main(in: VsIn) -> VsOut {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(0.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(0.0,  1.0),
        vec2<f32>(0.0,  1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0,  1.0),
    );

    let corner = quad_vertices[in.vertex_index];
    let seg = in.p1 - in.p0;
    let len = max(length(seg), 0.0001);
    let dir = seg / len;
    let normal = vec2<f32>(-dir.y, dir.x);
    let half_width = max(in.width.x, 0.5) * 0.5;

    let along = mix(-half_width, len + half_width, corner.x);
    let world = in.p0 + dir * along + normal * corner.y * half_width;

    var out: VsOut;
    out.clip_position = uniforms.view_proj * vec4<f32>(world, 0.0, 1.0);
    out.across = corner.y;
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let alpha = in.color.a * (1.0 - smoothstep(0.5, 1.0, abs(in.across)));
    if alpha <= 0.002 {
        discard;
    }
    return vec4<f32>(in.color.rgb, alpha);
}
"#;

/// Instanced radial gradient quad with up to four color stops.
pub const GRADIENT_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    time: f32,
    delta_time: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VsIn {
    @builtin(vertex_index) vertex_index: u32,
    @location(0) center: vec2<f32>,
    @location(1) radii: vec2<f32>,
    @location(2) offsets: vec4<f32>,
    @location(3) c0: vec4<f32>,
    @location(4) c1: vec4<f32>,
    @location(5) c2: vec4<f32>,
    @location(6) c3: vec4<f32>,
};

struct VsOut {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) offset: vec2<f32>,
    @location(1) radii: vec2<f32>,
    @location(2) offsets: vec4<f32>,
    @location(3) c0: vec4<f32>,
    @location(4) c1: vec4<f32>,
    @location(5) c2: vec4<f32>,
    @location(6) c3: vec4<f32>,
};

@vertex
fn vs_main(in: VsIn) -> VsOut {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let corner = quad_vertices[in.vertex_index];

    var out: VsOut;
    out.offset = corner * in.radii.y;
    out.clip_position = uniforms.view_proj * vec4<f32>(in.center + out.offset, 0.0, 1.0);
    out.radii = in.radii;
    out.offsets = in.offsets;
    out.c0 = in.c0;
    out.c1 = in.c1;
    out.c2 = in.c2;
    out.c3 = in.c3;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let d = length(in.offset);
    let span = max(in.radii.y - in.radii.x, 0.0001);
    let t = clamp((d - in.radii.x) / span, 0.0, 1.0);

    var color = in.c0;
    if t >= in.offsets.x {
        let s = max(in.offsets.y - in.offsets.x, 0.0001);
        color = mix(in.c0, in.c1, clamp((t - in.offsets.x) / s, 0.0, 1.0));
    }
    if t >= in.offsets.y {
        let s = max(in.offsets.z - in.offsets.y, 0.0001);
        color = mix(in.c1, in.c2, clamp((t - in.offsets.y) / s, 0.0, 1.0));
    }
    if t >= in.offsets.z {
        let s = max(in.offsets.w - in.offsets.z, 0.0001);
        color = mix(in.c2, in.c3, clamp((t - in.offsets.z) / s, 0.0, 1.0));
    }
    if color.a <= 0.002 {
        discard;
    }
    return color;
}
"#;
