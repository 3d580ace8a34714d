//! Structured value types with dedicated wire shapes: vectors, quaternions,
//! rotators, transforms, colors, and 4x4 matrices.
//!
//! Conversion math mirrors the game-engine conventions the wire format comes
//! from: rotators are degrees in pitch/roll/yaw field order, and byte colors
//! convert to linear colors through the sRGB curve.

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Vec2 { x, y }
    }

    /// Constant vector: both components set to the same value.
    pub fn splat(v: f64) -> Self {
        Vec2 { x: v, y: v }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vec3 { x, y, z }
    }

    pub fn splat(v: f64) -> Self {
        Vec3 { x: v, y: v, z: v }
    }

    pub const ONE: Vec3 = Vec3 { x: 1.0, y: 1.0, z: 1.0 };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Default for Quat {
    fn default() -> Self {
        Quat::IDENTITY
    }
}

impl Quat {
    pub const IDENTITY: Quat = Quat { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Quat { x, y, z, w }
    }
}

/// Euler rotation in degrees. Field order is pitch, roll, yaw — the wire
/// order, which is NOT the roll/pitch/yaw order other conventions use.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotator {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
}

impl Rotator {
    pub fn new(pitch: f64, roll: f64, yaw: f64) -> Self {
        Rotator { pitch, roll, yaw }
    }

    /// Convert to the equivalent quaternion (engine convention: yaw about Z,
    /// pitch about Y, roll about X, left-handed sign pattern).
    pub fn quaternion(&self) -> Quat {
        let half = std::f64::consts::PI / 360.0;
        let (sp, cp) = (self.pitch * half).sin_cos();
        let (sy, cy) = (self.yaw * half).sin_cos();
        let (sr, cr) = (self.roll * half).sin_cos();
        Quat {
            x: cr * sp * sy - sr * cp * cy,
            y: -cr * sp * cy - sr * cp * sy,
            z: cr * cp * sy - sr * sp * cy,
            w: cr * cp * cy + sr * sp * sy,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Transform {
            translation: Vec3::default(),
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// 8-bit sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Named color table. Lookup is case-sensitive.
pub const NAMED_COLORS: &[(&str, Color)] = &[
    ("Red", Color::rgb(255, 0, 0)),
    ("Yellow", Color::rgb(255, 255, 0)),
    ("Green", Color::rgb(0, 255, 0)),
    ("Blue", Color::rgb(0, 0, 255)),
    ("White", Color::rgb(255, 255, 255)),
    ("Black", Color::rgb(0, 0, 0)),
    ("Transparent", Color::new(0, 0, 0, 0)),
    ("Cyan", Color::rgb(0, 255, 255)),
    ("Magenta", Color::rgb(255, 0, 255)),
    ("Orange", Color::rgb(243, 156, 18)),
    ("Purple", Color::rgb(169, 7, 228)),
    ("Turquoise", Color::rgb(26, 188, 156)),
    ("Silver", Color::rgb(189, 195, 199)),
    ("Emerald", Color::rgb(46, 204, 113)),
];

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    /// Case-sensitive named-color lookup.
    pub fn named(name: &str) -> Option<Color> {
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
    }

    /// Gamma-correct conversion to linear color (sRGB decode curve; alpha is
    /// linear already).
    pub fn to_linear(&self) -> LinearColor {
        LinearColor {
            r: srgb_to_linear(self.r),
            g: srgb_to_linear(self.g),
            b: srgb_to_linear(self.b),
            a: self.a as f32 / 255.0,
        }
    }
}

fn srgb_to_linear(channel: u8) -> f32 {
    let c = channel as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Float color in linear space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Row-major 4x4 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub rows: [[f64; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Mat4::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        rows: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };
}
