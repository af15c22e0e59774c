//! Matrix math shared by the prepare and shade passes.
//!
//! Matrices are column-major and kept in `f64` until they are staged into a
//! uniform block, where they are narrowed to `f32`.

use bytemuck::{Pod, Zeroable};

/// 4x4 column-major matrix.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    /// Elements in column-major order.
    pub m: [f64; 16],
}

impl Mat4 {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Creates a matrix from column-major elements.
    #[must_use]
    pub const fn from_cols_array(m: [f64; 16]) -> Self {
        Self { m }
    }

    /// Orthographic projection onto the given box.
    #[must_use]
    pub fn ortho(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let lr = 1.0 / (left - right);
        let bt = 1.0 / (bottom - top);
        let nf = 1.0 / (near - far);

        let mut m = [0.0; 16];
        m[0] = -2.0 * lr;
        m[5] = -2.0 * bt;
        m[10] = 2.0 * nf;
        m[12] = (left + right) * lr;
        m[13] = (top + bottom) * bt;
        m[14] = (far + near) * nf;
        m[15] = 1.0;
        Self { m }
    }

    /// Returns this matrix post-multiplied by a translation.
    #[must_use]
    pub fn translate(self, x: f64, y: f64, z: f64) -> Self {
        let a = self.m;
        let mut m = a;
        m[12] = a[0] * x + a[4] * y + a[8] * z + a[12];
        m[13] = a[1] * x + a[5] * y + a[9] * z + a[13];
        m[14] = a[2] * x + a[6] * y + a[10] * z + a[14];
        m[15] = a[3] * x + a[7] * y + a[11] * z + a[15];
        Self { m }
    }

    /// Matrix product `self * rhs`.
    #[must_use]
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut m = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                m[col * 4 + row] = (0..4)
                    .map(|k| self.m[k * 4 + row] * rhs.m[col * 4 + k])
                    .sum();
            }
        }
        Self { m }
    }

    /// Transforms a point (w = 1) and returns the homogeneous result.
    #[must_use]
    pub fn transform_point(&self, x: f64, y: f64, z: f64) -> [f64; 4] {
        let m = &self.m;
        [
            m[0] * x + m[4] * y + m[8] * z + m[12],
            m[1] * x + m[5] * y + m[9] * z + m[13],
            m[2] * x + m[6] * y + m[10] * z + m[14],
            m[3] * x + m[7] * y + m[11] * z + m[15],
        ]
    }

    /// Narrows to the `f32` column layout used by uniform blocks.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_cols_f32(&self) -> [[f32; 4]; 4] {
        let mut cols = [[0.0f32; 4]; 4];
        for (i, value) in self.m.iter().enumerate() {
            cols[i / 4][i % 4] = *value as f32;
        }
        cols
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}
