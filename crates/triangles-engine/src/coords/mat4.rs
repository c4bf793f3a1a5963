use bytemuck::{Pod, Zeroable};

/// 4x4 `f32` matrix stored column-major, the layout both GLSL `mat4` and WGSL
/// `mat4x4<f32>` expect when uploaded without transposition.
///
/// `m[i][j]` indexing through [`Mat4::get`] addresses column `i`, row `j`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    pub const ZERO: Self = Self { cols: [[0.0; 4]; 4] };

    pub const IDENTITY: Self = Self::from_diagonal(1.0, 1.0, 1.0, 1.0);

    #[inline]
    pub const fn from_diagonal(d0: f32, d1: f32, d2: f32, d3: f32) -> Self {
        Self {
            cols: [
                [d0, 0.0, 0.0, 0.0],
                [0.0, d1, 0.0, 0.0],
                [0.0, 0.0, d2, 0.0],
                [0.0, 0.0, 0.0, d3],
            ],
        }
    }

    #[inline]
    pub fn get(&self, col: usize, row: usize) -> f32 {
        self.cols[col][row]
    }

    /// The 16 floats in upload order.
    #[inline]
    pub fn as_array(&self) -> &[f32; 16] {
        bytemuck::cast_ref(&self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_order_is_column_major() {
        let mut m = Mat4::ZERO;
        m.cols[1][0] = 5.0;
        m.cols[3][2] = 7.0;
        let flat = m.as_array();
        assert_eq!(flat[4], 5.0);
        assert_eq!(flat[14], 7.0);
    }

    #[test]
    fn identity_diagonal() {
        for i in 0..4 {
            for j in 0..4 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_eq!(Mat4::IDENTITY.get(i, j), expected);
            }
        }
    }
}
