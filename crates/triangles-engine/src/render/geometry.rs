use crate::gfx::{BufferId, BufferTarget, BufferUsage, GraphicsContext, GraphicsError};

/// Float components per vertex (x, y, z).
pub const COORDS_PER_VERTEX: u32 = 3;

pub const VERTEX_COUNT: u32 = 3;

/// Triangle in normalized device coordinates: top, bottom left, bottom right.
pub const TRIANGLE_VERTICES: [f32; 9] = [
    0.0, 0.5, 0.0, //
    -0.5, -0.5, 0.0, //
    0.5, -0.5, 0.0, //
];

/// Vertex payload as uploaded: little-endian `f32`s regardless of host order.
pub fn triangle_bytes() -> Vec<u8> {
    TRIANGLE_VERTICES.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Creates the vertex buffer and uploads [`TRIANGLE_VERTICES`] once.
///
/// The buffer is left bound to the array target. On failure it is deleted.
pub fn upload_triangle<G>(gl: &mut G) -> Result<BufferId, GraphicsError>
where
    G: GraphicsContext + ?Sized,
{
    let buf = gl.create_buffer();
    let uploaded = gl
        .bind_buffer(BufferTarget::Array, buf)
        .and_then(|()| gl.buffer_data(BufferTarget::Array, &triangle_bytes(), BufferUsage::StaticDraw));

    if let Err(e) = uploaded {
        gl.delete_buffer(buf);
        return Err(e);
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::recording::{Call, RecordingContext};

    #[test]
    fn payload_is_nine_little_endian_floats() {
        let bytes = triangle_bytes();
        assert_eq!(bytes.len(), 36);
        assert_eq!(&bytes[4..8], &0.5f32.to_le_bytes());
        assert_eq!(&bytes[12..16], &(-0.5f32).to_le_bytes());

        let decoded: Vec<f32> = bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        assert_eq!(decoded, TRIANGLE_VERTICES);
    }

    #[test]
    fn upload_creates_binds_and_fills_one_buffer() {
        let mut gl = RecordingContext::new();
        let buf = upload_triangle(&mut gl).unwrap();

        assert_eq!(
            gl.calls(),
            &[
                Call::CreateBuffer(buf),
                Call::BindBuffer(BufferTarget::Array, buf),
                Call::BufferData {
                    target: BufferTarget::Array,
                    data: triangle_bytes(),
                    usage: BufferUsage::StaticDraw,
                },
            ]
        );
        assert_eq!(gl.contents(buf), Some(triangle_bytes().as_slice()));
    }
}
