use crate::{CaptureError, RawFrame};

/// Repacks a planar YUV420 frame into a single NV21 buffer.
///
/// Layout of the output: the full-resolution luma plane first, then one
/// interleaved V,U byte pair per 2x2 block of the source. The luma plane is
/// copied row by row honoring its row stride, with a single-copy fast path
/// when the stride equals the frame width. Chroma samples are read through
/// the chroma plane's pixel stride, which may exceed 1 on semi-planar
/// sources; the chroma row stride is assumed to equal
/// `pixel_stride * width / 2`.
///
/// A fresh buffer is allocated per call; nothing is reused across frames.
///
/// # Errors
///
/// Returns `CaptureError::Format` if the frame does not carry exactly three
/// planes, if the chroma pixel stride is zero, or if any plane holds fewer
/// bytes than its strides require.
pub fn yuv420_to_nv21(frame: &RawFrame) -> Result<Vec<u8>, CaptureError> {
    let planes = frame.planes();
    if planes.len() != 3 {
        return Err(CaptureError::Format(format!(
            "expected 3 planes (Y, U, V), got {}",
            planes.len()
        )));
    }

    let width = frame.width() as usize;
    let height = frame.height() as usize;
    let luma_size = width * height;
    let chroma_size = luma_size / 4;

    let luma = &planes[0];
    let u = &planes[1];
    let v = &planes[2];

    let row_stride = luma.row_stride;
    let luma_needed = if row_stride == width || height == 0 {
        luma_size
    } else {
        row_stride * (height - 1) + width
    };
    if luma.data.len() < luma_needed {
        return Err(CaptureError::Format(format!(
            "luma plane too short: need {luma_needed} bytes, got {}",
            luma.data.len()
        )));
    }

    let pixel_stride = u.pixel_stride;
    if pixel_stride == 0 {
        return Err(CaptureError::Format("chroma pixel stride is zero".to_string()));
    }

    let half_w = width / 2;
    let half_h = height / 2;
    if half_w > 0 && half_h > 0 {
        let last = (half_h - 1) * pixel_stride * half_w + (half_w - 1) * pixel_stride;
        for (name, plane) in [("U", u), ("V", v)] {
            if plane.data.len() <= last {
                return Err(CaptureError::Format(format!(
                    "{name} plane too short: need {} bytes, got {}",
                    last + 1,
                    plane.data.len()
                )));
            }
        }
    }

    let mut nv21 = Vec::with_capacity(luma_size + 2 * chroma_size);

    if row_stride == width {
        nv21.extend_from_slice(&luma.data[..luma_size]);
    } else {
        for row in 0..height {
            let start = row * row_stride;
            nv21.extend_from_slice(&luma.data[start..start + width]);
        }
    }

    for row in 0..half_h {
        for col in 0..half_w {
            let index = row * pixel_stride * half_w + col * pixel_stride;
            nv21.push(v.data[index]);
            nv21.push(u.data[index]);
        }
    }

    Ok(nv21)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Plane;

    fn frame(width: u32, height: u32, planes: Vec<Plane>) -> RawFrame {
        RawFrame::new(width, height, planes)
    }

    fn tight_planes(width: usize, height: usize) -> Vec<Plane> {
        let luma: Vec<u8> = (0..width * height).map(|i| (i % 251) as u8).collect();
        let chroma = width * height / 4;
        vec![
            Plane::new(luma, width, 1),
            Plane::new(vec![10; chroma], width / 2, 1),
            Plane::new(vec![20; chroma], width / 2, 1),
        ]
    }

    #[test]
    fn rejects_wrong_plane_count() {
        let f = frame(4, 4, vec![Plane::new(vec![0; 16], 4, 1)]);
        let err = yuv420_to_nv21(&f).unwrap_err();
        assert!(err.to_string().contains("3 planes"));
    }

    #[test]
    fn rejects_short_luma_plane() {
        let mut planes = tight_planes(8, 8);
        planes[0].data.truncate(10);
        let err = yuv420_to_nv21(&frame(8, 8, planes)).unwrap_err();
        assert!(err.to_string().contains("luma plane too short"));
    }

    #[test]
    fn rejects_short_chroma_plane() {
        let mut planes = tight_planes(8, 8);
        planes[2].data.truncate(3);
        let err = yuv420_to_nv21(&frame(8, 8, planes)).unwrap_err();
        assert!(err.to_string().contains("V plane too short"));
    }

    #[test]
    fn tight_luma_copies_verbatim() {
        let planes = tight_planes(8, 6);
        let expected = planes[0].data.clone();
        let nv21 = yuv420_to_nv21(&frame(8, 6, planes)).unwrap();
        assert_eq!(&nv21[..8 * 6], &expected[..]);
        assert_eq!(nv21.len(), 8 * 6 + 2 * (8 * 6 / 4));
    }

    #[test]
    fn padded_luma_rows_are_trimmed() {
        // 4x2 frame with a row stride of 6: two padding bytes per row.
        let luma = vec![
            1, 2, 3, 4, 99, 99, //
            5, 6, 7, 8, 99, 99,
        ];
        let planes = vec![
            Plane::new(luma, 6, 1),
            Plane::new(vec![50; 2], 2, 1),
            Plane::new(vec![60; 2], 2, 1),
        ];
        let nv21 = yuv420_to_nv21(&frame(4, 2, planes)).unwrap();
        assert_eq!(&nv21[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn chroma_interleaves_v_then_u() {
        let planes = vec![
            Plane::new(vec![0; 16], 4, 1),
            Plane::new(vec![11, 12, 13, 14], 2, 1),
            Plane::new(vec![21, 22, 23, 24], 2, 1),
        ];
        let nv21 = yuv420_to_nv21(&frame(4, 4, planes)).unwrap();
        assert_eq!(&nv21[16..], &[21, 11, 22, 12, 23, 13, 24, 14]);
    }

    #[test]
    fn chroma_honors_pixel_stride() {
        // Semi-planar style chroma: stride 2, sample at every even offset.
        let planes = vec![
            Plane::new(vec![0; 16], 4, 1),
            Plane::new(vec![11, 0, 12, 0, 13, 0, 14, 0], 4, 2),
            Plane::new(vec![21, 0, 22, 0, 23, 0, 24, 0], 4, 2),
        ];
        let nv21 = yuv420_to_nv21(&frame(4, 4, planes)).unwrap();
        assert_eq!(&nv21[16..], &[21, 11, 22, 12, 23, 13, 24, 14]);
    }
}
