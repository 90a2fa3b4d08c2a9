use crate::shared::frame::Frame;

/// EXIF-style encoded origin of an image.
///
/// Only the four unmirrored origins are represented; mirrored origins are
/// mapped to `TopLeft` at the decode boundary and left untouched, matching
/// how most viewers degrade. Detection coordinates refer to the image as
/// displayed, so the buffer must be brought into display orientation
/// before any drawing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Default; no transform needed.
    TopLeft,
    /// Upside down; 180° rotation needed.
    BottomRight,
    /// 90° clockwise rotation needed.
    RightTop,
    /// 270° clockwise rotation needed.
    LeftBottom,
}

/// Rotates a frame into display orientation.
///
/// 180° happens in place over the existing buffer; quarter turns allocate
/// a new buffer with swapped dimensions.
pub fn normalize(frame: Frame, orientation: Orientation) -> Frame {
    match orientation {
        Orientation::TopLeft => frame,
        Orientation::BottomRight => rotate_180(frame),
        Orientation::RightTop => rotate_quarter(frame, Quarter::Clockwise),
        Orientation::LeftBottom => rotate_quarter(frame, Quarter::CounterClockwise),
    }
}

enum Quarter {
    Clockwise,
    CounterClockwise,
}

fn rotate_180(mut frame: Frame) -> Frame {
    let channels = frame.channels() as usize;
    let data = frame.data_mut();
    let pixels = data.len() / channels;
    for i in 0..pixels / 2 {
        let j = pixels - 1 - i;
        for c in 0..channels {
            data.swap(i * channels + c, j * channels + c);
        }
    }
    frame
}

fn rotate_quarter(frame: Frame, direction: Quarter) -> Frame {
    let w = frame.width() as usize;
    let h = frame.height() as usize;
    let channels = frame.channels() as usize;
    let src = frame.data();
    let mut dst = vec![0u8; src.len()];

    // Destination has swapped dimensions: width h, height w.
    for sy in 0..h {
        for sx in 0..w {
            let (dx, dy) = match direction {
                Quarter::Clockwise => (h - 1 - sy, sx),
                Quarter::CounterClockwise => (sy, w - 1 - sx),
            };
            let s = (sy * w + sx) * channels;
            let d = (dy * h + dx) * channels;
            dst[d..d + channels].copy_from_slice(&src[s..s + channels]);
        }
    }

    Frame::new(dst, frame.height(), frame.width(), frame.channels())
}
