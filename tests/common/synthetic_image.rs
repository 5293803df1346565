//! Synthetic RGB buffers for end-to-end tests.

/// Solid-color interleaved RGB buffer.
pub fn solid_rgb(width: usize, height: usize, value: u8) -> Vec<u8> {
    vec![value; width * height * 3]
}

/// Black background with one white axis-aligned rectangle.
pub fn bright_patch_rgb(
    width: usize,
    height: usize,
    x0: usize,
    y0: usize,
    patch_w: usize,
    patch_h: usize,
) -> Vec<u8> {
    let mut data = vec![0u8; width * height * 3];
    for y in y0..y0 + patch_h {
        for x in x0..x0 + patch_w {
            let i = (y * width + x) * 3;
            data[i] = 255;
            data[i + 1] = 255;
            data[i + 2] = 255;
        }
    }
    data
}

/// Checkerboard with square cells, alternating black and white.
pub fn checkerboard_rgb(width: usize, height: usize, cell: usize) -> Vec<u8> {
    let mut data = vec![0u8; width * height * 3];
    for y in 0..height {
        for x in 0..width {
            if ((x / cell) + (y / cell)) % 2 == 0 {
                let i = (y * width + x) * 3;
                data[i] = 255;
                data[i + 1] = 255;
                data[i + 2] = 255;
            }
        }
    }
    data
}

/// Black background with `count` horizontal white lines of the given
/// thickness, evenly spaced, spanning columns `x0..x0 + len`.
pub fn needle_lines_rgb(
    width: usize,
    height: usize,
    count: usize,
    thickness: usize,
    x0: usize,
    len: usize,
) -> Vec<u8> {
    let mut data = vec![0u8; width * height * 3];
    let spacing = height / (count + 1);
    for n in 1..=count {
        let y_top = n * spacing;
        for dy in 0..thickness {
            let y = y_top + dy;
            for x in x0..x0 + len {
                let i = (y * width + x) * 3;
                data[i] = 255;
                data[i + 1] = 255;
                data[i + 2] = 255;
            }
        }
    }
    data
}
