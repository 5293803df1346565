//! Spatial localization of fired inclusion categories.
//!
//! For each fired category with a spatial signal the localizer extracts the
//! connected regions of the mask that triggered it: external contour (Moore
//! boundary following), bounding box, and pixel area. Components below the
//! configured area filter are discarded as noise. Needle detections keep
//! their segment endpoints instead of polygons.
//!
//! Each geometry is attributed only to the extractor that produced it; the
//! cloud/hazy category has no spatial signal (it is a global-contrast rule)
//! and yields no geometry.
use crate::classify::{InclusionLabel, InclusionReport};
use crate::features::SignalMaps;
use crate::masks::BinaryMask;
use serde::Serialize;

/// Inclusive pixel-coordinate bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl BoundingBox {
    pub fn width(&self) -> usize {
        self.x1 - self.x0 + 1
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0 + 1
    }
}

/// One localized piece of evidence for a category.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DefectGeometry {
    /// Connected mask region: external contour plus bounding box.
    Region {
        bbox: BoundingBox,
        /// External boundary in tracing order, pixel coordinates.
        contour: Vec<[u32; 2]>,
        /// Component pixel area.
        area: usize,
    },
    /// Needle-type detection: segment endpoints, never a polygon.
    Line { p0: [f32; 2], p1: [f32; 2] },
}

/// A fired label paired with the geometry that triggered it.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedDefect {
    pub label: InclusionLabel,
    pub geometries: Vec<DefectGeometry>,
}

const NEIGH_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

// Moore neighborhood in clockwise order starting from west.
const MOORE_CW: [(isize, isize); 8] = [
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

struct Component {
    area: usize,
    bbox: BoundingBox,
    start: (usize, usize),
}

fn flood_components(mask: &BinaryMask, min_area: usize) -> Vec<Component> {
    let w = mask.w;
    let h = mask.h;
    let mut visited = vec![0u8; w * h];
    let mut stack: Vec<usize> = Vec::with_capacity(64);
    let mut components = Vec::new();

    for idx in 0..w * h {
        if mask.data[idx] == 0 || visited[idx] != 0 {
            continue;
        }
        let start = (idx % w, idx / w);
        let mut area = 0usize;
        let mut bbox = BoundingBox {
            x0: start.0,
            y0: start.1,
            x1: start.0,
            y1: start.1,
        };
        visited[idx] = 1;
        stack.push(idx);
        while let Some(i) = stack.pop() {
            let x = i % w;
            let y = i / w;
            area += 1;
            bbox.x0 = bbox.x0.min(x);
            bbox.y0 = bbox.y0.min(y);
            bbox.x1 = bbox.x1.max(x);
            bbox.y1 = bbox.y1.max(y);
            for (dx, dy) in NEIGH_OFFSETS {
                let nx = x as isize + dx;
                let ny = y as isize + dy;
                if nx < 0 || ny < 0 || nx >= w as isize || ny >= h as isize {
                    continue;
                }
                let ni = ny as usize * w + nx as usize;
                if mask.data[ni] == 0 || visited[ni] != 0 {
                    continue;
                }
                visited[ni] = 1;
                stack.push(ni);
            }
        }
        if area >= min_area {
            components.push(Component { area, bbox, start });
        }
    }
    components
}

/// Moore boundary following from the component's scan-order start pixel.
///
/// The start pixel is topmost-leftmost, so entering from the west is a valid
/// backtrack direction. The walk is capped at `4 * area + 8` steps, a bound
/// on the perimeter of any 8-connected component.
fn trace_contour(mask: &BinaryMask, component: &Component) -> Vec<[u32; 2]> {
    let (sx, sy) = component.start;
    let mut contour: Vec<[u32; 2]> = vec![[sx as u32, sy as u32]];
    if component.area == 1 {
        return contour;
    }

    let on = |x: isize, y: isize| -> bool {
        x >= 0 && y >= 0 && (x as usize) < mask.w && (y as usize) < mask.h
            && mask.get(x as usize, y as usize)
    };

    let mut cx = sx as isize;
    let mut cy = sy as isize;
    // Index into MOORE_CW of the backtrack direction (west at the start).
    let mut backtrack = 0usize;
    let max_steps = 4 * component.area + 8;

    for _ in 0..max_steps {
        let mut found = None;
        for step in 1..=8 {
            let dir = (backtrack + step) % 8;
            let (dx, dy) = MOORE_CW[dir];
            if on(cx + dx, cy + dy) {
                found = Some(dir);
                break;
            }
        }
        let Some(dir) = found else {
            break; // isolated pixel, already recorded
        };
        let (dx, dy) = MOORE_CW[dir];
        cx += dx;
        cy += dy;
        if cx == sx as isize && cy == sy as isize {
            break;
        }
        contour.push([cx as u32, cy as u32]);
        // New backtrack: the direction pointing back toward the previous
        // pixel, rotated one step clockwise past it.
        backtrack = (dir + 5) % 8;
    }

    contour
}

fn regions_of(mask: &BinaryMask, min_area: usize) -> Vec<DefectGeometry> {
    flood_components(mask, min_area)
        .iter()
        .map(|component| DefectGeometry::Region {
            bbox: component.bbox,
            contour: trace_contour(mask, component),
            area: component.area,
        })
        .collect()
}

/// Attach geometry to every fired category that has a spatial signal.
pub fn localize(
    report: &InclusionReport,
    maps: &SignalMaps,
    min_region_area: usize,
) -> Vec<LocalizedDefect> {
    let mut out = Vec::new();
    for &label in &report.labels {
        let geometries = match label {
            InclusionLabel::FracturesFeathers => regions_of(&maps.edge.mask, min_region_area),
            InclusionLabel::PinpointsCrystals => regions_of(&maps.bright, min_region_area),
            InclusionLabel::FingerprintsVeils => regions_of(&maps.dilated, min_region_area),
            InclusionLabel::NeedleType => maps
                .segments
                .iter()
                .map(|s| DefectGeometry::Line { p0: s.p0, p1: s.p1 })
                .collect(),
            // Global-contrast rule, no spatial signal to attribute.
            InclusionLabel::CloudsHazy | InclusionLabel::CleanMinimal => Vec::new(),
        };
        if !geometries.is_empty() {
            out.push(LocalizedDefect { label, geometries });
        }
    }
    out
}
