use serde::Serialize;

/// Line segment produced by the region-growing extractor.
///
/// Endpoints are in image pixel coordinates. Needle-type detections are
/// reported to callers as these endpoints, never as polygons.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    pub p0: [f32; 2],
    pub p1: [f32; 2],
    /// Unit tangent direction.
    pub dir: [f32; 2],
    /// Endpoint distance along the tangent.
    pub len: f32,
    /// Average gradient magnitude over the grown region.
    pub avg_mag: f32,
    /// `len * avg_mag`, a saliency proxy.
    pub strength: f32,
}
