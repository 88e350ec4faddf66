use crate::{math::GridLine, Params, Pos, Window};

/// Returns true if a straight glide from `target` to `origin` clears
/// the terrain in between.
///
/// Every cell the line crosses, endpoints excluded, is tested against
/// the glide line leaving `origin` at its current altitude and rising
/// by `1 / glide_ratio` per unit of ground distance towards `target`.
/// A cell strictly above that line obstructs the view.
pub fn is_in_view(window: &Window, target: Pos, origin: Pos, params: &Params) -> bool {
    let origin_altitude = window[origin].altitude;
    let mut line = GridLine::new(origin, target);
    let crossed = line.len().saturating_sub(2);
    line.next();
    line.take(crossed).all(|pos| {
        let glide = origin_altitude + window.distance(origin, pos) / params.glide_ratio;
        window[pos].elevation <= glide
    })
}
