use super::common::{GeoPoint, distance};

/// Linear radius query over sampled positions.
///
/// Returns the ids of all objects whose great circle distance to `center` is at most
/// `radius_km`. The result keeps the input order so downstream random selection is
/// reproducible under a fixed seed.
pub fn nearby<'a, I, Id>(center: GeoPoint, radius_km: f64, objects: I) -> Vec<Id>
where
    I: IntoIterator<Item = (&'a Id, GeoPoint)>,
    Id: Clone + 'a,
{
    objects
        .into_iter()
        .filter(|(_, pos)| distance(center, *pos) <= radius_km)
        .map(|(id, _)| id.clone())
        .collect()
}
