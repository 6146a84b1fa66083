use std::{
    collections::{hash_map::Entry, HashMap},
    path::Path,
};

use geo::{Centroid, MultiPolygon};
use shapefile::dbase::{FieldValue, Record};

use super::{safe_extract, ZoneIndexConfig, ZoneRecord};
use crate::{model::ZoneId, projection::Crs, util::fs::find_file, PreprocessError};

/// read-only lookup from zone identifier to zone centroid. trips are joined
/// against this table twice, once for pickup and once for dropoff.
#[derive(Clone, Debug)]
pub struct ZoneIndex {
    zones: HashMap<ZoneId, ZoneRecord>,
}

impl ZoneIndex {
    /// extracts the zone archive into `extract_dir` and builds the index from
    /// the shapefile found inside of it.
    pub fn load(
        zone_archive_path: &Path,
        extract_dir: &Path,
        config: &ZoneIndexConfig,
    ) -> Result<ZoneIndex, PreprocessError> {
        if !zone_archive_path.is_file() {
            return Err(PreprocessError::MissingInput(format!(
                "zones file {} does not exist",
                zone_archive_path.display()
            )));
        }
        safe_extract(zone_archive_path, extract_dir)?;
        let shapefile_path = find_file(extract_dir, &config.shapefile_name)?.ok_or_else(|| {
            PreprocessError::MissingInput(format!(
                "zone archive '{}' does not contain '{}'",
                zone_archive_path.display(),
                config.shapefile_name
            ))
        })?;
        ZoneIndex::from_shapefile(&shapefile_path, config)
    }

    /// reads zone polygons and their identifiers from a shapefile and its
    /// companion dbase table.
    pub fn from_shapefile(
        shapefile_path: &Path,
        config: &ZoneIndexConfig,
    ) -> Result<ZoneIndex, PreprocessError> {
        log::info!("loading zones from {}", shapefile_path.display());
        let rows = shapefile::read_as::<_, shapefile::Polygon, Record>(shapefile_path).map_err(
            |e| PreprocessError::Parse {
                path: shapefile_path.to_path_buf(),
                message: e.to_string(),
            },
        )?;
        let geometries = rows
            .into_iter()
            .enumerate()
            .map(|(n, (polygon, record))| {
                let zone_id = read_zone_id(&record, &config.zone_id_column, shapefile_path, n)?;
                let geometry: MultiPolygon<f64> = polygon.into();
                Ok((zone_id, geometry))
            })
            .collect::<Result<Vec<_>, PreprocessError>>()?;
        ZoneIndex::from_geometries(geometries, &config.source_crs, &config.projected_crs)
    }

    /// computes centroids in the source frame, then reprojects them into the
    /// projected frame and into geographic coordinates. geometries without a
    /// centroid are skipped, and the first occurrence of a duplicated zone id wins.
    pub fn from_geometries<I>(
        geometries: I,
        source_crs: &Crs,
        projected_crs: &Crs,
    ) -> Result<ZoneIndex, PreprocessError>
    where
        I: IntoIterator<Item = (ZoneId, MultiPolygon<f64>)>,
    {
        if projected_crs.is_geographic() {
            return Err(PreprocessError::InvalidConfiguration(String::from(
                "projected_crs must be a planar reference frame",
            )));
        }
        source_crs.validate()?;
        projected_crs.validate()?;

        let mut zones: HashMap<ZoneId, ZoneRecord> = HashMap::new();
        for (zone_id, geometry) in geometries {
            let centroid = match geometry.centroid() {
                Some(c) => c,
                None => {
                    log::warn!("zone {zone_id} has an empty geometry, skipping");
                    continue;
                }
            };
            let centroid_projected = source_crs.transform_point(projected_crs, centroid)?;
            let geographic = source_crs.to_geographic(centroid.0)?;
            let record = ZoneRecord {
                zone_id,
                geometry,
                centroid_projected,
                latitude: geographic.y,
                longitude: geographic.x,
            };
            match zones.entry(zone_id) {
                Entry::Occupied(_) => {
                    log::warn!("zone {zone_id} appears more than once, keeping first occurrence")
                }
                Entry::Vacant(v) => {
                    v.insert(record);
                }
            }
        }
        log::info!("loaded {} zones", zones.len());
        Ok(ZoneIndex { zones })
    }

    /// builds an index from already-projected zone records.
    pub fn from_records<I>(records: I) -> ZoneIndex
    where
        I: IntoIterator<Item = ZoneRecord>,
    {
        let mut zones = HashMap::new();
        for record in records {
            zones.entry(record.zone_id).or_insert(record);
        }
        ZoneIndex { zones }
    }

    pub fn get(&self, zone_id: &ZoneId) -> Option<&ZoneRecord> {
        self.zones.get(zone_id)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ZoneRecord> {
        self.zones.values()
    }
}

fn read_zone_id(
    record: &Record,
    column: &str,
    path: &Path,
    row: usize,
) -> Result<ZoneId, PreprocessError> {
    let deserialize_error = |message: String| PreprocessError::Deserialize {
        col: column.to_string(),
        path: path.to_path_buf(),
        message,
    };
    let value = record
        .get(column)
        .ok_or_else(|| deserialize_error(format!("column missing from record {row}")))?;
    let zone_id = match value {
        FieldValue::Numeric(Some(v)) => integral(*v),
        FieldValue::Double(v) => integral(*v),
        FieldValue::Float(Some(v)) => integral(*v as f64),
        FieldValue::Integer(v) => Some(*v as i64),
        FieldValue::Character(Some(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    zone_id
        .map(ZoneId)
        .ok_or_else(|| deserialize_error(format!("record {row} has non-integer zone id {value:?}")))
}

fn integral(v: f64) -> Option<i64> {
    if v.is_finite() && v.fract() == 0.0 {
        Some(v as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use geo::{polygon, Distance, Euclidean, MultiPolygon};

    fn square(x: f64, y: f64, size: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: x, y: y),
            (x: x + size, y: y),
            (x: x + size, y: y + size),
            (x: x, y: y + size),
            (x: x, y: y),
        ]])
    }

    #[test]
    fn test_centroids_are_projected() {
        let lcc = Crs::new_york_long_island();
        let albers = Crs::california_albers();
        // two 1000ft squares 10000ft apart in the NY Long Island frame
        let index = ZoneIndex::from_geometries(
            vec![
                (ZoneId(1), square(980_000.0, 200_000.0, 1_000.0)),
                (ZoneId(2), square(990_000.0, 200_000.0, 1_000.0)),
            ],
            &lcc,
            &albers,
        )
        .unwrap();

        assert_eq!(index.len(), 2);
        let a = index.get(&ZoneId(1)).unwrap();
        let b = index.get(&ZoneId(2)).unwrap();
        // around 40.7N, 74W
        assert!((a.latitude - 40.7).abs() < 0.1, "{}", a.latitude);
        assert!((a.longitude + 74.0).abs() < 0.1, "{}", a.longitude);
        // 10000 ftUS is about 3048m
        let d = Euclidean.distance(a.centroid_projected, b.centroid_projected);
        assert!(d > 2_500.0 && d < 3_600.0, "{d}");
    }

    #[test]
    fn test_geographic_projected_crs_rejected() {
        let result = ZoneIndex::from_geometries(
            vec![(ZoneId(1), square(0.0, 0.0, 1.0))],
            &Crs::Geographic,
            &Crs::Geographic,
        );
        assert!(matches!(
            result,
            Err(PreprocessError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_duplicates_and_empty_geometries() {
        let index = ZoneIndex::from_geometries(
            vec![
                (ZoneId(7), square(-74.0, 40.7, 0.01)),
                (ZoneId(7), square(-73.0, 40.7, 0.01)),
                (ZoneId(8), MultiPolygon(vec![])),
            ],
            &Crs::Geographic,
            &Crs::california_albers(),
        )
        .unwrap();
        assert_eq!(index.len(), 1);
        assert!((index.get(&ZoneId(7)).unwrap().longitude + 73.995).abs() < 1e-9);
        assert!(index.get(&ZoneId(8)).is_none());
    }

    #[test]
    fn test_missing_archive() {
        let dir = tempfile::tempdir().unwrap();
        let result = ZoneIndex::load(
            &dir.path().join("taxi_zones.zip"),
            dir.path(),
            &ZoneIndexConfig::default(),
        );
        assert!(matches!(result, Err(PreprocessError::MissingInput(_))));
    }
}
