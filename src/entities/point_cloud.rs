use crate::ccb::header::Precision;
use crate::core::error::BinError;
use crate::core::result::Result;
use crate::io::{ByteReader, Endian};
use crate::objects::array::read_array;
use crate::objects::DecodeContext;

const SHIFT_SCALE_VERSION: u32 = 33;
const POINT_SIZE_VERSION: u32 = 24;
const SCALAR_FIELD_LAYOUT_VERSION: u32 = 27;
const GRIDS_VERSION: u32 = 41;
const WAVEFORM_VERSION: u32 = 44;

/// Visibility table value of a hidden point.
pub const POINT_HIDDEN: u8 = 0;

#[derive(Debug, Clone, PartialEq)]
pub struct PointCloud {
    pub global_shift: (f64, f64, f64),
    pub global_scale: f64,
    pub visibility: Option<Vec<u8>>,
    pub point_size: u8,
    pub points: Vec<(f64, f64, f64)>,
    pub sf_color_scale_shown: bool,
    pub displayed_sf_index: i32,
}

impl PointCloud {
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Stored point with the global shift removed.
    pub fn unshifted_point(&self, index: usize) -> Option<(f64, f64, f64)> {
        let (x, y, z) = *self.points.get(index)?;
        let (sx, sy, sz) = self.global_shift;
        Some((x - sx, y - sy, z - sz))
    }

    pub fn is_point_visible(&self, index: usize) -> bool {
        match &self.visibility {
            Some(table) => table.get(index).is_some_and(|v| *v != POINT_HIDDEN),
            None => index < self.points.len(),
        }
    }
}

/// Decodes the point cloud specific fields that follow the common object fields.
pub fn decode_point_cloud(
    reader: &mut ByteReader<'_>,
    ctx: &DecodeContext<'_>,
) -> Result<PointCloud> {
    let global_shift = reader.read_vec3d()?;
    let global_scale = if ctx.version < SHIFT_SCALE_VERSION {
        1.0
    } else {
        reader.read_f64(Endian::Little)?
    };

    let visibility_pos = reader.tell();
    let visibility = if reader.read_bool()? {
        Some(read_array(reader, ctx, 1, 1, |r| r.read_u8())?)
    } else {
        None
    };

    let point_size = if ctx.version >= POINT_SIZE_VERSION {
        reader.read_u8()?
    } else {
        0
    };

    let points = match ctx.coord_precision() {
        Precision::Float => read_array(reader, ctx, 3, 4, |r| {
            Ok((
                f64::from(r.read_f32(Endian::Little)?),
                f64::from(r.read_f32(Endian::Little)?),
                f64::from(r.read_f32(Endian::Little)?),
            ))
        })?,
        Precision::Double => read_array(reader, ctx, 3, 8, |r| r.read_vec3d())?,
    };

    if let Some(table) = &visibility {
        if table.len() != points.len() {
            return Err(BinError::format(format!(
                "visibility table has {} entries for {} points",
                table.len(),
                points.len()
            ))
            .with_offset(visibility_pos));
        }
    }

    let pos = reader.tell();
    if reader.read_bool()? {
        return Err(BinError::unsupported("point cloud colors").with_offset(pos));
    }
    let pos = reader.tell();
    if reader.read_bool()? {
        return Err(BinError::unsupported("point cloud normals").with_offset(pos));
    }
    let pos = reader.tell();
    let sf_count = reader.read_u32(Endian::Little)?;
    if sf_count != 0 {
        return Err(
            BinError::unsupported(format!("{sf_count} scalar field(s)")).with_offset(pos)
        );
    }
    if ctx.version < SCALAR_FIELD_LAYOUT_VERSION {
        return Err(BinError::unsupported(format!(
            "scalar field layout of version {}",
            ctx.version
        ))
        .with_offset(reader.tell()));
    }

    let sf_color_scale_shown = reader.read_bool()?;
    let displayed_sf_index = reader.read_i32(Endian::Little)?;

    if ctx.version >= GRIDS_VERSION {
        let pos = reader.tell();
        let grid_count = reader.read_u32(Endian::Little)?;
        if grid_count != 0 {
            return Err(
                BinError::unsupported(format!("{grid_count} scan grid(s)")).with_offset(pos)
            );
        }
    }
    if ctx.version >= WAVEFORM_VERSION {
        let pos = reader.tell();
        if reader.read_bool()? {
            return Err(BinError::unsupported("full waveform data").with_offset(pos));
        }
    }

    Ok(PointCloud {
        global_shift,
        global_scale,
        visibility,
        point_size,
        points,
        sf_color_scale_shown,
        displayed_sf_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ccb::header::LoadFlags;
    use crate::core::config::ParseConfig;
    use crate::core::error::ErrorKind;
    use crate::io::ByteWriter;
    use crate::test_support::{write_point_cloud_body, CloudFixture};

    fn decode(bytes: &[u8], version: u32, flags: u8) -> Result<PointCloud> {
        let config = ParseConfig::default();
        let ctx = DecodeContext {
            version,
            flags: LoadFlags::new(flags),
            config: &config,
        };
        let mut reader = ByteReader::new(bytes);
        let cloud = decode_point_cloud(&mut reader, &ctx)?;
        assert!(reader.is_empty(), "trailing bytes after cloud body");
        Ok(cloud)
    }

    #[test]
    fn float_coordinates_widen_without_added_precision() {
        let values = [(0.1f32, 1.7f32, -3.3f32), (1e7, 2.5e-3, 42.0)];
        let mut writer = ByteWriter::new();
        let fixture = CloudFixture {
            points: values
                .iter()
                .map(|p| (p.0 as f64, p.1 as f64, p.2 as f64))
                .collect(),
            ..CloudFixture::default()
        };
        write_point_cloud_body(&mut writer, 48, Precision::Float, &fixture);
        let bytes = writer.into_bytes();

        let cloud = decode(&bytes, 48, 0).unwrap();
        assert_eq!(cloud.point_count(), 2);
        for (decoded, original) in cloud.points.iter().zip(values) {
            assert_eq!(decoded.0, f64::from(original.0));
            assert_eq!(decoded.1, f64::from(original.1));
            assert_eq!(decoded.2, f64::from(original.2));
        }
    }

    #[test]
    fn double_coordinates_and_shift_scale() {
        let mut writer = ByteWriter::new();
        let fixture = CloudFixture {
            shift: (-500000.0, -5400000.0, 0.0),
            scale: 2.0,
            points: vec![(500001.125, 5400002.25, 3.5)],
            point_size: 4,
            ..CloudFixture::default()
        };
        write_point_cloud_body(&mut writer, 48, Precision::Double, &fixture);
        let bytes = writer.into_bytes();

        let cloud = decode(&bytes, 48, LoadFlags::POINT_COORDS_64_BITS).unwrap();
        assert_eq!(cloud.global_scale, 2.0);
        assert_eq!(cloud.point_size, 4);
        assert_eq!(cloud.points[0], (500001.125, 5400002.25, 3.5));
        assert_eq!(cloud.unshifted_point(0), Some((1000001.125, 10800002.25, 3.5)));
        assert_eq!(cloud.unshifted_point(1), None);
    }

    #[test]
    fn legacy_versions_have_unit_scale() {
        let mut writer = ByteWriter::new();
        let fixture = CloudFixture {
            shift: (1.0, 2.0, 3.0),
            points: vec![(1.0, 1.0, 1.0)],
            ..CloudFixture::default()
        };
        write_point_cloud_body(&mut writer, 27, Precision::Float, &fixture);
        let bytes = writer.into_bytes();

        let cloud = decode(&bytes, 27, 0).unwrap();
        assert_eq!(cloud.global_shift, (1.0, 2.0, 3.0));
        assert_eq!(cloud.global_scale, 1.0);
    }

    #[test]
    fn visibility_table_is_kept_and_validated() {
        let mut writer = ByteWriter::new();
        let fixture = CloudFixture {
            points: vec![(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
            visibility: Some(vec![255, POINT_HIDDEN]),
            ..CloudFixture::default()
        };
        write_point_cloud_body(&mut writer, 48, Precision::Float, &fixture);
        let bytes = writer.into_bytes();
        let cloud = decode(&bytes, 48, 0).unwrap();
        assert!(cloud.is_point_visible(0));
        assert!(!cloud.is_point_visible(1));
        assert!(!cloud.is_point_visible(2));

        let mut writer = ByteWriter::new();
        let fixture = CloudFixture {
            points: vec![(0.0, 0.0, 0.0), (1.0, 1.0, 1.0)],
            visibility: Some(vec![255]),
            ..CloudFixture::default()
        };
        write_point_cloud_body(&mut writer, 48, Precision::Float, &fixture);
        let bytes = writer.into_bytes();
        let err = decode(&bytes, 48, 0).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Format);
    }

    #[test]
    fn pre_27_scalar_layout_is_unsupported() {
        let mut writer = ByteWriter::new();
        write_point_cloud_body(&mut writer, 26, Precision::Float, &CloudFixture::default());
        let bytes = writer.into_bytes();
        let config = ParseConfig::default();
        let ctx = DecodeContext {
            version: 26,
            flags: LoadFlags::default(),
            config: &config,
        };
        let err = decode_point_cloud(&mut ByteReader::new(&bytes), &ctx).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedFeature);
    }

    #[test]
    fn optional_payloads_are_unsupported() {
        for (colors, normals, sf_count, grids, waveform) in [
            (true, false, 0, 0, false),
            (false, true, 0, 0, false),
            (false, false, 2, 0, false),
            (false, false, 0, 1, false),
            (false, false, 0, 0, true),
        ] {
            let mut writer = ByteWriter::new();
            writer.write_vec3d((0.0, 0.0, 0.0));
            writer.write_f64(Endian::Little, 1.0);
            writer.write_bool(false);
            writer.write_u8(0);
            writer.write_u8(3).write_u32(Endian::Little, 0);
            writer.write_bool(colors).write_bool(normals);
            writer.write_u32(Endian::Little, sf_count);
            writer.write_bool(false).write_i32(Endian::Little, -1);
            writer.write_u32(Endian::Little, grids);
            writer.write_bool(waveform);
            let bytes = writer.into_bytes();

            let config = ParseConfig::default();
            let ctx = DecodeContext {
                version: 48,
                flags: LoadFlags::default(),
                config: &config,
            };
            let err = decode_point_cloud(&mut ByteReader::new(&bytes), &ctx).unwrap_err();
            assert_eq!(err.kind, ErrorKind::UnsupportedFeature);
        }
    }
}
