use crate::shape::Hull;
use obj::{Group, IndexTuple, ObjData, ObjError, Object, SimplePolygon};
use std::path::Path;

impl Hull {
    /// Outputs a Wavefront (`.obj`) file at the given path.
    ///
    /// Every vertex is written with its normal and, if this hull has any, its texture
    /// coordinates. Empty hulls are written without any face.
    ///
    /// This function is enabled by the `wavefront` feature flag.
    pub fn to_obj_file(&self, path: &Path) -> Result<(), ObjError> {
        let mut file = std::fs::File::create(path).map_err(ObjError::Io)?;
        let has_uvs = self.has_uvs();
        let polys = if self.is_empty() {
            vec![]
        } else {
            self.triangles()
                .iter()
                .map(|tri| {
                    SimplePolygon(
                        tri.vertices
                            .iter()
                            .map(|vid| {
                                let vid = *vid as usize;
                                IndexTuple(vid, has_uvs.then_some(vid), Some(vid))
                            })
                            .collect(),
                    )
                })
                .collect()
        };

        ObjData {
            #[allow(clippy::unnecessary_cast)]
            position: self
                .positions()
                .iter()
                .map(|v| [v.x as f32, v.y as f32, v.z as f32])
                .collect(),
            #[allow(clippy::unnecessary_cast)]
            texture: self
                .uvs()
                .iter()
                .map(|uv| [uv.x as f32, uv.y as f32])
                .collect(),
            #[allow(clippy::unnecessary_cast)]
            normal: self
                .normals()
                .iter()
                .map(|n| [n.x as f32, n.y as f32, n.z as f32])
                .collect(),
            objects: vec![Object {
                groups: vec![Group {
                    polys,
                    name: "hull".to_string(),
                    index: 0,
                    material: None,
                }],
                name: "hull".to_string(),
            }],
            ..Default::default()
        }
        .write_to_buf(&mut file)
    }
}
