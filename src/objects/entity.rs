use crate::entities::{Label2d, PointCloud};
use crate::objects::{ClassId, ObjectHeader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionBehavior {
    #[default]
    AxisAlignedBBox,
    FitBBox,
    Ignored,
}

impl SelectionBehavior {
    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        match ordinal {
            0 => Some(SelectionBehavior::AxisAlignedBBox),
            1 => Some(SelectionBehavior::FitBBox),
            2 => Some(SelectionBehavior::Ignored),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState {
    pub visible: bool,
    pub locked_visibility: bool,
    pub colors_shown: bool,
    pub normals_shown: bool,
    pub sf_shown: bool,
    pub color_overridden: bool,
    pub gl_trans_enabled: bool,
    pub show_name_in_3d: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            visible: true,
            locked_visibility: true,
            colors_shown: true,
            normals_shown: true,
            sf_shown: true,
            color_overridden: false,
            gl_trans_enabled: false,
            show_name_in_3d: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityBody {
    Group,
    PointCloud(PointCloud),
    Label2d(Label2d),
}

/// One decoded object and the subtree it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub class_id: ClassId,
    pub header: ObjectHeader,
    pub display: DisplayState,
    pub selection: SelectionBehavior,
    pub body: EntityBody,
    pub children: Vec<Entity>,
}

impl Entity {
    pub fn name(&self) -> Option<&str> {
        self.header.name.as_deref()
    }

    pub fn unique_id(&self) -> u32 {
        self.header.unique_id
    }

    pub fn as_point_cloud(&self) -> Option<&PointCloud> {
        match &self.body {
            EntityBody::PointCloud(cloud) => Some(cloud),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&Label2d> {
        match &self.body {
            EntityBody::Label2d(label) => Some(label),
            _ => None,
        }
    }

    /// Depth-first pre-order traversal, starting with `self` at depth 0.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }

    pub fn find_by_unique_id(&self, unique_id: u32) -> Option<&Entity> {
        self.walk()
            .map(|(_, entity)| entity)
            .find(|entity| entity.unique_id() == unique_id)
    }
}

#[derive(Debug, Clone)]
pub struct Walk<'a> {
    stack: Vec<(usize, &'a Entity)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a Entity);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, entity) = self.stack.pop()?;
        self.stack
            .extend(entity.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, entity))
    }
}
