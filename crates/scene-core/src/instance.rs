use crate::entity::Entity;

/// Per-entity record handed to the external renderer. Plain `f32` fields so
/// a frame's instances can be viewed as one flat float slice.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct InstanceRaw {
    pub position: [f32; 3],
    pub scale: [f32; 3],
    pub rotation: [f32; 3],
    pub kind: f32,
    pub color: [f32; 3],
    pub emissive: [f32; 3],
    pub emissive_intensity: f32,
}

pub const INSTANCE_FLOATS: usize = std::mem::size_of::<InstanceRaw>() / std::mem::size_of::<f32>();

impl From<&Entity> for InstanceRaw {
    fn from(e: &Entity) -> Self {
        Self {
            position: e.position.to_array(),
            scale: e.scale.to_array(),
            rotation: e.rotation.to_array(),
            kind: e.kind.index() as f32,
            color: e.color.main.to_array(),
            emissive: e.color.emissive.to_array(),
            emissive_intensity: e.color.emissive_intensity,
        }
    }
}

#[inline]
pub fn as_floats(instances: &[InstanceRaw]) -> &[f32] {
    bytemuck::cast_slice(instances)
}
