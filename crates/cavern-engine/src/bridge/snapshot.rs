use bytemuck::{Pod, Zeroable};

/// Per-actor presentation record. The host reads these as a flat float array:
/// 8 floats = 32 bytes stride.
///
/// Positions are already interpolated; the host never blends on its own.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SnapshotInstance {
    /// Interpolated world x of the top-left corner.
    pub x: f32,
    /// Interpolated world y of the top-left corner.
    pub y: f32,
    /// 1.0 facing right, -1.0 facing left.
    pub facing: f32,
    /// 0.0 player, 1.0 hostile.
    pub kind: f32,
    /// 1.0 while the invulnerability window runs.
    pub invulnerable: f32,
    /// 1.0 while an attack window runs.
    pub attacking: f32,
    pub hp: f32,
    pub id: f32,
}

impl SnapshotInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const KIND_PLAYER: f32 = 0.0;
    pub const KIND_HOSTILE: f32 = 1.0;
}

/// Snapshot buffer rebuilt once per frame.
/// Player instances come first, hostiles start at `hostile_start`.
pub struct SnapshotBuffer {
    pub instances: Vec<SnapshotInstance>,
    pub hostile_start: u32,
    /// Interpolation alpha the positions were blended with.
    pub alpha: f32,
    capacity: usize,
}

impl SnapshotBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            hostile_start: 0,
            alpha: 0.0,
            capacity,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.hostile_start = 0;
        self.alpha = 0.0;
    }

    /// Append an instance. Returns false (and drops it) once the buffer is full.
    pub fn push(&mut self, instance: SnapshotInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Instances viewed as the flat float array the host reads.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }
}

impl Default for SnapshotBuffer {
    fn default() -> Self {
        Self::with_capacity(256)
    }
}
