//! Shared frame buffer layout.
//! Must stay in sync with whatever host reads it.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 12 floats]
//! [Instances: max_instances × 8 floats]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written into the header on every frame.
//! The host reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;
use crate::api::types::WireEvent;
use crate::bridge::snapshot::{SnapshotBuffer, SnapshotInstance};
use crate::core::constants::CELL_SIZE;

/// Number of floats in the header section. Slot 0 is reserved.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices.
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_HOSTILE_START: usize = 4;
pub const HEADER_MAX_EVENTS: usize = 5;
pub const HEADER_EVENT_COUNT: usize = 6;
pub const HEADER_PROTOCOL_VERSION: usize = 7;
pub const HEADER_ALPHA: usize = 8;
pub const HEADER_TICK_COUNT: usize = 9;
pub const HEADER_STEP_MS: usize = 10;
pub const HEADER_CELL_SIZE: usize = 11;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per snapshot instance (wire format, never changes).
pub const INSTANCE_FLOATS: usize = SnapshotInstance::FLOATS;

/// Floats per game event: kind, a, b, c (wire format, never changes).
pub const EVENT_FLOATS: usize = WireEvent::FLOATS;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_instances: usize,
    pub max_events: usize,

    /// Size of instance data section in floats.
    pub instance_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

/// Per-frame values written into the header next to the capacities.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameHeader {
    pub frame: u64,
    pub tick_count: u64,
    pub step_ms: f32,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = HEADER_FLOATS;
        let event_data_offset = instance_data_offset + instance_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_instances,
            max_events,
            instance_data_floats,
            event_data_floats,
            instance_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_snapshot_instances, config.max_events)
    }

    /// A zeroed buffer of the right size.
    pub fn allocate(&self) -> Vec<f32> {
        vec![0.0; self.buffer_total_floats]
    }

    /// Pack one frame into `buffer`. Instances and events beyond capacity
    /// are cut off; the counts in the header reflect what was written.
    pub fn write_frame(
        &self,
        buffer: &mut [f32],
        header: FrameHeader,
        snapshot: &SnapshotBuffer,
        events: &[WireEvent],
    ) {
        if buffer.len() < self.buffer_total_floats {
            log::warn!(
                "frame buffer too small: {} < {} floats",
                buffer.len(),
                self.buffer_total_floats
            );
            return;
        }

        let instances = &snapshot.instances[..snapshot.instances.len().min(self.max_instances)];
        let events = &events[..events.len().min(self.max_events)];

        let inst_floats: &[f32] = bytemuck::cast_slice(instances);
        buffer[self.instance_data_offset..self.instance_data_offset + inst_floats.len()]
            .copy_from_slice(inst_floats);

        let event_floats: &[f32] = bytemuck::cast_slice(events);
        buffer[self.event_data_offset..self.event_data_offset + event_floats.len()]
            .copy_from_slice(event_floats);

        buffer[HEADER_FRAME_COUNTER] = header.frame as f32;
        buffer[HEADER_MAX_INSTANCES] = self.max_instances as f32;
        buffer[HEADER_INSTANCE_COUNT] = instances.len() as f32;
        buffer[HEADER_HOSTILE_START] = (snapshot.hostile_start as usize).min(instances.len()) as f32;
        buffer[HEADER_MAX_EVENTS] = self.max_events as f32;
        buffer[HEADER_EVENT_COUNT] = events.len() as f32;
        buffer[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        buffer[HEADER_ALPHA] = snapshot.alpha;
        buffer[HEADER_TICK_COUNT] = header.tick_count as f32;
        buffer[HEADER_STEP_MS] = header.step_ms;
        buffer[HEADER_CELL_SIZE] = CELL_SIZE;
    }
}
