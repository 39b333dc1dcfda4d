//! Progress trackers: numerator/denominator pairs rendered as gauges.
//!
//! Instances live in a registry in creation order and are addressed by a
//! stable generated id, so removing one never redirects updates aimed at
//! another.

use thiserror::Error;
use tracing::warn;

pub type InstanceId = u64;

#[derive(Debug, Error, PartialEq)]
pub enum ProgressError {
    #[error("no progress instance with id {0}")]
    UnknownInstance(InstanceId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressInstance {
    pub id: InstanceId,
    pub label: String,
    pub numerator: u32,
    pub denominator: u32,
}

impl ProgressInstance {
    /// Percentage clamped to 0..=100.
    pub fn percent(&self) -> f64 {
        let pct = self.numerator as f64 / self.denominator as f64 * 100.0;
        pct.clamp(0.0, 100.0)
    }

    /// Apply a new pair, flooring the numerator at 0 and the denominator at 1.
    /// Values past `u32::MAX` saturate rather than wrap.
    pub fn set(&mut self, numerator: i64, denominator: i64) {
        self.numerator = numerator.clamp(0, u32::MAX as i64) as u32;
        self.denominator = denominator.clamp(1, u32::MAX as i64) as u32;
    }
}

/// Parse a numerator field; anything non-numeric counts as 0.
pub fn parse_numerator(text: &str) -> u32 {
    let value = text.trim().parse::<i64>().unwrap_or(0);
    value.clamp(0, u32::MAX as i64) as u32
}

/// Parse a denominator field; anything non-numeric or below 1 counts as 1.
pub fn parse_denominator(text: &str) -> u32 {
    let value = text.trim().parse::<i64>().unwrap_or(1);
    value.clamp(1, u32::MAX as i64) as u32
}

/// Ordered registry of progress instances.
#[derive(Debug, Default)]
pub struct ProgressRegistry {
    instances: Vec<ProgressInstance>,
    next_id: InstanceId,
}

impl ProgressRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> InstanceId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Append a new instance and return its id.
    pub fn add(&mut self, label: String, numerator: i64, denominator: i64) -> InstanceId {
        let id = self.allocate_id();
        let mut instance = ProgressInstance {
            id,
            label,
            numerator: 0,
            denominator: 1,
        };
        instance.set(numerator, denominator);
        self.instances.push(instance);
        id
    }

    /// Remove an instance. Later instances keep their ids; an id held for the
    /// removed instance becomes a typed error on use.
    pub fn remove(&mut self, id: InstanceId) -> Result<(), ProgressError> {
        let pos = self
            .instances
            .iter()
            .position(|i| i.id == id)
            .ok_or(ProgressError::UnknownInstance(id))?;
        self.instances.remove(pos);
        Ok(())
    }

    /// Set numerator/denominator on one instance, with the usual coercion.
    pub fn set_progress(
        &mut self,
        id: InstanceId,
        numerator: i64,
        denominator: i64,
    ) -> Result<(), ProgressError> {
        let Some(instance) = self.get_mut(id) else {
            warn!(id, "set_progress: unknown instance");
            return Err(ProgressError::UnknownInstance(id));
        };
        instance.set(numerator, denominator);
        Ok(())
    }

    pub fn get(&self, id: InstanceId) -> Option<&ProgressInstance> {
        self.instances.iter().find(|i| i.id == id)
    }

    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut ProgressInstance> {
        self.instances.iter_mut().find(|i| i.id == id)
    }

    /// Instances in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &ProgressInstance> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Id of the instance at a display position, if any.
    pub fn id_at(&self, pos: usize) -> Option<InstanceId> {
        self.instances.get(pos).map(|i| i.id)
    }

    /// Display position of an instance id, if present.
    pub fn position_of(&self, id: InstanceId) -> Option<usize> {
        self.instances.iter().position(|i| i.id == id)
    }
}
