//! Resource model.
//!
//! Resources are the people, teams, and equipment a project draws on.
//! Each has a per-period capacity, an hourly rate, and an availability
//! pattern that scales the capacity period by period.

use serde::{Deserialize, Serialize};

/// A resource that tasks draw on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Free-form classification (e.g., "developer", "tester", "server").
    #[serde(default, rename = "type")]
    pub resource_type: String,
    /// Units available per period at full availability.
    pub max_capacity: f64,
    /// Cost per unit per period.
    #[serde(default)]
    pub hourly_rate: f64,
    /// Per-period multipliers in [0, 1], reused cyclically.
    ///
    /// An empty pattern means the resource is always fully available.
    #[serde(default)]
    pub availability: Vec<f64>,
}

impl Resource {
    /// Creates a fully available resource.
    pub fn new(id: impl Into<String>, max_capacity: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            resource_type: String::new(),
            max_capacity,
            hourly_rate: 0.0,
            availability: Vec::new(),
        }
    }

    /// Sets the resource name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the resource type.
    pub fn with_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = resource_type.into();
        self
    }

    /// Sets the hourly rate.
    pub fn with_rate(mut self, hourly_rate: f64) -> Self {
        self.hourly_rate = hourly_rate;
        self
    }

    /// Sets the availability pattern.
    pub fn with_availability(mut self, availability: Vec<f64>) -> Self {
        self.availability = availability;
        self
    }

    /// Availability multiplier at a period (cyclic lookup).
    #[inline]
    pub fn availability_at(&self, period: usize) -> f64 {
        if self.availability.is_empty() {
            1.0
        } else {
            self.availability[period % self.availability.len()]
        }
    }

    /// Capacity usable at a period: `max_capacity × availability`.
    #[inline]
    pub fn capacity_at(&self, period: usize) -> f64 {
        self.max_capacity * self.availability_at(period)
    }

    /// Returns a copy with `max_capacity` scaled by `multiplier`.
    pub fn scaled(&self, multiplier: f64) -> Self {
        Self {
            max_capacity: self.max_capacity * multiplier,
            ..self.clone()
        }
    }
}
