use std::fmt::Debug;

use crate::dispersion::DispersionRelation;

#[derive(Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalConstants {
    pub vacuum_permittivity: f64,
    pub vacuum_permeability: f64,
}

impl Debug for PhysicalConstants {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhysicalConstants")
            .field("vacuum_permittivity", &self.vacuum_permittivity)
            .field("vacuum_permeability", &self.vacuum_permeability)
            .field("speed_of_light", &self.speed_of_light())
            .finish()
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::REDUCED
    }
}

impl PhysicalConstants {
    pub const SI: Self = Self {
        vacuum_permittivity: 8.8541878188e-12,
        vacuum_permeability: 1.25663706127e-6,
    };

    /// Units in which the speed of light is 1. The animations use these.
    pub const REDUCED: Self = Self {
        vacuum_permittivity: 1.0,
        vacuum_permeability: 1.0,
    };

    pub fn speed_of_light(&self) -> f64 {
        (self.vacuum_permittivity * self.vacuum_permeability).powf(-0.5)
    }

    pub fn frequency_to_wavelength(&self, frequency: f64) -> f64 {
        self.speed_of_light() / frequency
    }

    pub fn wavelength_to_frequency(&self, wavelength: f64) -> f64 {
        self.speed_of_light() / wavelength
    }
}

/// A medium without dispersion.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Medium {
    pub refractive_index: f64,
}

impl Default for Medium {
    fn default() -> Self {
        Self::VACUUM
    }
}

impl Medium {
    pub const VACUUM: Self = Self {
        refractive_index: 1.0,
    };

    /// Roughly fused silica at 1550 nm.
    pub const SILICA: Self = Self {
        refractive_index: 1.444,
    };

    pub fn phase_velocity(&self, physical_constants: &PhysicalConstants) -> f64 {
        physical_constants.speed_of_light() / self.refractive_index
    }

    /// `k(ν) = n ν / c`, written as a first order expansion around
    /// `center_frequency`. Phase and group velocity are both `c / n`.
    pub fn dispersion_relation(
        &self,
        physical_constants: &PhysicalConstants,
        center_frequency: f64,
    ) -> DispersionRelation {
        DispersionRelation::non_dispersive(
            center_frequency,
            self.phase_velocity(physical_constants),
        )
    }
}
