// params.rs - Temperature / coupling values and their validation

use std::ops::RangeInclusive;

use crate::error::SimError;

/// Validated `(T, J)` pair. T is finite and strictly positive, J is finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    temperature: f64,
    coupling: f64,
}

impl Parameters {
    pub fn new(temperature: f64, coupling: f64) -> Result<Self, SimError> {
        Ok(Self {
            temperature: check_temperature(temperature)?,
            coupling: check_coupling(coupling)?,
        })
    }

    #[inline(always)]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    #[inline(always)]
    pub fn coupling(&self) -> f64 {
        self.coupling
    }

    pub fn with_temperature(self, temperature: f64) -> Result<Self, SimError> {
        Ok(Self { temperature: check_temperature(temperature)?, ..self })
    }

    pub fn with_coupling(self, coupling: f64) -> Result<Self, SimError> {
        Ok(Self { coupling: check_coupling(coupling)?, ..self })
    }
}

fn check_temperature(t: f64) -> Result<f64, SimError> {
    if !t.is_finite() {
        return Err(SimError::InvalidParameter {
            name: "temperature",
            value: t,
            reason: "must be finite",
        });
    }
    if t <= 0.0 {
        return Err(SimError::InvalidParameter {
            name: "temperature",
            value: t,
            reason: "must be positive",
        });
    }
    Ok(t)
}

fn check_coupling(j: f64) -> Result<f64, SimError> {
    if !j.is_finite() {
        return Err(SimError::InvalidParameter {
            name: "coupling",
            value: j,
            reason: "must be finite",
        });
    }
    Ok(j)
}

/// Ranges accepted from free-text input, inclusive at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterBounds {
    pub temperature: RangeInclusive<f64>,
    pub coupling: RangeInclusive<f64>,
}

impl Default for ParameterBounds {
    fn default() -> Self {
        Self {
            temperature: 0.1..=5.0,
            coupling: -2.0..=2.0,
        }
    }
}

impl ParameterBounds {
    pub fn parse_temperature(&self, text: &str) -> Result<f64, SimError> {
        parse_within("temperature", text, &self.temperature)
    }

    pub fn parse_coupling(&self, text: &str) -> Result<f64, SimError> {
        parse_within("coupling", text, &self.coupling)
    }
}

fn parse_within(
    name: &'static str,
    text: &str,
    range: &RangeInclusive<f64>,
) -> Result<f64, SimError> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| SimError::Parse { name, input: text.to_string() })?;
    // NaN fails `contains`, so it lands here too.
    if !range.contains(&value) {
        return Err(SimError::InvalidParameter {
            name,
            value,
            reason: "outside the accepted range",
        });
    }
    Ok(value)
}
