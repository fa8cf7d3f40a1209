//! Slabbed tariff model
//!
//! A schedule is a fixed charge per kW of sanctioned load, an ordered list of
//! energy slabs, and a duty applied to the pre-duty subtotal.
//!
//! ## Configuration Resolution
//!
//! The schedule is loaded with a two-layer resolution:
//! 1. Check for override in data dir (~/.local/share/billcheck/config/tariff.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! An explicit path (e.g. `--tariff`) bypasses both layers and must exist.
//! Every loaded schedule is validated; an invalid one is a fatal error.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::BillBreakdown;

/// Embedded default tariff (compiled into binary)
pub const DEFAULT_TARIFF: &str = include_str!("../../../config/tariff.toml");

/// One energy band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slab {
    /// Upper bound of the band in kWh; `None` for the final, unbounded slab
    pub up_to_kwh: Option<f64>,
    /// Rupees per kWh inside the band
    pub rate: f64,
}

/// Tariff schedule used to recompute a bill
#[derive(Debug, Clone, PartialEq)]
pub struct TariffSchedule {
    /// Rupees per kW of sanctioned load
    pub fixed_rate_per_kw: f64,
    /// Ascending slabs, last one unbounded
    pub slabs: Vec<Slab>,
    /// Fraction of (fixed + energy), 0.05 = 5%
    pub duty_rate: f64,
}

impl TariffSchedule {
    /// Two-slab schedule: `rate_below` up to `threshold_kwh`, `rate_above` after it
    pub fn two_slab(
        fixed_rate_per_kw: f64,
        threshold_kwh: f64,
        rate_below: f64,
        rate_above: f64,
        duty_rate: f64,
    ) -> Self {
        Self {
            fixed_rate_per_kw,
            slabs: vec![
                Slab {
                    up_to_kwh: Some(threshold_kwh),
                    rate: rate_below,
                },
                Slab {
                    up_to_kwh: None,
                    rate: rate_above,
                },
            ],
            duty_rate,
        }
    }

    /// Load with override resolution (see module docs)
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let content = match explicit_path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::NotFound(format!(
                        "Tariff file {}",
                        path.display()
                    )));
                }
                debug!(path = %path.display(), "Loading tariff from explicit path");
                read_config(path)?
            }
            None => match default_tariff_path() {
                Some(path) if path.exists() => {
                    debug!(path = %path.display(), "Loading tariff override");
                    read_config(&path)?
                }
                _ => {
                    debug!("Using embedded default tariff");
                    DEFAULT_TARIFF.to_string()
                }
            },
        };

        Self::from_toml(&content)
    }

    /// Parse and validate a TOML schedule
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawTariff = toml::from_str(content)
            .map_err(|e| Error::InvalidTariff(format!("Invalid tariff TOML: {}", e)))?;

        let tariff = Self {
            fixed_rate_per_kw: raw.charges.fixed_rate_per_kw,
            slabs: raw
                .slabs
                .into_iter()
                .map(|s| Slab {
                    up_to_kwh: s.up_to_kwh,
                    rate: s.rate,
                })
                .collect(),
            duty_rate: raw.charges.duty_rate,
        };

        tariff.validate()?;
        Ok(tariff)
    }

    /// Reject schedules that would silently produce wrong totals
    pub fn validate(&self) -> Result<()> {
        if !self.fixed_rate_per_kw.is_finite() || self.fixed_rate_per_kw < 0.0 {
            return Err(Error::InvalidTariff(format!(
                "fixed_rate_per_kw must be a non-negative number, got {}",
                self.fixed_rate_per_kw
            )));
        }
        if !self.duty_rate.is_finite() || self.duty_rate < 0.0 {
            return Err(Error::InvalidTariff(format!(
                "duty_rate must be a non-negative number, got {}",
                self.duty_rate
            )));
        }
        if self.slabs.is_empty() {
            return Err(Error::InvalidTariff("at least one slab is required".into()));
        }

        let last = self.slabs.len() - 1;
        let mut previous = 0.0;
        let mut previous_rate: Option<f64> = None;
        for (idx, slab) in self.slabs.iter().enumerate() {
            if !slab.rate.is_finite() || slab.rate < 0.0 {
                return Err(Error::InvalidTariff(format!(
                    "slab {} rate must be a non-negative number, got {}",
                    idx + 1,
                    slab.rate
                )));
            }
            if let Some(lower_rate) = previous_rate.filter(|r| slab.rate <= *r) {
                return Err(Error::InvalidTariff(format!(
                    "slab rates must be strictly increasing: slab {} has rate {} after {}",
                    idx + 1,
                    slab.rate,
                    lower_rate
                )));
            }
            previous_rate = Some(slab.rate);
            match slab.up_to_kwh {
                Some(bound) if idx == last => {
                    return Err(Error::InvalidTariff(format!(
                        "last slab must be unbounded, found up_to_kwh = {}",
                        bound
                    )));
                }
                Some(bound) => {
                    if !bound.is_finite() || bound <= previous {
                        return Err(Error::InvalidTariff(format!(
                            "slab thresholds must be strictly increasing: slab {} has up_to_kwh = {} after {}",
                            idx + 1,
                            bound,
                            previous
                        )));
                    }
                    previous = bound;
                }
                None if idx != last => {
                    return Err(Error::InvalidTariff(format!(
                        "only the last slab may be unbounded (slab {} of {})",
                        idx + 1,
                        self.slabs.len()
                    )));
                }
                None => {}
            }
        }

        Ok(())
    }

    /// Fixed charge for a sanctioned load
    pub fn fixed_charge(&self, sanctioned_load_kw: f64) -> f64 {
        self.fixed_rate_per_kw * sanctioned_load_kw.max(0.0)
    }

    /// Energy charge, walking slabs cumulatively
    pub fn energy_charge(&self, units_kwh: f64) -> f64 {
        let mut remaining = units_kwh.max(0.0);
        let mut lower = 0.0;
        let mut energy = 0.0;

        for slab in &self.slabs {
            if remaining <= 0.0 {
                break;
            }
            let portion = match slab.up_to_kwh {
                Some(upper) => remaining.min(upper - lower),
                None => remaining,
            };
            energy += portion * slab.rate;
            remaining -= portion;
            if let Some(upper) = slab.up_to_kwh {
                lower = upper;
            }
        }

        energy
    }

    /// Duty on a pre-duty subtotal
    pub fn duty(&self, subtotal: f64) -> f64 {
        subtotal * self.duty_rate
    }

    /// Full recomputation; absent inputs contribute nothing
    pub fn breakdown(&self, sanctioned_load_kw: Option<f64>, units_kwh: Option<f64>) -> BillBreakdown {
        let fixed = sanctioned_load_kw.map_or(0.0, |load| self.fixed_charge(load));
        let energy = units_kwh.map_or(0.0, |units| self.energy_charge(units));
        let duty = self.duty(fixed + energy);

        BillBreakdown {
            fixed,
            energy,
            duty,
            total: round_currency(fixed + energy + duty),
        }
    }
}

impl Default for TariffSchedule {
    fn default() -> Self {
        Self::two_slab(120.0, 100.0, 5.50, 7.00, 0.05)
    }
}

/// Round to 2 decimals, half away from zero
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Default tariff override path
pub fn default_tariff_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("billcheck").join("config").join("tariff.toml"))
}

fn read_config(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTariff {
    charges: RawCharges,
    #[serde(default)]
    slabs: Vec<RawSlab>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCharges {
    fixed_rate_per_kw: f64,
    duty_rate: f64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSlab {
    up_to_kwh: Option<f64>,
    rate: f64,
}
