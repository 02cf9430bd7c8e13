use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use regex::Regex;
use std::{fmt::Display, str::FromStr, sync::LazyLock};

use crate::ResourceName;

#[cfg(test)]
#[path = "./quantity.tests.rs"]
mod quantity_tests;

/// Possible errors from parsing kubernetes quantities.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum QuantityError {
    /// Quantity does not match the `<number><suffix>` format or uses an unknown suffix.
    #[error("invalid quantity format: '{0}'")]
    InvalidFormat(String),
}

const KI: f64 = 1_024.0;
const MI: f64 = KI * 1_024.0;
const GI: f64 = MI * 1_024.0;
const TI: f64 = GI * 1_024.0;
const PI: f64 = TI * 1_024.0;
const EI: f64 = PI * 1_024.0;

const MILLI: f64 = 0.001;
const K: f64 = 1_000.0;
const M: f64 = K * 1_000.0;
const G: f64 = M * 1_000.0;
const T: f64 = G * 1_000.0;
const P: f64 = T * 1_000.0;
const E: f64 = P * 1_000.0;

static QUANTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([-+]?[0-9]*\.?[0-9]+(?:[eE][-+]?[0-9]+)?)?([a-zA-Z]*)$").expect("quantity pattern should compile")
});

/// Kubernetes quantity expressed in its base unit (bytes for memory, cores for CPU).
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct ParsedQuantity {
    pub value: f64,
}

impl ParsedQuantity {
    /// Creates new [`ParsedQuantity`] instance.
    pub fn new(value: f64) -> Self {
        Self { value }
    }

    /// Returns quantity converted to mebibytes.
    pub fn mebibytes(&self) -> Mebibytes {
        Mebibytes::new(self.value / MI)
    }

    /// Returns quantity converted to millicores.
    pub fn millicores(&self) -> f64 {
        self.value * K
    }
}

impl FromStr for ParsedQuantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some(captures) = QUANTITY_PATTERN.captures(s) else {
            return Err(QuantityError::InvalidFormat(s.to_owned()));
        };

        // a bare suffix like "Mi" means one unit of it
        let number = match captures.get(1) {
            Some(number) => number
                .as_str()
                .parse::<f64>()
                .map_err(|_| QuantityError::InvalidFormat(s.to_owned()))?,
            None => 1.0,
        };

        let suffix = captures.get(2).map_or("", |suffix| suffix.as_str());
        let Some(factor) = suffix_factor(suffix) else {
            return Err(QuantityError::InvalidFormat(s.to_owned()));
        };

        Ok(ParsedQuantity::new(number * factor))
    }
}

/// Memory quantity expressed in mebibytes (2^20 bytes).
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Mebibytes {
    pub value: f64,
}

impl Mebibytes {
    /// Creates new [`Mebibytes`] instance.
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl FromStr for Mebibytes {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ParsedQuantity::from_str(s)?.mebibytes())
    }
}

impl Display for Mebibytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let value = self.value;
        if value != 0.0 && value.abs() < 0.000_001 {
            return f.write_fmt(format_args!("{value:.3e}Mi"));
        }

        let fixed = if value >= 1.0 {
            format!("{value:.3}")
        } else {
            format!("{value:.6}")
        };

        f.write_fmt(format_args!("{}Mi", strip_trailing_zeros(&fixed)))
    }
}

/// Quantity converted to mebibytes together with its display form.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalQuantity {
    pub value: f64,
    pub display: String,
}

impl From<Mebibytes> for CanonicalQuantity {
    fn from(value: Mebibytes) -> Self {
        Self {
            value: value.value,
            display: value.to_string(),
        }
    }
}

/// Converts kubernetes quantity string to mebibytes.\
/// **Note** that malformed quantities are reported as `0Mi`, so callers can always render the result.
pub fn quantity_to_canonical(quantity: &str) -> CanonicalQuantity {
    match Mebibytes::from_str(quantity) {
        Ok(mebibytes) => mebibytes.into(),
        Err(error) => {
            tracing::debug!("Cannot convert quantity to Mi: {}", error);
            Mebibytes::default().into()
        },
    }
}

/// Converts canonical value to the kubernetes quantity for the specified resource.\
/// Memory `value` is expected in mebibytes, CPU `value` in cores.
pub fn canonical_to_quantity(resource: ResourceName, value: f64) -> Quantity {
    match resource {
        ResourceName::Cpu => millicores_to_quantity(value * K),
        ResourceName::Memory => mebibytes_to_quantity(value),
    }
}

/// Builds millicores quantity, e.g. `500m`.
pub fn millicores_to_quantity(value: f64) -> Quantity {
    Quantity(format!("{value}m"))
}

/// Builds mebibytes quantity, e.g. `512Mi`.
pub fn mebibytes_to_quantity(value: f64) -> Quantity {
    Quantity(format!("{value}Mi"))
}

fn suffix_factor(suffix: &str) -> Option<f64> {
    match suffix {
        "Ki" => Some(KI),
        "Mi" => Some(MI),
        "Gi" => Some(GI),
        "Ti" => Some(TI),
        "Pi" => Some(PI),
        "Ei" => Some(EI),

        "m" => Some(MILLI),
        "" => Some(1.0),
        "k" => Some(K),
        "M" => Some(M),
        "G" => Some(G),
        "T" => Some(T),
        "P" => Some(P),
        "E" => Some(E),

        _ => None,
    }
}

fn strip_trailing_zeros(value: &str) -> &str {
    if !value.contains('.') {
        return value;
    }

    let value = value.trim_end_matches('0').trim_end_matches('.');
    if value == "-0" { "0" } else { value }
}
