//! Risk interpretation
//!
//! Maps a predicted label to its display color and recommended action. The
//! table is total over the three defined labels; string input outside the
//! set fails rather than falling through, since no value range is enforced
//! on the label column during validation.

use serde::Serialize;

use crate::data::RiskLabel;
use crate::error::Result;

/// Display color and recommended action for a risk label
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskGuidance {
    pub label: RiskLabel,
    /// Display color as a hex string
    pub color: &'static str,
    /// Recommended action for the caller to surface
    pub recommendation: &'static str,
}

impl RiskGuidance {
    /// Guidance for a label; total over the three defined labels
    pub fn for_label(label: RiskLabel) -> RiskGuidance {
        match label {
            RiskLabel::Alto => RiskGuidance {
                label,
                color: "#FFCDD2",
                recommendation: "Se recomienda contacto con bienestar y apoyo inmediato.",
            },
            RiskLabel::Medio => RiskGuidance {
                label,
                color: "#FFF9C4",
                recommendation: "Evaluar carga laboral y seguimiento cercano.",
            },
            RiskLabel::Bajo => RiskGuidance {
                label,
                color: "#C8E6C9",
                recommendation: "El empleado no presenta señales de riesgo actuales.",
            },
        }
    }
}

/// Interpret a raw label string
///
/// Fails with [`crate::error::Error::UnknownLabel`] for anything outside
/// {bajo, medio, alto}.
pub fn interpret(label: &str) -> Result<RiskGuidance> {
    Ok(RiskGuidance::for_label(RiskLabel::parse(label)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn table_is_exact() {
        let alto = RiskGuidance::for_label(RiskLabel::Alto);
        assert_eq!(alto.color, "#FFCDD2");
        assert!(alto.recommendation.contains("bienestar"));

        let medio = RiskGuidance::for_label(RiskLabel::Medio);
        assert_eq!(medio.color, "#FFF9C4");
        assert!(medio.recommendation.contains("carga laboral"));

        let bajo = RiskGuidance::for_label(RiskLabel::Bajo);
        assert_eq!(bajo.color, "#C8E6C9");
        assert!(bajo.recommendation.contains("no presenta"));
    }

    #[test]
    fn string_path_matches_label_path() {
        for label in RiskLabel::ALL {
            assert_eq!(interpret(label.as_str()).unwrap(), RiskGuidance::for_label(label));
        }
    }

    #[test]
    fn outside_the_set_fails() {
        assert!(matches!(interpret("critico"), Err(Error::UnknownLabel(_))));
        assert!(matches!(interpret(""), Err(Error::UnknownLabel(_))));
    }
}
