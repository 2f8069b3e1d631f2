//! Canonical feature schema and risk labels
//!
//! The schema is the single source of truth for which columns a dataset must
//! carry and in which order feature vectors are laid out. Validator,
//! extractor and model all go through this enum, so a column-name typo is a
//! compile error rather than a runtime key miss.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Column name carrying the risk label in uploaded data
pub const LABEL_COLUMN: &str = "riesgo";

/// Column name carrying the registration timestamp in uploaded data
pub const DATE_COLUMN: &str = "fecha_registro";

/// Number of features in the canonical schema
pub const N_FEATURES: usize = 14;

/// The 14 telemetry features, in canonical order
///
/// Vector position i always corresponds to `FeatureField::ALL[i]`; the model
/// depends on this fixed ordering for both training and inference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureField {
    HorasTrabajadas,
    DiasAusencia,
    EstresEncuesta,
    EvaluacionDesempeno,
    TiempoRespuestaEmails,
    FeedbackNegativo,
    FeedbackPositivo,
    NivelBurnout,
    SatisfaccionLaboral,
    EncuestaMotivacion,
    UsoLicenciaMental,
    ApoyoPsicologicoEmpresa,
    ResilienciaAutoevaluada,
    PresionObjetivos,
}

impl FeatureField {
    /// All fields in canonical order
    pub const ALL: [FeatureField; N_FEATURES] = [
        FeatureField::HorasTrabajadas,
        FeatureField::DiasAusencia,
        FeatureField::EstresEncuesta,
        FeatureField::EvaluacionDesempeno,
        FeatureField::TiempoRespuestaEmails,
        FeatureField::FeedbackNegativo,
        FeatureField::FeedbackPositivo,
        FeatureField::NivelBurnout,
        FeatureField::SatisfaccionLaboral,
        FeatureField::EncuestaMotivacion,
        FeatureField::UsoLicenciaMental,
        FeatureField::ApoyoPsicologicoEmpresa,
        FeatureField::ResilienciaAutoevaluada,
        FeatureField::PresionObjetivos,
    ];

    /// Column name as it appears in uploaded data
    pub fn column_name(&self) -> &'static str {
        match self {
            FeatureField::HorasTrabajadas => "horas_trabajadas",
            FeatureField::DiasAusencia => "dias_ausencia",
            FeatureField::EstresEncuesta => "estres_encuesta",
            FeatureField::EvaluacionDesempeno => "evaluacion_desempeno",
            FeatureField::TiempoRespuestaEmails => "tiempo_respuesta_emails",
            FeatureField::FeedbackNegativo => "feedback_negativo",
            FeatureField::FeedbackPositivo => "feedback_positivo",
            FeatureField::NivelBurnout => "nivel_burnout",
            FeatureField::SatisfaccionLaboral => "satisfaccion_laboral",
            FeatureField::EncuestaMotivacion => "encuesta_motivacion",
            FeatureField::UsoLicenciaMental => "uso_licencia_mental",
            FeatureField::ApoyoPsicologicoEmpresa => "apoyo_psicologico_empresa",
            FeatureField::ResilienciaAutoevaluada => "resiliencia_autoevaluada",
            FeatureField::PresionObjetivos => "presion_objetivos",
        }
    }

    /// Position in the canonical ordering
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    /// Canonical column names in order
    pub fn column_names() -> Vec<String> {
        Self::ALL.iter().map(|f| f.column_name().to_string()).collect()
    }
}

/// Number of risk classes
pub const N_CLASSES: usize = 3;

/// Risk classification label
///
/// Index order (bajo=0, medio=1, alto=2) is the fixed column order used by
/// the model's vote counting and by the trend table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLabel {
    Bajo,
    Medio,
    Alto,
}

impl RiskLabel {
    /// All labels in fixed order
    pub const ALL: [RiskLabel; N_CLASSES] = [RiskLabel::Bajo, RiskLabel::Medio, RiskLabel::Alto];

    /// Label as it appears in uploaded data
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Bajo => "bajo",
            RiskLabel::Medio => "medio",
            RiskLabel::Alto => "alto",
        }
    }

    /// Class index used internally by the classifier
    pub fn class_index(&self) -> usize {
        match self {
            RiskLabel::Bajo => 0,
            RiskLabel::Medio => 1,
            RiskLabel::Alto => 2,
        }
    }

    /// Label for a class index; out-of-range indices are a programmer error
    /// and map to the highest defined class
    pub fn from_class_index(idx: usize) -> RiskLabel {
        match idx {
            0 => RiskLabel::Bajo,
            1 => RiskLabel::Medio,
            _ => RiskLabel::Alto,
        }
    }

    /// Parse a label from uploaded data
    pub fn parse(s: &str) -> Result<RiskLabel> {
        match s.trim() {
            "bajo" => Ok(RiskLabel::Bajo),
            "medio" => Ok(RiskLabel::Medio),
            "alto" => Ok(RiskLabel::Alto),
            other => Err(Error::UnknownLabel(other.to_string())),
        }
    }
}

impl std::fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_has_fourteen_fields_in_order() {
        let names = FeatureField::column_names();
        assert_eq!(names.len(), N_FEATURES);
        assert_eq!(names[0], "horas_trabajadas");
        assert_eq!(names[13], "presion_objetivos");
        for (i, field) in FeatureField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn labels_round_trip() {
        for label in RiskLabel::ALL {
            assert_eq!(RiskLabel::parse(label.as_str()).unwrap(), label);
            assert_eq!(RiskLabel::from_class_index(label.class_index()), label);
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert!(matches!(
            RiskLabel::parse("critico"),
            Err(Error::UnknownLabel(_))
        ));
    }
}
