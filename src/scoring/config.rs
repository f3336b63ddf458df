use serde::Serialize;

/// A single survey question.
///
/// The position of a question in [`AssessmentConfig::questions`] is also the
/// position of its answer in the answer set.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Question {
    pub id: u32,
    pub text: String,
    /// Remediation text surfaced when this question is answered low
    pub recommendation: String,
}

/// Maturity tier, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Low, Tier::Medium, Tier::High];

    pub fn key(&self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
        }
    }
}

/// Inclusive score band for one tier.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TierThreshold {
    pub min: u8,
    pub max: u8,
    /// Short label, e.g. "Madurez avanzada"
    pub label: String,
    pub interpretation: String,
}

impl TierThreshold {
    pub fn contains(&self, score: u8) -> bool {
        self.min <= score && score <= self.max
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TierThresholds {
    pub low: TierThreshold,
    pub medium: TierThreshold,
    pub high: TierThreshold,
}

impl TierThresholds {
    pub fn get(&self, tier: Tier) -> &TierThreshold {
        match tier {
            Tier::Low => &self.low,
            Tier::Medium => &self.medium,
            Tier::High => &self.high,
        }
    }

    /// Find the tier whose band contains `score`.
    ///
    /// With a valid partition (see `validate_assessment`) exactly one tier
    /// matches every score in 0..=100.
    pub fn classify(&self, score: u8) -> Option<(Tier, &TierThreshold)> {
        Tier::ALL
            .into_iter()
            .map(|tier| (tier, self.get(tier)))
            .find(|(_, threshold)| threshold.contains(score))
    }
}

/// The full questionnaire definition. Immutable once built.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AssessmentConfig {
    pub questions: Vec<Question>,
    pub tiers: TierThresholds,
}

impl AssessmentConfig {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }
}

const QUESTIONS: [(&str, &str); 10] = [
    (
        "¿Qué tan preparada está tu organización para adaptarse rápidamente a cambios inesperados en la demanda del mercado?",
        "Implementa sistemas de pronóstico más ágiles y desarrolla planes de contingencia para cambios rápidos en la demanda.",
    ),
    (
        "¿Con qué frecuencia tu cadena de suministro puede ajustar sus procesos cuando surgen interrupciones inesperadas?",
        "Establece protocolos de respuesta rápida y mantén inventarios de seguridad para gestionar interrupciones.",
    ),
    (
        "¿Qué tan bien conoce tu organización a todos sus proveedores y sus capacidades reales?",
        "Desarrolla un programa de evaluación continua de proveedores y mantén comunicación regular con ellos.",
    ),
    (
        "¿Tu organización tiene sistemas de monitoreo en tiempo real de toda la cadena de suministro?",
        "Invierte en tecnologías de visibilidad en tiempo real y dashboards de monitoreo integral.",
    ),
    (
        "¿Qué tan rápido puede tu organización cambiar de proveedor cuando es necesario?",
        "Desarrolla una base de proveedores alternativos y procesos de calificación acelerados.",
    ),
    (
        "¿Tu organización tiene planes de contingencia documentados para diferentes escenarios de crisis?",
        "Crea y mantén actualizados planes de contingencia específicos para diferentes tipos de crisis.",
    ),
    (
        "¿Qué tan bien puede tu organización predecir y prepararse para cambios en las regulaciones o políticas?",
        "Establece un sistema de monitoreo regulatorio y mantén relaciones con organismos gubernamentales.",
    ),
    (
        "¿Tu organización puede adaptar rápidamente sus productos o servicios cuando cambian las necesidades del cliente?",
        "Desarrolla capacidades de diseño modular y procesos de desarrollo ágiles.",
    ),
    (
        "¿Qué tan bien puede tu organización gestionar la complejidad de múltiples mercados y regulaciones simultáneamente?",
        "Implementa sistemas de gestión centralizada y procesos estandarizados para múltiples mercados.",
    ),
    (
        "¿Tu organización tiene la capacidad de aprender rápidamente de los errores y mejorar continuamente?",
        "Establece procesos de aprendizaje organizacional y sistemas de mejora continua.",
    ),
];

impl Default for AssessmentConfig {
    /// The compiled-in VUCA supply-chain questionnaire.
    fn default() -> Self {
        let questions = QUESTIONS
            .iter()
            .zip(1..)
            .map(|((text, recommendation), id)| Question {
                id,
                text: text.to_string(),
                recommendation: recommendation.to_string(),
            })
            .collect();

        Self {
            questions,
            tiers: TierThresholds {
                low: TierThreshold {
                    min: 0,
                    max: 70,
                    label: "Necesita transformación".to_string(),
                    interpretation: "Tu cadena de suministro muestra vulnerabilidades significativas frente a los desafíos VUCA. Es crucial implementar cambios profundos para mejorar la resiliencia y adaptabilidad.".to_string(),
                },
                medium: TierThreshold {
                    min: 71,
                    max: 85,
                    label: "Mejora táctica".to_string(),
                    interpretation: "Tu cadena de suministro tiene una base sólida, pero aún hay oportunidades para optimizar procesos y fortalecer la respuesta ante la incertidumbre. Considera mejoras tácticas.".to_string(),
                },
                high: TierThreshold {
                    min: 86,
                    max: 100,
                    label: "Madurez avanzada".to_string(),
                    interpretation: "Tu cadena de suministro es altamente adaptable y resiliente. Estás bien posicionado para navegar en entornos VUCA, pero siempre hay espacio para la innovación continua.".to_string(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_ten_questions_in_id_order() {
        let config = AssessmentConfig::default();
        assert_eq!(config.question_count(), 10);
        let ids: Vec<u32> = config.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_default_tier_bands() {
        let tiers = AssessmentConfig::default().tiers;
        assert_eq!((tiers.low.min, tiers.low.max), (0, 70));
        assert_eq!((tiers.medium.min, tiers.medium.max), (71, 85));
        assert_eq!((tiers.high.min, tiers.high.max), (86, 100));
    }

    #[test]
    fn test_classify_boundaries() {
        let tiers = AssessmentConfig::default().tiers;
        assert_eq!(tiers.classify(0).map(|(t, _)| t), Some(Tier::Low));
        assert_eq!(tiers.classify(70).map(|(t, _)| t), Some(Tier::Low));
        assert_eq!(tiers.classify(71).map(|(t, _)| t), Some(Tier::Medium));
        assert_eq!(tiers.classify(85).map(|(t, _)| t), Some(Tier::Medium));
        assert_eq!(tiers.classify(86).map(|(t, _)| t), Some(Tier::High));
        assert_eq!(tiers.classify(100).map(|(t, _)| t), Some(Tier::High));
        assert!(tiers.classify(101).is_none());
    }

    #[test]
    fn test_classify_returns_label() {
        let tiers = AssessmentConfig::default().tiers;
        let (_, threshold) = tiers.classify(86).unwrap();
        assert_eq!(threshold.label, "Madurez avanzada");
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Tier::Medium).unwrap(), "\"medium\"");
        assert_eq!(Tier::High.key(), "high");
    }
}
