//! The option lists offered by the lesson form, keyed by teaching modality.
//!
//! Each modality has its own curricular components, grades and time
//! presets. Early childhood works with "fields of experience" and much
//! longer periods than the secondary levels.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::request::{DetailLevel, LessonPlanRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Modality {
    #[serde(rename = "educacao_infantil")]
    EarlyChildhood,
    #[serde(rename = "ensino_fundamental")]
    Elementary,
    #[serde(rename = "ensino_medio")]
    HighSchool,
}

/// A labelled numeric preset, e.g. `"50 min (Hora-aula padrão)"` → 50.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeOption {
    pub label: &'static str,
    pub value: u32,
}

impl Modality {
    pub const ALL: [Modality; 3] = [
        Modality::EarlyChildhood,
        Modality::Elementary,
        Modality::HighSchool,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Modality::EarlyChildhood => "educacao_infantil",
            Modality::Elementary => "ensino_fundamental",
            Modality::HighSchool => "ensino_medio",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Modality::EarlyChildhood => "Educação Infantil",
            Modality::Elementary => "Ensino Fundamental",
            Modality::HighSchool => "Ensino Médio",
        }
    }

    pub fn from_id(id: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|m| m.id() == id)
            .ok_or_else(|| CoreError::UnknownModality(id.to_string()))
    }

    pub fn curricular_components(&self) -> &'static [&'static str] {
        match self {
            Modality::EarlyChildhood => &["Campos de Experiências"],
            Modality::Elementary => &[
                "Língua Portuguesa",
                "Arte",
                "Educação Física",
                "Língua Inglesa",
                "Matemática",
                "Ciências",
                "Geografia",
                "História",
                "Ensino Religioso",
            ],
            Modality::HighSchool => &[
                "Língua Portuguesa",
                "Literatura",
                "Língua Inglesa",
                "Arte",
                "Educação Física",
                "Matemática",
                "Física",
                "Química",
                "Biologia",
                "História",
                "Geografia",
                "Sociologia",
                "Filosofia",
            ],
        }
    }

    pub fn grades(&self) -> &'static [&'static str] {
        match self {
            Modality::EarlyChildhood => &[
                "Berçário I (0 a 1 ano)",
                "Berçário II (1 a 2 anos)",
                "Maternal I (2 a 3 anos)",
                "Maternal II (3 a 4 anos)",
                "Pré-escola I (4 a 5 anos)",
                "Pré-escola II (5 a 6 anos)",
            ],
            Modality::Elementary => &[
                "1º Ano", "2º Ano", "3º Ano", "4º Ano", "5º Ano", "6º Ano", "7º Ano", "8º Ano",
                "9º Ano",
            ],
            Modality::HighSchool => &["1ª Série", "2ª Série", "3ª Série"],
        }
    }

    pub fn durations(&self) -> &'static [TimeOption] {
        match self {
            Modality::EarlyChildhood => &[
                TimeOption { label: "30 min (Atividade curta/Rotina)", value: 30 },
                TimeOption { label: "45 min (Atividade padrão)", value: 45 },
                TimeOption { label: "60 min (1 hora)", value: 60 },
                TimeOption { label: "4 horas (Período parcial)", value: 240 },
                TimeOption { label: "7 horas (Período integral)", value: 420 },
            ],
            Modality::Elementary => &[
                TimeOption { label: "45 min (Hora-aula curta)", value: 45 },
                TimeOption { label: "50 min (Hora-aula padrão)", value: 50 },
                TimeOption { label: "60 min (Hora relógio)", value: 60 },
            ],
            Modality::HighSchool => &[
                TimeOption { label: "45 min (Hora-aula noturno/curta)", value: 45 },
                TimeOption { label: "50 min (Hora-aula padrão)", value: 50 },
                TimeOption { label: "100 min (Bloco duplo)", value: 100 },
            ],
        }
    }

    pub fn lesson_counts(&self) -> &'static [TimeOption] {
        match self {
            Modality::EarlyChildhood => &[
                TimeOption { label: "1 momento/atividade", value: 1 },
                TimeOption { label: "Sequência de 3 atividades", value: 3 },
                TimeOption { label: "5 atividades (Semana)", value: 5 },
            ],
            Modality::Elementary => &[
                TimeOption { label: "1 aula (Isolada)", value: 1 },
                TimeOption { label: "2 aulas (Geminada/Bloco)", value: 2 },
                TimeOption { label: "3 aulas", value: 3 },
                TimeOption { label: "4 aulas (Semana padrão)", value: 4 },
                TimeOption { label: "5 aulas (Semana intensiva)", value: 5 },
            ],
            Modality::HighSchool => &[
                TimeOption { label: "1 aula", value: 1 },
                TimeOption { label: "2 aulas (Geminada)", value: 2 },
                TimeOption { label: "3 aulas (Carga horária estendida)", value: 3 },
                TimeOption { label: "4 aulas (Semana de área)", value: 4 },
                TimeOption { label: "5 aulas", value: 5 },
            ],
        }
    }

    /// The request a freshly selected modality starts from: first option of
    /// every list, an empty topic and `Complete` detail.
    pub fn default_request(&self) -> LessonPlanRequest {
        LessonPlanRequest {
            modality: self.display_name().to_string(),
            curricular_component: self.curricular_components()[0].to_string(),
            grade: self.grades()[0].to_string(),
            topic: String::new(),
            lesson_duration_min: self.durations()[0].value,
            lesson_count: self.lesson_counts()[0].value,
            detail_level: DetailLevel::Complete,
        }
    }

    /// Whether the component, grade and time presets of `request` are all
    /// offered by this modality.
    pub fn accepts(&self, request: &LessonPlanRequest) -> bool {
        self.curricular_components()
            .contains(&request.curricular_component.as_str())
            && self.grades().contains(&request.grade.as_str())
            && self
                .durations()
                .iter()
                .any(|d| d.value == request.lesson_duration_min)
            && self
                .lesson_counts()
                .iter()
                .any(|c| c.value == request.lesson_count)
    }
}
