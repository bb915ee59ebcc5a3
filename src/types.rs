//! Records exchanged with the external API.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============ Identifiers ============

/// Server-assigned identifier.
///
/// json-server emits numeric ids in older releases and string ids in newer
/// ones; both are accepted and rendered verbatim in URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

// ============ Professionals ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Professional {
    pub id: RecordId,
    pub nome: String,
    pub cargo: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProfessional {
    pub nome: String,
    pub cargo: String,
    pub email: String,
}

impl NewProfessional {
    pub fn new(nome: impl Into<String>, cargo: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            nome: nome.into(),
            cargo: cargo.into(),
            email: email.into(),
        }
    }
}

/// Partial update. Absent fields are left out of the body so the server keeps them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cargo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

// ============ Students ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: RecordId,
    #[serde(default)]
    pub nome: Option<String>,
}

impl Student {
    /// First whitespace-separated word of the name, used as a search term.
    pub fn first_name_token(&self) -> Option<&str> {
        self.nome.as_deref()?.split_whitespace().next()
    }
}

// ============ Engagements ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEngagement {
    pub aluno_id: RecordId,
    pub profissional_id: RecordId,
    pub data_atendimento: String,
    pub tipo_atendimento: String,
    pub tecnologia_assistiva_id: RecordId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_id_accepts_numbers_and_strings() {
        let n: RecordId = serde_json::from_value(json!(7)).unwrap();
        let s: RecordId = serde_json::from_value(json!("a1b2")).unwrap();
        assert_eq!(n, RecordId::Number(7));
        assert_eq!(s, RecordId::Text("a1b2".to_string()));
        assert_eq!(n.to_string(), "7");
        assert_eq!(s.to_string(), "a1b2");
    }

    #[test]
    fn test_patch_omits_absent_fields() {
        let patch = ProfessionalPatch {
            nome: Some("Nome Atualizado".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).unwrap(),
            json!({"nome": "Nome Atualizado"})
        );
    }

    #[test]
    fn test_first_name_token() {
        let student = Student {
            id: 1.into(),
            nome: Some("  Maria   Souza ".to_string()),
        };
        assert_eq!(student.first_name_token(), Some("Maria"));

        let blank = Student {
            id: 2.into(),
            nome: Some("   ".to_string()),
        };
        assert_eq!(blank.first_name_token(), None);

        let missing: Student = serde_json::from_value(json!({"id": 4, "nome": null})).unwrap();
        assert_eq!(missing.first_name_token(), None);
    }

    #[test]
    fn test_student_ignores_extra_fields() {
        let student: Student = serde_json::from_value(json!({
            "id": "3",
            "nome": "Ana Lima",
            "turma": "5A"
        }))
        .unwrap();
        assert_eq!(student.id, RecordId::from("3"));
        assert_eq!(student.nome.as_deref(), Some("Ana Lima"));
    }
}
