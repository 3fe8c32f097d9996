use crate::error::CatalogError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque record identifier.
///
/// The service hands out numeric ids for records it created itself, while
/// records created from this client carry a UUID string. Both shapes travel
/// as-is on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnippetId {
    Number(i64),
    Text(String),
}

impl SnippetId {
    /// Fresh client-scoped identifier, unique independent of the service
    pub fn generate() -> Self {
        SnippetId::Text(Uuid::new_v4().to_string())
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnippetId::Number(n) => write!(f, "{}", n),
            SnippetId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSnippet {
    pub id: SnippetId,
    #[serde(deserialize_with = "slip_no_from_wire")]
    pub slip_no: String,
    pub question: String,
    pub language: String,
    pub code: String,
}

impl CodeSnippet {
    pub fn language_kind(&self) -> SnippetLanguage {
        SnippetLanguage::from_label(&self.language)
    }

    pub fn get_line_count(&self) -> usize {
        self.code.lines().count()
    }
}

/// Slip numbers are labels, but older records store them as JSON numbers.
fn slip_no_from_wire<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum WireSlipNo {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match WireSlipNo::deserialize(deserializer)? {
        WireSlipNo::Text(text) => text,
        WireSlipNo::Number(number) => number.to_string(),
    })
}

/// The four fields a user fills in to create a record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnippetDraft {
    pub slip_no: String,
    pub question: String,
    pub language: String,
    pub code: String,
}

impl SnippetDraft {
    pub const FIELD_NAMES: [&'static str; 4] = ["slip no", "question", "language", "code"];

    /// Fails on the first empty field, in form order.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let fields = [&self.slip_no, &self.question, &self.language, &self.code];
        for (value, field) in fields.iter().zip(Self::FIELD_NAMES) {
            if value.is_empty() {
                return Err(CatalogError::Validation { field });
            }
        }
        Ok(())
    }

    /// Validates the draft and turns it into a record with a new client id
    pub fn into_snippet(self) -> Result<CodeSnippet, CatalogError> {
        self.validate()?;
        Ok(CodeSnippet {
            id: SnippetId::generate(),
            slip_no: self.slip_no,
            question: self.question,
            language: self.language,
            code: self.code,
        })
    }

    pub fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.slip_no),
            1 => Some(&mut self.question),
            2 => Some(&mut self.language),
            3 => Some(&mut self.code),
            _ => None,
        }
    }

    pub fn field(&self, index: usize) -> Option<&str> {
        match index {
            0 => Some(&self.slip_no),
            1 => Some(&self.question),
            2 => Some(&self.language),
            3 => Some(&self.code),
            _ => None,
        }
    }
}

/// Best-effort reading of the free-text language label, used for
/// highlighting and display only. The stored label is never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SnippetLanguage {
    Rust,
    JavaScript,
    TypeScript,
    Python,
    Go,
    Java,
    C,
    Cpp,
    CSharp,
    PHP,
    Ruby,
    Kotlin,
    HTML,
    CSS,
    SQL,
    Bash,
    Json,
    Xml,
    Markdown,
    Other(String),
}

impl SnippetLanguage {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "rust" | "rs" => SnippetLanguage::Rust,
            "javascript" | "js" | "node" => SnippetLanguage::JavaScript,
            "typescript" | "ts" => SnippetLanguage::TypeScript,
            "python" | "py" | "python3" => SnippetLanguage::Python,
            "go" | "golang" => SnippetLanguage::Go,
            "java" => SnippetLanguage::Java,
            "c" => SnippetLanguage::C,
            "c++" | "cpp" | "cc" | "cxx" => SnippetLanguage::Cpp,
            "c#" | "csharp" | "cs" => SnippetLanguage::CSharp,
            "php" => SnippetLanguage::PHP,
            "ruby" | "rb" => SnippetLanguage::Ruby,
            "kotlin" | "kt" => SnippetLanguage::Kotlin,
            "html" | "htm" => SnippetLanguage::HTML,
            "css" => SnippetLanguage::CSS,
            "sql" => SnippetLanguage::SQL,
            "bash" | "sh" | "shell" => SnippetLanguage::Bash,
            "json" => SnippetLanguage::Json,
            "xml" => SnippetLanguage::Xml,
            "markdown" | "md" => SnippetLanguage::Markdown,
            _ => SnippetLanguage::Other(label.trim().to_string()),
        }
    }

    /// Token syntect uses to look up a syntax definition
    pub fn syntax_token(&self) -> &str {
        match self {
            SnippetLanguage::Rust => "rs",
            SnippetLanguage::JavaScript => "js",
            SnippetLanguage::TypeScript => "ts",
            SnippetLanguage::Python => "py",
            SnippetLanguage::Go => "go",
            SnippetLanguage::Java => "java",
            SnippetLanguage::C => "c",
            SnippetLanguage::Cpp => "cpp",
            SnippetLanguage::CSharp => "cs",
            SnippetLanguage::PHP => "php",
            SnippetLanguage::Ruby => "rb",
            SnippetLanguage::Kotlin => "kt",
            SnippetLanguage::HTML => "html",
            SnippetLanguage::CSS => "css",
            SnippetLanguage::SQL => "sql",
            SnippetLanguage::Bash => "sh",
            SnippetLanguage::Json => "json",
            SnippetLanguage::Xml => "xml",
            SnippetLanguage::Markdown => "md",
            SnippetLanguage::Other(label) => label,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            SnippetLanguage::Rust => "Rust",
            SnippetLanguage::JavaScript => "JavaScript",
            SnippetLanguage::TypeScript => "TypeScript",
            SnippetLanguage::Python => "Python",
            SnippetLanguage::Go => "Go",
            SnippetLanguage::Java => "Java",
            SnippetLanguage::C => "C",
            SnippetLanguage::Cpp => "C++",
            SnippetLanguage::CSharp => "C#",
            SnippetLanguage::PHP => "PHP",
            SnippetLanguage::Ruby => "Ruby",
            SnippetLanguage::Kotlin => "Kotlin",
            SnippetLanguage::HTML => "HTML",
            SnippetLanguage::CSS => "CSS",
            SnippetLanguage::SQL => "SQL",
            SnippetLanguage::Bash => "Bash",
            SnippetLanguage::Json => "JSON",
            SnippetLanguage::Xml => "XML",
            SnippetLanguage::Markdown => "Markdown",
            SnippetLanguage::Other(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_numeric_slip_no_and_id() {
        let json = r#"{"id": 1718000000000, "slip_no": 5, "question": "sum of two numbers", "language": "java", "code": "class A {}\n"}"#;
        let snippet: CodeSnippet = serde_json::from_str(json).unwrap();

        assert_eq!(snippet.id, SnippetId::Number(1718000000000));
        assert_eq!(snippet.slip_no, "5");
        assert_eq!(snippet.code, "class A {}\n");
    }

    #[test]
    fn decodes_string_id_and_slip_no() {
        let json = r#"{"id": "abc-1", "slip_no": "12B", "question": "q", "language": "python", "code": "print(1)"}"#;
        let snippet: CodeSnippet = serde_json::from_str(json).unwrap();

        assert_eq!(snippet.id, SnippetId::Text("abc-1".to_string()));
        assert_eq!(snippet.slip_no, "12B");
    }

    #[test]
    fn encodes_wire_field_names() {
        let snippet = CodeSnippet {
            id: SnippetId::Number(7),
            slip_no: "3".to_string(),
            question: "q".to_string(),
            language: "go".to_string(),
            code: "package main".to_string(),
        };
        let value = serde_json::to_value(&snippet).unwrap();

        assert_eq!(value["id"], 7);
        assert_eq!(value["slip_no"], "3");
        assert_eq!(value["language"], "go");
    }

    #[test]
    fn draft_reports_first_empty_field() {
        let draft = SnippetDraft {
            slip_no: "1".to_string(),
            question: String::new(),
            language: String::new(),
            code: "x".to_string(),
        };

        assert_eq!(
            draft.validate(),
            Err(CatalogError::Validation { field: "question" })
        );
    }

    #[test]
    fn valid_draft_gets_a_fresh_text_id() {
        let draft = SnippetDraft {
            slip_no: "1".to_string(),
            question: "hello world".to_string(),
            language: "rust".to_string(),
            code: "fn main() {}".to_string(),
        };
        let first = draft.clone().into_snippet().unwrap();
        let second = draft.into_snippet().unwrap();

        assert!(matches!(first.id, SnippetId::Text(_)));
        assert_ne!(first.id, second.id);
        assert_eq!(first.question, "hello world");
    }

    #[test]
    fn language_label_is_read_loosely() {
        assert_eq!(SnippetLanguage::from_label(" Java "), SnippetLanguage::Java);
        assert_eq!(SnippetLanguage::from_label("C++"), SnippetLanguage::Cpp);
        assert_eq!(
            SnippetLanguage::from_label("cobol").display_name(),
            "cobol"
        );
    }
}
