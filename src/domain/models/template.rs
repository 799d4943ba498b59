//! Compiled task context.

/// Sections of a compiled document, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Codebase,
    Rules,
    Task,
    Instructions,
    Prompt,
}

impl SectionKind {
    /// Render order. Instructions and prompt together form the persona section.
    pub const ORDER: [Self; 5] = [
        Self::Codebase,
        Self::Rules,
        Self::Task,
        Self::Instructions,
        Self::Prompt,
    ];

    /// Tag name used as the section delimiter.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Codebase => "CODEBASE",
            Self::Rules => "RULES",
            Self::Task => "TASK",
            Self::Instructions => "INSTRUCTIONS",
            Self::Prompt => "PROMPT",
        }
    }
}

/// A single document holding everything a provider needs for one request.
///
/// Produced per request and consumed once by the completion service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledTemplate {
    /// Persona the document was compiled for.
    pub persona: String,
    /// Rendered document text.
    pub content: String,
}

impl CompiledTemplate {
    pub fn new(persona: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            persona: persona.into(),
            content: content.into(),
        }
    }

    /// Inner text of a section, without the surrounding tags or indentation.
    pub fn section(&self, kind: SectionKind) -> Option<&str> {
        let open = format!("<{}>", kind.tag());
        let close = format!("</{}>", kind.tag());
        let start = self.content.find(&open)? + open.len();
        let end = self.content[start..].rfind(&close)? + start;
        Some(self.content[start..end].trim())
    }
}
