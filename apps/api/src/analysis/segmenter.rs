//! Section segmentation: a single forward pass over document lines that splits
//! them into labeled sections using blank-line boundaries and the section catalog.

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::analysis::catalog::{SectionConfig, HEADER_SECTION};
use crate::analysis::contact::{ContactRegistry, Extracted};

/// A named, ordered run of lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    pub lines: Vec<String>,
}

/// Ordered section name → lines. Always starts with the `header` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSections {
    sections: Vec<Section>,
}

impl Default for ParsedSections {
    fn default() -> Self {
        Self {
            sections: vec![Section {
                name: HEADER_SECTION.to_string(),
                lines: Vec::new(),
            }],
        }
    }
}

impl ParsedSections {
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.lines.as_slice())
    }

    /// True if the section exists and holds at least one line.
    pub fn has_content(&self, name: &str) -> bool {
        self.get(name).is_some_and(|lines| !lines.is_empty())
    }

    /// All lines of all sections except `exclude`, newline-joined in document order.
    pub fn joined_text(&self, exclude: Option<&str>) -> String {
        self.sections
            .iter()
            .filter(|s| Some(s.name.as_str()) != exclude)
            .flat_map(|s| s.lines.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn open(&mut self, name: &str) {
        self.sections.push(Section {
            name: name.to_string(),
            lines: Vec::new(),
        });
    }

    fn push_line(&mut self, line: String) {
        if let Some(current) = self.sections.last_mut() {
            current.lines.push(line);
        }
    }

    fn current(&self) -> &str {
        self.sections
            .last()
            .map(|s| s.name.as_str())
            .unwrap_or(HEADER_SECTION)
    }
}

impl Serialize for ParsedSections {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.name, &section.lines)?;
        }
        map.end()
    }
}

/// How a body line is pre-processed, by the section it lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionRole {
    /// Leading section: contact fields and URLs are extracted.
    Header,
    /// `about` section: URLs are extracted.
    About,
    Generic,
}

/// Result of running a line through its section role.
#[derive(Debug)]
pub struct ProcessedLine {
    pub text: String,
    /// Contact info is exhausted: the header may be over, so try this line as a heading.
    pub header_ended: bool,
}

impl SectionRole {
    pub fn for_section(name: &str) -> Self {
        match name {
            HEADER_SECTION => SectionRole::Header,
            "about" => SectionRole::About,
            _ => SectionRole::Generic,
        }
    }

    pub fn process(
        self,
        line: &str,
        registry: &ContactRegistry,
        extracted: &mut Extracted,
    ) -> ProcessedLine {
        let mut text = line.to_string();
        let mut header_ended = false;

        if self == SectionRole::Header {
            let resolved = registry.extract_contacts(&mut text, &mut extracted.contact_info);
            header_ended = !extracted.contact_info.is_empty() && resolved == 0;
        }
        if matches!(self, SectionRole::Header | SectionRole::About) {
            registry.extract_urls(&mut text, &mut extracted.urls);
        }
        if text.len() != line.len() {
            text = text.trim().to_string();
        }

        ProcessedLine { text, header_ended }
    }
}

/// Output of one segmentation pass.
#[derive(Debug, Clone, Default)]
pub struct Segmentation {
    pub sections: ParsedSections,
    pub extracted: Extracted,
}

/// Splits document lines into sections. Stateless between calls.
pub struct Segmenter<'a> {
    config: &'a SectionConfig,
    registry: &'a ContactRegistry,
}

impl<'a> Segmenter<'a> {
    pub fn new(config: &'a SectionConfig, registry: &'a ContactRegistry) -> Self {
        Self { config, registry }
    }

    /// Segments `lines` in one pass. With `extract_extra`, header and about lines
    /// are routed through contact/URL extraction before being stored.
    pub fn segment<S: AsRef<str>>(&self, lines: &[S], extract_extra: bool) -> Segmentation {
        let mut out = Segmentation::default();
        let mut expect_heading = true;

        for line in lines {
            let line = line.as_ref();
            if line.trim().is_empty() {
                expect_heading = true;
                continue;
            }

            if expect_heading {
                expect_heading = false;
                if self.try_open(&mut out.sections, line) {
                    continue;
                }
            }

            if !extract_extra {
                out.sections.push_line(line.to_string());
                continue;
            }

            let role = SectionRole::for_section(out.sections.current());
            let processed = role.process(line, self.registry, &mut out.extracted);
            if processed.header_ended && self.try_open(&mut out.sections, &processed.text) {
                continue;
            }
            // A line emptied by extraction carries nothing left to store.
            if !processed.text.trim().is_empty() {
                out.sections.push_line(processed.text);
            }
        }

        debug!(
            sections = out.sections.len(),
            contacts = out.extracted.contact_info.len(),
            urls = out.extracted.urls.as_slice().len(),
            "segmentation finished"
        );
        out
    }

    fn try_open(&self, sections: &mut ParsedSections, line: &str) -> bool {
        let Some(name) = self
            .config
            .catalog
            .match_heading(line, |canonical| sections.contains(canonical))
        else {
            return false;
        };
        debug!(section = name, "section opened");
        sections.open(name);
        true
    }
}
