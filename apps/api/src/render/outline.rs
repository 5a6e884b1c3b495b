//! Report outline — the content structure every renderer lays out.
//!
//! PDF, DOCX and email each build this from the same `ReportContext` and then
//! render it in their own container. Nothing here is format-specific.

use crate::numerology::{CoreNumber, NumerologyReport};
use crate::render::ReportContext;

pub const REPORT_TITLE: &str = "Numerology Report";
pub const RECOMMENDATIONS_HEADING: &str = "Suggested next steps";

/// One core-number section: title, value and description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineSection {
    pub title: &'static str,
    pub number: CoreNumber,
    pub description: String,
}

impl OutlineSection {
    /// Heading text, e.g. `Life Path Number: 3`.
    pub fn heading(&self) -> String {
        format!("{}: {}", self.title, self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutline {
    pub title: &'static str,
    pub full_name: String,
    pub birth_date: String,
    pub sections: Vec<OutlineSection>,
    pub recommendations_heading: &'static str,
    pub recommendations: Vec<String>,
}

impl ReportOutline {
    pub fn build(ctx: &ReportContext) -> Self {
        ReportOutline {
            title: REPORT_TITLE,
            full_name: ctx.full_name.clone(),
            birth_date: ctx.birth_date.clone(),
            sections: sections(&ctx.report),
            recommendations_heading: RECOMMENDATIONS_HEADING,
            recommendations: ctx.report.recommendations.clone(),
        }
    }

    pub fn prepared_for(&self) -> String {
        format!("Prepared for: {}", self.full_name)
    }

    pub fn date_of_birth(&self) -> String {
        format!("Date of birth: {}", self.birth_date)
    }
}

/// The four sections in fixed display order.
fn sections(report: &NumerologyReport) -> Vec<OutlineSection> {
    vec![
        OutlineSection {
            title: "Life Path Number",
            number: report.life_path_number,
            description: report.life_path_description.clone(),
        },
        OutlineSection {
            title: "Expression Number",
            number: report.expression_number,
            description: report.expression_description.clone(),
        },
        OutlineSection {
            title: "Soul Urge Number",
            number: report.soul_urge_number,
            description: report.soul_urge_description.clone(),
        },
        OutlineSection {
            title: "Personality Number",
            number: report.personality_number,
            description: report.personality_description.clone(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::sample_context;

    #[test]
    fn test_outline_mirrors_report() {
        let ctx = sample_context();
        let outline = ReportOutline::build(&ctx);

        assert_eq!(outline.sections.len(), 4);
        assert_eq!(outline.sections[0].number, ctx.report.life_path_number);
        assert_eq!(
            outline.sections[3].description,
            ctx.report.personality_description
        );
        assert_eq!(outline.recommendations, ctx.report.recommendations);
    }

    #[test]
    fn test_heading_format() {
        let outline = ReportOutline::build(&sample_context());
        assert_eq!(outline.sections[0].heading(), "Life Path Number: 3");
        assert_eq!(outline.sections[3].heading(), "Personality Number: 33");
        assert_eq!(outline.date_of_birth(), "Date of birth: May 15, 1990");
    }
}
